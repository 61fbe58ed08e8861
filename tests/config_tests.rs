use clap::Parser;
use polybounce::config::{parse_frame_rate, AppConfig, Cli, ConfigError};
use polybounce_core::{FrameRate, Shape, Simulation};
use polybounce_input::{Action, InputState};

#[test]
fn empty_json_gives_defaults() {
    let config = AppConfig::from_json_str("{}").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.frame_rate(), FrameRate::Capped(60));
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = AppConfig::from_json_str(
        r#"{
            "shape": {"custom": 9},
            "target_fps": 120,
            "gravity": {"strength": 0.002},
            "key_bindings": {"space": "start_bounce"}
        }"#,
    )
    .unwrap();
    assert_eq!(config.shape, Shape::Custom(9));
    assert_eq!(config.frame_rate(), FrameRate::Capped(120));
    assert!(config.gravity.enabled);
    assert_eq!(config.gravity.strength, 0.002);
    assert_eq!(config.width, 800);

    let map = config.action_map();
    let mut input = InputState::default();
    input.press_key("space");
    assert_eq!(map.just_pressed_actions(&input), vec![Action::StartBounce]);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = AppConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = AppConfig::from_json_str(r#"{"scale": "big"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = AppConfig::load(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("here.json"));
}

#[test]
fn sanitized_clamps_out_of_range_values() {
    let mut config = AppConfig {
        width: 0,
        shape: Shape::Custom(500),
        custom_vertices: 1,
        scale: 50.0,
        rotation_speed: -3.0,
        motion_speed: f32::NAN,
        target_fps: Some(0),
        ..AppConfig::default()
    };
    config.gravity.strength = 1.0;
    config.gravity.enabled = false;
    config.gravity.accelerating = true;

    let config = config.sanitized();
    assert_eq!(config.width, 1);
    assert_eq!(config.shape, Shape::Custom(100));
    assert_eq!(config.custom_vertices, 3);
    assert_eq!(config.scale, 3.0);
    assert_eq!(config.rotation_speed, 0.0);
    assert_eq!(config.motion_speed, 1.0);
    assert_eq!(config.target_fps, None);
    assert_eq!(config.gravity.strength, config.gravity.max_strength);
    assert!(!config.gravity.accelerating);
}

#[test]
fn cli_flags_override_the_file() {
    let cli = Cli::try_parse_from([
        "polybounce",
        "--shape",
        "custom",
        "--vertices",
        "12",
        "--fps",
        "unlimited",
        "--seed",
        "7",
    ])
    .unwrap();
    let config = cli.apply(AppConfig::default()).unwrap();
    assert_eq!(config.shape, Shape::Custom(12));
    assert_eq!(config.custom_vertices, 12);
    assert_eq!(config.frame_rate(), FrameRate::Unlimited);
    assert_eq!(config.seed, 7);

    let cli = Cli::try_parse_from(["polybounce", "--vertices", "200"]).unwrap();
    let base = AppConfig {
        shape: Shape::Custom(5),
        ..AppConfig::default()
    };
    let config = cli.apply(base).unwrap();
    assert_eq!(config.shape, Shape::Custom(100));
}

#[test]
fn cli_rejects_bad_values() {
    assert!(Cli::try_parse_from(["polybounce", "--fps", "fast"]).is_err());
    let cli = Cli::try_parse_from(["polybounce", "--shape", "hexagon"]).unwrap();
    let err = cli.apply(AppConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownShape(name) if name == "hexagon"));
}

#[test]
fn frame_rate_argument_parsing() {
    assert_eq!(parse_frame_rate("30"), Ok(FrameRate::Capped(30)));
    assert_eq!(parse_frame_rate("Unlimited"), Ok(FrameRate::Unlimited));
    assert_eq!(parse_frame_rate("0"), Ok(FrameRate::Unlimited));
    assert!(parse_frame_rate("-5").is_err());
}

#[test]
fn settings_build_a_simulation() {
    let mut config = AppConfig::default();
    config.gravity.strength = 0.003;
    config.shape = Shape::Circle;
    let sim = Simulation::new(config.sim_settings()).unwrap();
    assert_eq!(sim.shape(), Shape::Circle);
    assert_eq!(sim.outline().len(), 51);
    assert_eq!(sim.gravity().strength, 0.003);
    assert_eq!(sim.gravity().base_strength, 0.003);
    assert_eq!(sim.frame_rate(), FrameRate::Capped(60));
}
