use anyhow::Context;
use clap::Parser;
use polybounce::{run_app, Cli};
use polybounce_core::Simulation;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve().context("loading configuration")?;
    log::info!(
        "starting with {} at {} fps target, seed {}",
        config.shape.label(),
        config.frame_rate(),
        config.seed
    );

    let sim = Simulation::new(config.sim_settings()).context("building simulation")?;
    run_app(config.window_config(), sim, config.action_map()).context("running event loop")
}
