#![forbid(unsafe_code)]
//! Turns raw window input into simulation [`Command`]s: keyboard edges go
//! through an [`ActionMap`], pointer and touch events through a
//! [`PointerTracker`].

use ahash::{AHashMap, AHashSet};
use polybounce_core::{Command, FrameRate, Shape, Simulation};
use serde::{Deserialize, Serialize};

pub mod pointer;

pub use pointer::{screen_to_world, PointerTracker, ScreenRect, TouchPhase};

pub const SCALE_STEP: f32 = 0.1;
pub const ROTATION_STEP: f32 = 0.5;
pub const GRAVITY_STEP: f32 = 0.0005;
pub const MOTION_STEP: f32 = 0.5;

#[derive(Default, Debug, Clone)]
pub struct InputState {
    // Keys are identified by string names (e.g., "b", "ArrowUp", "F1")
    pub pressed: AHashSet<String>,
    pub just_pressed: AHashSet<String>,
    pub just_released: AHashSet<String>,
    prev_pressed: AHashSet<String>,
    // Mouse
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub lmb_down: bool,
    pub lmb_just_pressed: bool,
    pub lmb_just_released: bool,
    prev_lmb_down: bool,
}

impl InputState {
    pub fn update_from_keys<I: IntoIterator<Item = String>>(&mut self, keys: I) {
        let current: AHashSet<String> = keys.into_iter().collect();
        // compute edges
        self.just_pressed = current.difference(&self.prev_pressed).cloned().collect();
        self.just_released = self.prev_pressed.difference(&current).cloned().collect();
        self.pressed = current.clone();
        self.prev_pressed = current;
    }

    /// Single key-down event. A held key (OS auto-repeat) is not a new edge.
    pub fn press_key(&mut self, key: &str) {
        let mut keys = self.pressed.clone();
        keys.insert(key.to_string());
        self.update_from_keys(keys);
    }

    pub fn release_key(&mut self, key: &str) {
        let mut keys = self.pressed.clone();
        keys.remove(key);
        self.update_from_keys(keys);
    }

    pub fn update_mouse(&mut self, x: f32, y: f32, lmb_down_now: bool) {
        self.mouse_x = x;
        self.mouse_y = y;
        self.lmb_just_pressed = lmb_down_now && !self.prev_lmb_down;
        self.lmb_just_released = !lmb_down_now && self.prev_lmb_down;
        self.lmb_down = lmb_down_now;
        self.prev_lmb_down = lmb_down_now;
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }
    pub fn is_just_pressed(&self, key: &str) -> bool {
        self.just_pressed.contains(key)
    }
}

/// Every control the keyboard can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SelectTriangle,
    SelectSquare,
    SelectCircle,
    SelectCustom,
    FewerVertices,
    MoreVertices,
    ShrinkScale,
    GrowScale,
    SlowerRotation,
    FasterRotation,
    StartBounce,
    StopBounce,
    ToggleGravity,
    ToggleGravityAcceleration,
    StrongerGravity,
    WeakerGravity,
    FasterMotion,
    SlowerMotion,
    TargetFps30,
    TargetFps60,
    TargetFps120,
    TargetFpsUnlimited,
}

#[derive(Default, Debug, Clone)]
pub struct ActionMap {
    // action -> keys that trigger it
    pub bindings: AHashMap<Action, Vec<String>>,
}

impl ActionMap {
    pub fn default_bindings() -> Self {
        let mut map = Self::default();
        let defaults = [
            (Action::SelectTriangle, "1"),
            (Action::SelectSquare, "2"),
            (Action::SelectCircle, "3"),
            (Action::SelectCustom, "4"),
            (Action::FewerVertices, "["),
            (Action::MoreVertices, "]"),
            (Action::ShrinkScale, "-"),
            (Action::GrowScale, "="),
            (Action::SlowerRotation, ","),
            (Action::FasterRotation, "."),
            (Action::StartBounce, "b"),
            (Action::StopBounce, "s"),
            (Action::ToggleGravity, "g"),
            (Action::ToggleGravityAcceleration, "a"),
            (Action::StrongerGravity, "ArrowUp"),
            (Action::WeakerGravity, "ArrowDown"),
            (Action::FasterMotion, "PageUp"),
            (Action::SlowerMotion, "PageDown"),
            (Action::TargetFps30, "F1"),
            (Action::TargetFps60, "F2"),
            (Action::TargetFps120, "F3"),
            (Action::TargetFpsUnlimited, "F4"),
        ];
        for (action, key) in defaults {
            map.bind(action, key);
        }
        map
    }

    pub fn bind(&mut self, action: Action, key: &str) {
        self.bindings.entry(action).or_default().push(key.to_string());
    }

    pub fn action_just_pressed(&self, input: &InputState, action: Action) -> bool {
        if let Some(keys) = self.bindings.get(&action) {
            keys.iter().any(|k| input.is_just_pressed(k))
        } else {
            false
        }
    }

    /// Actions whose keys went down this frame, in a stable order.
    pub fn just_pressed_actions(&self, input: &InputState) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .bindings
            .keys()
            .copied()
            .filter(|action| self.action_just_pressed(input, *action))
            .collect();
        actions.sort();
        actions
    }
}

/// Resolves a keyboard action against the current simulation values. Range
/// clamping is left to the simulation.
pub fn command_for(action: Action, sim: &Simulation) -> Command {
    let transform = sim.transform();
    let gravity = sim.gravity();
    match action {
        Action::SelectTriangle => Command::SetShape(Shape::Triangle),
        Action::SelectSquare => Command::SetShape(Shape::Square),
        Action::SelectCircle => Command::SetShape(Shape::Circle),
        Action::SelectCustom => Command::SetShape(Shape::custom(sim.custom_vertices())),
        Action::FewerVertices => {
            Command::SetCustomVertices(sim.custom_vertices().saturating_sub(1))
        }
        Action::MoreVertices => Command::SetCustomVertices(sim.custom_vertices() + 1),
        Action::ShrinkScale => Command::SetScale(transform.scale - SCALE_STEP),
        Action::GrowScale => Command::SetScale(transform.scale + SCALE_STEP),
        Action::SlowerRotation => Command::SetRotationSpeed(sim.rotation_speed() - ROTATION_STEP),
        Action::FasterRotation => Command::SetRotationSpeed(sim.rotation_speed() + ROTATION_STEP),
        Action::StartBounce => Command::StartBounce,
        Action::StopBounce => Command::StopBounce,
        Action::ToggleGravity => Command::ToggleGravity,
        Action::ToggleGravityAcceleration => Command::ToggleGravityAcceleration,
        Action::StrongerGravity => Command::SetGravityStrength(gravity.strength + GRAVITY_STEP),
        Action::WeakerGravity => Command::SetGravityStrength(gravity.strength - GRAVITY_STEP),
        Action::FasterMotion => Command::SetMotionSpeed(sim.motion_speed() + MOTION_STEP),
        Action::SlowerMotion => Command::SetMotionSpeed(sim.motion_speed() - MOTION_STEP),
        Action::TargetFps30 => Command::SetFrameRate(FrameRate::Capped(30)),
        Action::TargetFps60 => Command::SetFrameRate(FrameRate::Capped(60)),
        Action::TargetFps120 => Command::SetFrameRate(FrameRate::Capped(120)),
        Action::TargetFpsUnlimited => Command::SetFrameRate(FrameRate::Unlimited),
    }
}
