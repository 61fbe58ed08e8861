//! Single-body bounce simulation: gravity, wall collisions with energy loss
//! and quadratic air drag. Constants are tuned for a 60 Hz reference, not SI units.

use crate::rng::RngStream;
use crate::transform::Transform;
use crate::utils::Vec2;
use crate::viewport::Bounds;

pub const BOUNCE_COEFFICIENT: f32 = 0.75;
pub const AIR_RESISTANCE: f32 = 0.003;
/// Half-width of the velocity jitter added to the other axis on a bounce.
pub const BOUNCE_JITTER: f32 = 0.0005;
/// Velocities are expressed per 1/60 s frame.
pub const REFERENCE_HZ: f32 = 60.0;

/// Gravity strength shown as 100%.
pub const EARTH_GRAVITY: f32 = 0.001;
pub const DEFAULT_GRAVITY_STRENGTH: f32 = 0.001;
pub const MAX_GRAVITY_STRENGTH: f32 = 0.005;
pub const DEFAULT_GRAVITY_ACCELERATION: f32 = 0.00005;

pub const MIN_MOTION_SPEED: f32 = 0.1;
pub const MAX_MOTION_SPEED: f32 = 20.0;

const LAUNCH_SPREAD: f32 = 0.02;
const LAUNCH_UPWARD_MIN: f32 = 0.02;
const LAUNCH_UPWARD_MAX: f32 = 0.07;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub bounce_coefficient: f32,
    pub air_resistance: f32,
    pub bounce_jitter: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            bounce_coefficient: BOUNCE_COEFFICIENT,
            air_resistance: AIR_RESISTANCE,
            bounce_jitter: BOUNCE_JITTER,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub velocity: Vec2,
    pub is_auto_motion: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityConfig {
    pub enabled: bool,
    /// Strength currently applied.
    pub strength: f32,
    /// User-selected strength; `strength` returns here when acceleration stops.
    pub base_strength: f32,
    pub accelerating: bool,
    pub acceleration_rate: f32,
    pub max_strength: f32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: DEFAULT_GRAVITY_STRENGTH,
            base_strength: DEFAULT_GRAVITY_STRENGTH,
            accelerating: false,
            acceleration_rate: 0.0,
            max_strength: MAX_GRAVITY_STRENGTH,
        }
    }
}

impl GravityConfig {
    /// Flips gravity on or off. Turning it off also stops acceleration.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.accelerating = false;
        }
        self.enabled
    }

    /// Flips accelerating mode; a no-op while gravity is disabled.
    pub fn toggle_acceleration(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.accelerating = !self.accelerating;
        if self.accelerating {
            self.acceleration_rate = DEFAULT_GRAVITY_ACCELERATION;
        } else {
            self.strength = self.base_strength;
        }
        self.accelerating
    }

    /// Manual adjustment; cancels acceleration.
    pub fn set_strength(&mut self, strength: f32) {
        let strength = strength.clamp(0.0, self.max_strength);
        self.accelerating = false;
        self.strength = strength;
        self.base_strength = strength;
    }

    /// Strength as a percentage of [`EARTH_GRAVITY`].
    pub fn percentage(&self) -> i32 {
        (self.strength / EARTH_GRAVITY * 100.0).round() as i32
    }

    fn accelerate(&mut self, delta_seconds: f32) -> Option<f32> {
        if !(self.enabled && self.accelerating) {
            return None;
        }
        self.strength =
            (self.strength + self.acceleration_rate * delta_seconds).min(self.max_strength);
        Some(self.strength)
    }
}

/// What happened during one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub bounced_x: bool,
    pub bounced_y: bool,
    /// New gravity strength when accelerating gravity changed it.
    pub gravity_strength: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct PhysicsEngine {
    pub params: PhysicsParams,
    pub motion: MotionState,
    pub gravity: GravityConfig,
}

impl PhysicsEngine {
    pub fn new(params: PhysicsParams, gravity: GravityConfig) -> Self {
        Self {
            params,
            motion: MotionState::default(),
            gravity,
        }
    }

    pub fn is_bouncing(&self) -> bool {
        self.motion.is_auto_motion
    }

    /// Idle -> Bouncing with a random launch velocity. Returns false if
    /// already bouncing.
    pub fn start(&mut self, rng: &mut RngStream) -> bool {
        if self.motion.is_auto_motion {
            return false;
        }
        let vx = rng.symmetric(LAUNCH_SPREAD);
        let vy = if self.gravity.enabled {
            rng.range_f32(LAUNCH_UPWARD_MIN, LAUNCH_UPWARD_MAX)
        } else {
            rng.symmetric(LAUNCH_SPREAD)
        };
        self.motion = MotionState {
            velocity: Vec2::new(vx, vy),
            is_auto_motion: true,
        };
        log::info!("bounce started, launch velocity ({vx:.4}, {vy:.4})");
        true
    }

    /// Bouncing -> Idle. Returns false if already idle.
    pub fn stop(&mut self) -> bool {
        if !self.motion.is_auto_motion {
            return false;
        }
        self.motion = MotionState::default();
        log::info!("bounce stopped");
        true
    }

    /// Advances the body by `delta_seconds`. Does nothing while idle or for a
    /// non-positive step.
    pub fn step(
        &mut self,
        transform: &mut Transform,
        bounds: Bounds,
        motion_speed: f32,
        delta_seconds: f32,
        rng: &mut RngStream,
    ) -> StepReport {
        let mut report = StepReport::default();
        if !self.motion.is_auto_motion || delta_seconds <= 0.0 {
            return report;
        }

        report.gravity_strength = self.gravity.accelerate(delta_seconds);
        let mut velocity = self.motion.velocity;
        if self.gravity.enabled {
            velocity.y -= self.gravity.strength * motion_speed * delta_seconds;
        }

        let mut position =
            transform.position + velocity * (delta_seconds * REFERENCE_HZ * motion_speed);
        let limit = bounds.limits(transform.scale);
        let coefficient = self.params.bounce_coefficient;
        let jitter = self.params.bounce_jitter;

        if let Some(clamped) = bounce_axis(position.x, &mut velocity.x, limit.x, coefficient) {
            position.x = clamped;
            velocity.y += rng.symmetric(jitter) * motion_speed;
            report.bounced_x = true;
        }
        if let Some(clamped) = bounce_axis(position.y, &mut velocity.y, limit.y, coefficient) {
            position.y = clamped;
            velocity.x += rng.symmetric(jitter) * motion_speed;
            report.bounced_y = true;
        }

        velocity.x = apply_air_drag(velocity.x, self.params.air_resistance, delta_seconds);
        velocity.y = apply_air_drag(velocity.y, self.params.air_resistance, delta_seconds);

        transform.position = position;
        self.motion.velocity = velocity;
        report
    }
}

/// Reflects `velocity` with energy loss if `position` lies beyond `±limit`.
/// Returns the clamped position when a bounce happened.
pub fn bounce_axis(
    position: f32,
    velocity: &mut f32,
    limit: f32,
    coefficient: f32,
) -> Option<f32> {
    if position > limit || position < -limit {
        *velocity *= -coefficient;
        Some(position.clamp(-limit, limit))
    } else {
        None
    }
}

/// Quadratic drag: the loss grows with the square of the speed.
pub fn apply_air_drag(velocity: f32, resistance: f32, delta_seconds: f32) -> f32 {
    if velocity == 0.0 {
        return 0.0;
    }
    velocity - velocity.signum() * velocity * velocity * resistance * delta_seconds
}

pub fn clamp_motion_speed(speed: f32) -> f32 {
    speed.clamp(MIN_MOTION_SPEED, MAX_MOTION_SPEED)
}
