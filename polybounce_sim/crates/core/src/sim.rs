use crate::command::{Command, CommandQueue};
use crate::drag::DragState;
use crate::geometry::{self, clamp_vertex_count, GeometryError, Shape, DEFAULT_CUSTOM_VERTICES};
use crate::physics::{
    clamp_motion_speed, GravityConfig, MotionState, PhysicsEngine, PhysicsParams, StepReport,
};
use crate::rng::{RngService, RngStream, BOUNCE_STREAM, LAUNCH_STREAM};
use crate::scheduler::{FrameDecision, FrameRate, FrameScheduler};
use crate::transform::{clamp_rotation_speed, clamp_scale, Transform};
use crate::utils::Vec2;
use crate::viewport::{Bounds, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSettings {
    pub shape: Shape,
    /// Vertex count used when switching to the custom shape.
    pub custom_vertices: u32,
    pub scale: f32,
    pub rotation_speed: f32,
    pub motion_speed: f32,
    pub gravity: GravityConfig,
    pub frame_rate: FrameRate,
    pub seed: u64,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            shape: Shape::Triangle,
            custom_vertices: DEFAULT_CUSTOM_VERTICES,
            scale: 1.0,
            rotation_speed: 1.0,
            motion_speed: 1.0,
            gravity: GravityConfig::default(),
            frame_rate: FrameRate::Capped(60),
            seed: 0x5EED,
            viewport_width: 800,
            viewport_height: 600,
        }
    }
}

/// Output of one rendered tick, handed to the render adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub transform: Transform,
    /// Seconds since start; its fractional part drives the hue cycle.
    pub color_cycle_time: f32,
    pub delta_seconds: f32,
    /// The outline was regenerated and must be re-uploaded.
    pub outline_changed: bool,
    /// Achieved frames per second, reported about once a second.
    pub fps: Option<f64>,
    /// Gravity strength after accelerating gravity raised it this tick.
    pub gravity_strength: Option<f32>,
}

/// The whole mutable state of the demo. UI events arrive as [`Command`]s and
/// are applied at the start of the next rendered tick.
#[derive(Debug, Clone)]
pub struct Simulation {
    shape: Shape,
    custom_vertices: u32,
    outline: Vec<Vec2>,
    outline_dirty: bool,
    transform: Transform,
    rotation_speed: f32,
    motion_speed: f32,
    physics: PhysicsEngine,
    drag: DragState,
    viewport: Viewport,
    scheduler: FrameScheduler,
    queue: CommandQueue,
    launch_rng: RngStream,
    bounce_rng: RngStream,
}

impl Simulation {
    pub fn new(settings: SimSettings) -> Result<Self, GeometryError> {
        let shape = normalize_shape(settings.shape);
        let custom_vertices = match shape {
            Shape::Custom(n) => n,
            _ => clamp_vertex_count(settings.custom_vertices),
        };
        let outline = geometry::outline(shape)?;
        let rng = RngService::with_seed(settings.seed);
        let mut gravity = settings.gravity;
        gravity.max_strength = gravity.max_strength.max(0.0);
        gravity.strength = gravity.strength.clamp(0.0, gravity.max_strength);
        gravity.base_strength = gravity.strength;

        Ok(Self {
            shape,
            custom_vertices,
            outline,
            outline_dirty: true,
            transform: Transform {
                scale: clamp_scale(settings.scale),
                ..Transform::default()
            },
            rotation_speed: clamp_rotation_speed(settings.rotation_speed),
            motion_speed: clamp_motion_speed(settings.motion_speed),
            physics: PhysicsEngine::new(PhysicsParams::default(), gravity),
            drag: DragState::default(),
            viewport: Viewport::from_size(settings.viewport_width, settings.viewport_height),
            scheduler: FrameScheduler::new(settings.frame_rate),
            queue: CommandQueue::new(),
            launch_rng: rng.stream(LAUNCH_STREAM),
            bounce_rng: rng.stream(BOUNCE_STREAM),
        })
    }

    /// Queues a command for the next tick. Frame-rate changes only touch the
    /// scheduler's configuration and take effect immediately.
    pub fn submit(&mut self, command: Command) {
        match command {
            Command::SetFrameRate(rate) => self.scheduler.set_rate(rate),
            other => self.queue.push(other),
        }
    }

    /// Runs one display callback at `now_ms` (milliseconds since start).
    /// Returns `None` when the scheduler skips the callback.
    pub fn advance(&mut self, now_ms: f64) -> Option<FrameOutput> {
        let tick = match self.scheduler.poll(now_ms) {
            FrameDecision::Skip => return None,
            FrameDecision::Render(tick) => tick,
        };

        self.apply_pending();
        let report = self.step(tick.delta_seconds);
        let fps = self.scheduler.record_frame(now_ms);
        if let Some(fps) = fps {
            log::debug!("{fps:.1} fps (target {})", self.scheduler.rate());
        }

        Some(FrameOutput {
            transform: self.transform,
            color_cycle_time: (now_ms / 1000.0) as f32,
            delta_seconds: tick.delta_seconds,
            outline_changed: std::mem::take(&mut self.outline_dirty),
            fps,
            gravity_strength: report.gravity_strength,
        })
    }

    pub fn apply_pending(&mut self) {
        for command in self.queue.drain() {
            self.apply(command);
        }
    }

    /// Rotation always advances; the body only moves while bouncing.
    pub fn step(&mut self, delta_seconds: f32) -> StepReport {
        if delta_seconds <= 0.0 {
            return StepReport::default();
        }
        self.transform.advance_rotation(self.rotation_speed, delta_seconds);
        let bounds = self.bounds();
        self.physics.step(
            &mut self.transform,
            bounds,
            self.motion_speed,
            delta_seconds,
            &mut self.bounce_rng,
        )
    }

    pub fn apply(&mut self, command: Command) {
        log::debug!("apply {command:?}");
        match command {
            Command::SetShape(shape) => self.set_shape(shape),
            Command::SetCustomVertices(vertices) => {
                self.custom_vertices = clamp_vertex_count(vertices);
                if matches!(self.shape, Shape::Custom(_)) {
                    self.set_shape(Shape::Custom(self.custom_vertices));
                }
            }
            Command::SetScale(scale) => {
                self.transform.scale = clamp_scale(scale);
                self.constrain_position();
            }
            Command::SetRotationSpeed(speed) => self.rotation_speed = clamp_rotation_speed(speed),
            Command::SetMotionSpeed(speed) => self.motion_speed = clamp_motion_speed(speed),
            Command::SetGravityStrength(strength) => self.physics.gravity.set_strength(strength),
            Command::ToggleGravity => {
                let enabled = self.physics.gravity.toggle();
                log::info!("gravity {}", if enabled { "on" } else { "off" });
            }
            Command::ToggleGravityAcceleration => {
                let accelerating = self.physics.gravity.toggle_acceleration();
                log::info!("accelerating gravity {}", if accelerating { "on" } else { "off" });
            }
            Command::StartBounce => {
                self.physics.start(&mut self.launch_rng);
            }
            Command::StopBounce => {
                self.physics.stop();
            }
            Command::SetFrameRate(rate) => self.scheduler.set_rate(rate),
            Command::Resize { width, height } => {
                self.viewport.set_size(width, height);
                self.constrain_position();
            }
            Command::PointerPressed { world } => self.drag.press(world, self.transform.position),
            Command::PointerMoved { world, kind } => {
                let bounds = self.bounds();
                self.drag.drag_to(
                    world,
                    &mut self.transform,
                    &mut self.physics.motion,
                    bounds,
                    kind.drag_factor(),
                );
            }
            Command::PointerReleased => self.drag.release(),
        }
    }

    fn set_shape(&mut self, shape: Shape) {
        let shape = match shape {
            Shape::Custom(n) => {
                self.custom_vertices = clamp_vertex_count(n);
                Shape::Custom(self.custom_vertices)
            }
            other => other,
        };
        match geometry::outline(shape) {
            Ok(points) => {
                log::debug!("{} outline with {} points", shape.label(), points.len());
                self.shape = shape;
                self.outline = points;
                self.outline_dirty = true;
            }
            Err(err) => log::warn!("keeping {} outline: {err}", self.shape.label()),
        }
    }

    fn constrain_position(&mut self) {
        let bounds = self.bounds();
        self.transform.position = bounds.clamp(self.transform.position, self.transform.scale);
    }

    pub fn bounds(&self) -> Bounds {
        self.viewport.bounds()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn custom_vertices(&self) -> u32 {
        self.custom_vertices
    }

    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn motion(&self) -> MotionState {
        self.physics.motion
    }

    pub fn is_bouncing(&self) -> bool {
        self.physics.is_bouncing()
    }

    pub fn gravity(&self) -> GravityConfig {
        self.physics.gravity
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn motion_speed(&self) -> f32 {
        self.motion_speed
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.scheduler.rate()
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
        self.constrain_position();
    }
}

fn normalize_shape(shape: Shape) -> Shape {
    match shape {
        Shape::Custom(n) => Shape::custom(n),
        other => other,
    }
}
