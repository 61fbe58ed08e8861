#![forbid(unsafe_code)]
//! Simulation core for polybounce: outline generation, view bounds, frame
//! pacing, bounce physics and the command-driven simulation state.
//!
//! Nothing here touches a window or a GPU; the root crate feeds timestamps and
//! commands in and hands [`FrameOutput`]s to its renderer.

pub mod command;
pub mod drag;
pub mod geometry;
pub mod physics;
pub mod rng;
pub mod scheduler;
pub mod sim;
pub mod transform;
pub mod utils;
pub mod viewport;

pub use command::{Command, CommandQueue};
pub use drag::{DragState, PointerKind};
pub use geometry::{outline, GeometryError, Shape};
pub use physics::{GravityConfig, MotionState, PhysicsEngine, PhysicsParams, StepReport};
pub use rng::{RngService, RngStream};
pub use scheduler::{FrameDecision, FrameRate, FrameScheduler, FpsCounter, Tick};
pub use sim::{FrameOutput, SimSettings, Simulation};
pub use transform::Transform;
pub use utils::Vec2;
pub use viewport::{Bounds, Viewport};

#[cfg(test)]
mod tests;
