//! Windowed front end for the polybounce simulation: wgpu outline renderer,
//! winit event loop and startup configuration.

pub mod app;
pub mod config;
pub mod renderer;
pub mod utils;

pub use app::{render_frame, run_app, PolybounceApp, WindowConfig};
pub use config::{AppConfig, Cli, ConfigError};
pub use renderer::{DrawParams, RecordingRenderer, RenderAdapter, RenderError, WgpuRenderer};
