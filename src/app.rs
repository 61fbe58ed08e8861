use std::sync::Arc;
use std::time::Instant;

use polybounce_core::{Command, FrameOutput, Simulation};
use polybounce_input::{command_for, ActionMap, InputState, PointerTracker, ScreenRect, TouchPhase};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::renderer::{DrawParams, RenderAdapter, RenderError, WgpuRenderer};

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "polybounce".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// One display callback: advance the simulation and, if the scheduler lets
/// the tick through, re-upload a changed outline and draw.
pub fn render_frame<R: RenderAdapter>(
    sim: &mut Simulation,
    renderer: &mut R,
    now_ms: f64,
) -> Result<Option<FrameOutput>, RenderError> {
    let Some(frame) = sim.advance(now_ms) else {
        return Ok(None);
    };
    if frame.outline_changed {
        renderer.upload_outline(sim.outline())?;
    }
    renderer.draw(&DrawParams {
        transform: frame.transform,
        color_cycle_time: frame.color_cycle_time,
    })?;
    Ok(Some(frame))
}

/// `<shape> | <fps> FPS (Target: <target>) | gravity <pct>%`
pub fn status_title(sim: &Simulation, fps: f64) -> String {
    let gravity = sim.gravity();
    let gravity = if gravity.enabled {
        format!("gravity {}%", gravity.percentage())
    } else {
        "gravity off".to_string()
    };
    format!(
        "{} | {} FPS (Target: {}) | {}",
        sim.shape().label(),
        fps.round() as i64,
        sim.frame_rate(),
        gravity
    )
}

/// Name used for key bindings: characters lowercased, named keys by variant.
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_lowercase()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

fn touch_phase(phase: winit::event::TouchPhase) -> TouchPhase {
    match phase {
        winit::event::TouchPhase::Started => TouchPhase::Started,
        winit::event::TouchPhase::Moved => TouchPhase::Moved,
        winit::event::TouchPhase::Ended => TouchPhase::Ended,
        winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

pub struct PolybounceApp {
    config: WindowConfig,
    sim: Simulation,
    bindings: ActionMap,
    keys: InputState,
    pointer: PointerTracker,
    renderer: Option<WgpuRenderer<'static>>,
    window: Option<Arc<Window>>,
    start: Instant,
    fatal: Option<RenderError>,
}

impl PolybounceApp {
    pub fn new(config: WindowConfig, sim: Simulation, bindings: ActionMap) -> Self {
        let pointer = PointerTracker::new(ScreenRect::from_size(config.width, config.height));
        Self {
            config,
            sim,
            bindings,
            keys: InputState::default(),
            pointer,
            renderer: None,
            window: None,
            start: Instant::now(),
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RenderError) {
        log::error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let window_attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = event_loop
            .create_window(window_attributes)
            .map_err(|err| RenderError::Window(err.to_string()))?;
        let window = Arc::new(window);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let size = window.inner_size();
        let renderer = WgpuRenderer::new(surface, &instance, size, self.config.vsync)?;

        self.pointer.resize(size.width, size.height);
        self.sim.submit(Command::Resize {
            width: size.width,
            height: size.height,
        });
        log::info!("window ready at {}x{}", size.width, size.height);
        window.request_redraw();
        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn handle_key(&mut self, key: &Key, state: ElementState) {
        let Some(name) = key_name(key) else {
            return;
        };
        if !state.is_pressed() {
            self.keys.release_key(&name);
            return;
        }
        self.keys.press_key(&name);
        for action in self.bindings.just_pressed_actions(&self.keys) {
            let command = command_for(action, &self.sim);
            log::debug!("{action:?} -> {command:?}");
            self.sim.submit(command);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let now_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        match render_frame(&mut self.sim, renderer, now_ms) {
            Ok(Some(frame)) => {
                if let (Some(fps), Some(window)) = (frame.fps, &self.window) {
                    window.set_title(&status_title(&self.sim, fps));
                }
                if let Some(strength) = frame.gravity_strength {
                    log::trace!("gravity strength {strength:.5}");
                }
            }
            Ok(None) => {}
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(RenderError::Surface(wgpu::SurfaceError::Timeout)) => {
                log::warn!("surface timed out, skipping frame");
            }
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler<()> for PolybounceApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key == Key::Named(NamedKey::Escape) {
                    event_loop.exit();
                    return;
                }
                self.handle_key(&event.logical_key, event.state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let viewport = self.sim.viewport();
                if let Some(command) =
                    self.pointer
                        .cursor_moved(position.x as f32, position.y as f32, &viewport)
                {
                    self.sim.submit(command);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let viewport = self.sim.viewport();
                if let Some(command) = self.pointer.mouse_button(state.is_pressed(), &viewport) {
                    self.sim.submit(command);
                }
            }
            WindowEvent::Touch(touch) => {
                let viewport = self.sim.viewport();
                let command = self.pointer.touch(
                    touch.id,
                    touch_phase(touch.phase),
                    touch.location.x as f32,
                    touch.location.y as f32,
                    &viewport,
                );
                if let Some(command) = command {
                    self.sim.submit(command);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(new_size) => {
                if new_size.width == 0 || new_size.height == 0 {
                    // minimized; the simulation keeps its last view
                    return;
                }
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
                self.pointer.resize(new_size.width, new_size.height);
                self.sim.submit(Command::Resize {
                    width: new_size.width,
                    height: new_size.height,
                });
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            _ => (),
        }
    }
}

pub fn run_app(config: WindowConfig, sim: Simulation, bindings: ActionMap) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = PolybounceApp::new(config, sim, bindings);

    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
