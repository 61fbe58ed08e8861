use ahash::AHashSet;
use polybounce_core::{Command, PointerKind, Vec2, Viewport};

use crate::InputState;

/// Drawing surface rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Maps a screen position onto the shape plane: clip coordinates scaled by
/// the depth ratio. `None` for an empty surface.
pub fn screen_to_world(rect: ScreenRect, x: f32, y: f32, viewport: &Viewport) -> Option<Vec2> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let clip_x = (x - rect.left) / rect.width * 2.0 - 1.0;
    let clip_y = -((y - rect.top) / rect.height * 2.0 - 1.0);
    let ratio = viewport.depth_ratio();
    Some(Vec2::new(clip_x * ratio, clip_y * ratio))
}

/// Tracks the mouse button and the set of live touches, emitting drag
/// commands. Touch drags only start and move while exactly one finger is down.
/// A drag belongs to the source that started it: touches are ignored during a
/// mouse drag and clicks are ignored during a touch drag.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    rect: ScreenRect,
    mouse: InputState,
    /// Unknown until the first cursor event.
    cursor: Option<(f32, f32)>,
    mouse_drag: bool,
    touches: AHashSet<u64>,
    touch_drag: Option<u64>,
}

impl PointerTracker {
    pub fn new(rect: ScreenRect) -> Self {
        Self {
            rect,
            mouse: InputState::default(),
            cursor: None,
            mouse_drag: false,
            touches: AHashSet::new(),
            touch_drag: None,
        }
    }

    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.rect = ScreenRect {
            width: width as f32,
            height: height as f32,
            ..self.rect
        };
    }

    pub fn is_dragging(&self) -> bool {
        self.mouse_drag || self.touch_drag.is_some()
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32, viewport: &Viewport) -> Option<Command> {
        self.cursor = Some((x, y));
        let down = self.mouse.lmb_down;
        self.mouse.update_mouse(x, y, down);
        if !self.mouse_drag {
            return None;
        }
        let world = screen_to_world(self.rect, x, y, viewport)?;
        Some(Command::PointerMoved {
            world,
            kind: PointerKind::Mouse,
        })
    }

    pub fn mouse_button(&mut self, pressed: bool, viewport: &Viewport) -> Option<Command> {
        let Some((x, y)) = self.cursor else {
            log::debug!("mouse button before any cursor position, ignored");
            return None;
        };
        self.mouse.update_mouse(x, y, pressed);
        if self.mouse.lmb_just_pressed {
            if self.touch_drag.is_some() {
                return None;
            }
            let world = screen_to_world(self.rect, x, y, viewport)?;
            log::debug!("mouse grab at ({:.3}, {:.3})", world.x, world.y);
            self.mouse_drag = true;
            Some(Command::PointerPressed { world })
        } else if self.mouse.lmb_just_released {
            std::mem::take(&mut self.mouse_drag).then_some(Command::PointerReleased)
        } else {
            None
        }
    }

    pub fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        viewport: &Viewport,
    ) -> Option<Command> {
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id);
                if self.touches.len() != 1 || self.mouse_drag {
                    return None;
                }
                let world = screen_to_world(self.rect, x, y, viewport)?;
                self.touch_drag = Some(id);
                Some(Command::PointerPressed { world })
            }
            TouchPhase::Moved => {
                if self.touches.len() != 1 || self.touch_drag != Some(id) {
                    return None;
                }
                let world = screen_to_world(self.rect, x, y, viewport)?;
                Some(Command::PointerMoved {
                    world,
                    kind: PointerKind::Touch,
                })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                // any lifted finger ends a touch drag; a mouse drag is untouched
                self.touch_drag.take().map(|_| Command::PointerReleased)
            }
        }
    }
}
