use crate::physics::MotionState;
use crate::transform::Transform;
use crate::utils::Vec2;
use crate::viewport::Bounds;

pub const MOUSE_DRAG_FACTOR: f32 = 0.4;
pub const TOUCH_DRAG_FACTOR: f32 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    /// Converts a drag displacement into a velocity impulse while bouncing.
    pub fn drag_factor(self) -> f32 {
        match self {
            PointerKind::Mouse => MOUSE_DRAG_FACTOR,
            PointerKind::Touch => TOUCH_DRAG_FACTOR,
        }
    }
}

/// Grab state for an in-progress pointer drag. The grab offset stays fixed for
/// the whole drag so the shape does not jump under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub grab_offset: Vec2,
}

impl DragState {
    pub fn press(&mut self, pointer: Vec2, shape_position: Vec2) {
        self.active = true;
        self.grab_offset = pointer - shape_position;
    }

    /// Moves the shape under the pointer, clamped to the view. While the body
    /// is bouncing the displacement is also added to its velocity.
    /// Returns the velocity impulse that was applied, if any.
    pub fn drag_to(
        &mut self,
        pointer: Vec2,
        transform: &mut Transform,
        motion: &mut MotionState,
        bounds: Bounds,
        drag_factor: f32,
    ) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let target = bounds.clamp(pointer - self.grab_offset, transform.scale);
        let impulse = if motion.is_auto_motion {
            let impulse = (target - transform.position) * drag_factor;
            motion.velocity += impulse;
            Some(impulse)
        } else {
            None
        };
        transform.position = target;
        impulse
    }

    pub fn release(&mut self) {
        self.active = false;
    }
}
