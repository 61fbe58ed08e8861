use crate::drag::PointerKind;
use crate::geometry::Shape;
use crate::scheduler::FrameRate;
use crate::utils::Vec2;

/// A state transition requested by the UI. Queued commands are applied at the
/// start of the next rendered tick, before physics runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetShape(Shape),
    SetCustomVertices(u32),
    SetScale(f32),
    SetRotationSpeed(f32),
    SetMotionSpeed(f32),
    SetGravityStrength(f32),
    ToggleGravity,
    ToggleGravityAcceleration,
    StartBounce,
    StopBounce,
    SetFrameRate(FrameRate),
    Resize { width: u32, height: u32 },
    PointerPressed { world: Vec2 },
    PointerMoved { world: Vec2, kind: PointerKind },
    PointerReleased,
}

#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    pending: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.pending.extend(commands);
    }

    /// Takes every pending command in submission order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
