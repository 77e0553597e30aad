use egui::{Pos2, Rect, Vec2};

use crate::command::Command;
use crate::geometry::clamp_to_viewport;
use crate::label::{LabelId, LabelPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// Pointer tracking for one label while it is being dragged.
///
/// A session only exists between press and release. The canvas forwards
/// pointer movement to it regardless of where the pointer is, and it is
/// consumed by [`DragSession::finish`] on release, so nothing keeps
/// listening once the drag is over.
#[derive(Debug, Clone)]
pub struct DragSession {
    label_id: LabelId,
    /// Pointer position relative to the label's top-left at press time
    grab_offset: Vec2,
    label_size: Vec2,
    last_pointer: Pos2,
    /// Clamped top-left, relative to the viewport; `None` until the first move
    current: Option<Pos2>,
}

impl DragSession {
    fn new(label_id: LabelId, label_rect: Rect, pointer: Pos2) -> Self {
        Self {
            label_id,
            grab_offset: pointer - label_rect.min,
            label_size: label_rect.size(),
            last_pointer: pointer,
            current: None,
        }
    }

    pub fn label_id(&self) -> LabelId {
        self.label_id
    }

    pub fn grab_offset(&self) -> Vec2 {
        self.grab_offset
    }

    /// Transient top-left, not yet committed to the store
    pub fn current_position(&self) -> Option<Pos2> {
        self.current
    }

    fn on_pointer_move(&mut self, pointer: Pos2, viewport: Rect) {
        if pointer == self.last_pointer {
            return;
        }
        self.last_pointer = pointer;
        let proposed = (pointer - viewport.min - self.grab_offset).to_pos2();
        self.current = Some(clamp_to_viewport(proposed, viewport.size(), self.label_size));
    }

    /// End the drag, producing the position commit if the label moved
    fn finish(self) -> Option<Command> {
        self.current
            .map(|position| Command::update(self.label_id, LabelPatch::position(position)))
    }
}

/// Converts pointer press/move/release into clamped label moves
#[derive(Debug, Default)]
pub struct DragTool {
    session: Option<DragSession>,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        if self.session.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Where the label should be drawn this frame, if it is being dragged and has moved
    pub fn transient_position(&self, id: LabelId) -> Option<Pos2> {
        self.session
            .as_ref()
            .filter(|session| session.label_id == id)
            .and_then(DragSession::current_position)
    }

    /// Pointer pressed on a label body. `label_rect` and `pointer` are in the
    /// same (screen) coordinates. Returns the selection command, or `None`
    /// when the label is in edit mode and the press is ignored.
    pub fn on_pointer_down(
        &mut self,
        label_id: LabelId,
        label_rect: Rect,
        pointer: Pos2,
        editing: bool,
    ) -> Option<Command> {
        if editing {
            return None;
        }
        let session = DragSession::new(label_id, label_rect, pointer);
        log::debug!("drag start on {} grab offset {:?}", label_id, session.grab_offset);
        self.session = Some(session);
        Some(Command::Select(Some(label_id)))
    }

    /// Pointer moved anywhere; only has an effect while dragging
    pub fn on_pointer_move(&mut self, pointer: Pos2, viewport: Rect) {
        if let Some(session) = &mut self.session {
            session.on_pointer_move(pointer, viewport);
        }
    }

    /// Pointer released. Returns the position commit, if any.
    pub fn on_pointer_up(&mut self) -> Option<Command> {
        let session = self.session.take()?;
        log::debug!("drag end on {} at {:?}", session.label_id, session.current);
        session.finish()
    }

    /// Drop any drag in progress without committing
    pub fn reset(&mut self) {
        self.session = None;
    }
}
