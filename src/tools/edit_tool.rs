use std::ops::Range;

use egui::{Color32, FontId, Key, Modifiers, Rect};

use crate::command::Command;
use crate::label::{Label, LabelId, LabelPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Display,
    Editing {
        label_id: LabelId,
        /// Focus and select-all still have to be applied to the text field
        focus_pending: bool,
    },
}

/// Keys the inline editor intercepts before the text field sees them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter { shift: bool },
    Backspace,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Not handled; the text field processes the key normally
    PassThrough,
    /// Editing finished, back to display mode
    Finished,
    /// The text was already empty: the label is to be removed
    DeleteLabel(Command),
}

/// Output of one frame of the inline editor
#[derive(Debug, Default)]
pub struct EditResponse {
    pub commands: Vec<Command>,
    /// The label was removed through the empty-text shortcut
    pub deleted: bool,
}

/// Toggles a label between display and text-edit mode. The store stays the
/// single source of truth: every change is committed immediately.
#[derive(Debug, Default)]
pub struct EditTool {
    state: EditState,
}

/// Character range selected when editing starts: all of the text
pub fn initial_selection(text: &str) -> Range<usize> {
    0..text.chars().count()
}

impl EditTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn editing_id(&self) -> Option<LabelId> {
        match self.state {
            EditState::Editing { label_id, .. } => Some(label_id),
            EditState::Display => None,
        }
    }

    pub fn is_editing(&self, id: LabelId) -> bool {
        self.editing_id() == Some(id)
    }

    /// Double activation on a label. Refused while a drag is in progress.
    pub fn begin(&mut self, label_id: LabelId, dragging: bool) -> bool {
        if dragging {
            log::debug!("edit of {} refused while dragging", label_id);
            return false;
        }
        log::debug!("editing {}", label_id);
        self.state = EditState::Editing {
            label_id,
            focus_pending: true,
        };
        true
    }

    /// Returns true exactly once after [`Self::begin`]
    pub fn take_focus_request(&mut self) -> bool {
        match &mut self.state {
            EditState::Editing { focus_pending, .. } if *focus_pending => {
                *focus_pending = false;
                true
            }
            _ => false,
        }
    }

    /// Commit the text field's new content
    pub fn on_text_changed(&self, text: &str) -> Option<Command> {
        self.editing_id()
            .map(|id| Command::update(id, LabelPatch::text(text)))
    }

    pub fn on_key(&mut self, key: EditKey, current_text: &str) -> KeyOutcome {
        let Some(id) = self.editing_id() else {
            return KeyOutcome::PassThrough;
        };
        match key {
            EditKey::Enter { shift: false } => {
                self.finish();
                KeyOutcome::Finished
            }
            EditKey::Backspace | EditKey::Delete if current_text.is_empty() => {
                self.finish();
                KeyOutcome::DeleteLabel(Command::RemoveLabel(id))
            }
            _ => KeyOutcome::PassThrough,
        }
    }

    /// Focus left the text field. Text is already committed.
    pub fn on_blur(&mut self) {
        self.finish();
    }

    /// Leave edit mode if the edited label no longer exists
    pub fn retain(&mut self, exists: impl Fn(LabelId) -> bool) {
        if let Some(id) = self.editing_id() {
            if !exists(id) {
                self.finish();
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = EditState::Display;
    }

    fn finish(&mut self) {
        if let Some(id) = self.editing_id() {
            log::debug!("done editing {}", id);
        }
        self.state = EditState::Display;
    }

    /// Show the text field over `rect` for the label being edited
    pub fn show(&mut self, ui: &mut egui::Ui, label: &Label, rect: Rect) -> EditResponse {
        let mut response = EditResponse::default();
        if !self.is_editing(label.id()) {
            return response;
        }

        let edit_id = egui::Id::new(("label_editor", label.id()));

        // Shortcuts are consumed before the text field so it never sees them
        if ui.memory(|mem| mem.has_focus(edit_id)) {
            let mut key = None;
            ui.input_mut(|i| {
                if !i.modifiers.shift && i.consume_key(Modifiers::NONE, Key::Enter) {
                    key = Some(EditKey::Enter { shift: false });
                } else if label.text.is_empty() {
                    let modifiers = i.modifiers;
                    if i.consume_key(modifiers, Key::Backspace) {
                        key = Some(EditKey::Backspace);
                    } else if i.consume_key(modifiers, Key::Delete) {
                        key = Some(EditKey::Delete);
                    }
                }
            });
            if let Some(key) = key {
                match self.on_key(key, &label.text) {
                    KeyOutcome::Finished => {
                        ui.memory_mut(|mem| mem.surrender_focus(edit_id));
                        return response;
                    }
                    KeyOutcome::DeleteLabel(command) => {
                        response.commands.push(command);
                        response.deleted = true;
                        return response;
                    }
                    KeyOutcome::PassThrough => {}
                }
            }
        }

        let mut text = label.text.clone();
        let background = label.background.unwrap_or(Color32::TRANSPARENT);
        let output = egui::Area::new(edit_id.with("area"))
            .fixed_pos(rect.min)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::none().fill(background).show(ui, |ui| {
                    egui::TextEdit::multiline(&mut text)
                        .id(edit_id)
                        .font(FontId::proportional(label.font_size as f32))
                        .text_color(label.color)
                        .frame(false)
                        .desired_rows(1)
                        .desired_width(rect.width().max(80.0))
                        .show(ui)
                })
                .inner
            })
            .inner;

        if self.take_focus_request() {
            output.response.request_focus();
            let range = initial_selection(&text);
            let mut state = output.state;
            state.cursor.set_char_range(Some(egui::text::CCursorRange::two(
                egui::text::CCursor::new(range.start),
                egui::text::CCursor::new(range.end),
            )));
            state.store(ui.ctx(), edit_id);
        }

        if output.response.changed() {
            response.commands.extend(self.on_text_changed(&text));
        }
        if output.response.lost_focus() {
            self.on_blur();
        }
        response
    }
}
