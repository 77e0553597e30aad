use egui::Pos2;
use image_labeler::command::Command;
use image_labeler::tools::{initial_selection, EditKey, EditState, KeyOutcome};
use image_labeler::{EditTool, Label, LabelId, LabelStore};

fn store_with_label(text: &str) -> (LabelStore, LabelId) {
    let mut store = LabelStore::new();
    let label = Label::new(LabelId::new(), text, Pos2::new(40.0, 40.0));
    let id = label.id();
    store.add(label).unwrap();
    (store, id)
}

#[test]
fn entering_edit_selects_all_text() {
    assert_eq!(initial_selection("New Text"), 0..8);
    assert_eq!(initial_selection("héllo"), 0..5);
    assert_eq!(initial_selection(""), 0..0);

    let mut tool = EditTool::new();
    let id = LabelId::new();
    assert!(tool.begin(id, false));
    assert!(tool.take_focus_request());
    assert!(!tool.take_focus_request());
    assert_eq!(
        tool.state(),
        EditState::Editing {
            label_id: id,
            focus_pending: false
        }
    );
}

#[test]
fn each_change_is_committed_to_the_store() {
    let (mut store, id) = store_with_label("New Text");
    let mut tool = EditTool::new();
    tool.begin(id, false);

    for text in ["H", "Hi", "Hi!"] {
        tool.on_text_changed(text).unwrap().execute(&mut store).unwrap();
        assert_eq!(store.get(id).unwrap().text, text);
    }
}

#[test]
fn enter_finishes_editing() {
    let (mut store, id) = store_with_label("New Text");
    let mut tool = EditTool::new();
    tool.begin(id, false);
    tool.on_text_changed("Hello").unwrap().execute(&mut store).unwrap();

    assert_eq!(tool.on_key(EditKey::Enter { shift: false }, "Hello"), KeyOutcome::Finished);
    assert_eq!(tool.state(), EditState::Display);
    assert_eq!(store.get(id).unwrap().text, "Hello");
}

#[test]
fn shift_enter_is_left_to_the_text_field() {
    let (_, id) = store_with_label("line");
    let mut tool = EditTool::new();
    tool.begin(id, false);

    assert_eq!(tool.on_key(EditKey::Enter { shift: true }, "line"), KeyOutcome::PassThrough);
    assert!(tool.is_editing(id));
}

#[test]
fn backspace_on_empty_text_deletes_the_label() {
    let (mut store, id) = store_with_label("x");
    let mut tool = EditTool::new();
    tool.begin(id, false);
    tool.on_text_changed("").unwrap().execute(&mut store).unwrap();

    let KeyOutcome::DeleteLabel(command) = tool.on_key(EditKey::Backspace, "") else {
        panic!("expected the label to be deleted");
    };
    assert_eq!(command, Command::RemoveLabel(id));
    command.execute(&mut store).unwrap();

    assert!(!store.contains(id));
    assert_eq!(store.selected_id(), None);
    assert_eq!(tool.state(), EditState::Display);
}

#[test]
fn delete_with_text_left_edits_normally() {
    let (_, id) = store_with_label("abc");
    let mut tool = EditTool::new();
    tool.begin(id, false);

    assert_eq!(tool.on_key(EditKey::Delete, "abc"), KeyOutcome::PassThrough);
    assert!(tool.is_editing(id));
}

#[test]
fn blur_keeps_the_committed_text() {
    let (mut store, id) = store_with_label("before");
    let mut tool = EditTool::new();
    tool.begin(id, false);
    tool.on_text_changed("after").unwrap().execute(&mut store).unwrap();

    tool.on_blur();
    assert_eq!(tool.state(), EditState::Display);
    assert_eq!(store.get(id).unwrap().text, "after");
    assert_eq!(tool.on_text_changed("ignored"), None);
}

#[test]
fn cannot_edit_while_dragging() {
    let mut tool = EditTool::new();
    assert!(!tool.begin(LabelId::new(), true));
    assert_eq!(tool.state(), EditState::Display);
}

#[test]
fn editing_stops_when_the_label_disappears() {
    let (mut store, id) = store_with_label("gone soon");
    let mut tool = EditTool::new();
    tool.begin(id, false);

    store.remove(id);
    tool.retain(|id| store.contains(id));
    assert_eq!(tool.editing_id(), None);
}

#[test]
fn keys_outside_edit_mode_pass_through() {
    let mut tool = EditTool::new();
    assert_eq!(tool.on_key(EditKey::Backspace, ""), KeyOutcome::PassThrough);
    assert_eq!(tool.on_text_changed("x"), None);
}
