use std::path::PathBuf;
use std::sync::Arc;

use egui::{vec2, Color32, ColorImage, DroppedFile, Pos2};
use image_labeler::file_handler::{FileHandler, LoadedImage};
use image_labeler::tools::EditState;
use image_labeler::{EditorContext, Label, LabelId, LoadError};

fn loaded(name: &str, width: usize, height: usize) -> LoadedImage {
    LoadedImage {
        name: name.to_owned(),
        pixels: ColorImage::new([width, height], Color32::GRAY),
    }
}

fn editor_with_labels(ctx: &egui::Context) -> (EditorContext, Vec<LabelId>) {
    let mut editor = EditorContext::new();
    editor.replace_image(ctx, loaded("first.png", 800, 600), vec2(1000.0, 800.0), 0.7);

    let ids = (0..3)
        .map(|i| {
            let label = Label::new(LabelId::new(), format!("label {i}"), Pos2::new(10.0, 10.0 * i as f32));
            let id = label.id();
            editor.store.add(label).unwrap();
            id
        })
        .collect();
    (editor, ids)
}

#[test]
fn new_image_discards_labels_and_selection() {
    let ctx = egui::Context::default();
    let (mut editor, ids) = editor_with_labels(&ctx);
    editor.store.select(Some(ids[1]));
    assert_eq!(editor.store.len(), 3);

    editor.replace_image(&ctx, loaded("second.png", 2000, 1000), vec2(1000.0, 800.0), 0.7);

    assert!(editor.store.is_empty());
    assert_eq!(editor.store.selected_id(), None);
    let viewport = editor.viewport.as_ref().unwrap();
    assert_eq!(viewport.name(), "second.png");
    assert_eq!(viewport.display_size(), vec2(700.0, 350.0));
}

#[test]
fn new_image_ends_drag_and_edit() {
    let ctx = egui::Context::default();
    let (mut editor, ids) = editor_with_labels(&ctx);
    let rect = egui::Rect::from_min_size(Pos2::ZERO, vec2(80.0, 30.0));
    editor.drag_tool.on_pointer_down(ids[0], rect, rect.center(), false);
    editor.edit_tool.begin(ids[2], false);

    editor.replace_image(&ctx, loaded("second.png", 100, 100), vec2(1000.0, 800.0), 0.7);

    assert!(!editor.drag_tool.is_dragging());
    assert_eq!(editor.edit_tool.state(), EditState::Display);
}

#[test]
fn export_request_leaves_edit_mode() {
    let ctx = egui::Context::default();
    let (mut editor, ids) = editor_with_labels(&ctx);
    editor.edit_tool.begin(ids[0], false);

    editor.prepare_export();

    assert_eq!(editor.edit_tool.state(), EditState::Display);
    // The label can be grabbed again right away
    let rect = egui::Rect::from_min_size(Pos2::ZERO, vec2(80.0, 30.0));
    assert!(editor
        .drag_tool
        .on_pointer_down(ids[0], rect, rect.center(), editor.edit_tool.is_editing(ids[0]))
        .is_some());
}

#[test]
fn dropped_text_file_is_rejected_without_loading() {
    let mut handler = FileHandler::new();
    let file = DroppedFile {
        name: "notes.txt".to_owned(),
        mime: "text/plain".to_owned(),
        bytes: Some(Arc::from(&b"hello"[..])),
        ..Default::default()
    };

    let result = handler.submit_dropped(file);

    assert!(matches!(result, Err(LoadError::NotAnImage(_))));
    assert_eq!(handler.in_flight(), 0);
    assert!(handler.poll().is_empty());
}

#[test]
fn dropped_path_without_image_extension_is_rejected() {
    let mut handler = FileHandler::new();
    let file = DroppedFile {
        path: Some(PathBuf::from("/tmp/readme.md")),
        ..Default::default()
    };

    assert!(matches!(handler.submit_dropped(file), Err(LoadError::NotAnImage(_))));
    assert_eq!(handler.in_flight(), 0);
}

#[test]
fn rejected_upload_keeps_the_current_image_and_labels() {
    let ctx = egui::Context::default();
    let (editor, _) = editor_with_labels(&ctx);
    let mut handler = FileHandler::new();

    let _ = handler.submit_dropped(DroppedFile {
        name: "data.csv".to_owned(),
        mime: "text/csv".to_owned(),
        ..Default::default()
    });

    assert!(handler.poll().is_empty());
    assert_eq!(editor.store.len(), 3);
    assert_eq!(editor.viewport.as_ref().unwrap().name(), "first.png");
}
