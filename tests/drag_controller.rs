use egui::{Pos2, Rect, Vec2};
use image_labeler::command::Command;
use image_labeler::tools::DragState;
use image_labeler::{DragTool, LabelId, LabelPatch};

// Viewport placed at (100, 50) on screen, 400x300 points
fn viewport() -> Rect {
    Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0))
}

fn label_rect_at(top_left: Pos2) -> Rect {
    Rect::from_min_size(viewport().min + top_left.to_vec2(), Vec2::new(80.0, 30.0))
}

fn committed_position(command: Option<Command>) -> Pos2 {
    match command {
        Some(Command::UpdateLabel { patch, .. }) => patch.position.unwrap(),
        other => panic!("expected a position update, got {other:?}"),
    }
}

#[test]
fn press_selects_and_starts_dragging() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = label_rect_at(Pos2::new(20.0, 20.0));

    let command = tool.on_pointer_down(id, rect, rect.min + Vec2::new(5.0, 5.0), false);
    assert_eq!(command, Some(Command::Select(Some(id))));
    assert_eq!(tool.state(), DragState::Dragging);
    assert_eq!(tool.session().unwrap().grab_offset(), Vec2::new(5.0, 5.0));
}

#[test]
fn drag_keeps_the_grab_offset() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = label_rect_at(Pos2::new(20.0, 20.0));
    let press = rect.min + Vec2::new(10.0, 10.0);

    tool.on_pointer_down(id, rect, press, false);
    tool.on_pointer_move(press + Vec2::new(50.0, 40.0), viewport());
    assert_eq!(tool.transient_position(id), Some(Pos2::new(70.0, 60.0)));

    let position = committed_position(tool.on_pointer_up());
    assert_eq!(position, Pos2::new(70.0, 60.0));
    assert_eq!(tool.state(), DragState::Idle);
}

#[test]
fn position_stays_inside_the_viewport_for_any_path() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = label_rect_at(Pos2::new(100.0, 100.0));
    tool.on_pointer_down(id, rect, rect.center(), false);

    let path = [
        Pos2::new(-500.0, -500.0),
        Pos2::new(2000.0, 10.0),
        Pos2::new(300.0, 900.0),
        Pos2::new(499.0, 349.0),
        Pos2::new(101.0, 51.0),
    ];
    for pointer in path {
        tool.on_pointer_move(pointer, viewport());
        let current = tool.transient_position(id).unwrap();
        assert!(current.x >= 0.0 && current.x <= 400.0 - 80.0, "{current:?}");
        assert!(current.y >= 0.0 && current.y <= 300.0 - 30.0, "{current:?}");
    }

    tool.on_pointer_move(Pos2::new(2000.0, 2000.0), viewport());
    assert_eq!(committed_position(tool.on_pointer_up()), Pos2::new(320.0, 270.0));
}

#[test]
fn oversized_label_pins_to_the_origin() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = Rect::from_min_size(viewport().min, Vec2::new(600.0, 30.0));
    tool.on_pointer_down(id, rect, rect.min, false);
    tool.on_pointer_move(Pos2::new(300.0, 100.0), viewport());

    assert_eq!(tool.transient_position(id).unwrap().x, 0.0);
}

#[test]
fn release_without_move_commits_nothing() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = label_rect_at(Pos2::new(20.0, 20.0));
    let press = rect.center();

    tool.on_pointer_down(id, rect, press, false);
    // The pointer reported at the press position is not a move
    tool.on_pointer_move(press, viewport());
    assert_eq!(tool.on_pointer_up(), None);
    assert!(!tool.is_dragging());
}

#[test]
fn movement_after_release_is_ignored() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = label_rect_at(Pos2::new(20.0, 20.0));

    tool.on_pointer_down(id, rect, rect.center(), false);
    tool.on_pointer_up();
    tool.on_pointer_move(Pos2::new(300.0, 300.0), viewport());

    assert_eq!(tool.transient_position(id), None);
    assert_eq!(tool.on_pointer_up(), None);
}

#[test]
fn press_on_an_edited_label_is_ignored() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = label_rect_at(Pos2::new(20.0, 20.0));

    assert_eq!(tool.on_pointer_down(id, rect, rect.center(), true), None);
    assert_eq!(tool.state(), DragState::Idle);
}

#[test]
fn commit_targets_the_dragged_label() {
    let mut tool = DragTool::new();
    let id = LabelId::new();
    let rect = label_rect_at(Pos2::ZERO);
    tool.on_pointer_down(id, rect, rect.min, false);
    tool.on_pointer_move(rect.min + Vec2::new(15.0, 25.0), viewport());

    assert_eq!(
        tool.on_pointer_up(),
        Some(Command::update(id, LabelPatch::position(Pos2::new(15.0, 25.0))))
    );
}
