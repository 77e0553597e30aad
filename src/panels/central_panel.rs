use egui::{Color32, CursorIcon, Id, Pos2, Rect, RichText, Sense, Stroke};

use crate::command::Command;
use crate::geometry::topmost_label_at;
use crate::label::LabelId;
use crate::renderer::{layout_label, paint_label, LabelLayout};
use crate::store::LabelStore;
use crate::tools::{DragTool, EditTool};
use crate::viewport::Viewport;

/// Everything the canvas reads or drives this frame
pub struct CanvasState<'a> {
    pub store: &'a LabelStore,
    pub viewport: Option<&'a mut Viewport>,
    pub drag_tool: &'a mut DragTool,
    pub edit_tool: &'a mut EditTool,
    /// Draw only the image and the labels, as they should appear in an export
    pub clean: bool,
}

#[derive(Debug, Default)]
pub struct CanvasOutput {
    pub commands: Vec<Command>,
    /// A label was removed with backspace/delete on empty text
    pub deleted_by_shortcut: bool,
    pub open_image: bool,
}

pub fn central_panel(ctx: &egui::Context, state: CanvasState<'_>) -> CanvasOutput {
    let mut output = CanvasOutput::default();
    // No panel fill under the image while capturing, so its transparency survives.
    // The margins stay so the viewport does not move.
    let panel = if state.clean {
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(Color32::TRANSPARENT))
    } else {
        egui::CentralPanel::default()
    };
    panel.show(ctx, |ui| {
        let CanvasState {
            store,
            viewport,
            drag_tool,
            edit_tool,
            clean,
        } = state;
        match viewport {
            Some(viewport) => canvas(ui, viewport, store, drag_tool, edit_tool, clean, &mut output),
            None => dropzone(ui, &mut output),
        }
    });
    output
}

fn dropzone(ui: &mut egui::Ui, output: &mut CanvasOutput) {
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    let (stroke_color, fill) = if hovering {
        (Color32::from_rgb(96, 165, 250), Color32::from_rgba_unmultiplied(96, 165, 250, 24))
    } else {
        (Color32::from_gray(110), Color32::TRANSPARENT)
    };

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 4.0);
        egui::Frame::group(ui.style())
            .stroke(Stroke::new(2.0, stroke_color))
            .fill(fill)
            .inner_margin(40.0)
            .show(ui, |ui| {
                ui.set_max_width(480.0);
                ui.label(RichText::new("⬆").size(40.0).weak());
                ui.heading("Drag & drop your image here");
                ui.weak("or click to browse from your computer");
                ui.add_space(12.0);
                if ui.button("Choose Image").clicked() {
                    output.open_image = true;
                }
            });
    });
}

struct PlacedLabel {
    id: LabelId,
    rect: Rect,
    layout: LabelLayout,
}

fn canvas(
    ui: &mut egui::Ui,
    viewport: &mut Viewport,
    store: &LabelStore,
    drag_tool: &mut DragTool,
    edit_tool: &mut EditTool,
    clean: bool,
    output: &mut CanvasOutput,
) {
    let available = ui.available_rect_before_wrap();
    let rect = Rect::from_center_size(available.center(), viewport.display_size());
    let background = ui.allocate_rect(rect, Sense::click());
    viewport.set_rect(rect);

    let painter = ui.painter_at(rect);
    painter.image(
        viewport.texture().id(),
        rect,
        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        Color32::WHITE,
    );

    // Lay out with the positions from the previous frame's drag state
    let ctx = ui.ctx().clone();
    let place = |drag_tool: &DragTool| -> Vec<PlacedLabel> {
        store
            .labels()
            .iter()
            .map(|label| {
                let layout = layout_label(&ctx, label);
                let top_left = drag_tool.transient_position(label.id()).unwrap_or(label.position);
                PlacedLabel {
                    id: label.id(),
                    rect: layout.rect_at(rect.min + top_left.to_vec2()),
                    layout,
                }
            })
            .collect()
    };
    let placed = place(drag_tool);
    let hit_rects: Vec<(LabelId, Rect)> = placed.iter().map(|p| (p.id, p.rect)).collect();

    let (pressed, released, press_origin, latest) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.press_origin(),
            i.pointer.latest_pos(),
        )
    });

    if pressed && ui.rect_contains_pointer(rect) {
        if let Some(pointer) = press_origin {
            if let Some(id) = topmost_label_at(pointer, &hit_rects) {
                if let Some((_, label_rect)) = hit_rects.iter().find(|(hit, _)| *hit == id) {
                    output
                        .commands
                        .extend(drag_tool.on_pointer_down(id, *label_rect, pointer, edit_tool.is_editing(id)));
                }
            }
        }
    }

    // Movement is tracked wherever the pointer goes, not just over the label
    if let Some(pointer) = latest {
        drag_tool.on_pointer_move(pointer, rect);
    }

    if released {
        output.commands.extend(drag_tool.on_pointer_up());
    }

    let mut hovered_label = false;
    for placed_label in &placed {
        let response = ui.interact(
            placed_label.rect,
            Id::new(("label", placed_label.id)),
            Sense::click_and_drag(),
        );
        hovered_label |= response.hovered();
        if response.double_clicked() {
            edit_tool.begin(placed_label.id, drag_tool.is_dragging());
        }
    }

    if background.clicked() && !hovered_label {
        output.commands.push(Command::Select(None));
    }

    // Re-place so a drag started this frame is drawn where it is
    let placed = if drag_tool.is_dragging() { place(drag_tool) } else { placed };
    for placed_label in &placed {
        let Some(label) = store.get(placed_label.id) else {
            continue;
        };
        let editing = edit_tool.is_editing(label.id());
        if editing && !clean {
            let response = edit_tool.show(ui, label, placed_label.rect);
            output.deleted_by_shortcut |= response.deleted;
            output.commands.extend(response.commands);
            continue;
        }
        paint_label(
            &painter,
            placed_label.rect,
            label,
            &placed_label.layout,
            store.is_selected(label.id()),
            !clean,
        );
    }

    if drag_tool.is_dragging() {
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    } else if hovered_label {
        ui.ctx().set_cursor_icon(CursorIcon::Grab);
    }
}
