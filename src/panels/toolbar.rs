use egui::RichText;

use crate::command::Command;
use crate::export::ExportFormat;
use crate::label::Label;
use crate::panels::style_panel;

/// What the toolbar needs to know about the editor this frame
pub struct ToolbarState<'a> {
    pub has_image: bool,
    pub selected: Option<&'a Label>,
    pub export_format: &'a mut ExportFormat,
    pub exporting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    AddLabel,
    OpenImage,
    Export,
    Command(Command),
}

pub fn toolbar_panel(ctx: &egui::Context, state: ToolbarState<'_>) -> Vec<ToolbarAction> {
    let mut actions = Vec::new();

    egui::SidePanel::right("toolbar")
        .resizable(false)
        .exact_width(256.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Image Labeler");
            ui.separator();

            if !state.has_image {
                ui.add_space(48.0);
                ui.vertical_centered(|ui| {
                    ui.weak("Upload an image to start labeling");
                });
                return;
            }

            ui.horizontal(|ui| {
                ui.strong("Text Controls");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Add Text").clicked() {
                        actions.push(ToolbarAction::AddLabel);
                    }
                });
            });
            ui.add_space(8.0);

            actions.extend(
                style_panel(ui, state.selected)
                    .into_iter()
                    .map(ToolbarAction::Command),
            );

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                let label = if state.exporting { "Exporting…" } else { "Export Image" };
                let export = egui::Button::new(RichText::new(label).strong());
                if ui
                    .add_enabled_ui(!state.exporting, |ui| ui.add_sized([ui.available_width(), 32.0], export))
                    .inner
                    .clicked()
                {
                    actions.push(ToolbarAction::Export);
                }

                ui.horizontal(|ui| {
                    ui.label("Format");
                    egui::ComboBox::from_id_salt("export_format")
                        .selected_text(state.export_format.extension())
                        .show_ui(ui, |ui| {
                            for format in ExportFormat::ALL {
                                ui.selectable_value(state.export_format, format, format.extension());
                            }
                        });
                });
                ui.separator();

                if ui.button("Replace Image").clicked() {
                    actions.push(ToolbarAction::OpenImage);
                }
            });
        });

    actions
}
