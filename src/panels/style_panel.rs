use egui::color_picker::{color_edit_button_srgba, Alpha};
use egui::{Color32, RichText};

use crate::command::Command;
use crate::components::ToggleButton;
use crate::label::{Label, LabelPatch, FONT_SIZE_RANGE};
use crate::util::color;

/// Flip the label between normal and bold
pub fn toggle_weight(label: &Label) -> Command {
    Command::update(label.id(), LabelPatch::font_weight(label.font_weight.toggled()))
}

/// Flip the label between normal and italic
pub fn toggle_style(label: &Label) -> Command {
    Command::update(label.id(), LabelPatch::font_style(label.font_style.toggled()))
}

/// Controls for the selected label's appearance. Shows a hint when nothing
/// is selected.
pub fn style_panel(ui: &mut egui::Ui, selected: Option<&Label>) -> Vec<Command> {
    let mut commands = Vec::new();

    let Some(label) = selected else {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("T").size(40.0).weak());
            ui.weak("Add text or select an existing label");
        });
        return commands;
    };
    let id = label.id();

    ui.label(format!("Font Size: {}px", label.font_size));
    let mut font_size = label.font_size;
    let slider = egui::Slider::new(&mut font_size, FONT_SIZE_RANGE)
        .step_by(1.0)
        .show_value(false);
    if ui.add(slider).changed() {
        commands.push(Command::update(id, LabelPatch::font_size(font_size)));
    }
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ToggleButton::bold(label.font_weight.is_bold()).show(ui).clicked() {
            commands.push(toggle_weight(label));
        }
        if ToggleButton::italic(label.font_style.is_italic()).show(ui).clicked() {
            commands.push(toggle_style(label));
        }
    });
    ui.add_space(8.0);

    ui.label("Text Color");
    let mut text_color = label.color;
    if color_edit_button_srgba(ui, &mut text_color, Alpha::Opaque)
        .on_hover_text(color::to_hex(label.color))
        .changed()
    {
        commands.push(Command::update(id, LabelPatch::color(text_color)));
    }
    ui.add_space(8.0);

    ui.label("Background Color");
    ui.horizontal(|ui| {
        let mut background = label.background.unwrap_or(Color32::WHITE);
        if color_edit_button_srgba(ui, &mut background, Alpha::Opaque).changed() {
            commands.push(Command::update(id, LabelPatch::background(Some(background))));
        }
        if ui
            .add_enabled(label.background.is_some(), egui::Button::new("Transparent"))
            .clicked()
        {
            commands.push(Command::update(id, LabelPatch::background(None)));
        }
    });
    ui.add_space(16.0);

    let delete = egui::Button::new(RichText::new("Delete Label").color(Color32::WHITE))
        .fill(Color32::from_rgb(220, 38, 38));
    if ui.add_sized([ui.available_width(), 28.0], delete).clicked() {
        commands.push(Command::RemoveLabel(id));
    }

    commands
}
