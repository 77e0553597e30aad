use eframe::egui;

/// Which glyph style the button's caption previews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caption {
    Bold,
    Italic,
}

/// A square on/off button for a text attribute
pub struct ToggleButton {
    pub text: &'static str,
    pub caption: Caption,
    pub active: bool,
}

impl ToggleButton {
    pub fn bold(active: bool) -> Self {
        Self {
            text: "B",
            caption: Caption::Bold,
            active,
        }
    }

    pub fn italic(active: bool) -> Self {
        Self {
            text: "I",
            caption: Caption::Italic,
            active,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(40.0, 28.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.active {
                egui::Color32::from_rgb(100, 181, 246)
            } else if response.hovered() {
                egui::Color32::from_gray(70)
            } else {
                egui::Color32::from_gray(45)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.active {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };
            let mut job = egui::text::LayoutJob::default();
            job.append(
                self.text,
                0.0,
                egui::TextFormat {
                    font_id: egui::FontId::proportional(18.0),
                    color: text_color,
                    italics: self.caption == Caption::Italic,
                    ..Default::default()
                },
            );
            let galley = ui.fonts(|fonts| fonts.layout_job(job));
            let pos = rect.center() - galley.size() / 2.0;
            ui.painter().galley(pos, galley.clone(), text_color);
            if self.caption == Caption::Bold {
                ui.painter().galley(pos + egui::vec2(1.0, 0.0), galley, text_color);
            }

            if self.active {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(match self.caption {
            Caption::Bold => "Bold",
            Caption::Italic => "Italic",
        })
    }
}
