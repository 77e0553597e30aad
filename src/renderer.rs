use std::sync::Arc;

use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, Galley, Painter, Pos2, Rect, Stroke, Vec2};

use crate::label::Label;

/// Space between a label's text and its edges
pub const LABEL_PADDING: Vec2 = Vec2::new(6.0, 3.0);

/// Shown instead of the text while a label is empty
pub const PLACEHOLDER_TEXT: &str = "Click to edit";

const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
const LABEL_ROUNDING: f32 = 3.0;
const BOLD_OFFSET: f32 = 0.7;

/// A label laid out for this frame
#[derive(Debug, Clone)]
pub struct LabelLayout {
    pub galley: Arc<Galley>,
    /// Text extent plus padding; this is what gets clamped when dragging
    pub size: Vec2,
}

impl LabelLayout {
    pub fn rect_at(&self, top_left: Pos2) -> Rect {
        Rect::from_min_size(top_left, self.size)
    }
}

/// Build the text layout job for a label, falling back to the placeholder
pub fn label_layout_job(label: &Label) -> LayoutJob {
    let (text, color) = if label.text.is_empty() {
        (PLACEHOLDER_TEXT, label.color.gamma_multiply(0.5))
    } else {
        (label.text.as_str(), label.color)
    };

    let mut job = LayoutJob::default();
    job.append(
        text,
        0.0,
        TextFormat {
            font_id: FontId::proportional(label.font_size as f32),
            color,
            italics: label.font_style.is_italic(),
            ..Default::default()
        },
    );
    job
}

pub fn layout_label(ctx: &egui::Context, label: &Label) -> LabelLayout {
    let galley = ctx.fonts(|fonts| fonts.layout_job(label_layout_job(label)));
    let mut size = galley.size() + LABEL_PADDING * 2.0;
    if label.font_weight.is_bold() {
        size.x += BOLD_OFFSET;
    }
    LabelLayout { galley, size }
}

/// Paint a label at `rect`. `chrome` draws the selection highlight.
pub fn paint_label(painter: &Painter, rect: Rect, label: &Label, layout: &LabelLayout, selected: bool, chrome: bool) {
    if let Some(background) = label.background {
        painter.rect_filled(rect, LABEL_ROUNDING, background);
    }

    let text_pos = rect.min + LABEL_PADDING;
    painter.galley(text_pos, layout.galley.clone(), label.color);
    if label.font_weight.is_bold() {
        // egui's default fonts have no bold face, so strike the glyphs twice
        painter.galley(text_pos + Vec2::new(BOLD_OFFSET, 0.0), layout.galley.clone(), label.color);
    }

    if selected && chrome {
        painter.rect_stroke(rect.expand(1.0), LABEL_ROUNDING, Stroke::new(1.5, SELECTION_COLOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{FontStyle, LabelId};

    #[test]
    fn empty_label_uses_placeholder() {
        let label = Label::new(LabelId::new(), "", Pos2::ZERO);
        let job = label_layout_job(&label);
        assert_eq!(job.text, PLACEHOLDER_TEXT);
    }

    #[test]
    fn italic_flag_reaches_text_format() {
        let mut label = Label::new(LabelId::new(), "slanted", Pos2::ZERO);
        label.font_style = FontStyle::Italic;
        let job = label_layout_job(&label);
        assert!(job.sections.iter().all(|section| section.format.italics));
    }

    #[test]
    fn layout_size_includes_padding() {
        let ctx = egui::Context::default();
        let label = Label::new(LabelId::new(), "hello", Pos2::ZERO);
        // Fonts are only available once a frame has started
        let _ = ctx.run(Default::default(), |ctx| {
            let layout = layout_label(ctx, &label);
            assert!(layout.size.x >= layout.galley.size().x + LABEL_PADDING.x * 2.0);
            assert!(layout.size.y >= layout.galley.size().y + LABEL_PADDING.y * 2.0);
        });
    }
}
