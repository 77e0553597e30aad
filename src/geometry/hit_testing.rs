use egui::{Pos2, Rect};

use crate::label::LabelId;

/// Find the label under `pos`. Labels later in `rects` are drawn on top, so
/// they win when rectangles overlap.
pub fn topmost_label_at(pos: Pos2, rects: &[(LabelId, Rect)]) -> Option<LabelId> {
    rects
        .iter()
        .rev()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn later_label_wins_on_overlap() {
        let below = LabelId::new();
        let above = LabelId::new();
        let rects = [
            (below, Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 50.0))),
            (above, Rect::from_min_size(pos2(50.0, 0.0), vec2(100.0, 50.0))),
        ];

        assert_eq!(topmost_label_at(pos2(75.0, 10.0), &rects), Some(above));
        assert_eq!(topmost_label_at(pos2(10.0, 10.0), &rects), Some(below));
        assert_eq!(topmost_label_at(pos2(500.0, 10.0), &rects), None);
    }
}
