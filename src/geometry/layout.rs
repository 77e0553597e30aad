use egui::{Pos2, Vec2};

/// Display size for an image of `image` pixels shown in a window of
/// `available` points, keeping the aspect ratio and staying within
/// `fraction` of each window axis.
///
/// The width cap is applied first and the height recomputed from it; only
/// then is the height cap checked, which may shrink the width again.
pub fn fit_display_size(image: Vec2, available: Vec2, fraction: f32) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let max_width = available.x * fraction;
    let max_height = available.y * fraction;
    let aspect_ratio = image.x / image.y;

    let mut width = image.x;
    let mut height = image.y;

    if width > max_width {
        width = max_width;
        height = width / aspect_ratio;
    }

    if height > max_height {
        height = max_height;
        width = height * aspect_ratio;
    }

    Vec2::new(width, height)
}

/// Clamp a label's top-left corner so the label stays inside the viewport.
///
/// A label larger than the viewport is pinned to the origin on that axis,
/// so the lower bound wins over the upper one.
pub fn clamp_to_viewport(proposed: Pos2, viewport: Vec2, label: Vec2) -> Pos2 {
    Pos2::new(
        proposed.x.min(viewport.x - label.x).max(0.0),
        proposed.y.min(viewport.y - label.y).max(0.0),
    )
}
