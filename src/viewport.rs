use egui::{ColorImage, Rect, TextureHandle, TextureOptions, Vec2};

use crate::file_handler::LoadedImage;
use crate::geometry::fit_display_size;

/// The on-screen region showing the image and its labels.
///
/// The display size is computed once when the image is loaded. The rect is
/// refreshed every frame the viewport is laid out and is the region handed
/// to the rasterizer on export.
pub struct Viewport {
    name: String,
    texture: TextureHandle,
    image_size: [usize; 2],
    display_size: Vec2,
    rect: Option<Rect>,
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("name", &self.name)
            .field("image_size", &self.image_size)
            .field("display_size", &self.display_size)
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}

impl Viewport {
    pub fn new(ctx: &egui::Context, image: LoadedImage, available: Vec2, fraction: f32) -> Self {
        let LoadedImage { name, pixels } = image;
        let image_size = pixels.size;
        let display_size = display_size_for(&pixels, available, fraction);
        log::info!(
            "showing {} ({}x{}) at {:.0}x{:.0}",
            name,
            image_size[0],
            image_size[1],
            display_size.x,
            display_size.y
        );
        let texture = ctx.load_texture(format!("viewport:{name}"), pixels, TextureOptions::LINEAR);
        Self {
            name,
            texture,
            image_size,
            display_size,
            rect: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> &TextureHandle {
        &self.texture
    }

    pub fn image_size(&self) -> [usize; 2] {
        self.image_size
    }

    pub fn display_size(&self) -> Vec2 {
        self.display_size
    }

    /// Screen rect of the last frame the viewport was drawn in
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }
}

fn display_size_for(pixels: &ColorImage, available: Vec2, fraction: f32) -> Vec2 {
    let [width, height] = pixels.size;
    fit_display_size(Vec2::new(width as f32, height as f32), available, fraction)
}
