use std::sync::Arc;

use egui::{ColorImage, Pos2, Rect, UserData, Vec2, ViewportCommand};
use futures::channel::oneshot;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::RenderRegion;
use crate::error::ExportError;

pub type RasterResult = Result<RgbaImage, ExportError>;

/// How long to wait for the backend to deliver a requested screenshot
pub const SCREENSHOT_TIMEOUT_SECS: f64 = 5.0;

/// Converts a visual region into a bitmap, asynchronously.
///
/// The receiver resolves with the bitmap, with an error if the region could
/// not be rendered, or is cancelled if the rasterizer goes away first.
pub trait Rasterizer {
    fn rasterize(&mut self, region: RenderRegion) -> oneshot::Receiver<RasterResult>;
}

struct PendingShot {
    request: u64,
    /// `egui::InputState::time` when the screenshot was requested
    requested_at: f64,
    region: RenderRegion,
    sender: oneshot::Sender<RasterResult>,
}

/// Rasterizes through the window's own screenshot facility: egui renders
/// the frame, the backend hands back the pixels, and the viewport region is
/// cropped out of them.
pub struct ScreenshotRasterizer {
    ctx: egui::Context,
    next_request: u64,
    pending: Vec<PendingShot>,
}

impl ScreenshotRasterizer {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_request: 0,
            pending: Vec::new(),
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Resolve pending requests from screenshots delivered this frame, and
    /// fail the ones that have waited too long
    pub fn collect(&mut self, ctx: &egui::Context) {
        if self.pending.is_empty() {
            return;
        }

        let shots: Vec<(Option<u64>, Arc<ColorImage>)> = ctx.input(|i| {
            i.raw
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Screenshot { user_data, image, .. } => {
                        let request = user_data
                            .data
                            .as_ref()
                            .and_then(|data| data.downcast_ref::<u64>())
                            .copied();
                        Some((request, image.clone()))
                    }
                    _ => None,
                })
                .collect()
        });

        let pixels_per_point = ctx.pixels_per_point();
        for (request, screenshot) in shots {
            let Some(index) = self.pending.iter().position(|shot| Some(shot.request) == request) else {
                continue;
            };
            let shot = self.pending.remove(index);
            let result = crop_region(&screenshot, shot.region.rect, pixels_per_point)
                .and_then(|cropped| to_export_bitmap(&cropped, shot.region.pixel_size()));
            if let Err(err) = &result {
                log::error!("screenshot {} unusable: {}", shot.request, err);
            }
            // The adapter may have been reset; then nobody is waiting
            let _ = shot.sender.send(result);
        }

        self.expire(ctx.input(|i| i.time));
    }

    /// Fail every request older than [`SCREENSHOT_TIMEOUT_SECS`] at `now`
    pub fn expire(&mut self, now: f64) {
        let (expired, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|shot| now - shot.requested_at >= SCREENSHOT_TIMEOUT_SECS);
        self.pending = waiting;

        for shot in expired {
            log::error!("screenshot {} never arrived", shot.request);
            let _ = shot.sender.send(Err(ExportError::Rasterize(format!(
                "no screenshot after {SCREENSHOT_TIMEOUT_SECS} seconds"
            ))));
        }
    }
}

impl Rasterizer for ScreenshotRasterizer {
    fn rasterize(&mut self, region: RenderRegion) -> oneshot::Receiver<RasterResult> {
        let (sender, receiver) = oneshot::channel();
        let request = self.next_request;
        self.next_request += 1;

        log::debug!("requesting screenshot {} for {:?}", request, region.rect);
        self.ctx
            .send_viewport_cmd(ViewportCommand::Screenshot(UserData::new(request)));
        self.ctx.request_repaint();
        self.pending.push(PendingShot {
            request,
            requested_at: self.ctx.input(|i| i.time),
            region,
            sender,
        });
        receiver
    }
}

pub(crate) fn crop_region(screenshot: &ColorImage, rect: Rect, pixels_per_point: f32) -> Result<ColorImage, ExportError> {
    let [width, height] = screenshot.size;
    let bounds = Rect::from_min_size(
        Pos2::ZERO,
        Vec2::new(width as f32, height as f32) / pixels_per_point,
    );
    let visible = rect.intersect(bounds);
    if !visible.is_positive() {
        return Err(ExportError::Rasterize("the viewport is not on screen".to_owned()));
    }
    Ok(screenshot.region(&visible, Some(pixels_per_point)))
}

/// Convert captured pixels to an RGBA bitmap of exactly `target` pixels
pub fn to_export_bitmap(pixels: &ColorImage, target: [u32; 2]) -> RasterResult {
    let [width, height] = pixels.size;
    let raw: Vec<u8> = pixels
        .pixels
        .iter()
        .flat_map(|color| color.to_srgba_unmultiplied())
        .collect();
    let bitmap = RgbaImage::from_raw(width as u32, height as u32, raw)
        .ok_or_else(|| ExportError::Rasterize(format!("bad pixel buffer for {width}x{height}")))?;

    let [target_width, target_height] = target;
    if bitmap.dimensions() == (target_width, target_height) {
        Ok(bitmap)
    } else {
        Ok(imageops::resize(&bitmap, target_width, target_height, FilterType::Lanczos3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2, Color32};

    fn region() -> RenderRegion {
        RenderRegion {
            rect: Rect::from_min_size(pos2(0.0, 0.0), vec2(4.0, 4.0)),
            scale: 2.0,
        }
    }

    #[test]
    fn translucent_pixels_keep_their_alpha() {
        // A window cleared to transparent with a half-transparent image on it
        let mut screenshot = ColorImage::new([8, 8], Color32::TRANSPARENT);
        let translucent = Color32::from_rgba_unmultiplied(200, 30, 30, 128);
        for y in 2..6 {
            for x in 2..6 {
                screenshot[(x, y)] = translucent;
            }
        }

        let viewport = Rect::from_min_size(pos2(2.0, 2.0), vec2(4.0, 4.0));
        let cropped = crop_region(&screenshot, viewport, 1.0).unwrap();
        assert_eq!(cropped.size, [4, 4]);

        let bitmap = to_export_bitmap(&cropped, [8, 8]).unwrap();
        let alpha = bitmap.get_pixel(4, 4).0[3];
        assert!(alpha < 255 && alpha > 100, "alpha {alpha}");
    }

    #[test]
    fn region_outside_the_screenshot_is_an_error() {
        let screenshot = ColorImage::new([8, 8], Color32::TRANSPARENT);
        let far_away = Rect::from_min_size(pos2(50.0, 50.0), vec2(4.0, 4.0));
        assert!(matches!(
            crop_region(&screenshot, far_away, 1.0),
            Err(ExportError::Rasterize(_))
        ));
    }

    #[test]
    fn unanswered_screenshot_fails_after_the_timeout() {
        let mut rasterizer = ScreenshotRasterizer::new(egui::Context::default());
        let mut receiver = rasterizer.rasterize(region());

        rasterizer.expire(SCREENSHOT_TIMEOUT_SECS / 2.0);
        assert!(rasterizer.has_pending());
        assert!(matches!(receiver.try_recv(), Ok(None)));

        rasterizer.expire(SCREENSHOT_TIMEOUT_SECS + 1.0);
        assert!(!rasterizer.has_pending());
        assert!(matches!(receiver.try_recv(), Ok(Some(Err(ExportError::Rasterize(_))))));
    }
}
