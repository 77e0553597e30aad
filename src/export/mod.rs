//! Export of the viewport as a raster image.
//!
//! The adapter owns no rendering logic of its own: a [`Rasterizer`] turns
//! the viewport region into a bitmap, the adapter encodes it, and a
//! [`DownloadSink`] delivers the file.

mod download;
mod rasterizer;

use std::io::Cursor;

use egui::Rect;
use futures::channel::oneshot;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

pub use download::{DirectorySink, DownloadSink};
#[cfg(not(target_arch = "wasm32"))]
pub use download::SaveDialogSink;
pub use rasterizer::{to_export_bitmap, RasterResult, Rasterizer, ScreenshotRasterizer};

const JPEG_QUALITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Png, ExportFormat::Jpg];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

/// The viewport area to rasterize, in points, and the output pixel density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRegion {
    pub rect: Rect,
    pub scale: f32,
}

impl RenderRegion {
    /// Output size in pixels
    pub fn pixel_size(&self) -> [u32; 2] {
        let size = self.rect.size() * self.scale;
        [size.x.round().max(1.0) as u32, size.y.round().max(1.0) as u32]
    }
}

/// `labeled-image-<unix millis>.<ext>`
pub fn export_file_name(format: ExportFormat, unix_millis: u64) -> String {
    format!("labeled-image-{}.{}", unix_millis, format.extension())
}

/// Encode a bitmap. JPEG has no alpha channel, so it is flattened to RGB.
pub fn encode(bitmap: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Png => {
            bitmap.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        }
        ExportFormat::Jpg => {
            let rgb = DynamicImage::ImageRgba8(bitmap.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)?;
        }
    }
    Ok(bytes)
}

struct PendingExport {
    format: ExportFormat,
    receiver: oneshot::Receiver<RasterResult>,
}

/// Drives one export at a time from request to written file
pub struct ExportAdapter {
    scale: f32,
    pending: Option<PendingExport>,
}

impl ExportAdapter {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ask the rasterizer for the viewport region.
    ///
    /// # Errors
    ///
    /// [`ExportError::MissingViewport`] when there is no region to render,
    /// [`ExportError::Busy`] when an export is still in flight.
    pub fn start(
        &mut self,
        region: Option<Rect>,
        format: ExportFormat,
        rasterizer: &mut dyn Rasterizer,
    ) -> Result<(), ExportError> {
        if self.pending.is_some() {
            return Err(ExportError::Busy);
        }
        let rect = region
            .filter(|rect| rect.is_positive())
            .ok_or(ExportError::MissingViewport)?;

        let region = RenderRegion {
            rect,
            scale: self.scale,
        };
        log::info!("exporting {:?} as {}", region, format.extension());
        let receiver = rasterizer.rasterize(region);
        self.pending = Some(PendingExport { format, receiver });
        Ok(())
    }

    /// Finish the pending export once the rasterizer has delivered.
    ///
    /// Returns `None` while still waiting. On success the result holds where
    /// the file went, or `None` if the user dismissed the save dialog.
    pub fn poll(
        &mut self,
        sink: &mut dyn DownloadSink,
        unix_millis: u64,
    ) -> Option<Result<Option<String>, ExportError>> {
        let pending = self.pending.as_mut()?;
        let raster = match pending.receiver.try_recv() {
            Ok(None) => return None,
            Ok(Some(raster)) => raster,
            Err(oneshot::Canceled) => Err(ExportError::Cancelled),
        };
        let format = pending.format;
        self.pending = None;

        Some(raster.and_then(|bitmap| {
            let bytes = encode(&bitmap, format)?;
            sink.save(&export_file_name(format, unix_millis), &bytes)
        }))
    }
}
