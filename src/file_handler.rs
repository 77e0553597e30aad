use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::LoadError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// A decoded upload, ready to become a texture
pub struct LoadedImage {
    pub name: String,
    pub pixels: egui::ColorImage,
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("name", &self.name)
            .field("size", &self.pixels.size)
            .finish()
    }
}

pub type LoadResult = Result<LoadedImage, LoadError>;

/// Accepts uploads from the file picker and from dropped files.
///
/// Reading and decoding happen off the UI thread; finished uploads are
/// picked up by [`FileHandler::poll`] in completion order, so the last one
/// to finish is the one that ends up displayed.
pub struct FileHandler {
    sender: UnboundedSender<LoadResult>,
    receiver: UnboundedReceiver<LoadResult>,
    in_flight: usize,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self {
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Number of uploads still being read or decoded
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Take the first file dropped onto the window this frame, if any
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> Option<Result<(), LoadError>> {
        let file = ctx.input(|i| i.raw.dropped_files.first().cloned())?;
        Some(self.submit_dropped(file))
    }

    /// Start loading a dropped file, rejecting anything that is not an image
    pub fn submit_dropped(&mut self, file: egui::DroppedFile) -> Result<(), LoadError> {
        let name = if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        };

        if !is_image_file(&file.mime, file.path.as_deref().or(Some(Path::new(&file.name)))) {
            log::warn!("dropped file is not an image: {}", name);
            return Err(LoadError::NotAnImage(name));
        }

        if let Some(bytes) = file.bytes {
            log::info!("loading dropped image from memory: {} ({} bytes)", name, bytes.len());
            self.submit_bytes(name, bytes);
            Ok(())
        } else if let Some(path) = file.path {
            self.submit_path(path)
        } else {
            log::warn!("dropped file has no accessible data: {}", name);
            Err(LoadError::Empty(name))
        }
    }

    /// Show the native file picker and load the chosen image
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_file_dialog(&mut self) -> Option<Result<(), LoadError>> {
        let path = rfd::FileDialog::new()
            .set_title("Choose Image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()?;
        Some(self.submit_path(path))
    }

    /// Read and decode an image file in the background
    pub fn submit_path(&mut self, path: PathBuf) -> Result<(), LoadError> {
        if !is_image_file("", Some(&path)) {
            log::warn!("not an image: {}", path.display());
            return Err(LoadError::NotAnImage(path.display().to_string()));
        }
        log::info!("loading image from path: {}", path.display());
        self.spawn(move || {
            let bytes = std::fs::read(&path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;
            decode_image(&path.display().to_string(), &bytes)
        });
        Ok(())
    }

    /// Decode already-read image bytes in the background
    pub fn submit_bytes(&mut self, name: String, bytes: Arc<[u8]>) {
        self.spawn(move || decode_image(&name, &bytes));
    }

    fn spawn(&mut self, job: impl FnOnce() -> LoadResult + Send + 'static) {
        self.in_flight += 1;
        let sender = self.sender.clone();

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            // The receiver lives as long as the handler; a closed channel means the app is gone
            let _ = sender.unbounded_send(job());
        });

        #[cfg(target_arch = "wasm32")]
        {
            let _ = sender.unbounded_send(job());
        }
    }

    /// Uploads that finished since the last call, in completion order
    pub fn poll(&mut self) -> Vec<LoadResult> {
        let mut finished = Vec::new();
        while let Ok(Some(result)) = self.receiver.try_next() {
            self.in_flight = self.in_flight.saturating_sub(1);
            finished.push(result);
        }
        finished
    }

    /// Darken the window and list the files while they hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop image to label it:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

/// Whether a file looks like an image, by MIME type or, when that is
/// unknown, by extension
pub fn is_image_file(mime: &str, path: Option<&Path>) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    path.and_then(Path::extension)
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode image bytes into an RGBA buffer egui can upload
pub fn decode_image(name: &str, bytes: &[u8]) -> LoadResult {
    if bytes.is_empty() {
        return Err(LoadError::Empty(name.to_owned()));
    }
    let image = image::load_from_memory(bytes).map_err(|source| LoadError::Decode {
        name: name.to_owned(),
        source,
    })?;
    log::debug!("decoded {}: {}x{}", name, image.width(), image.height());

    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
    Ok(LoadedImage {
        name: name.to_owned(),
        pixels,
    })
}
