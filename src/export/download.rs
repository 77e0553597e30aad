use std::path::PathBuf;

use crate::error::ExportError;

/// Delivers an encoded export to the user
pub trait DownloadSink {
    /// Store `bytes` under `file_name`. Returns where the file went, or
    /// `None` when the user declined.
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<Option<String>, ExportError>;
}

/// Writes exports straight into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<Option<String>, ExportError> {
        let path = self.dir.join(file_name);
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::Write {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(path.display().to_string()))
    }
}

/// Asks where to save through the native save dialog, suggesting `file_name`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct SaveDialogSink;

#[cfg(not(target_arch = "wasm32"))]
impl DownloadSink for SaveDialogSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<Option<String>, ExportError> {
        let extension = file_name.rsplit('.').next().unwrap_or("png");
        let Some(path) = rfd::FileDialog::new()
            .set_title("Export Image")
            .set_file_name(file_name)
            .add_filter(extension.to_uppercase(), &[extension])
            .save_file()
        else {
            log::info!("export of {} dismissed", file_name);
            return Ok(None);
        };

        std::fs::write(&path, bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(path.display().to_string()))
    }
}
