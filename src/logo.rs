//! Asynchronous logo loading.
//!
//! Reading and decoding happen on the tokio runtime; the returned
//! [`PendingLogo`] is the completion signal the generator awaits once the
//! QR surface exists.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::LogoError;

/// A logo that is being read and decoded in the background.
#[derive(Debug)]
pub struct PendingLogo {
    path: PathBuf,
    task: JoinHandle<Result<RgbaImage, LogoError>>,
}

impl PendingLogo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the load to complete.
    pub async fn wait(self) -> Result<RgbaImage, LogoError> {
        self.task.await?
    }
}

/// Starts loading the image at `path`. Must be called within a tokio runtime.
pub fn spawn_load(path: impl Into<PathBuf>) -> PendingLogo {
    let path = path.into();
    let task_path = path.clone();
    let task = tokio::spawn(async move {
        let bytes = tokio::fs::read(&task_path).await?;
        debug!(path = %task_path.display(), len = bytes.len(), "logo read");
        let decoded = tokio::task::spawn_blocking(move || decode(&bytes)).await??;
        Ok::<_, LogoError>(decoded)
    });
    PendingLogo { path, task }
}

/// Decodes an encoded image (PNG, JPEG, ...) into RGBA.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, LogoError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::png_bytes;
    use image::Rgba;

    #[tokio::test]
    async fn test_load_png_logo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let logo = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        std::fs::write(&path, png_bytes(&logo).unwrap()).unwrap();

        let pending = spawn_load(&path);
        assert_eq!(pending.path(), path.as_path());
        assert_eq!(pending.wait().await.unwrap(), logo);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let pending = spawn_load("/definitely/not/here.png");
        assert!(matches!(pending.wait().await, Err(LogoError::Io(_))));
    }

    #[tokio::test]
    async fn test_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(spawn_load(&path).wait().await, Err(LogoError::Decode(_))));
    }
}
