use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::foundation::core::{Canvas, Raster};
use crate::foundation::error::{TunnelError, TunnelResult};

/// A decoded, RGBA-normalized source image at the working resolution.
///
/// Loading does all file IO up front; the pipeline only ever reads the pixels.
#[derive(Clone, Debug)]
pub struct SourceImage {
    raster: Raster,
    path: Option<PathBuf>,
}

impl SourceImage {
    /// Decode `path` and resize it to `working` with a Lanczos filter.
    pub fn load(path: impl AsRef<Path>, working: Canvas) -> TunnelResult<Self> {
        let path = path.as_ref();
        if working.width == 0 || working.height == 0 {
            return Err(TunnelError::validation("working size must be non-zero"));
        }
        if !path.is_file() {
            return Err(TunnelError::input(path, "file not found"));
        }

        let dyn_img = image::open(path).map_err(|e| TunnelError::input(path, e.to_string()))?;
        let rgba = dyn_img.to_rgba8();
        let rgba = if rgba.dimensions() == (working.width, working.height) {
            rgba
        } else {
            image::imageops::resize(&rgba, working.width, working.height, FilterType::Lanczos3)
        };

        tracing::debug!(
            path = %path.display(),
            width = working.width,
            height = working.height,
            "loaded source image"
        );
        Ok(Self {
            raster: Raster::from_rgba_image(rgba),
            path: Some(path.to_path_buf()),
        })
    }

    /// Use an in-memory RGBA buffer as-is; its size becomes the working size.
    pub fn from_rgba(img: image::RgbaImage) -> Self {
        Self {
            raster: Raster::from_rgba_image(img),
            path: None,
        }
    }

    /// Pixels at the working resolution.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Working resolution.
    pub fn canvas(&self) -> Canvas {
        self.raster.canvas()
    }

    /// Where the pixels came from, when loaded from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
