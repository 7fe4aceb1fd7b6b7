use crate::foundation::error::{TunnelError, TunnelResult};

pub use kurbo::{Affine, Point, Vec2};

/// Absolute 0-based frame index within one animation run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Working canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas of `width` x `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Geometric center in pixel coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Number of pixels covered by the canvas.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// A straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Owned straight-alpha RGBA8 frame buffer.
///
/// Pixels are tightly packed, row-major, 4 bytes each. A raster is owned by exactly one stage at
/// a time; stages either mutate it in place or hand back a replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Raster filled with a single pixel value.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> Self {
        Self {
            width,
            height,
            data: px.repeat((width as usize) * (height as usize)),
        }
    }

    /// Wrap existing bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> TunnelResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| TunnelError::validation("raster size overflow"))?;
        if data.len() != expected {
            return Err(TunnelError::validation(format!(
                "raster data length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an `image` RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Convert into an `image` RGBA buffer without copying.
    pub fn into_rgba_image(self) -> image::RgbaImage {
        // Length is an invariant of every constructor.
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| image::RgbaImage::new(0, 0))
    }

    /// Borrow as an `image` RGBA buffer (copies).
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        self.clone().into_rgba_image()
    }

    /// Canvas describing this raster's size.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Read the pixel at `(x, y)`. Coordinates must be in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let idx = self.offset(x, y);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`. Coordinates must be in bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        let idx = self.offset(x, y);
        self.data[idx..idx + 4].copy_from_slice(&px);
    }

    /// `true` when every pixel has zero alpha.
    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
