use image::imageops::FilterType;

use crate::foundation::core::Raster;

/// Mosaic `frame` into `level` x `level` blocks.
///
/// Downscales to `(w / level, h / level)` and back up, both with nearest-neighbour sampling.
/// Levels 0 and 1 are no-ops; levels larger than the frame collapse to a single block.
pub fn pixelate(frame: Raster, level: u32) -> Raster {
    if level <= 1 || frame.width == 0 || frame.height == 0 {
        return frame;
    }
    let (w, h) = (frame.width, frame.height);
    let small_w = (w / level).max(1);
    let small_h = (h / level).max(1);

    let img = frame.into_rgba_image();
    let small = image::imageops::resize(&img, small_w, small_h, FilterType::Nearest);
    let big = image::imageops::resize(&small, w, h, FilterType::Nearest);
    Raster::from_rgba_image(big)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pixelate.rs"]
mod tests;
