use crate::foundation::core::{FrameIndex, Raster};

/// `true` when frame `index` is inverted under `period`. Period 0 never inverts.
pub fn inverts_at(period: u32, index: FrameIndex) -> bool {
    period > 0 && index.0 % u64::from(period) == 0
}

/// Replace every RGB channel `c` with `255 - c`, keeping alpha.
pub fn invert_rgb(mut frame: Raster) -> Raster {
    for px in frame.data.chunks_exact_mut(4) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/effects/invert.rs"]
mod tests;
