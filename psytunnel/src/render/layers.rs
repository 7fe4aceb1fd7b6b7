use image::RgbaImage;
use image::imageops::FilterType;

use crate::foundation::core::{Affine, FrameIndex, Point, Raster};
use crate::foundation::math::over_straight;
use crate::transform::sample::BorderMode;
use crate::transform::warp::warp_affine;

/// Layers smaller than this on either axis end the tunnel.
pub const MIN_LAYER_PX: u32 = 2;

/// Geometry of the recursive tunnel composite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunnelSpec {
    /// Maximum number of layers painted.
    pub max_layers: u32,
    /// Scale ratio between consecutive layers, in `(0, 1]`.
    pub scale_decay: f64,
    /// Rotation step per frame, in degrees (positive is clockwise on screen).
    pub angle_per_frame: f64,
}

impl TunnelSpec {
    /// Rotation of every layer in `frame`: `angle_per_frame * frame`, in degrees.
    pub fn angle_at(&self, frame: FrameIndex) -> f64 {
        self.angle_per_frame * frame.0 as f64
    }
}

/// Paint the tunnel of shrinking, rotated copies of `source` onto `frame`.
///
/// Each layer is resized from the previous layer (not from `source`) to
/// `scale * source size`, rotated about its own center with transparent fill, then pasted
/// center-aligned using straight-alpha "over". Returns the number of layers painted.
pub fn composite_tunnel(
    frame: &mut Raster,
    source: &Raster,
    spec: TunnelSpec,
    index: FrameIndex,
) -> u32 {
    if spec.max_layers == 0 || source.width == 0 || source.height == 0 {
        return 0;
    }

    let angle_deg = spec.angle_at(index);
    let rotate = angle_deg.rem_euclid(360.0) != 0.0;
    let mut running: RgbaImage = source.to_rgba_image();
    let mut scale = 1.0f64;
    let mut painted = 0u32;

    for layer in 0..spec.max_layers {
        let sw = (f64::from(source.width) * scale) as u32;
        let sh = (f64::from(source.height) * scale) as u32;
        if sw < MIN_LAYER_PX || sh < MIN_LAYER_PX {
            tracing::trace!(layer, sw, sh, "tunnel reached minimum layer size");
            break;
        }

        let resized = if running.dimensions() == (sw, sh) {
            running
        } else {
            image::imageops::resize(&running, sw, sh, FilterType::Lanczos3)
        };

        let layer_raster = Raster::from_rgba_image(resized.clone());
        let layer_raster = if rotate {
            let center = Point::new(f64::from(sw) / 2.0, f64::from(sh) / 2.0);
            warp_affine(
                &layer_raster,
                layer_raster.canvas(),
                Affine::rotate_about(angle_deg.to_radians(), center),
                BorderMode::Transparent,
            )
        } else {
            layer_raster
        };

        let paste_x = i64::from(frame.width / 2) - i64::from(sw / 2);
        let paste_y = i64::from(frame.height / 2) - i64::from(sh / 2);
        if paste_over(frame, &layer_raster, paste_x, paste_y) {
            painted += 1;
        } else {
            tracing::trace!(layer, "layer does not intersect frame; skipped");
        }

        scale *= spec.scale_decay;
        running = resized;
    }
    painted
}

/// Straight-alpha "over" of `layer` placed at `(x, y)`, limited to the frame bounds.
///
/// Returns `false` when the placed rect misses the frame entirely.
pub(crate) fn paste_over(frame: &mut Raster, layer: &Raster, x: i64, y: i64) -> bool {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(layer.width)).min(i64::from(frame.width));
    let y1 = (y + i64::from(layer.height)).min(i64::from(frame.height));
    if x0 >= x1 || y0 >= y1 {
        return false;
    }

    for fy in y0..y1 {
        let ly = (fy - y) as u32;
        for fx in x0..x1 {
            let lx = (fx - x) as u32;
            let src = layer.pixel(lx, ly);
            if src[3] == 0 {
                continue;
            }
            let dst = frame.pixel(fx as u32, fy as u32);
            frame.set_pixel(fx as u32, fy as u32, over_straight(dst, src));
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
