use crate::foundation::core::{Affine, Canvas, Point, Raster};
use crate::transform::sample::{BorderMode, sample_bilinear};

/// Resample `src` through `forward` into a raster of size `out`.
///
/// `forward` maps source coordinates to destination coordinates; each destination pixel is
/// filled by inverse-mapping it into the source and sampling bilinearly.
pub(crate) fn warp_affine(
    src: &Raster,
    out: Canvas,
    forward: Affine,
    border: BorderMode,
) -> Raster {
    let inverse = forward.inverse();
    remap(src, out, border, |x, y| {
        let p = inverse * Point::new(x, y);
        (p.x, p.y)
    })
}

/// Resample `src` with an arbitrary destination-to-source coordinate map.
pub(crate) fn remap<F>(src: &Raster, out: Canvas, border: BorderMode, map: F) -> Raster
where
    F: Fn(f64, f64) -> (f64, f64),
{
    let mut dst = Raster::transparent(out.width, out.height);
    if out.width == 0 || out.height == 0 || src.width == 0 || src.height == 0 {
        return dst;
    }
    let row_len = out.width as usize * 4;
    for (y, row) in dst.data.chunks_exact_mut(row_len).enumerate() {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let (fx, fy) = map(x as f64, y as f64);
            px.copy_from_slice(&sample_bilinear(src, fx, fy, border));
        }
    }
    dst
}

#[cfg(test)]
#[path = "../../tests/unit/transform/warp.rs"]
mod tests;
