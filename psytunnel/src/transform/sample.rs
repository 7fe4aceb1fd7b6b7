use crate::foundation::core::{Raster, Rgba8};
use crate::foundation::math::saturate_u8;

/// How samples outside the source bounds are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderMode {
    /// Out-of-bounds samples are fully transparent.
    Transparent,
    /// Clamp to the nearest edge pixel.
    Replicate,
    /// Mirror about the edge pixel without repeating it (`dcb|abcd|cba`).
    Reflect101,
}

/// Map a possibly out-of-range coordinate into `[0, len)`, or `None` for transparent borders.
#[inline]
pub(crate) fn border_index(i: i64, len: u32, mode: BorderMode) -> Option<usize> {
    let n = i64::from(len);
    if n == 0 {
        return None;
    }
    if (0..n).contains(&i) {
        return Some(i as usize);
    }
    match mode {
        BorderMode::Transparent => None,
        BorderMode::Replicate => Some(i.clamp(0, n - 1) as usize),
        BorderMode::Reflect101 => {
            if n == 1 {
                return Some(0);
            }
            let period = 2 * (n - 1);
            let mut j = i.rem_euclid(period);
            if j >= n {
                j = period - j;
            }
            Some(j as usize)
        }
    }
}

#[inline]
fn fetch(src: &Raster, x: i64, y: i64, mode: BorderMode) -> Rgba8 {
    match (
        border_index(x, src.width, mode),
        border_index(y, src.height, mode),
    ) {
        (Some(xi), Some(yi)) => src.pixel(xi as u32, yi as u32),
        _ => [0, 0, 0, 0],
    }
}

/// Bilinear sample at floating-point source coordinates (pixel centers at integers).
///
/// Channels are interpolated independently, straight alpha.
pub(crate) fn sample_bilinear(src: &Raster, fx: f64, fy: f64, mode: BorderMode) -> Rgba8 {
    if !fx.is_finite() || !fy.is_finite() {
        return [0, 0, 0, 0];
    }
    let x0 = fx.floor();
    let y0 = fy.floor();
    let ax = fx - x0;
    let ay = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    if ax == 0.0 && ay == 0.0 {
        return fetch(src, x0, y0, mode);
    }

    let p00 = fetch(src, x0, y0, mode);
    let p10 = fetch(src, x0 + 1, y0, mode);
    let p01 = fetch(src, x0, y0 + 1, mode);
    let p11 = fetch(src, x0 + 1, y0 + 1, mode);

    let w00 = (1.0 - ax) * (1.0 - ay);
    let w10 = ax * (1.0 - ay);
    let w01 = (1.0 - ax) * ay;
    let w11 = ax * ay;

    let mut out = [0u8; 4];
    for c in 0..4 {
        let v = f64::from(p00[c]) * w00
            + f64::from(p10[c]) * w10
            + f64::from(p01[c]) * w01
            + f64::from(p11[c]) * w11;
        out[c] = saturate_u8(v);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/sample.rs"]
mod tests;
