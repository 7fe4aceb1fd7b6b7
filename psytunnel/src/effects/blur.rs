use crate::foundation::core::Raster;
use crate::foundation::error::{TunnelError, TunnelResult};

/// Kernel radius for `sigma`, mirroring the classic automatic kernel size
/// `ksize = round(6 * sigma + 1) | 1`.
pub fn auto_kernel_radius(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    let ksize = ((sigma * 6.0 + 1.0).round() as u32) | 1;
    ksize / 2
}

/// Gaussian blur of `frame` with the given `sigma`, every channel independently.
///
/// Borders replicate the edge pixels. A zero sigma returns the frame untouched.
pub fn gaussian_blur(frame: Raster, sigma: f64) -> TunnelResult<Raster> {
    let radius = auto_kernel_radius(sigma);
    if radius == 0 {
        return Ok(frame);
    }
    let data = blur_rgba8(&frame.data, frame.width, frame.height, radius, sigma)?;
    Raster::from_raw(frame.width, frame.height, data)
}

pub(crate) fn blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f64,
) -> TunnelResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| TunnelError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(TunnelError::render(
            "blur_rgba8 expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = kernel_q16(radius, sigma)?;
    let (w, h) = (width as usize, height as usize);
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    // Rows: neighbours are 1 pixel apart. Columns: neighbours are one row apart.
    convolve_axis(src, &mut tmp, Axis { lines: h, len: w, line_step: w, tap_step: 1 }, &kernel);
    convolve_axis(&tmp, &mut out, Axis { lines: w, len: h, line_step: 1, tap_step: w }, &kernel);
    Ok(out)
}

/// Normalized Gaussian taps in Q16, summing to exactly `1 << 16`.
fn kernel_q16(radius: u32, sigma: f64) -> TunnelResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(TunnelError::validation("blur sigma must be finite and > 0"));
    }
    let r = i64::from(radius);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return Err(TunnelError::render("gaussian kernel sum is zero"));
    }

    let mut taps: Vec<u32> = raw
        .iter()
        .map(|w| ((w / total) * ONE_Q16 as f64).round().clamp(0.0, ONE_Q16 as f64) as u32)
        .collect();
    let sum: i64 = taps.iter().map(|&t| i64::from(t)).sum();
    // Rounding residue goes to the center tap.
    let center = taps.len() / 2;
    taps[center] = (i64::from(taps[center]) + i64::from(ONE_Q16) - sum).clamp(0, i64::from(ONE_Q16))
        as u32;
    Ok(taps)
}

const ONE_Q16: u32 = 1 << 16;

/// Addressing of one separable pass over an RGBA8 buffer, in pixel units.
#[derive(Clone, Copy)]
struct Axis {
    lines: usize,
    len: usize,
    line_step: usize,
    tap_step: usize,
}

fn convolve_axis(src: &[u8], dst: &mut [u8], axis: Axis, kernel: &[u32]) {
    let radius = (kernel.len() / 2) as i64;
    let last = axis.len as i64 - 1;
    for line in 0..axis.lines {
        let base = line * axis.line_step;
        for pos in 0..axis.len {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let p = (pos as i64 + k as i64 - radius).clamp(0, last) as usize;
                let at = (base + p * axis.tap_step) * 4;
                for (a, &v) in acc.iter_mut().zip(&src[at..at + 4]) {
                    *a += u64::from(weight) * u64::from(v);
                }
            }
            let at = (base + pos * axis.tap_step) * 4;
            for (d, a) in dst[at..at + 4].iter_mut().zip(acc) {
                *d = ((a + u64::from(ONE_Q16 / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
