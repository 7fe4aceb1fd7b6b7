use crate::foundation::core::Rgba8;

/// Round and clamp a float into the `u8` channel range.
#[inline]
pub(crate) fn saturate_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Straight-alpha "over": paint `src` on top of `dst`.
///
/// `out_a = sa + da * (1 - sa)`, `out_rgb = (src * sa + dst * da * (1 - sa)) / out_a`.
/// Fully transparent sources leave `dst` untouched.
pub(crate) fn over_straight(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src[3] == 0 {
        return dst;
    }
    let sa = f64::from(src[3]) / 255.0;
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (f64::from(src[c]) * sa + f64::from(dst[c]) * da * (1.0 - sa)) / out_a;
        out[c] = saturate_u8(v);
    }
    out[3] = saturate_u8(out_a * 255.0);
    out
}

/// RGB8 to 8-bit HSV with hue in `0..180` and saturation/value in `0..=255`.
pub(crate) fn rgb_to_hsv8(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let v = r.max(g).max(b);
    let vmin = r.min(g).min(b);
    let diff = v - vmin;

    let s = if v == 0 {
        0
    } else {
        ((f64::from(diff) * 255.0) / f64::from(v)).round() as i32
    };

    if diff == 0 {
        return [0, s as u8, v as u8];
    }

    // Hue in units of `diff` per 60 degrees, then scaled to the 180 range.
    let h_raw = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = ((f64::from(h_raw) * 30.0) / f64::from(diff)).round() as i32;
    if h < 0 {
        h += 180;
    }
    [h.rem_euclid(180) as u8, s.clamp(0, 255) as u8, v as u8]
}

/// Inverse of [`rgb_to_hsv8`].
pub(crate) fn hsv8_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
    let v_f = f64::from(v);
    if s == 0 {
        return [v, v, v];
    }
    let s_f = f64::from(s) / 255.0;
    let h6 = (f64::from(h) * 6.0 / 180.0).rem_euclid(6.0);
    let sector = h6.floor();
    let f = h6 - sector;

    let p = v_f * (1.0 - s_f);
    let q = v_f * (1.0 - s_f * f);
    let t = v_f * (1.0 - s_f * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v_f, t, p),
        1 => (q, v_f, p),
        2 => (p, v_f, t),
        3 => (p, q, v_f),
        4 => (t, p, v_f),
        _ => (v_f, p, q),
    };
    [saturate_u8(r), saturate_u8(g), saturate_u8(b)]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
