//! PBR Neutral tone mapping.
//!
//! A display transform that keeps base colors intact as long as possible:
//! everything below [`START_COMPRESSION`] passes through (apart from a small
//! black offset), and only highlights are rolled off toward 1.0 and
//! desaturated in OKLab.
//!
//! # Stages
//!
//! ```text
//! offset     x = min(rgb);  rgb -= x < 0.08 ? x - 6.25 x^2 : 0.04
//! compress   peak = max(rgb) >= 0.76:  rgb *= newPeak / peak
//! desaturate lab = oklab(rgb);  L = f L + (1 - f) newPeak;  ab *= f
//! ```
//!
//! [`inverse_tone_map`] is a closed-form approximation of the inverse. It
//! stands in the compressed peak for the OKLab lightness when undoing the
//! desaturation, which is exact only for achromatic input; saturated
//! highlights can come back far off, or out of domain entirely.

use crate::oklab::{from_oklab, to_oklab};
use neutral_lut::{Baked, LogGrid};

/// Peak value where highlight compression begins.
pub const START_COMPRESSION: f64 = 0.8 - 0.04;

/// Strength of the highlight desaturation.
pub const DESATURATION: f64 = 0.15;

/// Below this input minimum the black offset follows a parabola.
const OFFSET_KNEE: f64 = 0.08;

/// Offset applied at and above [`OFFSET_KNEE`].
const OFFSET_MAX: f64 = 0.04;

/// Parabola coefficient; `x - 6.25 x^2` meets `0.04` at `x = 0.08` with zero slope.
const OFFSET_CURVE: f64 = 6.25;

/// `TITLE` of the baked LUT.
pub const LUT_TITLE: &str = "PBR Neutral sRGB";

/// Header comment of the baked LUT.
pub const LUT_COMMENT: &str = "PBR Neutral sRGB LUT";

#[inline]
fn min3(rgb: [f64; 3]) -> f64 {
    rgb[0].min(rgb[1]).min(rgb[2])
}

#[inline]
fn max3(rgb: [f64; 3]) -> f64 {
    rgb[0].max(rgb[1]).max(rgb[2])
}

#[inline]
fn offset_rgb(rgb: [f64; 3], offset: f64) -> [f64; 3] {
    [rgb[0] + offset, rgb[1] + offset, rgb[2] + offset]
}

#[inline]
fn scale_rgb(rgb: [f64; 3], scale: f64) -> [f64; 3] {
    [rgb[0] * scale, rgb[1] * scale, rgb[2] * scale]
}

/// Black offset for a given channel minimum.
#[inline]
pub(crate) fn black_offset(x: f64) -> f64 {
    if x < OFFSET_KNEE {
        x - OFFSET_CURVE * x * x
    } else {
        OFFSET_MAX
    }
}

/// Black offset recovered from an already-offset channel minimum.
///
/// Expects `y >= 0`; a negative `y` yields NaN.
#[inline]
pub(crate) fn inverse_black_offset(y: f64) -> f64 {
    if y < OFFSET_MAX {
        let x = (y / OFFSET_CURVE).sqrt();
        x - OFFSET_CURVE * x * x
    } else {
        OFFSET_MAX
    }
}

/// Applies the PBR Neutral tone mapping to a linear RGB triple.
///
/// The result is not clamped. Achromatic input always lands in [0, 1);
/// strongly saturated highlights may overshoot 1 slightly after the OKLab
/// desaturation.
///
/// # Example
///
/// ```rust
/// use neutral_color::neutral::tone_map;
///
/// assert_eq!(tone_map([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
/// let out = tone_map([0.5, 0.3, 0.2]);
/// assert_eq!(out, [0.5 - 0.04, 0.3 - 0.04, 0.2 - 0.04]);
/// ```
pub fn tone_map(rgb: [f64; 3]) -> [f64; 3] {
    let rgb = offset_rgb(rgb, -black_offset(min3(rgb)));

    let peak = max3(rgb);
    if peak < START_COMPRESSION {
        return rgb;
    }

    let d = 1.0 - START_COMPRESSION;
    let new_peak = 1.0 - d * d / (peak + d - START_COMPRESSION);
    let rgb = scale_rgb(rgb, new_peak / peak);

    let [l, a, b] = to_oklab(rgb);
    let f = 1.0 / (DESATURATION * (peak - new_peak) + 1.0);
    from_oklab([f * l + (1.0 - f) * new_peak, f * a, f * b])
}

/// Approximately inverts [`tone_map`].
///
/// Exact below the compression threshold. Above it, the desaturation is
/// undone in RGB around the compressed peak, so only neutral colors recover
/// precisely. Inputs must be non-negative; when the undone desaturation
/// pushes a channel below zero the result is NaN.
pub fn inverse_tone_map(rgb: [f64; 3]) -> [f64; 3] {
    let mut rgb = rgb;

    let peak = max3(rgb);
    if peak > START_COMPRESSION {
        let d = 1.0 - START_COMPRESSION;
        let old_peak = d * d / (1.0 - peak) - d + START_COMPRESSION;
        let f_inv = DESATURATION * (old_peak - peak) + 1.0;
        let f = 1.0 / f_inv;
        rgb = rgb.map(|c| (c + (f - 1.0) * peak) * f_inv);
        rgb = scale_rgb(rgb, old_peak / peak);
    }

    offset_rgb(rgb, inverse_black_offset(min3(rgb)))
}

/// Bakes [`tone_map`] over `grid` into a titled LUT and checks
/// [`inverse_tone_map`] against every sample.
///
/// Pass [`LogGrid::PBR_NEUTRAL`] for the shipping LUT.
pub fn bake_lut(grid: &LogGrid) -> Baked {
    let baked = neutral_lut::bake(grid, tone_map, inverse_tone_map);
    Baked {
        lut: baked.lut.with_title(LUT_TITLE).with_comment(LUT_COMMENT),
        report: baked.report,
    }
}
