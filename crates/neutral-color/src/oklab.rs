//! Linear sRGB <-> OKLab conversion.
//!
//! OKLab is an opponent space (lightness plus two chroma axes) where
//! Euclidean distance roughly tracks perceived difference. The mapping is
//! two fixed 3x3 matrices around a per-channel cube root:
//!
//! ```text
//! lab = M2 * cbrt(M1 * rgb)
//! rgb = M1^-1 * (M2^-1 * lab)^3
//! ```
//!
//! Both directions are total: negative inputs take a signed cube root and
//! nothing is clamped.
//!
//! # Reference
//!
//! Björn Ottosson, "A perceptual color space for image processing", 2020.

use glam::{DMat3, DVec3};

/// Builds a matrix from row-major coefficients.
const fn from_rows(m: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(m[0][0], m[1][0], m[2][0]),
        DVec3::new(m[0][1], m[1][1], m[2][1]),
        DVec3::new(m[0][2], m[1][2], m[2][2]),
    )
}

/// Linear sRGB to LMS cone response (M1).
pub const RGB_TO_LMS: DMat3 = from_rows([
    [0.4122214708, 0.5363325363, 0.0514459929],
    [0.2119034982, 0.6806995451, 0.1073969566],
    [0.0883024619, 0.2817188376, 0.6299787005],
]);

/// Cube-rooted LMS to OKLab (M2).
pub const LMS_TO_LAB: DMat3 = from_rows([
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
]);

/// OKLab to cube-rooted LMS (M2^-1).
pub const LAB_TO_LMS: DMat3 = from_rows([
    [1.0, 0.3963377774, 0.2158037573],
    [1.0, -0.1055613458, -0.0638541728],
    [1.0, -0.0894841775, -1.2914855480],
]);

/// LMS cone response to linear sRGB (M1^-1).
pub const LMS_TO_RGB: DMat3 = from_rows([
    [4.0767416621, -3.3077115913, 0.2309699292],
    [-1.2684380046, 2.6097574011, -0.3413193965],
    [-0.0041960863, -0.7034186147, 1.7076147010],
]);

/// Converts linear sRGB to OKLab `[L, a, b]`.
///
/// # Example
///
/// ```rust
/// use neutral_color::oklab::to_oklab;
///
/// let lab = to_oklab([1.0, 1.0, 1.0]);
/// assert!((lab[0] - 1.0).abs() < 1e-6);
/// assert!(lab[1].abs() < 1e-6 && lab[2].abs() < 1e-6);
/// ```
#[inline]
pub fn to_oklab(rgb: [f64; 3]) -> [f64; 3] {
    let lms = RGB_TO_LMS * DVec3::from_array(rgb);
    let lms_ = DVec3::new(lms.x.cbrt(), lms.y.cbrt(), lms.z.cbrt());
    (LMS_TO_LAB * lms_).to_array()
}

/// Converts OKLab `[L, a, b]` to linear sRGB.
#[inline]
pub fn from_oklab(lab: [f64; 3]) -> [f64; 3] {
    let lms_ = LAB_TO_LMS * DVec3::from_array(lab);
    let lms = lms_ * lms_ * lms_;
    (LMS_TO_RGB * lms).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_black_and_white() {
        assert_eq!(to_oklab([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(from_oklab([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);

        let white = to_oklab([1.0, 1.0, 1.0]);
        assert_abs_diff_eq!(white[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(white[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(white[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_red_reference() {
        // Published OKLab value for sRGB red
        let lab = to_oklab([1.0, 0.0, 0.0]);
        assert_abs_diff_eq!(lab[0], 0.627955, epsilon = 1e-5);
        assert_abs_diff_eq!(lab[1], 0.224863, epsilon = 1e-5);
        assert_abs_diff_eq!(lab[2], 0.125846, epsilon = 1e-5);
    }

    #[test]
    fn test_gray_is_achromatic() {
        for v in [0.001, 0.18, 0.5, 4.0] {
            let lab = to_oklab([v, v, v]);
            assert_abs_diff_eq!(lab[0], v.cbrt(), epsilon = 1e-6);
            assert_abs_diff_eq!(lab[1], 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(lab[2], 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_roundtrip() {
        let colors = [
            [0.5, 0.3, 0.2],
            [0.02, 0.9, 0.1],
            [1.2, 0.8, 3.5],
            [0.0, 0.0, 1.0],
        ];
        // The published coefficients are rounded to 10 digits, so the
        // round trip is only good to about 1e-7
        for rgb in colors {
            let back = from_oklab(to_oklab(rgb));
            for c in 0..3 {
                assert_abs_diff_eq!(back[c], rgb[c], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_negative_is_signed() {
        // Out-of-gamut input keeps its sign through the cube root
        let lab = to_oklab([-0.1, -0.1, -0.1]);
        assert!(lab[0] < 0.0);
        assert_abs_diff_eq!(lab[0], -(0.1f64.cbrt()), epsilon = 1e-6);

        let back = from_oklab(lab);
        assert_abs_diff_eq!(back[0], -0.1, epsilon = 1e-6);
    }
}
