//! LUT baking with round-trip verification.
//!
//! [`bake`] walks a [`LogGrid`] once. Every sample is pushed through the
//! forward transform into the table, then through the inverse, and the
//! relative recovery error is folded into a [`RoundTrip`] report.

use crate::{LogGrid, Lut3D};
use tracing::debug;

/// Floor for the input magnitude in [`relative_error`], so an all-zero
/// input does not divide by zero.
pub const MAGNITUDE_EPSILON: f64 = 1e-20;

/// Euclidean distance between `base` and `check`, relative to `|base|`.
pub fn relative_error(base: [f64; 3], check: [f64; 3]) -> f64 {
    let d = [check[0] - base[0], check[1] - base[1], check[2] - base[2]];
    let d_mag = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
    let base_mag = (base[0] * base[0] + base[1] * base[1] + base[2] * base[2]).sqrt();
    d_mag / base_mag.max(MAGNITUDE_EPSILON)
}

/// Summary of how well an inverse recovers the baked inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundTrip {
    /// Number of samples checked.
    pub samples: usize,
    /// Largest finite relative error seen.
    pub max_error: f64,
    /// Grid index of the sample with `max_error`.
    pub worst: Option<[usize; 3]>,
    /// Samples whose recovered value was NaN or infinite.
    pub non_finite: usize,
}

impl RoundTrip {
    /// Folds one sample's error into the report.
    pub fn record(self, index: [usize; 3], error: f64) -> Self {
        let samples = self.samples + 1;
        if !error.is_finite() {
            return Self {
                samples,
                non_finite: self.non_finite + 1,
                ..self
            };
        }
        if self.worst.is_none() || error > self.max_error {
            Self {
                samples,
                max_error: error,
                worst: Some(index),
                ..self
            }
        } else {
            Self { samples, ..self }
        }
    }

    /// True when no finite sample exceeded `bound`.
    ///
    /// Non-finite samples are only counted in `non_finite`.
    pub fn within(&self, bound: f64) -> bool {
        self.max_error <= bound
    }
}

/// A baked table together with its verification report.
#[derive(Debug, Clone)]
pub struct Baked {
    /// Forward transform sampled over the grid.
    pub lut: Lut3D,
    /// Round-trip error of `inverse(forward(x))` over the same grid.
    pub report: RoundTrip,
}

/// Samples `forward` over `grid` and checks `inverse` against every sample.
///
/// Runs single-threaded in `.cube` order; the output is fully determined by
/// the grid and the two functions.
pub fn bake<F, I>(grid: &LogGrid, forward: F, inverse: I) -> Baked
where
    F: Fn([f64; 3]) -> [f64; 3],
    I: Fn([f64; 3]) -> [f64; 3],
{
    let (data, report) = grid.indices().fold(
        (Vec::with_capacity(grid.entry_count()), RoundTrip::default()),
        |(mut data, report), index| {
            let rgb_in = grid.sample(index);
            let rgb_out = forward(rgb_in);
            data.push(rgb_out);
            let recovered = inverse(rgb_out);
            (data, report.record(index, relative_error(rgb_in, recovered)))
        },
    );

    debug!(
        size = grid.size,
        samples = report.samples,
        max_error = report.max_error,
        non_finite = report.non_finite,
        "baked LUT"
    );

    let lut = Lut3D {
        data,
        size: grid.size,
        domain_min: [0.0, 0.0, 0.0],
        domain_max: [1.0, 1.0, 1.0],
        title: None,
        comments: Vec::new(),
    };
    Baked { lut, report }
}
