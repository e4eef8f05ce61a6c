//! Log2-warped sampling grid.
//!
//! LUT entries are spaced uniformly in log2 of the linear value rather than
//! in the value itself, which puts most of the resolution in the shadows and
//! midtones. A consumer samples the LUT through the matching lg2 allocation
//! transform, so the grid size and both log2 bounds travel together.
//!
//! ```text
//! value(i) = 2 ^ (i / (N - 1) * (log2_max - log2_min) + log2_min)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use neutral_lut::LogGrid;
//!
//! let grid = LogGrid::PBR_NEUTRAL;
//! assert_eq!(grid.inverse_log(0), 2f64.powi(-9));
//! assert_eq!(grid.inverse_log(56), 1024.0);
//! ```

use crate::{LutError, LutResult};

/// Domain warp and edge size of a log-sampled 3D LUT.
///
/// Changing any field here without changing the consumer's allocation
/// transform yields a structurally valid but perceptually wrong LUT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogGrid {
    /// Entries per axis.
    pub size: usize,
    /// log2 of the value sampled at index 0.
    pub log2_min: f64,
    /// log2 of the value sampled at index `size - 1`.
    pub log2_max: f64,
}

impl LogGrid {
    /// Reference configuration: 57 entries spanning 2^-9 ..= 2^10.
    ///
    /// Must match the `lg2` allocation vars in the OCIO config shipping the LUT.
    pub const PBR_NEUTRAL: Self = Self {
        size: 57,
        log2_min: -9.0,
        log2_max: 10.0,
    };

    /// Creates a grid, rejecting degenerate sizes and ranges.
    pub fn new(size: usize, log2_min: f64, log2_max: f64) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "grid needs at least 2 entries per axis, got {}",
                size
            )));
        }
        if !(log2_min.is_finite() && log2_max.is_finite()) || log2_min >= log2_max {
            return Err(LutError::InvalidRange {
                min: log2_min,
                max: log2_max,
            });
        }
        Ok(Self {
            size,
            log2_min,
            log2_max,
        })
    }

    /// Maps an axis index to its linear sample value.
    #[inline]
    pub fn inverse_log(&self, i: usize) -> f64 {
        let log2 = (i as f64 / (self.size - 1) as f64) * (self.log2_max - self.log2_min)
            + self.log2_min;
        2f64.powf(log2)
    }

    /// Linear RGB sample for a grid index.
    #[inline]
    pub fn sample(&self, [r, g, b]: [usize; 3]) -> [f64; 3] {
        [self.inverse_log(r), self.inverse_log(g), self.inverse_log(b)]
    }

    /// Total number of grid points (`size^3`).
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Iterates grid indices in `.cube` order: red fastest, then green, then blue.
    pub fn indices(&self) -> GridIndices {
        GridIndices {
            size: self.size,
            next: 0,
            end: self.entry_count(),
        }
    }

    /// Iterates linear RGB samples in `.cube` order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = [f64; 3]> + '_ {
        self.indices().map(move |idx| self.sample(idx))
    }
}

impl Default for LogGrid {
    fn default() -> Self {
        Self::PBR_NEUTRAL
    }
}

/// Iterator over `[r, g, b]` grid indices, blue outermost.
#[derive(Debug, Clone)]
pub struct GridIndices {
    size: usize,
    next: usize,
    end: usize,
}

impl Iterator for GridIndices {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        let r = i % self.size;
        let g = (i / self.size) % self.size;
        let b = i / (self.size * self.size);
        Some([r, g, b])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for GridIndices {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_bounds() {
        let grid = LogGrid::default();
        assert_eq!(grid, LogGrid::PBR_NEUTRAL);
        assert_eq!(grid.inverse_log(0), 1.0 / 512.0);
        assert_eq!(grid.inverse_log(56), 1024.0);
        // Midpoint of 19 stops sits at 2^0.5
        assert_relative_eq!(grid.inverse_log(28), 2f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_monotonic() {
        let grid = LogGrid::PBR_NEUTRAL;
        for i in 1..grid.size {
            assert!(grid.inverse_log(i) > grid.inverse_log(i - 1));
        }
    }

    #[test]
    fn test_index_order() {
        let grid = LogGrid::new(3, 0.0, 1.0).unwrap();
        let idx: Vec<[usize; 3]> = grid.indices().collect();
        assert_eq!(idx.len(), 27);
        assert_eq!(idx[0], [0, 0, 0]);
        assert_eq!(idx[1], [1, 0, 0]);
        assert_eq!(idx[3], [0, 1, 0]);
        assert_eq!(idx[9], [0, 0, 1]);
        assert_eq!(idx[26], [2, 2, 2]);
    }

    #[test]
    fn test_exact_size() {
        let grid = LogGrid::PBR_NEUTRAL;
        let mut it = grid.indices();
        assert_eq!(it.len(), 57 * 57 * 57);
        it.next();
        assert_eq!(it.len(), 57 * 57 * 57 - 1);
        assert_eq!(grid.samples().len(), grid.entry_count());
    }

    #[test]
    fn test_samples_follow_indices() {
        let grid = LogGrid::PBR_NEUTRAL;
        let s: Vec<[f64; 3]> = grid.samples().take(58).collect();
        assert_eq!(s[1], [grid.inverse_log(1), grid.inverse_log(0), grid.inverse_log(0)]);
        assert_eq!(s[57], [grid.inverse_log(0), grid.inverse_log(1), grid.inverse_log(0)]);
    }

    #[test]
    fn test_rejects_degenerate() {
        assert!(matches!(LogGrid::new(1, -9.0, 10.0), Err(LutError::InvalidSize(_))));
        assert!(matches!(
            LogGrid::new(57, 10.0, -9.0),
            Err(LutError::InvalidRange { .. })
        ));
        assert!(matches!(
            LogGrid::new(57, f64::NEG_INFINITY, 10.0),
            Err(LutError::InvalidRange { .. })
        ));
    }
}
