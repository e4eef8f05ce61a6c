//! 3-dimensional lookup table.
//!
//! A baked 3D LUT maps a (log-warped) RGB grid to output RGB values. This
//! crate only generates and serializes tables; it does not interpolate them.

use crate::{LogGrid, LutError, LutResult};

/// A 3-dimensional lookup table.
///
/// # Structure
///
/// - `size^3` entries, each containing RGB output values
/// - Stored in `.cube` order: R varies fastest, then G, then B
/// - Optional title and comment lines carried into the file header
///
/// # Example
///
/// ```rust
/// use neutral_lut::{Lut3D, LogGrid};
///
/// let grid = LogGrid::new(5, -2.0, 2.0).unwrap();
/// let lut = Lut3D::from_grid(&grid, |rgb| rgb);
/// assert_eq!(lut.get(4, 0, 0)[0], 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// LUT data, flattened as: [(r0,g0,b0), (r1,g0,b0), ..., (rN,gN,bN)]
    pub data: Vec<[f64; 3]>,
    /// Cube size (57 for the PBR Neutral LUT)
    pub size: usize,
    /// Input domain minimum (per channel)
    pub domain_min: [f64; 3],
    /// Input domain maximum (per channel)
    pub domain_max: [f64; 3],
    /// `TITLE` line contents
    pub title: Option<String>,
    /// `#` comment lines, without the leading marker
    pub comments: Vec<String>,
}

impl Lut3D {
    /// Creates a 3D LUT from raw data.
    ///
    /// Data must be in `.cube` order with exactly `size^3` entries.
    pub fn from_data(data: Vec<[f64; 3]>, size: usize) -> LutResult<Self> {
        let expected = size * size * size;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self {
            data,
            size,
            domain_min: [0.0, 0.0, 0.0],
            domain_max: [1.0, 1.0, 1.0],
            title: None,
            comments: Vec::new(),
        })
    }

    /// Evaluates `f` at every grid sample, in `.cube` order.
    pub fn from_grid<F>(grid: &LogGrid, f: F) -> Self
    where
        F: Fn([f64; 3]) -> [f64; 3],
    {
        Self {
            data: grid.samples().map(f).collect(),
            size: grid.size,
            domain_min: [0.0, 0.0, 0.0],
            domain_max: [1.0, 1.0, 1.0],
            title: None,
            comments: Vec::new(),
        }
    }

    /// Sets the input domain.
    pub fn with_domain(mut self, min: [f64; 3], max: [f64; 3]) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Appends a header comment line.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    /// Returns the total number of entries in the LUT.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Returns the index for a given (r, g, b) grid position.
    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        b * self.size * self.size + g * self.size + r
    }

    /// Gets the value at grid position (r, g, b).
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is `>= size`.
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f64; 3] {
        assert!(r < self.size && g < self.size && b < self.size);
        self.data[self.index(r, g, b)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let data = vec![[0.0, 0.0, 0.0]; 8];
        let lut = Lut3D::from_data(data, 2).unwrap();
        assert_eq!(lut.size, 2);
        assert_eq!(lut.entry_count(), 8);
        assert_eq!(lut.domain_max, [1.0, 1.0, 1.0]);

        let bad = vec![[0.0, 0.0, 0.0]; 7];
        assert!(matches!(Lut3D::from_data(bad, 2), Err(LutError::InvalidSize(_))));
    }

    #[test]
    fn test_from_grid_order() {
        let grid = LogGrid::new(3, 0.0, 2.0).unwrap();
        let lut = Lut3D::from_grid(&grid, |rgb| rgb);
        assert_eq!(lut.data.len(), 27);
        // R fastest
        assert_eq!(lut.data[1], [2.0, 1.0, 1.0]);
        assert_eq!(lut.data[3], [1.0, 2.0, 1.0]);
        assert_eq!(lut.data[9], [1.0, 1.0, 2.0]);
        assert_eq!(lut.get(2, 1, 0), [4.0, 2.0, 1.0]);
    }

    #[test]
    fn test_header_builders() {
        let lut = Lut3D::from_data(vec![[0.0; 3]; 8], 2)
            .unwrap()
            .with_title("Grade")
            .with_comment("first")
            .with_comment("second")
            .with_domain([0.0; 3], [2.0; 3]);
        assert_eq!(lut.title.as_deref(), Some("Grade"));
        assert_eq!(lut.comments, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(lut.domain_max, [2.0; 3]);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        let lut = Lut3D::from_data(vec![[0.0; 3]; 8], 2).unwrap();
        lut.get(2, 0, 0);
    }
}
