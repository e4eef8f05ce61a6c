//! # neutral-lut
//!
//! Log-warped 3D LUT generation for tone-mapping transforms.
//!
//! This crate samples an arbitrary RGB transform on a log2-spaced grid,
//! verifies an approximate inverse against the same grid, and writes the
//! result as a `.cube` file. It knows nothing about the transform itself;
//! callers pass the forward and inverse functions as closures.
//!
//! # Components
//!
//! - [`LogGrid`] - grid size and log2 domain warp (see [`LogGrid::PBR_NEUTRAL`])
//! - [`Lut3D`] - baked table in `.cube` order
//! - [`bake()`] - single-pass generation plus [`RoundTrip`] error report
//! - [`cube`] - `.cube` reading and writing
//!
//! # Usage
//!
//! ```rust
//! use neutral_lut::{bake, cube, LogGrid};
//!
//! let grid = LogGrid::new(9, -4.0, 4.0).unwrap();
//! let halve = |rgb: [f64; 3]| [rgb[0] * 0.5, rgb[1] * 0.5, rgb[2] * 0.5];
//! let double = |rgb: [f64; 3]| [rgb[0] * 2.0, rgb[1] * 2.0, rgb[2] * 2.0];
//!
//! let baked = bake(&grid, halve, double);
//! assert_eq!(baked.report.max_error, 0.0);
//!
//! let text = cube::to_string(&baked.lut).unwrap();
//! assert!(text.contains("LUT_3D_SIZE 9"));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `neutral-color` - [`bake()`] with the PBR Neutral operator
//! - `neutral-cli` - `pbr-neutral bake` / `check`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod grid;
mod lut3d;
pub mod bake;
pub mod cube;

pub use bake::{bake, relative_error, Baked, RoundTrip};
pub use error::{LutError, LutResult};
pub use grid::{GridIndices, LogGrid};
pub use lut3d::Lut3D;
pub use cube::{read_3d as read_cube_3d, write_3d as write_cube_3d};
