//! # neutral-color
//!
//! The PBR Neutral tone-mapping operator and the OKLab conversion it uses.
//!
//! - [`oklab`] - Linear sRGB <-> OKLab
//! - [`neutral`] - Forward tone map, its approximate inverse, and LUT baking
//!
//! All functions are pure and operate on `[f64; 3]` linear RGB triples.
//! Nothing here validates or clamps input: out-of-range values flow through
//! the arithmetic as-is.
//!
//! # Usage
//!
//! ```rust
//! use neutral_color::{tone_map, inverse_tone_map};
//!
//! let hdr = [0.5, 0.3, 0.2];
//! let display = tone_map(hdr);
//! let back = inverse_tone_map(display);
//! assert!((back[0] - hdr[0]).abs() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - 3x3 matrix math for the OKLab transforms
//! - `neutral-lut` - Grid sampling and baking for [`neutral::bake_lut`]
//!
//! # Used By
//!
//! - `neutral-cli` - LUT baking and single-value evaluation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod neutral;
pub mod oklab;

pub use neutral::{bake_lut, inverse_tone_map, tone_map, DESATURATION, START_COMPRESSION};
pub use oklab::{from_oklab, to_oklab};
