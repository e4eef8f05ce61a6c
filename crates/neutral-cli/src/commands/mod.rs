//! CLI command implementations

pub mod apply;
pub mod bake;
pub mod check;

/// Format an RGB triple for display
pub fn format_rgb(rgb: [f64; 3]) -> String {
    format!("{} {} {}", rgb[0], rgb[1], rgb[2])
}
