//! Adobe/Resolve .cube LUT format support.
//!
//! The .cube format is a simple text-based LUT format widely supported
//! by OCIO, DaVinci Resolve, Adobe applications, and many other tools.
//!
//! # Format
//!
//! ```text
//! TITLE "LUT Name"
//! # Comment
//! DOMAIN_MIN 0 0 0
//! DOMAIN_MAX 1 1 1
//! LUT_3D_SIZE 57
//! 0.0000238 0.0000238 0.0000238
//! ...
//! 0.9998319 0.9998319 0.9998319
//! ```
//!
//! Values are written with at most 7 decimals and no trailing zeros, so
//! `0.5` stays `0.5` and `1.0` becomes `1`.
//!
//! # Example
//!
//! ```rust,ignore
//! use neutral_lut::cube;
//!
//! cube::write_3d("passableNeutral.cube", &lut)?;
//! let back = cube::read_3d("passableNeutral.cube")?;
//! ```

use crate::{Lut3D, LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Decimal places kept when serializing LUT values.
pub const DECIMALS: usize = 7;

/// Formats a number with [`DECIMALS`] places, then strips trailing zeros
/// and a dangling decimal point.
///
/// Exact ties round away from zero (`0.00390625` -> `0.0039063`), where
/// `{:.N}` alone would round them to even.
pub fn format_decimal(x: f64) -> String {
    let x = if is_rounding_tie(x) {
        // next double away from zero is past the tie
        f64::from_bits(x.to_bits() + 1)
    } else {
        x
    };
    let s = format!("{:.*}", DECIMALS, x);
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// True when `x` sits exactly halfway between two [`DECIMALS`]-place values.
///
/// That happens only for odd multiples of `2^-(DECIMALS + 1)`, whose decimal
/// expansion ends in a single `5` right after the kept digits.
fn is_rounding_tie(x: f64) -> bool {
    let scaled = x * 2f64.powi(DECIMALS as i32 + 1);
    scaled.is_finite() && scaled.fract() == 0.0 && scaled.rem_euclid(2.0) == 1.0
}

/// Formats a LUT output value: clamped to [0, 1], then [`format_decimal`].
///
/// NaN is passed through and written as `NaN`.
pub fn format_value(x: f64) -> String {
    format_decimal(clamp01(x))
}

/// Clamps to [0, 1] the way values are written; NaN passes through.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else if x <= 0.0 {
        // also folds -0.0 to 0
        0.0
    } else {
        x.min(1.0)
    }
}

/// Reads a 3D LUT from a .cube file.
pub fn read_3d<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let file = File::open(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "reading cube");
    parse_3d(BufReader::new(file))
}

/// Parses a 3D LUT from a reader.
///
/// Entries are kept in file order (red fastest).
pub fn parse_3d<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    let mut size: Option<usize> = None;
    let mut title: Option<String> = None;
    let mut comments: Vec<String> = Vec::new();
    let mut domain_min = [0.0_f64; 3];
    let mut domain_max = [1.0_f64; 3];
    let mut data: Vec<[f64; 3]> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            comments.push(comment.trim().to_string());
            continue;
        }

        if let Some(rest) = line.strip_prefix("TITLE") {
            title = Some(rest.trim().trim_matches('"').to_string());
        } else if line.starts_with("LUT_3D_SIZE") {
            size = Some(parse_size(line)?);
        } else if line.starts_with("LUT_1D_SIZE") {
            return Err(LutError::ParseError("expected 3D LUT, found 1D".into()));
        } else if line.starts_with("DOMAIN_MIN") {
            domain_min = parse_domain(line)?;
        } else if line.starts_with("DOMAIN_MAX") {
            domain_max = parse_domain(line)?;
        } else {
            data.push(parse_rgb(line)?);
        }
    }

    let size = size.ok_or_else(|| LutError::ParseError("missing LUT_3D_SIZE".into()))?;
    let expected = size * size * size;
    if data.len() != expected {
        return Err(LutError::ParseError(format!(
            "expected {} values, found {}",
            expected,
            data.len()
        )));
    }
    trace!(size, entries = data.len(), "parsed cube");

    let mut lut = Lut3D::from_data(data, size)?.with_domain(domain_min, domain_max);
    lut.title = title;
    lut.comments = comments;
    Ok(lut)
}

/// Writes a 3D LUT to a .cube file.
///
/// The file is created (or truncated), fully written and flushed; any
/// I/O failure is returned and the file must be treated as invalid.
pub fn write_3d<P: AsRef<Path>>(path: P, lut: &Lut3D) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_3d_to(&mut writer, lut)?;
    writer.flush()?;
    debug!(path = %path.as_ref().display(), entries = lut.data.len(), "wrote cube");
    Ok(())
}

/// Writes a 3D LUT in .cube format to any writer.
pub fn write_3d_to<W: Write>(writer: &mut W, lut: &Lut3D) -> LutResult<()> {
    if lut.data.len() != lut.entry_count() {
        return Err(LutError::InvalidSize(format!(
            "expected {} entries for size {}, got {}",
            lut.entry_count(),
            lut.size,
            lut.data.len()
        )));
    }

    // Header
    if let Some(title) = &lut.title {
        writeln!(writer, "TITLE \"{}\"", title)?;
    }
    for comment in &lut.comments {
        writeln!(writer, "# {}", comment)?;
    }
    let min = lut.domain_min;
    let max = lut.domain_max;
    writeln!(
        writer,
        "DOMAIN_MIN {} {} {}",
        format_decimal(min[0]),
        format_decimal(min[1]),
        format_decimal(min[2])
    )?;
    writeln!(
        writer,
        "DOMAIN_MAX {} {} {}",
        format_decimal(max[0]),
        format_decimal(max[1]),
        format_decimal(max[2])
    )?;
    writeln!(writer, "LUT_3D_SIZE {}", lut.size)?;

    // Data is already in file order: R fastest, then G, then B
    for rgb in &lut.data {
        writeln!(
            writer,
            "{} {} {}",
            format_value(rgb[0]),
            format_value(rgb[1]),
            format_value(rgb[2])
        )?;
    }

    Ok(())
}

/// Renders a 3D LUT to a .cube string.
pub fn to_string(lut: &Lut3D) -> LutResult<String> {
    let mut buf = Vec::with_capacity(lut.data.len() * 32);
    write_3d_to(&mut buf, lut)?;
    String::from_utf8(buf).map_err(|e| LutError::ParseError(e.to_string()))
}

/// Result of comparing a LUT against the contents of a `.cube` file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeDiff {
    /// Entries compared.
    pub entries: usize,
    /// Largest per-channel difference; infinite if any channel was NaN.
    pub max_diff: f64,
    /// Entry index holding `max_diff`, `None` when everything matched exactly.
    pub worst: Option<usize>,
    /// Entries with a channel differing by more than the tolerance.
    pub failed: usize,
}

impl CubeDiff {
    /// True when no entry exceeded the tolerance.
    pub fn passed(&self) -> bool {
        self.failed == 0
    }
}

/// Compares `found` (typically read back from disk) against `expected`.
///
/// `expected` is clamped with [`clamp01`] first, the same way [`write_3d`]
/// stores it. A NaN on either side counts as an infinite difference.
pub fn compare(expected: &Lut3D, found: &Lut3D, tolerance: f64) -> LutResult<CubeDiff> {
    if expected.size != found.size || expected.data.len() != found.data.len() {
        return Err(LutError::InvalidSize(format!(
            "expected size {} ({} entries), found size {} ({} entries)",
            expected.size,
            expected.data.len(),
            found.size,
            found.data.len()
        )));
    }

    let init = CubeDiff {
        entries: expected.data.len(),
        max_diff: 0.0,
        worst: None,
        failed: 0,
    };
    let diff = expected
        .data
        .iter()
        .zip(&found.data)
        .enumerate()
        .fold(init, |acc, (i, (want, got))| {
            let d = (0..3)
                .map(|c| (clamp01(want[c]) - got[c]).abs())
                .fold(0.0f64, |m, d| if d.is_nan() { f64::INFINITY } else { m.max(d) });
            let failed = acc.failed + usize::from(d > tolerance);
            if d > acc.max_diff {
                CubeDiff { max_diff: d, worst: Some(i), failed, ..acc }
            } else {
                CubeDiff { failed, ..acc }
            }
        });
    trace!(max_diff = diff.max_diff, failed = diff.failed, "compared cube");
    Ok(diff)
}

// Helper functions

fn parse_size(line: &str) -> LutResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(LutError::ParseError("invalid size line".into()));
    }
    parts[1]
        .parse()
        .map_err(|_| LutError::ParseError("invalid size value".into()))
}

fn parse_domain(line: &str) -> LutResult<[f64; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(LutError::ParseError("invalid domain line".into()));
    }
    Ok([
        parts[1].parse().map_err(|_| LutError::ParseError("invalid domain R".into()))?,
        parts[2].parse().map_err(|_| LutError::ParseError("invalid domain G".into()))?,
        parts[3].parse().map_err(|_| LutError::ParseError("invalid domain B".into()))?,
    ])
}

fn parse_rgb(line: &str) -> LutResult<[f64; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(LutError::ParseError(format!("invalid RGB line: {}", line)));
    }
    Ok([
        parts[0].parse().map_err(|_| LutError::ParseError("invalid R value".into()))?,
        parts[1].parse().map_err(|_| LutError::ParseError("invalid G value".into()))?,
        parts[2].parse().map_err(|_| LutError::ParseError("invalid B value".into()))?,
    ])
}
