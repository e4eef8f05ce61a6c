//! LUT verification command
//!
//! Re-bakes the LUT in memory and compares it entry by entry against a
//! `.cube` file, after the same clamping the writer applies.

use crate::CheckArgs;
use anyhow::{Context, Result, bail};
use neutral_color::bake_lut;
use neutral_lut::{LogGrid, cube};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: CheckArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), tolerance = args.tolerance, "check::run");

    let parsed = cube::read_3d(&args.input)
        .with_context(|| format!("Failed to load: {}", args.input.display()))?;

    let grid = LogGrid::PBR_NEUTRAL;
    info!("Re-baking {}^3 LUT for comparison", grid.size);
    let expected = bake_lut(&grid).lut;

    let diff = cube::compare(&expected, &parsed, args.tolerance)
        .with_context(|| format!("Cannot compare: {}", args.input.display()))?;

    println!("Entries:      {}", diff.entries);
    println!("Max diff:     {:.3e}", diff.max_diff);
    println!("Over {:.0e}: {}", args.tolerance, diff.failed);
    if verbose > 0 && !diff.passed() {
        if let Some(worst) = diff.worst {
            println!(
                "Worst entry {}: expected {}, found {}",
                worst,
                super::format_rgb(expected.data[worst].map(cube::clamp01)),
                super::format_rgb(parsed.data[worst])
            );
        }
    }

    if !diff.passed() {
        bail!(
            "{} of {} entries differ by more than {}",
            diff.failed,
            diff.entries,
            args.tolerance
        );
    }

    println!("PASS");
    Ok(())
}
