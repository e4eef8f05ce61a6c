//! LUT baking command

use crate::BakeArgs;
use anyhow::{Context, Result, bail};
use neutral_color::bake_lut;
use neutral_lut::{LogGrid, cube};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: BakeArgs, verbose: u8) -> Result<()> {
    let grid = LogGrid::PBR_NEUTRAL;
    trace!(size = grid.size, log2_min = grid.log2_min, log2_max = grid.log2_max, "bake::run");
    info!("Baking {}^3 LUT to {}", grid.size, args.output.display());

    let baked = bake_lut(&grid);
    let report = baked.report;

    println!("Maximum relative error of inverse = {}", report.max_error);
    if report.non_finite > 0 {
        println!(
            "{} of {} samples did not round-trip to a finite value",
            report.non_finite, report.samples
        );
    }
    if verbose > 0 {
        if let Some(index) = report.worst {
            println!(
                "Worst sample: index {:?}, input {}",
                index,
                super::format_rgb(grid.sample(index))
            );
        }
    }

    cube::write_3d(&args.output, &baked.lut)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    if verbose > 0 {
        println!("Wrote {}", args.output.display());
    }

    if let Some(bound) = args.max_error {
        if !report.within(bound) {
            bail!(
                "Maximum relative error {} exceeds --max-error {}",
                report.max_error,
                bound
            );
        }
        debug!(bound, "round-trip error within bound");
    }

    Ok(())
}
