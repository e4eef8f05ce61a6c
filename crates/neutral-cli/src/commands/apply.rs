//! Single-color evaluation command

use crate::ApplyArgs;
use anyhow::Result;
use neutral_color::{inverse_tone_map, tone_map};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    let rgb = [args.r, args.g, args.b];
    trace!(?rgb, inverse = args.inverse, "apply::run");

    let out = if args.inverse {
        inverse_tone_map(rgb)
    } else {
        tone_map(rgb)
    };

    if verbose > 0 {
        println!("{} -> {}", super::format_rgb(rgb), super::format_rgb(out));
    } else {
        println!("{}", super::format_rgb(out));
    }
    if out.iter().any(|c| !c.is_finite()) {
        debug!(?out, "result left the valid domain");
    }

    Ok(())
}
