//! pbr-neutral - PBR Neutral tone-mapping LUT generator
//!
//! Bakes the tone mapper into a log2-sampled .cube LUT, checks existing
//! LUT files, and evaluates single colors.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Output path used when none is given; matches the OCIO config's FileTransform.
const DEFAULT_OUTPUT: &str = "passableNeutral.cube";

#[derive(Parser)]
#[command(name = "pbr-neutral")]
#[command(author, version, about = "PBR Neutral tone-mapping LUT generator")]
#[command(long_about = "
Bakes the PBR Neutral tone mapper into a 57^3 .cube LUT sampled on a
log2 grid from 2^-9 to 2^10, and reports how well the analytic inverse
recovers every sample.

Without a subcommand, runs `bake` with its defaults.

Examples:
  pbr-neutral                                # Write passableNeutral.cube
  pbr-neutral bake -o neutral.cube           # Custom output path
  pbr-neutral bake --max-error 0.95          # Fail if the inverse regresses
  pbr-neutral check passableNeutral.cube     # Compare a file to a fresh bake
  pbr-neutral apply 2.0 0.5 0.1              # Tone map one color
  pbr-neutral apply --inverse 0.9 0.5 0.1    # Approximate inverse
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake the LUT and report the inverse round-trip error
    #[command(visible_alias = "b")]
    Bake(BakeArgs),

    /// Compare a .cube file against a fresh bake
    #[command(visible_alias = "c")]
    Check(CheckArgs),

    /// Tone map a single linear RGB color
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),
}

#[derive(Args)]
struct BakeArgs {
    /// Output .cube file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Fail when the largest finite round-trip error exceeds this
    #[arg(long)]
    max_error: Option<f64>,
}

impl Default for BakeArgs {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_error: None,
        }
    }
}

#[derive(Args)]
struct CheckArgs {
    /// .cube file to verify
    input: PathBuf,

    /// Largest allowed per-channel difference
    #[arg(short, long, default_value = "1e-6")]
    tolerance: f64,
}

#[derive(Args)]
struct ApplyArgs {
    /// Red
    #[arg(allow_negative_numbers = true)]
    r: f64,

    /// Green
    #[arg(allow_negative_numbers = true)]
    g: f64,

    /// Blue
    #[arg(allow_negative_numbers = true)]
    b: f64,

    /// Apply the approximate inverse instead
    #[arg(short, long)]
    inverse: bool,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or_else(|| Commands::Bake(BakeArgs::default())) {
        Commands::Bake(args) => commands::bake::run(args, cli.verbose),
        Commands::Check(args) => commands::check::run(args, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
    }
}
