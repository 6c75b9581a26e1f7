use anyhow::Result;
use clap::Parser;

use beatmatcher::app::{DemoOptions, run_demo};
use beatmatcher::config::DrumConfig;
use beatmatcher::util::logging::init_logging;

/// Scripted BeatMatcher session against a simulated host clock.
#[derive(Parser)]
#[command(name = "beatmatcher", version, about)]
struct Args {
    /// Tempo in beats per minute
    #[arg(long, default_value_t = 80.0)]
    tempo: f64,

    /// Misses allowed before game over
    #[arg(long, default_value_t = 5)]
    miss_limit: u32,

    /// Easy mode (scaled miss limit, easier end screens)
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    easy: bool,

    /// Leave every nth beat unclicked (0 plays every beat)
    #[arg(long, default_value_t = 2)]
    skip_every: u32,

    /// RNG seed for the scripted player
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(None, args.verbose)?;

    let config = DrumConfig::new(args.tempo, args.miss_limit, args.easy)?;
    run_demo(DemoOptions {
        config,
        seed: args.seed,
        skip_every: args.skip_every,
    })
}
