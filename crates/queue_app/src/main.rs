use std::path::PathBuf;

use clap::Parser;

mod app;
mod commands;
mod effects;
mod logging;
mod render;
mod settings;

/// Operator console for the harvest queue.
#[derive(Debug, Parser)]
#[command(name = "queue_app", version)]
struct Args {
    /// RON file with page settings and the queue listing.
    #[arg(short, long)]
    config: PathBuf,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = logging::LogDestination::File)]
    log: logging::LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.log, logging::level_for(args.verbose));
    app::run_app(&args.config)
}
