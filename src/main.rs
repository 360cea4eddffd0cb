use anyhow::Context;
use clap::Parser;
use pfmnorm::cli::Args;
use pfmnorm::imgio::FileStore;
use pfmnorm::{NormalizeConfig, logger};

fn main() {
    let args = Args::parse();
    logger::init(args.verbose);

    if let Err(e) = process(&args) {
        println!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Validate the arguments, normalize and report
fn process(args: &Args) -> anyhow::Result<()> {
    // Stage 1: Configuration, rejected before any image is touched
    let config = NormalizeConfig::try_from(args).context("Invalid arguments")?;

    // Stage 2: Load, estimate, rescale, save
    let outcome = pfmnorm::run(&FileStore, &config)
        .with_context(|| format!("Failed to normalize {}", config.input()))?;

    // Stage 3: Report
    pfmnorm::print_report(&outcome);

    Ok(())
}
