use std::io;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;
use robust_hist::Pipeline;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
use self::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .compact()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("robust-hist: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(cli.config()).context("invalid options")?;
    let report = pipeline
        .run(&cli.inputs, &mut io::stderr().lock())
        .context("histogram run failed")?;

    debug!(
        "Binned {} samples from {} sources into {} bins of width {}",
        report.summary.samples, report.sources, report.summary.bins, report.stats.bin_width
    );
    Ok(())
}
