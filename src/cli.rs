use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use robust_hist::HistConfig;
use robust_histogram::EmptyBinPolicy;
use tracing::level_filters::LevelFilter;

/// Compute histograms of a column of numbers, with a bin width chosen
/// automatically from the data.
///
/// Each INPUT_FILE produces INPUT_FILE.hist containing `<bin lower bound> <count>`
/// rows. All files share the same bin bounds. With no input files, values are
/// read from standard input and the histogram is written to standard output.
#[derive(Parser, Debug)]
#[command(name = "robust-hist", version, about, long_about)]
pub struct Cli {
    /// Read values from the one-based COLUMN of each input line.
    #[arg(long, value_name = "COLUMN", default_value = "1")]
    column: NonZeroUsize,

    /// Ignore input lines whose value is less than MIN.
    #[arg(long = "min", value_name = "MIN", allow_negative_numbers = true)]
    minimum: Option<f64>,

    /// Ignore input lines whose value is greater than MAX.
    #[arg(long = "max", value_name = "MAX", allow_negative_numbers = true)]
    maximum: Option<f64>,

    /// Print statistics to standard error.
    #[arg(long)]
    verbose: bool,

    /// Write a row for every bin, including bins with a zero count.
    #[arg(long)]
    emit_empty_bins: bool,

    /// Enable log output. (Specify twice for more verbosity.)
    #[arg(short = 'v', long = "log-verbosity", action = ArgAction::Count, default_value_t = 0)]
    log_verbosity: u8,

    /// Input files. Arguments starting with `-` are options; prefix such file names with `./`.
    #[arg(value_name = "INPUT_FILE")]
    pub inputs: Vec<PathBuf>,
}

impl Cli {
    /// Gets the configured log level based on the user-supplied verbosity level.
    pub fn log_level(&self) -> LevelFilter {
        match self.log_verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Build the run configuration from the parsed arguments.
    pub fn config(&self) -> HistConfig {
        let policy = if self.emit_empty_bins {
            EmptyBinPolicy::Emit
        } else {
            EmptyBinPolicy::Skip
        };
        HistConfig {
            column: self.column.get(),
            minimum: self.minimum,
            maximum: self.maximum,
            verbose: self.verbose,
            empty_bins: policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("robust-hist").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.config(), HistConfig::default());
        assert!(cli.inputs.is_empty());
        assert_eq!(cli.log_level(), LevelFilter::WARN);
    }

    #[test]
    fn test_all_options() {
        let cli = parse(&[
            "--column",
            "3",
            "--min",
            "-2.5",
            "--max",
            "1e3",
            "--verbose",
            "--emit-empty-bins",
            "-vv",
            "a.txt",
            "b.txt",
        ])
        .unwrap();

        let config = cli.config();
        assert_eq!(config.column, 3);
        assert_eq!(config.minimum, Some(-2.5));
        assert_eq!(config.maximum, Some(1000.0));
        assert!(config.verbose);
        assert_eq!(config.empty_bins, EmptyBinPolicy::Emit);
        assert_eq!(cli.log_level(), LevelFilter::TRACE);
        assert_eq!(cli.inputs, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse(&["--column", "0"]).is_err());
        assert!(parse(&["--column", "two"]).is_err());
        assert!(parse(&["--min", "low"]).is_err());
        assert!(parse(&["--max"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["-data.txt"]).is_err());
    }

    #[test]
    fn test_dot_slash_prefix_allows_dash_file_names() {
        let cli = parse(&["./-data.txt"]).unwrap();
        assert_eq!(cli.inputs, vec![PathBuf::from("./-data.txt")]);
    }
}
