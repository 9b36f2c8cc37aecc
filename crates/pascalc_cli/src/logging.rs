//! Log level flags and the tracing subscriber setup

use clap::{value_parser, ArgAction};
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock};
use tracing::metadata::LevelFilter;
use tracing::{Level, Metadata};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct LoggingArgs {
    /// Log more, `-vv` for everything
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Log less, `-qq` for nothing
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}

struct MyWriter {
    stdout: Stdout,
    stderr: Stderr,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl<'a> io::Write for StdioLock<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write_all(buf),
            StdioLock::Stderr(stderr) => stderr.write_all(buf),
        }
    }
}

/// Errors and warnings are written to stderr, everything else to stdout
fn is_diagnostic(level: &Level) -> bool {
    *level <= Level::WARN
}

impl<'a> MakeWriter<'a> for MyWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stdout(self.stdout.lock())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if is_diagnostic(meta.level()) {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

/// Installs the global subscriber. Records from the `log` facade are forwarded to it too.
pub fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(MyWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        logging: LoggingArgs,
    }

    fn level(args: &str) -> LevelFilter {
        Cli::try_parse_from(args.split_whitespace())
            .expect("could not parse test string")
            .logging
            .log_level_filter()
    }

    #[test]
    fn errors_and_warnings_go_to_stderr() {
        assert!(is_diagnostic(&Level::ERROR));
        assert!(is_diagnostic(&Level::WARN));
        assert!(!is_diagnostic(&Level::INFO));
        assert!(!is_diagnostic(&Level::DEBUG));
        assert!(!is_diagnostic(&Level::TRACE));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level("pascalc"), LevelFilter::INFO);
        assert_eq!(level("pascalc -v"), LevelFilter::DEBUG);
        assert_eq!(level("pascalc -vv"), LevelFilter::TRACE);
        assert_eq!(level("pascalc -q"), LevelFilter::ERROR);
        assert_eq!(level("pascalc -qq"), LevelFilter::OFF);
    }
}
