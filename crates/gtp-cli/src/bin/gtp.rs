#![allow(clippy::print_stderr)]

use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;

use gtp_cli::args::CliArgs;
use gtp_cli::reporter::Reporter;
use gtp_cli::{driver, tracing_config};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS_OUTPUTS_GENERATED: i32 = 2;

// Fatal errors surface through `main`'s `Result` and exit with status 1.
fn main() -> Result<()> {
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let outcome = driver::run(&args)?;

    if args.out.is_none() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(outcome.output.as_bytes())
            .context("failed to write to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    if outcome.diagnostics.is_empty() {
        std::process::exit(EXIT_SUCCESS);
    }

    let pretty = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let reporter = Reporter::new(pretty);
    eprint!(
        "{}",
        reporter.render(&args.input.display().to_string(), &outcome.diagnostics)
    );
    std::process::exit(EXIT_DIAGNOSTICS_OUTPUTS_GENERATED);
}
