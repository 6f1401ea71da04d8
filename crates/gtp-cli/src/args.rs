use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the gtp binary.
#[derive(Parser, Debug)]
#[command(
    name = "gtp",
    version,
    about = "Lower generator, iteration and async suspensions in a syntax tree"
)]
pub struct CliArgs {
    /// Syntax tree to lower, as JSON.
    pub input: PathBuf,

    /// JSON configuration file; its `lowering` section sets the pass options.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// What to write.
    #[arg(long, value_enum, default_value_t = Emit::Js, ignore_case = true)]
    pub emit: Emit,

    /// Write output here instead of stdout.
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Prefix of generated temporaries (overrides the config file).
    #[arg(long = "identifierPrefix", alias = "identifier-prefix")]
    pub identifier_prefix: Option<String>,

    /// Deepest function nesting the pass lowers (overrides the config file).
    #[arg(long = "maxFunctionDepth", alias = "max-function-depth")]
    pub max_function_depth: Option<u32>,

    /// Color diagnostics. Defaults to on when stderr is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// JavaScript-like text.
    Js,
    /// The lowered tree as JSON.
    Json,
    /// Suspension facts and lowering plan of every function-like body.
    Facts,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
