use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Turn attribute-based XML table dumps into a SQL schema and load script",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the full SQL script (schema, rows, extras, foreign keys)
    Generate(GenerateArgs),
    /// Infer table schemas and foreign keys without emitting rows
    Inspect(InspectArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Directory holding one .xml dump file per table
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Dataset identifier, e.g. cooking.stackexchange.com.7z
    #[arg(short = 'd', long = "dataset")]
    pub dataset: Option<String>,
    /// YAML or JSON config file; command-line flags override its values
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// SQL file with static statements to run before foreign keys
    #[arg(long = "extras")]
    pub extras: Option<PathBuf>,
    /// Skip static statements entirely
    #[arg(long = "no-extras")]
    pub no_extras: bool,
    /// Treat the dataset as a Stack Exchange dump (defaults to a name check)
    #[arg(long = "known-dataset")]
    pub known_dataset: Option<bool>,
    /// Records sampled per table to resolve columns (0 means all)
    #[arg(long = "column-sample")]
    pub column_sample: Option<usize>,
    /// Records sampled per table to validate inferred types (0 means all)
    #[arg(long = "validation-sample")]
    pub validation_sample: Option<usize>,
    /// Character encoding of the dump files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Output SQL script (stdout if omitted or '-')
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Output file for the inferred schema; .json writes JSON, otherwise YAML (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}
