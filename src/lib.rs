pub mod cli;
pub mod columns;
pub mod config;
pub mod data;
pub mod dump;
pub mod error;
pub mod extras;
pub mod foreign_keys;
pub mod formats;
pub mod generate;
pub mod inspect;
pub mod io_utils;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod script;
pub mod sql;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("stack_dump_sql", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command line: {cli:?}");
    match cli.command {
        Commands::Generate(args) => generate::execute(&args),
        Commands::Inspect(args) => inspect::execute(&args),
    }
}
