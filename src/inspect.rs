//! Schema-only pass: report inferred tables and foreign keys without rows.

use anyhow::Result;
use log::info;

use crate::{
    cli::InspectArgs,
    config::RunConfig,
    foreign_keys::{LongestNameMatcher, resolve_foreign_keys},
    formats::Format,
    io_utils, pipeline,
    schema::DumpSchema,
};

pub fn execute(args: &InspectArgs) -> Result<()> {
    let config = RunConfig::from_args(&args.source)?;
    let schema = inspect_dump(&config)?;
    match args.output.as_deref() {
        Some(path) if !io_utils::is_dash(path) => schema.save(path)?,
        _ => print!("{}", Format::Yaml.render(&schema)?),
    }
    info!(
        "Inspected {} table(s); {} foreign key(s) found",
        schema.tables.len(),
        schema.foreign_keys.len()
    );
    Ok(())
}

pub fn inspect_dump(config: &RunConfig) -> Result<DumpSchema> {
    let mut tables = Vec::new();
    pipeline::analyze_dir(config, |analyzed| {
        if analyzed.report.empty.is_none() {
            tables.push(analyzed.schema);
        }
        Ok(())
    })?;
    let foreign_keys =
        resolve_foreign_keys(&tables, config.supplementary_tables(), &LongestNameMatcher);
    Ok(DumpSchema {
        tables,
        foreign_keys,
    })
}
