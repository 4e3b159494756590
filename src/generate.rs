//! Full conversion: dump directory in, ordered SQL script out.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::GenerateArgs,
    config::RunConfig,
    error::TableReport,
    extras,
    foreign_keys::{ForeignKeyCandidate, LongestNameMatcher, ParentMatcher, resolve_foreign_keys},
    io_utils, pipeline,
    schema::TableSchema,
    script::{ExecutionSink, Script, ScriptAssembler, WriterSink, namespace_for},
};

#[derive(Debug, Clone)]
pub struct Conversion {
    pub tables: Vec<TableSchema>,
    pub reports: Vec<TableReport>,
    pub foreign_keys: Vec<ForeignKeyCandidate>,
    pub script: Script,
}

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let config = RunConfig::from_args(&args.source)?;
    let conversion = convert_dump(&config, &LongestNameMatcher)?;
    let writer = io_utils::open_output(args.output.as_deref())?;
    let mut sink = WriterSink::new(writer);
    sink.execute(&conversion.script)?;
    info!(
        "Wrote {} statement(s) for {} table(s) with {} foreign key(s)",
        conversion.script.len(),
        conversion.tables.len(),
        conversion.foreign_keys.len()
    );
    Ok(())
}

/// Build the script for the configured dump. Empty tables produce no
/// statements and are not offered as foreign-key parents.
pub fn convert_dump(config: &RunConfig, matcher: &dyn ParentMatcher) -> Result<Conversion> {
    let dataset = config.require_dataset()?;
    let mut assembler = ScriptAssembler::new(&namespace_for(dataset)?);
    let mut tables = Vec::new();
    let mut reports = Vec::new();

    pipeline::analyze_dir(config, |analyzed| {
        let processed = analyzed.emit();
        if processed.report.empty.is_none() {
            tables.push(processed.schema);
        }
        assembler.push_table(processed.statements);
        reports.push(processed.report);
        Ok(())
    })?;

    let extra_statements = extras::load_extras(&config.extras)
        .with_context(|| format!("Loading extras for {dataset}"))?;
    info!("Adding {} static statement(s)", extra_statements.len());
    assembler.extend_extras(extra_statements);

    let foreign_keys = resolve_foreign_keys(&tables, config.supplementary_tables(), matcher);
    for candidate in &foreign_keys {
        assembler.push_foreign_key(candidate);
    }

    Ok(Conversion {
        tables,
        reports,
        foreign_keys,
        script: assembler.finish(),
    })
}
