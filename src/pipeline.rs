//! The per-table stage: parse, resolve columns, infer types, emit statements.
//!
//! Every table goes through the same stage regardless of which dump it came
//! from. Types are fully validated before any row is rendered, so a late
//! downgrade in the sample still applies to every emitted row.

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    columns::{DEFAULT_COLUMN_SAMPLE, resolve_columns},
    config::RunConfig,
    dump,
    error::{EmptyTable, MalformedRecordError, TableReport},
    io_utils,
    record::{Record, parse_record},
    schema::{DEFAULT_VALIDATION_SAMPLE, TableSchema, infer_types},
    sql,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceOptions {
    pub column_sample: usize,
    pub validation_sample: usize,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            column_sample: DEFAULT_COLUMN_SAMPLE,
            validation_sample: DEFAULT_VALIDATION_SAMPLE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzedTable {
    pub schema: TableSchema,
    pub records: Vec<Record>,
    pub report: TableReport,
}

#[derive(Debug, Clone, Default)]
pub struct TableStatements {
    pub create: Option<String>,
    pub inserts: Vec<String>,
}

impl TableStatements {
    pub fn len(&self) -> usize {
        usize::from(self.create.is_some()) + self.inserts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// CREATE TABLE first, then inserts in record order.
    pub fn into_statements(self) -> impl Iterator<Item = String> {
        self.create.into_iter().chain(self.inserts)
    }
}

#[derive(Debug, Clone)]
pub struct ProcessedTable {
    pub schema: TableSchema,
    pub statements: TableStatements,
    pub report: TableReport,
}

/// Parse every data line, keeping good records and collecting bad ones.
pub fn parse_records(table: &str, contents: &str) -> (Vec<Record>, Vec<MalformedRecordError>) {
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (line_number, line) in dump::data_lines(contents) {
        match parse_record(line, table, line_number) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!("Skipping record: {err}");
                skipped.push(err);
            }
        }
    }
    (records, skipped)
}

pub fn analyze_records(
    label: &str,
    records: Vec<Record>,
    skipped: Vec<MalformedRecordError>,
    options: &InferenceOptions,
) -> AnalyzedTable {
    let table = label.to_lowercase();
    let mut report = TableReport {
        skipped,
        ..TableReport::default()
    };

    let columns = resolve_columns(&records, options.column_sample);
    if columns.is_empty() {
        warn!("{table} has no records; skipping its statements");
        report.empty = Some(EmptyTable { table });
        return AnalyzedTable {
            schema: TableSchema::new(label, &[], &[]),
            records,
            report,
        };
    }
    if columns[0] != "Id" {
        warn!(
            "{table} starts with column '{}' rather than Id; using it as the primary key",
            columns[0]
        );
    }
    debug!("{table} columns: {columns:?}");

    let inferred = infer_types(&table, &records, &columns, options.validation_sample);
    report.downgrades = inferred.downgrades;
    AnalyzedTable {
        schema: TableSchema::new(label, &columns, &inferred.types),
        records,
        report,
    }
}

pub fn analyze_table(label: &str, contents: &str, options: &InferenceOptions) -> AnalyzedTable {
    let (records, skipped) = parse_records(&label.to_lowercase(), contents);
    analyze_records(label, records, skipped, options)
}

impl AnalyzedTable {
    pub fn emit(self) -> ProcessedTable {
        let statements = TableStatements {
            create: sql::create_table_statement(&self.schema),
            inserts: sql::insert_statements(&self.schema, &self.records),
        };
        info!(
            "{} processed: {} row(s), {} column(s)",
            self.schema.name,
            statements.inserts.len(),
            self.schema.columns.len()
        );
        ProcessedTable {
            schema: self.schema,
            statements,
            report: self.report,
        }
    }
}

pub fn process_table(label: &str, contents: &str, options: &InferenceOptions) -> ProcessedTable {
    analyze_table(label, contents, options).emit()
}

/// Analyze every table in the configured dump directory, one at a time, in
/// discovery order. Each table is handed to `visit` before the next is read.
pub fn analyze_dir<F>(config: &RunConfig, mut visit: F) -> Result<()>
where
    F: FnMut(AnalyzedTable) -> Result<()>,
{
    let encoding = io_utils::resolve_encoding(config.input_encoding.as_deref())?;
    let files = dump::discover_tables(&config.input)?;
    if files.is_empty() {
        warn!("No .xml dump files found in {:?}", config.input);
    }
    for file in files {
        let contents = file.read(encoding)?;
        let analyzed = analyze_table(&file.label, &contents, &config.options);
        visit(analyzed).with_context(|| format!("Processing {:?}", file.path))?;
    }
    Ok(())
}
