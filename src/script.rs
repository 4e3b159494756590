//! Script assembly and hand-off to an execution sink.
//!
//! The assembler keeps one bucket per section and only concatenates them in
//! [`ScriptAssembler::finish`], so the order is fixed no matter when each
//! bucket is filled: namespace setup, table definitions with their rows,
//! static extras, then foreign-key cleanup and constraints.

use std::io::Write;

use anyhow::{Result, bail};

use crate::{
    error::ScriptExecutionError, foreign_keys::ForeignKeyCandidate, pipeline::TableStatements,
};

/// Schema name for a dataset identifier such as `cooking.stackexchange.com.7z`.
/// Fails when nothing usable precedes the first `.`.
pub fn namespace_for(dataset: &str) -> Result<String> {
    let mut name = dataset.replacen(".meta", "_meta", 1);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    let stem = name.split('.').next().unwrap_or_default().trim();
    if stem.is_empty() {
        bail!("Dataset name {dataset:?} does not yield a schema name");
    }
    Ok(stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    statements: Vec<String>,
}

impl Script {
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn render(&self) -> String {
        let mut rendered = self.statements.join("\n");
        if !rendered.is_empty() {
            rendered.push('\n');
        }
        rendered
    }
}

#[derive(Debug, Default)]
pub struct ScriptAssembler {
    namespace: Vec<String>,
    tables: Vec<String>,
    extras: Vec<String>,
    foreign_keys: Vec<String>,
}

impl ScriptAssembler {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: vec![
                format!("CREATE SCHEMA {namespace};"),
                format!("SET search_path TO {namespace};"),
            ],
            ..Self::default()
        }
    }

    pub fn push_table(&mut self, statements: TableStatements) {
        self.tables.extend(statements.into_statements());
    }

    pub fn extend_extras<I>(&mut self, statements: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.extras.extend(statements);
    }

    pub fn push_foreign_key(&mut self, candidate: &ForeignKeyCandidate) {
        self.foreign_keys.extend(candidate.statements());
    }

    pub fn finish(self) -> Script {
        let mut statements = self.namespace;
        statements.extend(self.tables);
        statements.extend(self.extras);
        statements.extend(self.foreign_keys);
        Script { statements }
    }
}

/// Whatever runs the finished script: a database client, a file, stdout.
pub trait ExecutionSink {
    fn execute(&mut self, script: &Script) -> Result<(), ScriptExecutionError>;
}

/// Writes the script text, one statement per line.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExecutionSink for WriterSink<W> {
    fn execute(&mut self, script: &Script) -> Result<(), ScriptExecutionError> {
        for (idx, statement) in script.statements().iter().enumerate() {
            writeln!(self.writer, "{statement}")
                .map_err(|err| ScriptExecutionError::at(idx, err.to_string()))?;
        }
        self.writer
            .flush()
            .map_err(|err| ScriptExecutionError {
                statement_index: None,
                message: err.to_string(),
            })
    }
}
