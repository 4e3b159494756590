//! Error and diagnostic types raised while turning dump files into SQL.
//!
//! Only [`MalformedRecordError`] and [`ScriptExecutionError`] are real
//! failures. [`EmptyTable`] and [`TypeDowngrade`] are diagnostics: they are
//! logged and collected into a [`TableReport`] but never stop a run.

use std::fmt;

use thiserror::Error;

use crate::schema::ColumnType;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Malformed record on line {line_number} of table '{table}': {reason} ({line})")]
pub struct MalformedRecordError {
    pub table: String,
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct ScriptExecutionError {
    pub statement_index: Option<usize>,
    pub message: String,
}

impl ScriptExecutionError {
    pub fn at(statement_index: usize, message: impl Into<String>) -> Self {
        Self {
            statement_index: Some(statement_index),
            message: message.into(),
        }
    }
}

impl fmt::Display for ScriptExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.statement_index {
            Some(index) => write!(f, "Script failed at statement {index}: {}", self.message),
            None => write!(f, "Script failed: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTable {
    pub table: String,
}

/// A column narrowed to TEXT because a sampled value broke its parse rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDowngrade {
    pub table: String,
    pub column: String,
    pub from: ColumnType,
    pub value: String,
    pub record_index: usize,
}

impl fmt::Display for TypeDowngrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} downgraded from {} to TEXT at record {} (value '{}')",
            self.table, self.column, self.from, self.record_index, self.value
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableReport {
    pub skipped: Vec<MalformedRecordError>,
    pub downgrades: Vec<TypeDowngrade>,
    pub empty: Option<EmptyTable>,
}

impl TableReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.downgrades.is_empty() && self.empty.is_none()
    }
}
