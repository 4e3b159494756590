//! Table schema model and the type inference engine.
//!
//! A column's type is fixed from the first defined value found for it, then
//! checked against a bounded prefix of records. Any sampled value that breaks
//! the type's parse rule narrows the column to [`ColumnType::Text`] for good.
//! Values beyond the validation window are never looked at, so a late
//! non-conforming value keeps the narrower type.

use std::{fmt, path::Path};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    data::{classify_value, conforms_to},
    error::TypeDowngrade,
    foreign_keys::ForeignKeyCandidate,
    formats,
    record::Record,
};

pub const DEFAULT_VALIDATION_SAMPLE: usize = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Integer,
    Timestamp,
    Boolean,
    Text,
}

impl ColumnType {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_keyword())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub datatype: ColumnType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    /// File stem with its original casing, used for foreign-key matching.
    pub label: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(label: &str, names: &[String], types: &[ColumnType]) -> Self {
        let columns = names
            .iter()
            .zip(types)
            .map(|(name, datatype)| Column {
                name: name.clone(),
                datatype: *datatype,
            })
            .collect();
        Self {
            name: label.to_lowercase(),
            label: label.to_string(),
            columns,
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.first()
    }
}

/// Inferred schemas for a whole dump, as written by `inspect`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DumpSchema {
    pub tables: Vec<TableSchema>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyCandidate>,
}

impl DumpSchema {
    pub fn save(&self, path: &Path) -> Result<()> {
        formats::save_to_path(path, self)
            .with_context(|| format!("Writing schema to {path:?}"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        formats::load_from_path(path)
            .with_context(|| format!("Loading schema from {path:?}"))
    }
}

pub struct InferredTypes {
    pub types: Vec<ColumnType>,
    pub downgrades: Vec<TypeDowngrade>,
}

pub fn infer_types(
    table: &str,
    records: &[Record],
    columns: &[String],
    validation_sample: usize,
) -> InferredTypes {
    let mut types = columns
        .iter()
        .map(|column| initial_type(records, column))
        .collect::<Vec<_>>();
    let downgrades = validate_types(table, records, columns, &mut types, validation_sample);
    InferredTypes { types, downgrades }
}

fn initial_type(records: &[Record], column: &str) -> ColumnType {
    records
        .iter()
        .find_map(|record| record.defined(column))
        .map(classify_value)
        .unwrap_or(ColumnType::Text)
}

fn validate_types(
    table: &str,
    records: &[Record],
    columns: &[String],
    types: &mut [ColumnType],
    sample: usize,
) -> Vec<TypeDowngrade> {
    let mut downgrades = Vec::new();
    for (column, ty) in columns.iter().zip(types.iter_mut()) {
        if *ty == ColumnType::Text {
            continue;
        }
        let violation = records
            .iter()
            .take(sample)
            .enumerate()
            .find_map(|(idx, record)| {
                record
                    .defined(column)
                    .filter(|value| !conforms_to(value, *ty))
                    .map(|value| (idx, value))
            });
        if let Some((record_index, value)) = violation {
            let downgrade = TypeDowngrade {
                table: table.to_string(),
                column: column.clone(),
                from: *ty,
                value: value.to_string(),
                record_index,
            };
            warn!("{downgrade}");
            downgrades.push(downgrade);
            *ty = ColumnType::Text;
        }
    }
    downgrades
}
