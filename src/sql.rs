//! SQL text generation for table definitions and row inserts.

use itertools::Itertools;
use log::warn;

use crate::{
    data::conforms_to,
    record::Record,
    schema::{ColumnType, TableSchema},
};

pub fn create_table_statement(schema: &TableSchema) -> Option<String> {
    if schema.columns.is_empty() {
        return None;
    }
    let definitions = schema
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            if idx == 0 {
                format!("{} {} PRIMARY KEY", column.name, column.datatype)
            } else {
                format!("{} {}", column.name, column.datatype)
            }
        })
        .join(", ");
    Some(format!("CREATE TABLE {}({definitions});", schema.name))
}

pub fn insert_statement(schema: &TableSchema, record: &Record) -> String {
    let values = schema
        .columns
        .iter()
        .map(|column| format_literal(record.defined(&column.name), column.datatype))
        .join(", ");
    format!("INSERT INTO {} VALUES({values});", schema.name)
}

pub fn insert_statements(schema: &TableSchema, records: &[Record]) -> Vec<String> {
    if schema.columns.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .map(|record| insert_statement(schema, record))
        .collect()
}

/// Render one value as a literal. `None` (absent or empty) is always `NULL`.
///
/// Integers and booleans are written bare only while they conform to the
/// column type. Anything else is quoted.
pub fn format_literal(value: Option<&str>, ty: ColumnType) -> String {
    match value {
        None => "NULL".to_string(),
        Some(value) => match ty {
            ColumnType::Integer | ColumnType::Boolean if !conforms_to(value, ty) => {
                warn!("Value {value:?} does not conform to {ty}; writing it quoted");
                quote_text(value)
            }
            ColumnType::Integer => value.to_string(),
            ColumnType::Boolean => value.to_ascii_lowercase(),
            ColumnType::Text | ColumnType::Timestamp => quote_text(value),
        },
    }
}

pub fn quote_text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Split a SQL script into statements on `;` outside single-quoted literals.
/// `--` comments running to end of line are dropped.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut buf = String::new();
    let mut in_single = false;
    let mut chars = script.chars().peekable();

    while let Some(c) = chars.next() {
        if in_single {
            buf.push(c);
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    buf.push('\'');
                    chars.next();
                } else {
                    in_single = false;
                }
            }
            continue;
        }
        match c {
            '\'' => {
                in_single = true;
                buf.push(c);
            }
            '-' if chars.peek() == Some(&'-') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        buf.push('\n');
                        break;
                    }
                }
            }
            ';' => {
                let statement = buf.trim();
                if !statement.is_empty() {
                    statements.push(format!("{statement};"));
                }
                buf.clear();
            }
            _ => buf.push(c),
        }
    }

    let trailing = buf.trim();
    if !trailing.is_empty() {
        statements.push(format!("{trailing};"));
    }
    statements
}
