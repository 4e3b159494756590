//! Foreign-key discovery from column naming conventions.
//!
//! A non-key column such as `PostId` is linked to another table when its name
//! contains that table's name, or the name minus its last character (`Posts`
//! matches through `Post`). When several tables qualify the longest name wins,
//! so `SuperUserId` links to `SuperUser` rather than `User`. A table never
//! references itself.
//!
//! Every candidate produces a cleanup `DELETE` for orphaned child rows followed
//! by the `ALTER TABLE` adding the constraint.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::schema::{ColumnType, TableSchema};

/// Lookup tables created by the bundled extras, known before any file is read.
pub const SUPPLEMENTARY_TABLES: &[&str] = &["VoteTypes", "PostHistoryTypes", "PostTypes"];

/// Picks at most one parent table for a column.
pub trait ParentMatcher {
    fn match_parent<'a>(&self, column: &str, parents: &[&'a str]) -> Option<&'a str>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LongestNameMatcher;

impl ParentMatcher for LongestNameMatcher {
    fn match_parent<'a>(&self, column: &str, parents: &[&'a str]) -> Option<&'a str> {
        if !column.ends_with("Id") {
            return None;
        }
        parents
            .iter()
            .copied()
            .filter(|parent| name_matches(column, parent))
            .fold(None::<&'a str>, |best, parent| match best {
                Some(current) if current.len() >= parent.len() => Some(current),
                _ => Some(parent),
            })
    }
}

fn name_matches(column: &str, parent: &str) -> bool {
    if parent.is_empty() {
        return false;
    }
    if column.contains(parent) {
        return true;
    }
    let singular = parent
        .char_indices()
        .last()
        .map(|(idx, _)| &parent[..idx])
        .unwrap_or_default();
    !singular.is_empty() && column.contains(singular)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForeignKeyCandidate {
    pub child_table: String,
    pub child_column: String,
    pub parent_table: String,
}

impl ForeignKeyCandidate {
    pub fn constraint_name(&self) -> String {
        format!("{}_{}fk", self.child_table, self.child_column)
    }

    pub fn cleanup_statement(&self) -> String {
        format!(
            "DELETE FROM {child} WHERE {column} NOT IN (SELECT {parent}.Id FROM {parent});",
            child = self.child_table,
            column = self.child_column,
            parent = self.parent_table,
        )
    }

    pub fn constraint_statement(&self) -> String {
        format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}(Id);",
            self.child_table,
            self.constraint_name(),
            self.child_column,
            self.parent_table,
        )
    }

    /// Cleanup first, then the constraint.
    pub fn statements(&self) -> [String; 2] {
        [self.cleanup_statement(), self.constraint_statement()]
    }
}

pub fn resolve_foreign_keys(
    tables: &[TableSchema],
    supplementary: &[&str],
    matcher: &dyn ParentMatcher,
) -> Vec<ForeignKeyCandidate> {
    let mut known = tables
        .iter()
        .map(|table| table.label.as_str())
        .collect::<Vec<_>>();
    for name in supplementary {
        if !known.iter().any(|existing| existing.eq_ignore_ascii_case(name)) {
            known.push(*name);
        }
    }

    let mut candidates = Vec::new();
    for table in tables {
        let parents = known
            .iter()
            .copied()
            .filter(|name| !name.eq_ignore_ascii_case(&table.label))
            .collect::<Vec<_>>();
        for column in table.columns.iter().skip(1) {
            let Some(parent) = matcher.match_parent(&column.name, &parents) else {
                continue;
            };
            let candidate = ForeignKeyCandidate {
                child_table: table.name.clone(),
                child_column: column.name.clone(),
                parent_table: parent.to_lowercase(),
            };
            if let Some(parent_key) = parent_key_type(tables, parent)
                && parent_key != column.datatype
            {
                warn!(
                    "{}.{} is {} but {}.Id is {}; constraint may fail",
                    candidate.child_table,
                    candidate.child_column,
                    column.datatype,
                    candidate.parent_table,
                    parent_key
                );
            }
            debug!(
                "{}.{} references {}",
                candidate.child_table, candidate.child_column, candidate.parent_table
            );
            candidates.push(candidate);
        }
    }
    candidates
}

fn parent_key_type(tables: &[TableSchema], label: &str) -> Option<ColumnType> {
    tables
        .iter()
        .find(|table| table.label == label)
        .and_then(|table| table.primary_key())
        .map(|column| column.datatype)
}
