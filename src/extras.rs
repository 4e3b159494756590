//! Static statements appended after the table data and before foreign keys.

use std::fs;

use anyhow::{Context, Result};

use crate::{config::ExtrasSource, sql::split_statements};

pub const STACKEXCHANGE_EXTRAS: &str = include_str!("../sql/stackexchange_extras.sql");

pub fn load_extras(source: &ExtrasSource) -> Result<Vec<String>> {
    match source {
        ExtrasSource::None => Ok(Vec::new()),
        ExtrasSource::Bundled => Ok(split_statements(STACKEXCHANGE_EXTRAS)),
        ExtrasSource::File(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Reading extra statements from {path:?}"))?;
            Ok(split_statements(&raw))
        }
    }
}
