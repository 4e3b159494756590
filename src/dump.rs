//! Dump directory discovery and raw line extraction.
//!
//! A dump directory holds one `.xml` file per table. Every file opens with an
//! XML declaration and the root element, then one record per line, and may
//! close with the root end tag.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::io_utils;

const HEADER_LINES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFile {
    /// File stem as found on disk, e.g. `PostHistory`.
    pub label: String,
    pub path: PathBuf,
}

impl DumpFile {
    pub fn read(&self, encoding: &'static Encoding) -> Result<String> {
        io_utils::read_decoded(&self.path, encoding)
    }
}

/// Table files in `dir`, sorted by file name so discovery order is stable.
pub fn discover_tables(dir: &Path) -> Result<Vec<DumpFile>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Listing dump directory {dir:?}"))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Reading entry in {dir:?}"))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if is_xml {
            files.push(DumpFile {
                label: stem.to_string(),
                path,
            });
        }
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

/// Record lines with their 1-based line numbers. Skips the header, blank
/// lines and the closing root tag.
pub fn data_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents
        .lines()
        .enumerate()
        .skip(HEADER_LINES)
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("</")
        })
}
