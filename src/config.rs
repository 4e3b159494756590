//! Run configuration: an optional YAML/JSON file overlaid by CLI flags.
//!
//! Unknown keys in the file are ignored, so a config that also carries
//! connection settings for whatever executes the script can be shared.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::{
    cli::SourceArgs, foreign_keys::SUPPLEMENTARY_TABLES, formats, pipeline::InferenceOptions,
};

const KNOWN_DATASET_MARKER: &str = "stackexchange";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    pub dataset: Option<String>,
    pub known_dataset: Option<bool>,
    pub extras: Option<PathBuf>,
    pub include_extras: Option<bool>,
    pub column_sample: Option<usize>,
    pub validation_sample: Option<usize>,
    pub input_encoding: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        formats::load_from_path(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtrasSource {
    None,
    Bundled,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub dataset: Option<String>,
    pub known_dataset: bool,
    pub extras: ExtrasSource,
    pub options: InferenceOptions,
    pub input_encoding: Option<String>,
}

impl RunConfig {
    pub fn from_args(args: &SourceArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Ok(Self::merge(args, file))
    }

    /// CLI flags take precedence over file values.
    pub fn merge(args: &SourceArgs, file: ConfigFile) -> Self {
        let dataset = args.dataset.clone().or(file.dataset);
        let known_dataset = args.known_dataset.or(file.known_dataset).unwrap_or_else(|| {
            dataset
                .as_deref()
                .is_some_and(|name| name.to_ascii_lowercase().contains(KNOWN_DATASET_MARKER))
        });
        let include_extras = !args.no_extras && file.include_extras.unwrap_or(true);
        let extras = match (include_extras, args.extras.clone().or(file.extras)) {
            (false, _) => ExtrasSource::None,
            (true, Some(path)) => ExtrasSource::File(path),
            (true, None) if known_dataset => ExtrasSource::Bundled,
            (true, None) => ExtrasSource::None,
        };
        let defaults = InferenceOptions::default();
        let options = InferenceOptions {
            column_sample: sample_size(
                args.column_sample
                    .or(file.column_sample)
                    .unwrap_or(defaults.column_sample),
            ),
            validation_sample: sample_size(
                args.validation_sample
                    .or(file.validation_sample)
                    .unwrap_or(defaults.validation_sample),
            ),
        };
        Self {
            input: args.input.clone(),
            dataset,
            known_dataset,
            extras,
            options,
            input_encoding: args.input_encoding.clone().or(file.input_encoding),
        }
    }

    pub fn require_dataset(&self) -> Result<&str> {
        self.dataset
            .as_deref()
            .ok_or_else(|| anyhow!("A dataset name is required (--dataset or config 'dataset')"))
    }

    /// Lookup tables that may be referenced as foreign-key parents. Only the
    /// bundled extras create them; a replacement file or `--no-extras` offers none.
    pub fn supplementary_tables(&self) -> &'static [&'static str] {
        if self.known_dataset && self.extras == ExtrasSource::Bundled {
            SUPPLEMENTARY_TABLES
        } else {
            &[]
        }
    }
}

/// Zero means every record.
fn sample_size(value: usize) -> usize {
    if value == 0 { usize::MAX } else { value }
}
