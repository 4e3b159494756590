//! YAML and JSON persistence, chosen by file extension.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` selects JSON; anything else is read and written as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    pub fn parse<T: DeserializeOwned>(self, input: &str) -> Result<T> {
        match self {
            Format::Yaml => Ok(serde_yaml::from_str(input)?),
            Format::Json => Ok(serde_json::from_str(input)?),
        }
    }

    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            Format::Yaml => Ok(serde_yaml::to_string(value)?),
            Format::Json => {
                let mut rendered = serde_json::to_string_pretty(value)?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }
}

pub fn load_from_path<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Opening {path:?}"))?;
    Format::from_path(path)
        .parse(&raw)
        .with_context(|| format!("Parsing {path:?}"))
}

pub fn save_to_path<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let rendered = Format::from_path(path).render(data)?;
    fs::write(path, rendered).with_context(|| format!("Writing {path:?}"))
}
