//! Parsing of single dump lines into ordered attribute records.
//!
//! Each data line of a dump file is a self-closing element such as
//! `<row Id="1" Title="Hello &amp; welcome" />`. Only the attributes matter;
//! the element name is ignored. Attribute order is preserved because column
//! resolution depends on it.

use quick_xml::{Reader, events::Event};

use crate::error::MalformedRecordError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    attributes: Vec<(String, String)>,
}

impl Record {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw attribute value; `Some("")` for an attribute present with an empty value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value if present and non-empty. Empty strings count as absent.
    pub fn defined(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

pub fn parse_record(
    line: &str,
    table: &str,
    line_number: usize,
) -> Result<Record, MalformedRecordError> {
    let malformed = |reason: String| MalformedRecordError {
        table: table.to_string(),
        line_number,
        line: line.trim().to_string(),
        reason,
    };

    let mut reader = Reader::from_str(line);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref element)) | Ok(Event::Start(ref element)) => {
                let mut attributes = Vec::new();
                for attr in element.attributes() {
                    let attr = attr.map_err(|err| malformed(err.to_string()))?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr
                        .unescape_value()
                        .map_err(|err| malformed(err.to_string()))?
                        .into_owned();
                    attributes.push((key, value));
                }
                return Ok(Record { attributes });
            }
            Ok(Event::Text(ref text)) if !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(malformed("text outside of an element".to_string()));
            }
            Ok(Event::End(_)) => {
                return Err(malformed("closing tag without a record".to_string()));
            }
            Ok(Event::Eof) => return Err(malformed("no element found".to_string())),
            Ok(_) => {}
            Err(err) => {
                return Err(malformed(format!(
                    "XML error at position {}: {err}",
                    reader.error_position()
                )));
            }
        }
    }
}
