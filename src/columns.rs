//! Column set resolution from a bounded record sample.
//!
//! The widest sampled record (first one wins ties) fixes the column order.
//! Attributes that only show up in narrower records are appended in the order
//! they are first seen, so the result is the union of every sampled name.

use crate::record::Record;

pub const DEFAULT_COLUMN_SAMPLE: usize = 100;

pub fn resolve_columns(records: &[Record], sample: usize) -> Vec<String> {
    let sampled = &records[..records.len().min(sample)];
    let Some(widest) = sampled
        .iter()
        .reduce(|best, record| if record.len() > best.len() { record } else { best })
    else {
        return Vec::new();
    };

    let mut columns = widest.names().map(str::to_string).collect::<Vec<_>>();
    for record in sampled {
        for name in record.names() {
            if !columns.iter().any(|existing| existing == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}
