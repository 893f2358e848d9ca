//! CSV/TSV import into the flat table model. Accepted anywhere an xlsx is,
//! selected by extension; exports from billing systems commonly arrive as
//! delimited text.

use std::path::Path;

use claimflow_pipeline::PipelineError;

use crate::table::{Cell, Table};

/// Pick the field delimiter: a real delimiter appears at least once on every
/// sampled line, the same number of times. First candidate that holds wins;
/// comma is checked last so it doubles as the fallback.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().filter(|l| !l.is_empty()).take(8).collect();

    for &delim in &[b'\t', b';', b'|', b','] {
        let mut counts = sample
            .iter()
            .map(|line| line.bytes().filter(|&b| b == delim).count());
        match counts.next() {
            Some(first) if first > 0 && counts.all(|c| c == first) => return delim,
            _ => continue,
        }
    }

    b','
}

pub fn import(path: &Path, has_headers: bool) -> Result<Table, PipelineError> {
    let bytes = std::fs::read(path)
        .map_err(|e| PipelineError::Io(format!("cannot read {}: {e}", path.display())))?;

    // Billing-system exports are not reliably UTF-8; retry as Windows-1252.
    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => encoding_rs::WINDOWS_1252.decode(&e.into_bytes()).0.into_owned(),
    };

    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter, has_headers)
}

fn import_from_string(content: &str, delimiter: u8, has_headers: bool) -> Result<Table, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| PipelineError::Io(e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    let headers = if has_headers && !rows.is_empty() {
        rows.remove(0).into_iter().map(|c| c.display()).collect()
    } else {
        Vec::new()
    };

    Ok(Table { headers, rows })
}
