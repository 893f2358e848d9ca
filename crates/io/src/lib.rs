//! `claimflow-io`: spreadsheet input/output for the claim pipeline.
//!
//! Reads the six input workbooks (xlsx via calamine, csv as a fallback by
//! extension), converts them into the pipeline's typed records, and writes
//! the annotated output workbook atomically.

pub mod csv;
pub mod load;
pub mod output;
pub mod table;
pub mod xlsx;

use std::path::Path;

use claimflow_pipeline::PipelineError;
use table::Table;

/// Read a tabular file into a [`Table`], dispatching on extension:
/// `.csv`/`.tsv` through the CSV importer, everything else through calamine.
pub fn read_table(path: &Path, has_headers: bool) -> Result<Table, PipelineError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") || ext.eq_ignore_ascii_case("tsv") => {
            csv::import(path, has_headers)
        }
        _ => xlsx::import(path, has_headers),
    }
}
