//! Excel import (xlsx, xls, xlsb, ods via calamine) and export
//! (rust_xlsxwriter). Import reads the first worksheet into a flat
//! [`Table`]; export writes the annotated output atomically.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::NaiveDate;
use claimflow_pipeline::normalize::date_from_excel_serial;
use claimflow_pipeline::PipelineError;

use crate::table::{Cell, Table};

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Keep errors as text; loaders degrade them to missing values
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        Data::DateTime(dt) => match date_from_excel_serial(dt.as_f64()) {
            Some(date) => Cell::Date(date),
            None => Cell::Empty,
        },
        Data::DateTimeIso(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Cell::Date(date),
            Err(_) => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Import the first worksheet of an Excel file.
pub fn import(path: &Path, has_headers: bool) -> Result<Table, PipelineError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| PipelineError::Io(format!("cannot open {}: {e}", path.display())))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| PipelineError::EmptySheet(path.display().to_string()))?
        .clone();

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| PipelineError::Io(format!("cannot read sheet '{first}': {e}")))?;

    let mut rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    let headers = if has_headers && !rows.is_empty() {
        rows.remove(0)
            .into_iter()
            .map(|c| c.display())
            .collect()
    } else {
        Vec::new()
    };

    Ok(Table { headers, rows })
}

/// Write a finished table of display strings/cells as an xlsx workbook.
///
/// The workbook is rendered to an in-memory buffer, written to a sibling
/// `.tmp` file, then renamed into place: an interrupted run leaves no
/// artifact at the output path.
pub fn write_workbook(path: &Path, headers: &[String], rows: &[Vec<Cell>]) -> Result<(), PipelineError> {
    use rust_xlsxwriter::{Format, Workbook};

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| PipelineError::Io(e.to_string()))?;
    }

    for (r, row) in rows.iter().enumerate() {
        let row32 = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let col16 = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Number(n) => {
                    worksheet
                        .write_number(row32, col16, *n)
                        .map_err(|e| PipelineError::Io(e.to_string()))?;
                }
                other => {
                    worksheet
                        .write_string(row32, col16, other.display())
                        .map_err(|e| PipelineError::Io(e.to_string()))?;
                }
            }
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| PipelineError::Io(e.to_string()))?;

    let tmp_path = path.with_extension("xlsx.tmp");
    std::fs::write(&tmp_path, &buffer)
        .map_err(|e| PipelineError::Io(format!("cannot write {}: {e}", tmp_path.display())))?;
    std::fs::rename(&tmp_path, path)
        .map_err(|e| PipelineError::Io(format!("cannot rename into {}: {e}", path.display())))?;

    Ok(())
}
