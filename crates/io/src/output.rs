//! Output workbook assembly: every original claim column followed by the
//! derived columns, one row per input claim, input order preserved.

use std::path::Path;

use chrono::NaiveDate;
use claimflow_pipeline::{AnnotatedClaim, PipelineError};

use crate::table::Cell;
use crate::xlsx;

/// Derived columns appended after the claims file's own columns. Columns
/// the pipeline overwrites (Serial Number, Model No) keep their original
/// position when the claims file already had them.
const DERIVED_COLUMNS: [&str; 13] = [
    "Customer Name",
    "Invoice Number",
    "Invoice Date",
    "Model",
    "Model No",
    "Promo NLC",
    "Billing Price",
    "Support",
    "Month",
    "Installation Date",
    "Claimed Month",
    "Install Month",
    "Remark",
];

fn text_cell(value: &Option<String>) -> Cell {
    match value {
        Some(s) => Cell::Text(s.clone()),
        None => Cell::Empty,
    }
}

fn number_cell(value: Option<f64>) -> Cell {
    match value {
        Some(n) => Cell::Number(n),
        None => Cell::Empty,
    }
}

fn date_cell(value: Option<NaiveDate>) -> Cell {
    match value {
        Some(d) => Cell::Date(d),
        None => Cell::Empty,
    }
}

fn derived_cell(row: &AnnotatedClaim, column: &str) -> Option<Cell> {
    let cell = match column {
        "Serial Number" => Cell::Text(row.claim.serial.clone()),
        "Customer Name" => text_cell(&row.customer),
        "Invoice Number" => text_cell(&row.invoice_no),
        "Invoice Date" => date_cell(row.invoice_date),
        "Model" => text_cell(&row.model),
        "Model No" => text_cell(&row.promo_key),
        "Promo NLC" => number_cell(row.promo_nlc),
        "Billing Price" => number_cell(row.billing_price),
        "Support" => number_cell(row.support),
        "Month" => text_cell(&row.prior_month),
        "Installation Date" => date_cell(row.installation_date),
        "Claimed Month" => match row.claimed_month {
            Some(ym) => Cell::Text(ym.to_string()),
            None => Cell::Empty,
        },
        "Install Month" => match row.install_month {
            Some(ym) => Cell::Text(ym.to_string()),
            None => Cell::Empty,
        },
        "Remark" => Cell::Text(row.remark.to_string()),
        _ => return None,
    };
    Some(cell)
}

/// Build the output header row and cell grid.
pub fn build_output(
    claims_headers: &[String],
    rows: &[AnnotatedClaim],
) -> (Vec<String>, Vec<Vec<Cell>>) {
    let mut headers: Vec<String> = claims_headers.to_vec();
    for derived in DERIVED_COLUMNS {
        if !claims_headers.iter().any(|h| h.trim() == derived) {
            headers.push(derived.to_string());
        }
    }

    let grid = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    derived_cell(row, header.trim()).unwrap_or_else(|| {
                        match row.claim.raw_fields.get(header) {
                            Some(value) if !value.is_empty() => Cell::Text(value.clone()),
                            _ => Cell::Empty,
                        }
                    })
                })
                .collect()
        })
        .collect();

    (headers, grid)
}

/// Assemble and atomically write the annotated output workbook.
pub fn write_output(
    path: &Path,
    claims_headers: &[String],
    rows: &[AnnotatedClaim],
) -> Result<(), PipelineError> {
    let (headers, grid) = build_output(claims_headers, rows);
    xlsx::write_workbook(path, &headers, &grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimflow_pipeline::model::{ClaimRecord, Remark, YearMonth};
    use std::collections::HashMap;

    fn annotated(serial: &str) -> AnnotatedClaim {
        let mut raw_fields = HashMap::new();
        raw_fields.insert("Serial Number".to_string(), serial.to_lowercase());
        raw_fields.insert("Dealer".to_string(), "North".to_string());
        AnnotatedClaim {
            claim: ClaimRecord {
                serial: serial.into(),
                model_no: None,
                raw_fields,
            },
            customer: Some("Acme".into()),
            invoice_no: Some("INV-1".into()),
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 15),
            model: Some("TV-55X".into()),
            promo_key: Some("TV-55X".into()),
            promo_nlc: Some(50.0),
            billing_price: Some(200.0),
            support: Some(150.0),
            prior_month: None,
            installation_date: None,
            claimed_month: Some(YearMonth { year: 2024, month: 6 }),
            install_month: None,
            remark: Remark::Eligible,
        }
    }

    #[test]
    fn headers_are_claims_columns_then_derived() {
        let claims_headers = vec!["Serial Number".to_string(), "Dealer".to_string()];
        let (headers, grid) = build_output(&claims_headers, &[annotated("SN-1")]);

        assert_eq!(headers[0], "Serial Number");
        assert_eq!(headers[1], "Dealer");
        // Serial Number is not duplicated among the derived columns
        assert_eq!(headers.iter().filter(|h| *h == "Serial Number").count(), 1);
        assert!(headers.iter().any(|h| h == "Remark"));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), headers.len());
    }

    #[test]
    fn serial_cell_uses_normalized_value() {
        let claims_headers = vec!["Serial Number".to_string()];
        let (_, grid) = build_output(&claims_headers, &[annotated("SN-1")]);
        assert_eq!(grid[0][0], Cell::Text("SN-1".into()));
    }

    #[test]
    fn pass_through_and_derived_values() {
        let claims_headers = vec!["Serial Number".to_string(), "Dealer".to_string()];
        let (headers, grid) = build_output(&claims_headers, &[annotated("SN-1")]);

        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
        assert_eq!(grid[0][col("Dealer")], Cell::Text("North".into()));
        assert_eq!(grid[0][col("Support")], Cell::Number(150.0));
        assert_eq!(grid[0][col("Claimed Month")], Cell::Text("2024-06".into()));
        assert_eq!(grid[0][col("Remark")], Cell::Text("Eligible".into()));
        assert_eq!(grid[0][col("Install Month")], Cell::Empty);
    }

    #[test]
    fn null_support_is_an_empty_cell_not_zero() {
        let mut row = annotated("SN-1");
        row.support = None;
        let (headers, grid) = build_output(&["Serial Number".to_string()], &[row]);
        let col = headers.iter().position(|h| h == "Support").unwrap();
        assert_eq!(grid[0][col], Cell::Empty);
    }
}
