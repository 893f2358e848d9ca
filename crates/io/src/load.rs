//! Typed loaders: one per input table, converting a flat [`Table`] into the
//! pipeline's record types. Structural problems (missing required columns)
//! are fatal here, before any row processing; bad row data degrades to
//! missing values.

use std::collections::HashMap;

use claimflow_pipeline::model::{
    BillingRecord, ClaimRecord, InstallRecord, PriorClaimRecord, PromoRecord, SalesRecord,
};
use claimflow_pipeline::normalize::{clean_model_no, clean_serial, clean_text};
use claimflow_pipeline::PipelineError;

use crate::table::Table;

fn require_column(table: &Table, table_name: &str, column: &str) -> Result<usize, PipelineError> {
    table.column(column).ok_or_else(|| PipelineError::MissingColumn {
        table: table_name.into(),
        column: column.into(),
    })
}

/// Load the partner claims file. `Serial Number` is required; every original
/// column is kept in `raw_fields` for pass-through. One record per input
/// row, empty serials included, so the row-count invariant holds regardless.
///
/// The returned flag reports whether a `Model No` column exists at all; the
/// promo join falls back to the sales model only when it does not.
pub fn load_claims(table: &Table) -> Result<(Vec<ClaimRecord>, bool), PipelineError> {
    let serial_col = require_column(table, "claims", "Serial Number")?;
    let model_no_col = table.column("Model No");

    let records = table
        .rows
        .iter()
        .enumerate()
        .map(|(r, _)| {
            let mut raw_fields = HashMap::with_capacity(table.headers.len());
            for (c, header) in table.headers.iter().enumerate() {
                raw_fields.insert(header.clone(), table.cell(r, c).display());
            }
            ClaimRecord {
                serial: clean_serial(&table.cell(r, serial_col).display()),
                model_no: model_no_col
                    .and_then(|c| clean_model_no(&table.cell(r, c).display())),
                raw_fields,
            }
        })
        .collect();

    Ok((records, model_no_col.is_some()))
}

/// Sales master: fixed positional 8-column schema. The header row is
/// discarded at read time, never name-matched, and never a record.
/// Columns: serial, invoice number, invoice date, (2 unused), customer
/// name, model, (1 unused). Rows without a serial cannot join and are
/// skipped.
pub fn load_sales(table: &Table) -> Vec<SalesRecord> {
    const COL_SERIAL: usize = 0;
    const COL_INVOICE_NO: usize = 1;
    const COL_INVOICE_DATE: usize = 2;
    const COL_CUSTOMER: usize = 5;
    const COL_MODEL: usize = 6;

    table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(r, _)| {
            let serial = clean_serial(&table.cell(r, COL_SERIAL).display());
            if serial.is_empty() {
                return None;
            }
            Some(SalesRecord {
                serial,
                invoice_no: clean_text(&table.cell(r, COL_INVOICE_NO).display()),
                invoice_date: table.cell(r, COL_INVOICE_DATE).as_date(),
                customer: clean_text(&table.cell(r, COL_CUSTOMER).display()),
                model: clean_text(&table.cell(r, COL_MODEL).display()),
            })
        })
        .collect()
}

/// Promotion policy: `Model No` → `Promo NLC`. De-duplication on the model
/// number happens at the join (first occurrence wins).
pub fn load_promos(table: &Table) -> Result<Vec<PromoRecord>, PipelineError> {
    let model_col = require_column(table, "promotion", "Model No")?;
    let nlc_col = require_column(table, "promotion", "Promo NLC")?;

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(r, _)| {
            let model_no = clean_model_no(&table.cell(r, model_col).display())?;
            Some(PromoRecord {
                model_no,
                promo_nlc: table.cell(r, nlc_col).as_f64(),
            })
        })
        .collect())
}

/// Billing price file. Non-numeric prices become missing, never an error.
pub fn load_billing(table: &Table) -> Result<Vec<BillingRecord>, PipelineError> {
    let customer_col = require_column(table, "billing", "Customer Name")?;
    let invoice_col = require_column(table, "billing", "Invoice Number")?;
    let model_col = require_column(table, "billing", "Model")?;
    let price_col = require_column(table, "billing", "Billing Price")?;

    Ok(table
        .rows
        .iter()
        .enumerate()
        .map(|(r, _)| BillingRecord {
            customer: clean_text(&table.cell(r, customer_col).display()),
            invoice_no: clean_text(&table.cell(r, invoice_col).display()),
            model: clean_text(&table.cell(r, model_col).display()),
            price: table.cell(r, price_col).as_f64(),
        })
        .collect())
}

/// Prior claims: exactly two columns consumed, `Serial Number` and `Month`.
pub fn load_prior_claims(table: &Table) -> Result<Vec<PriorClaimRecord>, PipelineError> {
    let serial_col = require_column(table, "prior_claims", "Serial Number")?;
    let month_col = require_column(table, "prior_claims", "Month")?;

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(r, _)| {
            let serial = clean_serial(&table.cell(r, serial_col).display());
            if serial.is_empty() {
                return None;
            }
            Some(PriorClaimRecord {
                serial,
                month: clean_text(&table.cell(r, month_col).display()),
            })
        })
        .collect())
}

/// Installation file. Header names are normalized (trim, lowercase, spaces
/// to underscores) and must include `serial_number` and `installation_date`;
/// anything else is a configuration error reported before row processing.
pub fn load_installations(table: &Table) -> Result<Vec<InstallRecord>, PipelineError> {
    let normalized: Vec<String> = table
        .headers
        .iter()
        .map(|h| h.trim().to_lowercase().replace(' ', "_"))
        .collect();

    let find = |name: &str| -> Result<usize, PipelineError> {
        normalized
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PipelineError::MissingColumn {
                table: "installation".into(),
                column: name.into(),
            })
    };

    let serial_col = find("serial_number")?;
    let date_col = find("installation_date")?;

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(r, _)| {
            let serial = clean_serial(&table.cell(r, serial_col).display());
            if serial.is_empty() {
                return None;
            }
            Some(InstallRecord {
                serial,
                installation_date: table.cell(r, date_col).as_date(),
            })
        })
        .collect())
}
