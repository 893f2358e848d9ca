//! Left-outer enrichment joins: sales, promo, prior-claims and installation
//! records folded into each claim row via pre-built key indexes.
//!
//! Every claim row is preserved regardless of match; unmatched lookups
//! contribute nulls. Reference tables are deduplicated on the join key,
//! first occurrence wins, so the output row count always equals the claims
//! row count.

use std::collections::HashMap;

use crate::model::{AnnotatedClaim, PipelineInput, Remark, YearMonth};

/// Build a first-occurrence-wins index from normalized key to record.
fn index_first<'a, T>(rows: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, &'a T> {
    let mut map: HashMap<&str, &T> = HashMap::with_capacity(rows.len());
    for row in rows {
        let k = key(row);
        if k.is_empty() {
            continue;
        }
        map.entry(k).or_insert(row);
    }
    map
}

/// Perform the four left joins and derive the claimed/install months.
/// Billing price, support and the final remark are filled by later stages.
pub fn enrich(input: &PipelineInput) -> Vec<AnnotatedClaim> {
    let sales_idx = index_first(&input.sales, |r| r.serial.as_str());
    let promo_idx = index_first(&input.promos, |r| r.model_no.as_str());
    let prior_idx = index_first(&input.prior_claims, |r| r.serial.as_str());
    let install_idx = index_first(&input.installations, |r| r.serial.as_str());

    input
        .claims
        .iter()
        .map(|claim| {
            let sale = sales_idx.get(claim.serial.as_str());

            let customer = sale.and_then(|s| s.customer.clone());
            let invoice_no = sale.and_then(|s| s.invoice_no.clone());
            let invoice_date = sale.and_then(|s| s.invoice_date);
            let model = sale.and_then(|s| s.model.clone());

            // Promo join key: the claims file's own model-number column when
            // it has one (an empty cell there joins nothing); the
            // sales-derived model name only when the column is absent.
            let promo_key = if input.claims_have_model_no {
                claim.model_no.clone()
            } else {
                model.as_deref().and_then(crate::normalize::clean_model_no)
            };

            let promo_nlc = promo_key
                .as_deref()
                .and_then(|k| promo_idx.get(k))
                .and_then(|p| p.promo_nlc);

            let prior_month = prior_idx
                .get(claim.serial.as_str())
                .and_then(|p| p.month.clone());

            let installation_date = install_idx
                .get(claim.serial.as_str())
                .and_then(|i| i.installation_date);

            AnnotatedClaim {
                claim: claim.clone(),
                customer,
                invoice_no,
                claimed_month: invoice_date.map(YearMonth::from),
                invoice_date,
                model,
                promo_key,
                promo_nlc,
                billing_price: None,
                support: None,
                prior_month,
                install_month: installation_date.map(YearMonth::from),
                installation_date,
                remark: Remark::Eligible,
            }
        })
        .collect()
}
