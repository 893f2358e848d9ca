//! SUMIFS-style billing price resolution.
//!
//! One pass over the billing table builds a sum per normalized
//! (customer, invoice, model) triple; each claim row is then resolved with
//! a single lookup. The null-vs-zero distinction matters downstream:
//! `None` means a key field was missing and no lookup was attempted,
//! `Some(0.0)` means the lookup ran and matched nothing (empty sum).

use std::collections::HashMap;

use crate::model::{AnnotatedClaim, BillingRecord};

type TripleKey = (String, String, String);

/// Sum billing prices per (customer, invoice, model). Rows missing any key
/// field are not indexed; rows with a null price contribute nothing to an
/// otherwise valid triple.
fn billing_index(billing: &[BillingRecord]) -> HashMap<TripleKey, f64> {
    let mut index: HashMap<TripleKey, f64> = HashMap::new();
    for row in billing {
        let (Some(customer), Some(invoice), Some(model)) =
            (&row.customer, &row.invoice_no, &row.model)
        else {
            continue;
        };
        let entry = index
            .entry((customer.clone(), invoice.clone(), model.clone()))
            .or_insert(0.0);
        if let Some(price) = row.price {
            *entry += price;
        }
    }
    index
}

/// Fill `billing_price` on every claim row.
pub fn resolve_billing(rows: &mut [AnnotatedClaim], billing: &[BillingRecord]) {
    let index = billing_index(billing);

    for row in rows.iter_mut() {
        let (Some(customer), Some(invoice), Some(model)) =
            (&row.customer, &row.invoice_no, &row.model)
        else {
            // Null key field: no lookup attempted.
            row.billing_price = None;
            continue;
        };
        let key = (customer.clone(), invoice.clone(), model.clone());
        row.billing_price = Some(index.get(&key).copied().unwrap_or(0.0));
    }
}
