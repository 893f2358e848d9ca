//! Raw support computation: billing price minus promo net landed cost,
//! with null propagation. No rounding, no currency conversion.

use crate::model::AnnotatedClaim;

pub fn compute_support(rows: &mut [AnnotatedClaim]) {
    for row in rows.iter_mut() {
        row.support = match (row.billing_price, row.promo_nlc) {
            (Some(billing), Some(nlc)) => Some(billing - nlc),
            _ => None,
        };
    }
}
