//! Eligibility classification: ordered rule evaluation, first match wins,
//! support forced to exactly 0 for any non-eligible remark.
//!
//! This is the single place where missing data becomes a user-facing
//! explanation; earlier stages only degrade to nulls.

use crate::model::{AnnotatedClaim, Remark};

/// Derive the remark for one row. Rules are ordered, not exclusive.
fn remark_for(row: &AnnotatedClaim) -> Remark {
    if let Some(month) = &row.prior_month {
        return Remark::AlreadyClaimed(month.clone());
    }
    if matches!(row.support, Some(s) if s < 0.0) {
        return Remark::NlcExceedsBilling;
    }
    if let (Some(install), Some(claimed)) = (row.install_month, row.claimed_month) {
        if install < claimed {
            return Remark::InstalledEarlier(install);
        }
    }
    Remark::Eligible
}

/// Finalize every row: assign the remark and zero out support for
/// non-eligible rows. Eligible rows keep their computed support, null
/// included; a null here means missing source data, not an error.
pub fn classify(rows: &mut [AnnotatedClaim]) {
    for row in rows.iter_mut() {
        let remark = remark_for(row);
        if !remark.is_eligible() {
            row.support = Some(0.0);
        }
        row.remark = remark;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClaimRecord, YearMonth};
    use std::collections::HashMap;

    fn row() -> AnnotatedClaim {
        AnnotatedClaim {
            claim: ClaimRecord {
                serial: "SN-1".into(),
                model_no: None,
                raw_fields: HashMap::new(),
            },
            customer: None,
            invoice_no: None,
            invoice_date: None,
            model: None,
            promo_key: None,
            promo_nlc: None,
            billing_price: None,
            support: None,
            prior_month: None,
            installation_date: None,
            claimed_month: None,
            install_month: None,
            remark: Remark::Eligible,
        }
    }

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth { year, month }
    }

    #[test]
    fn prior_claim_wins_over_everything() {
        let mut r = row();
        r.prior_month = Some("2024-03".into());
        r.support = Some(-50.0); // would also trip rule 2
        r.install_month = Some(ym(2024, 1)); // and rule 3
        r.claimed_month = Some(ym(2024, 6));

        let mut rows = vec![r];
        classify(&mut rows);
        assert_eq!(
            rows[0].remark,
            Remark::AlreadyClaimed("2024-03".into())
        );
        assert_eq!(rows[0].support, Some(0.0));
    }

    #[test]
    fn negative_support_zeroed_with_nlc_remark() {
        let mut r = row();
        r.support = Some(-50.0);
        let mut rows = vec![r];
        classify(&mut rows);
        assert_eq!(rows[0].remark, Remark::NlcExceedsBilling);
        assert_eq!(rows[0].support, Some(0.0));
    }

    #[test]
    fn install_before_claim_month_zeroed() {
        let mut r = row();
        r.support = Some(150.0);
        r.install_month = Some(ym(2024, 5));
        r.claimed_month = Some(ym(2024, 6));
        let mut rows = vec![r];
        classify(&mut rows);
        assert_eq!(rows[0].remark, Remark::InstalledEarlier(ym(2024, 5)));
        assert_eq!(rows[0].support, Some(0.0));
        assert_eq!(rows[0].remark.to_string(), "Installation done in May-2024");
    }

    #[test]
    fn install_same_or_later_month_is_eligible() {
        for install in [ym(2024, 6), ym(2024, 7)] {
            let mut r = row();
            r.support = Some(150.0);
            r.install_month = Some(install);
            r.claimed_month = Some(ym(2024, 6));
            let mut rows = vec![r];
            classify(&mut rows);
            assert_eq!(rows[0].remark, Remark::Eligible);
            assert_eq!(rows[0].support, Some(150.0));
        }
    }

    #[test]
    fn install_december_vs_january_compares_chronologically() {
        let mut r = row();
        r.support = Some(10.0);
        r.install_month = Some(ym(2023, 12));
        r.claimed_month = Some(ym(2024, 1));
        let mut rows = vec![r];
        classify(&mut rows);
        assert_eq!(rows[0].remark, Remark::InstalledEarlier(ym(2023, 12)));
    }

    #[test]
    fn missing_months_never_trigger_rule_three() {
        let mut a = row();
        a.install_month = Some(ym(2024, 1));
        a.claimed_month = None;
        let mut b = row();
        b.install_month = None;
        b.claimed_month = Some(ym(2024, 6));
        let mut rows = vec![a, b];
        classify(&mut rows);
        assert!(rows.iter().all(|r| r.remark == Remark::Eligible));
    }

    #[test]
    fn null_support_row_stays_eligible_with_null_support() {
        let mut rows = vec![row()];
        classify(&mut rows);
        assert_eq!(rows[0].remark, Remark::Eligible);
        assert_eq!(rows[0].support, None);
    }

    #[test]
    fn zero_support_is_eligible() {
        let mut r = row();
        r.support = Some(0.0);
        let mut rows = vec![r];
        classify(&mut rows);
        assert_eq!(rows[0].remark, Remark::Eligible);
        assert_eq!(rows[0].support, Some(0.0));
    }
}
