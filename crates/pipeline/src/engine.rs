//! Pipeline driver: threads each stage's output into the next, single
//! pass, single thread.

use crate::billing::resolve_billing;
use crate::classify::classify;
use crate::enrich::enrich;
use crate::model::{AnnotatedClaim, PipelineInput, Remark, RunMeta, RunResult, RunSummary};
use crate::support::compute_support;

/// Run the full validation pipeline over pre-loaded record sets.
///
/// Output rows correspond 1:1, in order, to the input claims.
pub fn run(input: &PipelineInput) -> RunResult {
    let mut rows = enrich(input);
    resolve_billing(&mut rows, &input.billing);
    compute_support(&mut rows);
    classify(&mut rows);

    let summary = summarize(&rows);

    RunResult {
        meta: RunMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        summary,
        claims: rows,
    }
}

fn summarize(rows: &[AnnotatedClaim]) -> RunSummary {
    let mut summary = RunSummary {
        total_claims: rows.len(),
        ..Default::default()
    };
    for row in rows {
        match &row.remark {
            Remark::Eligible => {
                summary.eligible += 1;
                if row.support.is_none() {
                    summary.null_support += 1;
                }
            }
            Remark::AlreadyClaimed(_) => summary.already_claimed += 1,
            Remark::NlcExceedsBilling => summary.nlc_exceeds_billing += 1,
            Remark::InstalledEarlier(_) => summary.installed_earlier += 1,
        }
        if let Some(support) = row.support {
            summary.total_support += support;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClaimRecord, PriorClaimRecord};
    use std::collections::HashMap;

    fn claim(serial: &str) -> ClaimRecord {
        ClaimRecord {
            serial: serial.into(),
            model_no: None,
            raw_fields: HashMap::new(),
        }
    }

    #[test]
    fn summary_counts_by_remark() {
        let input = PipelineInput {
            claims: vec![claim("SN-1"), claim("SN-2")],
            prior_claims: vec![PriorClaimRecord {
                serial: "SN-2".into(),
                month: Some("2024-03".into()),
            }],
            ..Default::default()
        };
        let result = run(&input);
        assert_eq!(result.summary.total_claims, 2);
        assert_eq!(result.summary.eligible, 1);
        assert_eq!(result.summary.already_claimed, 1);
        // SN-1 has no reference data at all: eligible, null support
        assert_eq!(result.summary.null_support, 1);
        assert_eq!(result.summary.total_support, 0.0);
    }

    #[test]
    fn empty_input_is_fine() {
        let result = run(&PipelineInput::default());
        assert_eq!(result.claims.len(), 0);
        assert_eq!(result.summary.total_claims, 0);
    }
}
