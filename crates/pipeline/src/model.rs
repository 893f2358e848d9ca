use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One row of the partner claims file. `serial` is already normalized;
/// `raw_fields` keeps every original column for pass-through to the output.
#[derive(Debug, Clone)]
pub struct ClaimRecord {
    pub serial: String,
    /// Claims-side "Model No" cell, normalized. Only meaningful when the
    /// claims file has that column (see `claims_have_model_no`).
    pub model_no: Option<String>,
    pub raw_fields: HashMap<String, String>,
}

/// Sales master row, keyed by normalized serial number.
#[derive(Debug, Clone)]
pub struct SalesRecord {
    pub serial: String,
    pub invoice_no: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub customer: Option<String>,
    pub model: Option<String>,
}

/// Promotion policy row: model number → promo net landed cost.
#[derive(Debug, Clone)]
pub struct PromoRecord {
    pub model_no: String,
    pub promo_nlc: Option<f64>,
}

/// Billing price line item. Many rows may share the same
/// (customer, invoice, model) triple; the resolver sums them.
#[derive(Debug, Clone)]
pub struct BillingRecord {
    pub customer: Option<String>,
    pub invoice_no: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
}

/// Previously-claimed row: serial → month already claimed.
#[derive(Debug, Clone)]
pub struct PriorClaimRecord {
    pub serial: String,
    pub month: Option<String>,
}

/// Installation row: serial → installation date.
#[derive(Debug, Clone)]
pub struct InstallRecord {
    pub serial: String,
    pub installation_date: Option<NaiveDate>,
}

/// Pre-loaded record sets for one run.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub claims: Vec<ClaimRecord>,
    /// Whether the claims file carried its own `Model No` column. The
    /// sales-model fallback for the promo join applies only when it did
    /// not; a present-but-empty cell joins nothing.
    pub claims_have_model_no: bool,
    pub sales: Vec<SalesRecord>,
    pub promos: Vec<PromoRecord>,
    pub billing: Vec<BillingRecord>,
    pub prior_claims: Vec<PriorClaimRecord>,
    pub installations: Vec<InstallRecord>,
}

// ---------------------------------------------------------------------------
// Year-month
// ---------------------------------------------------------------------------

/// Calendar year-month, used purely for chronological ordering. Derived by
/// truncating a date; compares earlier/later, never by numeric difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl YearMonth {
    /// Abbreviated month-year form, e.g. `May-2024`.
    pub fn abbreviated(&self) -> String {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun",
            "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let idx = (self.month.clamp(1, 12) - 1) as usize;
        format!("{}-{}", MONTHS[idx], self.year)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Eligibility remark. `Display` renders the exact user-facing strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Remark {
    AlreadyClaimed(String),
    NlcExceedsBilling,
    InstalledEarlier(YearMonth),
    Eligible,
}

impl Remark {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

impl std::fmt::Display for Remark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyClaimed(month) => write!(f, "Already claimed in {month}"),
            Self::NlcExceedsBilling => write!(f, "NLC is greater than billing price"),
            Self::InstalledEarlier(ym) => {
                write!(f, "Installation done in {}", ym.abbreviated())
            }
            Self::Eligible => write!(f, "Eligible"),
        }
    }
}

// ---------------------------------------------------------------------------
// Working / output row
// ---------------------------------------------------------------------------

/// A claim row as it moves through the pipeline: instantiated from the
/// claims input, progressively enriched by the joins, finalized by the
/// classifier. One per input claim row, same order, always.
#[derive(Debug, Clone)]
pub struct AnnotatedClaim {
    pub claim: ClaimRecord,
    // Sales enrichment
    pub customer: Option<String>,
    pub invoice_no: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub model: Option<String>,
    /// Promo join key after the model-number fallback, normalized.
    pub promo_key: Option<String>,
    pub promo_nlc: Option<f64>,
    // Billing resolver: None = no lookup attempted (null key field),
    // Some(0.0) = lookup attempted, empty sum.
    pub billing_price: Option<f64>,
    pub support: Option<f64>,
    // Prior-claims / installation enrichment
    pub prior_month: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub claimed_month: Option<YearMonth>,
    pub install_month: Option<YearMonth>,
    pub remark: Remark,
}

// ---------------------------------------------------------------------------
// Summary + result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total_claims: usize,
    pub eligible: usize,
    pub already_claimed: usize,
    pub nlc_exceeds_billing: usize,
    pub installed_earlier: usize,
    /// Eligible rows whose support is null (missing billing or promo data).
    pub null_support: usize,
    pub total_support: f64,
}

/// No run timestamp here: identical inputs must produce identical output.
#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub meta: RunMeta,
    pub summary: RunSummary,
    pub claims: Vec<AnnotatedClaim>,
}
