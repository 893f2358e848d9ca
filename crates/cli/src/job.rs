//! Job configuration: which files to read and where to write the output.
//!
//! Paths are explicit configuration injected at the boundary; the engine
//! crate never touches the filesystem. Defaults match the fixed filenames
//! of the original batch, so a bare `claimflow run` in the export directory
//! works without any config file.

use std::path::{Path, PathBuf};

use claimflow_pipeline::PipelineError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub claims: PathBuf,
    pub promotions: PathBuf,
    pub sales: PathBuf,
    pub billing: PathBuf,
    pub prior_claims: PathBuf,
    pub installations: PathBuf,
    pub output: PathBuf,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            claims: "Partner_Claim_File.xlsx".into(),
            promotions: "Promotion_Policy.xlsx".into(),
            sales: "Sales_Master.xlsx".into(),
            billing: "Billing_Price.xlsx".into(),
            prior_claims: "Previously_Claimed.xlsx".into(),
            installations: "Installation.xlsx".into(),
            output: "Validated_Claims_Output.xlsx".into(),
        }
    }
}

impl JobConfig {
    pub fn from_toml(input: &str) -> Result<Self, PipelineError> {
        toml::from_str(input).map_err(|e| PipelineError::ConfigParse(e.to_string()))
    }

    /// Resolve every relative path against `base` (the config file's
    /// directory, or the `--dir` working directory).
    pub fn resolved(mut self, base: &Path) -> Self {
        for path in [
            &mut self.claims,
            &mut self.promotions,
            &mut self.sales,
            &mut self.billing,
            &mut self.prior_claims,
            &mut self.installations,
            &mut self.output,
        ] {
            if path.is_relative() {
                *path = base.join(path.as_path());
            }
        }
        self
    }

    /// All input paths with a human-readable table name, in load order.
    pub fn inputs(&self) -> [(&'static str, &Path); 6] {
        [
            ("claims", &self.claims),
            ("promotion", &self.promotions),
            ("sales", &self.sales),
            ("billing", &self.billing),
            ("prior_claims", &self.prior_claims),
            ("installation", &self.installations),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_fixed_filenames() {
        let job = JobConfig::default();
        assert_eq!(job.claims, PathBuf::from("Partner_Claim_File.xlsx"));
        assert_eq!(job.output, PathBuf::from("Validated_Claims_Output.xlsx"));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let job = JobConfig::from_toml(
            r#"
claims = "march/claims.xlsx"
output = "march/validated.xlsx"
"#,
        )
        .unwrap();
        assert_eq!(job.claims, PathBuf::from("march/claims.xlsx"));
        assert_eq!(job.sales, PathBuf::from("Sales_Master.xlsx"));
        assert_eq!(job.output, PathBuf::from("march/validated.xlsx"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = JobConfig::from_toml("claims_file = \"x.xlsx\"\n").unwrap_err();
        assert!(err.to_string().contains("config parse error"));
    }

    #[test]
    fn resolved_joins_relative_paths_only() {
        let job = JobConfig::from_toml("claims = \"/abs/claims.xlsx\"\n")
            .unwrap()
            .resolved(Path::new("/data/march"));
        assert_eq!(job.claims, PathBuf::from("/abs/claims.xlsx"));
        assert_eq!(job.sales, PathBuf::from("/data/march/Sales_Master.xlsx"));
    }
}
