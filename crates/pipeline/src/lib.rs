//! `claimflow-pipeline`: partner claim validation engine.
//!
//! Pure engine crate: receives pre-loaded record sets, returns annotated
//! claims. No CLI or IO dependencies.

pub mod billing;
pub mod classify;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod model;
pub mod normalize;
pub mod support;

pub use engine::run;
pub use error::PipelineError;
pub use model::{AnnotatedClaim, PipelineInput, Remark, RunResult, YearMonth};
