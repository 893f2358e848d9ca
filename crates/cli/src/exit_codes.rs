//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract; batch schedulers and wrapper scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain    | Description                                    |
//! |------|-----------|------------------------------------------------|
//! | 0    | Universal | Success                                        |
//! | 1    | Universal | General error (unspecified)                    |
//! | 2    | Universal | CLI usage error (bad args, missing file)       |
//! | 3    | run       | I/O error reading inputs or writing output     |
//! | 4    | run       | Invalid job config (TOML parse/validation)     |
//! | 5    | run       | Input schema error (required column missing)   |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - input file unreadable, output not writable.
pub const EXIT_IO: u8 = 3;

/// Job config error - TOML parse or validation failure.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// Input schema error - a structurally required column is missing.
/// Reported before any row processing, no partial output.
pub const EXIT_SCHEMA: u8 = 5;

use claimflow_pipeline::PipelineError;

/// Map a pipeline error to its registry code.
pub fn pipeline_exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::MissingColumn { .. } | PipelineError::EmptySheet(_) => EXIT_SCHEMA,
        PipelineError::ConfigParse(_) => EXIT_INVALID_CONFIG,
        PipelineError::Io(_) => EXIT_IO,
    }
}
