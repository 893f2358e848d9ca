use std::fmt;

/// Fatal-tier errors. Row-level data problems (bad dates, missing matches,
/// non-numeric prices) never surface here; they degrade to nulls inside the
/// pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// A structurally required column is missing from an input table.
    MissingColumn { table: String, column: String },
    /// An input sheet has no usable rows at all.
    EmptySheet(String),
    /// Job config parse / deserialization error.
    ConfigParse(String),
    /// File read/write error.
    Io(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { table, column } => {
                write!(f, "table '{table}': missing required column '{column}'")
            }
            Self::EmptySheet(table) => write!(f, "table '{table}': sheet is empty"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}
