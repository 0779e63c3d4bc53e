#[derive(Debug, thiserror::Error)]
pub enum LclError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{container}: {field} must be numeric (got '{value}')")]
    InvalidContainerField {
        container: String,
        field: &'static str,
        value: String,
    },

    #[error("{container}: loadability must be greater than zero")]
    ZeroLoadability { container: String },

    #[error("agent '{agent}' has charge rows but no nomination record")]
    MissingNomination { agent: String },

    #[error("agent '{agent}' has more than one nomination record")]
    DuplicateNomination { agent: String },

    #[error("agent '{agent}' has more than one Rebate row")]
    DuplicateRebate { agent: String },
}

pub type Result<T> = std::result::Result<T, LclError>;
