use thiserror::Error;

/// The single error type returned by every fallible operation in this crate.
///
/// Parsers fail fast on the first structural violation; read-only operations
/// never mutate a `Taxonomy` on error.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("unknown taxonomy id: {0}")]
    UnknownId(String),

    #[error("duplicate taxonomy id: {0}")]
    DuplicateId(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("reparenting {child} to {new_parent} would create a cycle")]
    Cycle { child: String, new_parent: String },

    #[error("taxonomy has no root")]
    EmptyTree,

    #[error("node-link JSON has no root node (every node has an outgoing edge)")]
    MissingRoot,

    #[error("node-link JSON has multiple root candidates: {0:?}")]
    MultipleRoots(Vec<String>),

    #[error("I/O error reading taxonomy file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON taxonomy")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse integer in taxonomy file")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("failed to parse float in taxonomy file")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;
