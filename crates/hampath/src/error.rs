//! Error type shared by every stage of the pipeline.
//!
//! All variants are fatal configuration or input errors. An empty result set
//! after filtering is not an error; see `constrain::Inference::NoSolutions`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HampathError {
    #[error("unknown vertex label {0:?}")]
    UnknownLabel(char),
    #[error("vertex label {0:?} declared twice")]
    DuplicateLabel(char),
    #[error("vertex {label:?} already has a {kind} assignment")]
    ConflictingMove { label: char, kind: &'static str },
    #[error("rotation cycle {cycle:?} has {len} vertices, need at least 3")]
    ShortCycle { cycle: String, len: usize },
    #[error("moves from {from:?} reach {to:?} by more than one move kind")]
    AmbiguousMove { from: char, to: char },
    #[error("{from:?} and {to:?} are not adjacent")]
    NotAdjacent { from: char, to: char },
    #[error("vertex {0:?} appears twice in path")]
    RepeatedVertex(char),
    #[error("move {symbol} is not available at vertex {at:?}")]
    MoveUnavailable { symbol: char, at: char },
    #[error("invalid move symbol {0:?}")]
    BadSymbol(char),
    #[error("start paths differ in length: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("no start paths supplied")]
    NoStartPaths,
    #[error("frame {0:?} is not present in the degeneracy table")]
    MissingFrame(char),
    #[error("malformed degeneracy table: {0}")]
    BadDegeneracy(String),
    #[error("{from:?}-{to:?} is not an edge of the cage")]
    UnknownEdge { from: char, to: char },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, HampathError>;
