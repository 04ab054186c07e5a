//! Error types for tidymesh

use thiserror::Error;

/// Main error type for tidymesh operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The operation was invoked without a usable mesh target.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A new face could not be built from the requested vertex cycle.
    #[error("Face construction failed: {0}")]
    FaceConstruction(#[from] FaceConstructionError),

    /// A face/edge/vertex reference did not resolve during a mutation.
    #[error("Topology inconsistency: {0}")]
    TopologyInconsistency(String),

    /// A positional table lookup was made after a structural mutation
    /// without refreshing the lookup tables first.
    #[error("Lookup table is stale; call ensure_lookup_tables() after mutating the topology")]
    StaleLookupTable,
}

/// Reasons a face cycle is rejected by the topology.
///
/// These are expected outcomes during merging and are recovered locally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceConstructionError {
    #[error("a face needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("expected 4 unique vertices, got {0}")]
    WrongVertexCount(usize),

    #[error("vertex cycle repeats a vertex")]
    RepeatedVertex,

    #[error("vertex cycle has zero area")]
    Degenerate,

    #[error("vertex cycle self-intersects")]
    SelfIntersecting,

    #[error("a face with the same vertices already exists")]
    DuplicateFace,

    #[error("an edge of the cycle would border more than two faces")]
    NonManifoldEdge,

    #[error("quad perimeter does not match the boundary of the merged faces")]
    PerimeterMismatch,
}

impl Error {
    pub(crate) fn dangling<T: std::fmt::Debug>(what: &str, id: T) -> Self {
        Error::TopologyInconsistency(format!("{what} {id:?} does not resolve"))
    }
}

/// Result type alias for tidymesh operations
pub type Result<T> = std::result::Result<T, Error>;
