//! Errors for permutations and fat graphs.
use crate::fat_graph::Dart;
use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PermutationError {
    #[error("not a permutation of 0..{len}: value {value} is repeated or out of range")]
    NotAPermutation { len: usize, value: usize },
    #[error("invalid cycle notation {input:?}: {reason}")]
    Parse { input: String, reason: String },
    #[error("element {0} appears in more than one cycle")]
    RepeatedElement(usize),
}

/// Which of the three permutations of a fat graph an error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {
    Vertex,
    Edge,
    Face,
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Cell::Vertex => "vertex",
            Cell::Edge => "edge",
            Cell::Face => "face",
        })
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FatGraphError {
    #[error(transparent)]
    Permutation(#[from] PermutationError),
    #[error("{cell} permutation: {source}")]
    InvalidPermutation { cell: Cell, source: PermutationError },
    #[error("permutations of different lengths: vp={vp}, ep={ep}, fp={fp}")]
    LengthMismatch { vp: usize, ep: usize, fp: usize },
    #[error("at least two of vp, ep and fp are required")]
    MissingPermutations,
    #[error("edge permutation is not a fixed-point-free involution at dart {0}")]
    InvalidEdgePermutation(Dart),
    #[error("fp[ep[vp[{dart}]]] = {actual}, expected {dart}")]
    InconsistentTriple { dart: Dart, actual: Dart },
    #[error("the map is not connected: dart {0} is unreachable from dart 0")]
    Disconnected(Dart),
    #[error("invalid unicellular word: {0}")]
    InvalidWord(String),
    #[error("dart {dart} out of range (n = {n})")]
    DartOutOfRange { dart: Dart, n: usize },
    #[error("darts {i} and {j} are not on the same {cell}")]
    NotSameCell { cell: Cell, i: Dart, j: Dart },
    #[error("darts {i}, {j}, {k} are not in counter-clockwise order around their face")]
    NotCounterClockwise { i: Dart, j: Dart, k: Dart },
    #[error("the edge of dart {dart} has the same {cell} on both sides")]
    NotSeparating { cell: Cell, dart: Dart },
    #[error("the edge of dart {dart} is not the most recently inserted {cell} split")]
    NotLastEdge { cell: Cell, dart: Dart },
    #[error("dart {0} does not start a face trisection")]
    NotTrisection(Dart),
    #[error("cannot remove the last edge of a fat graph")]
    LastEdge,
    #[error("capacity exceeded: {needed} darts needed but only {capacity} allocated")]
    CapacityExceeded { needed: usize, capacity: usize },
    #[error("inconsistent fat graph at dart {dart}: {what} is {actual}, expected {expected}")]
    Inconsistent { dart: Dart, what: &'static str, expected: String, actual: String },
    #[error("inconsistent fat graph: {0}")]
    InconsistentCounts(String),
    #[error("invalid enumeration parameters: {0}")]
    InvalidParameters(String),
    #[error("fat graph enumerated twice:\n{0}")]
    Duplicate(String),
    #[error("output failed: {0}")]
    Io(String),
}

pub type Result<T, E = FatGraphError> = std::result::Result<T, E>;
