//! Curated internal API for the command-line wrapper (UNSTABLE).
//!
//! Important
//! - Not a public API. A convenience surface so the CLI imports one module;
//!   breaking changes are allowed.

// Graph model
pub use crate::cage::presets::{ms2_spec, ms2_start_labels, MS2_BEST, MS2_PREFERRED, MS2_START};
pub use crate::cage::{Cage, CageSpec, ConnectivityRow, Edge, EdgeKind, Move, Vertex};
// Paths
pub use crate::path::{Encoding, Path};
// Growth
pub use crate::generate::{
    Bidirectional, Extension, Forward, Frontier, FrontierStore, GenerateCfg, Generated, Generator,
    NoStore, Rules,
};
// Symmetry
pub use crate::symmetry::{
    canonical, expand, orbit, reduce, trim, trim_encoding, DegeneracyTable, Relabeling, Symmetry,
    SymmetryGroup, Trimmed,
};
// Filtering and inference
pub use crate::constrain::{
    filter, infer, rank_preferred, Constraint, Inference, Occupancy, Partition, Summary,
};
// Realization
pub use crate::realize::{encode_all, instantiate, Instance, Instantiated, RealizeCfg, Realizer};
// Errors
pub use crate::error::{HampathError, Result};
