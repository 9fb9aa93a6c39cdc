//! Enumeration, canonicalization and filtering of simple paths on polyhedral
//! cages.
//!
//! Pipeline: `cage` (graph model) → `generate` (frontier growth) →
//! `symmetry` (reduction to representatives) → `constrain` (edge filtering
//! and inference) → `realize` (back to every symmetric instance).
//!
//! API Policy
//! - This crate is project-internal. The `cli` crate is its only consumer and
//!   imports through `api`; breaking changes are fine when they simplify.

pub mod api;
pub mod cage;
pub mod constrain;
pub mod error;
pub mod generate;
pub mod path;
pub mod realize;
pub mod symmetry;

#[cfg(test)]
pub(crate) mod fixtures;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cage::Cage;
pub use error::{HampathError, Result};
pub use path::{Encoding, Path};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cage::{Cage, CageSpec, Edge, EdgeKind, Move, Vertex};
    pub use crate::constrain::{Constraint, Inference, Occupancy};
    pub use crate::error::{HampathError, Result};
    pub use crate::generate::{Frontier, GenerateCfg, Generator, Rules};
    pub use crate::path::{Encoding, Path};
    pub use crate::realize::{RealizeCfg, Realizer};
    pub use crate::symmetry::{DegeneracyTable, SymmetryGroup};
}
