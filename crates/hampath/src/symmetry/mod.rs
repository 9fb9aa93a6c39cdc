//! Symmetry Canonicalizer.
//!
//! Purpose
//! - Collapse move encodings that describe the same physical path under the
//!   group {identity, reverse, mirror, reverse∘mirror} to one representative.
//! - Carry vertex paths between rotational frames of the cage with the
//!   degeneracy table (re-anchoring during bidirectional growth, and frame
//!   instantiation in the realizer).
//!
//! Why this design
//! - Encodings are cage-independent, so the four-element group acts on them
//!   without any geometry; rotations act on vertex labels and need the table.
//! - Representatives are the lexicographically smallest member, which makes
//!   canonicalization idempotent and independent of input order.

mod canon;
mod degeneracy;

pub use canon::{
    canonical, equivalent, expand, orbit, reduce, trim, trim_encoding, Symmetry, SymmetryGroup,
    Trimmed,
};
pub use degeneracy::{DegeneracyTable, Relabeling};
