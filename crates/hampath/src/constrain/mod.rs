//! Constraint Filter / Inference Engine.
//!
//! Purpose
//! - Partition a path set by edge constraints (edge must / must not be used).
//! - Over the surviving set, report every unconstrained edge whose value is
//!   the same in all survivors.
//!
//! Why this design
//! - Signatures are computed once per path in parallel; inference is a plain
//!   running intersection over them. An empty pass set is a result
//!   (`Inference::NoSolutions`), not an error.

mod infer;
mod occupancy;
mod summary;

pub use infer::{filter, infer, Inference, Partition};
pub use occupancy::{Constraint, Occupancy};
pub use summary::{rank_preferred, Summary};

#[cfg(test)]
mod tests;
