//! Path Generator: breadth-by-length growth of simple paths.
//!
//! Purpose
//! - Starting from a frontier of equal-length partial paths, grow every path
//!   by one vertex per step until the largest requested length, keeping the
//!   frontiers at the requested lengths as output.
//! - Apply require/preclude rules to every candidate and an end-suffix
//!   allow-list to the final output.
//!
//! Why this design
//! - Each step is a pure map over the frontier followed by one sort+dedup
//!   merge, so the only synchronization point is the stage boundary.
//! - Forward and bidirectional growth are two `Extension` impls chosen once by
//!   the caller; the generator loop does not branch on the mode.
//! - Completed frontiers are handed to a `FrontierStore` so the caller can
//!   checkpoint and later resume from any finished length.

mod extend;
mod rules;

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::cage::{Cage, Vertex};
use crate::error::{HampathError, Result};
use crate::path::Path;

pub use extend::{Bidirectional, Extension, Forward};
pub use rules::Rules;

/// Generation parameters.
#[derive(Clone, Debug)]
pub struct GenerateCfg {
    /// Path lengths (vertex counts) to report. Empty means the Hamiltonian
    /// length of the cage.
    pub lengths: Vec<usize>,
    /// Accepted path endings; a path passes if it ends with any of them.
    /// Empty accepts every path.
    pub ends: Vec<Vec<Vertex>>,
    /// Map each frontier with rayon; the sequential path gives identical sets.
    pub parallel: bool,
}

impl GenerateCfg {
    /// Whether `path` ends with an accepted suffix.
    pub fn accepts_end(&self, path: &Path) -> bool {
        self.ends.is_empty() || self.ends.iter().any(|e| path.ends_with(e))
    }
}

impl Default for GenerateCfg {
    fn default() -> Self {
        Self {
            lengths: Vec::new(),
            ends: Vec::new(),
            parallel: true,
        }
    }
}

/// All paths of one length, sorted and free of duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frontier {
    length: usize,
    paths: Vec<Path>,
}

impl Frontier {
    /// Validate a start set: non-empty, every path the same length.
    pub fn from_starts(paths: Vec<Path>) -> Result<Self> {
        let Some(first) = paths.first() else {
            return Err(HampathError::NoStartPaths);
        };
        let length = first.len();
        if let Some(bad) = paths.iter().find(|p| p.len() != length) {
            return Err(HampathError::LengthMismatch {
                expected: length,
                found: bad.len(),
            });
        }
        Ok(Self::merged(length, paths))
    }

    /// A completed length with no surviving paths.
    pub fn empty(length: usize) -> Self {
        Self {
            length,
            paths: Vec::new(),
        }
    }

    pub(crate) fn merged(length: usize, mut paths: Vec<Path>) -> Self {
        paths.sort_unstable();
        paths.dedup();
        Self { length, paths }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}

/// Sink for completed frontiers (checkpoint files, in-memory capture, ...).
pub trait FrontierStore {
    type Error: From<HampathError>;

    fn store(&mut self, frontier: &Frontier) -> std::result::Result<(), Self::Error>;
}

/// Discards every frontier.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStore;

impl FrontierStore for NoStore {
    type Error = HampathError;

    fn store(&mut self, _frontier: &Frontier) -> Result<()> {
        Ok(())
    }
}

/// Output of a run: end-filtered paths for each requested length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generated {
    pub by_length: BTreeMap<usize, Vec<Path>>,
}

impl Generated {
    /// Union over all requested lengths, shortest first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.by_length.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_length.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Frontier-growth driver bound to one cage, rule set and extension strategy.
pub struct Generator<'a> {
    cage: &'a Cage,
    rules: &'a Rules,
    extension: &'a dyn Extension,
    cfg: GenerateCfg,
}

impl<'a> Generator<'a> {
    pub fn new(
        cage: &'a Cage,
        rules: &'a Rules,
        extension: &'a dyn Extension,
        cfg: GenerateCfg,
    ) -> Self {
        Self {
            cage,
            rules,
            extension,
            cfg,
        }
    }

    /// Requested lengths, sorted and deduplicated, checked against the start
    /// length.
    fn targets(&self, start_length: usize) -> Result<Vec<usize>> {
        let mut lengths = if self.cfg.lengths.is_empty() {
            vec![self.cage.len()]
        } else {
            self.cfg.lengths.clone()
        };
        lengths.sort_unstable();
        lengths.dedup();
        if let Some(&short) = lengths.iter().find(|&&l| l == 0 || l < start_length) {
            return Err(HampathError::InvalidConfig(format!(
                "requested length {short} is shorter than the start paths ({start_length})"
            )));
        }
        Ok(lengths)
    }

    /// One growth step: extend every path, then merge.
    pub fn grow(&self, frontier: &Frontier) -> Result<Frontier> {
        let step = |p: &Path| -> Result<Vec<Path>> {
            let mut out = Vec::with_capacity(3);
            self.extension
                .extend_into(self.cage, self.rules, p, &mut out)?;
            Ok(out)
        };
        let batches: Vec<Vec<Path>> = if self.cfg.parallel {
            frontier.paths.par_iter().map(step).collect::<Result<_>>()?
        } else {
            frontier.paths.iter().map(step).collect::<Result<_>>()?
        };
        let next = Frontier::merged(frontier.length + 1, batches.into_iter().flatten().collect());
        tracing::info!(length = next.length, paths = next.len(), "frontier complete");
        Ok(next)
    }

    fn collect(&self, frontier: &Frontier) -> Vec<Path> {
        frontier
            .paths
            .iter()
            .filter(|p| self.cfg.accepts_end(p))
            .cloned()
            .collect()
    }

    /// Grow `start` up to the largest requested length, storing every grown
    /// frontier. The start frontier itself is not stored again.
    pub fn run<S: FrontierStore>(
        &self,
        start: Frontier,
        store: &mut S,
    ) -> std::result::Result<Generated, S::Error> {
        let targets = self.targets(start.length)?;
        let start = self.extension.prepare(self.cage, start)?;
        let max = targets.last().copied().unwrap_or(start.length);
        let mut out = Generated::default();
        let mut frontier = start;
        loop {
            if targets.contains(&frontier.length) {
                out.by_length
                    .insert(frontier.length, self.collect(&frontier));
            }
            if frontier.length >= max {
                break;
            }
            let was_empty = frontier.is_empty();
            frontier = self.grow(&frontier)?;
            store.store(&frontier)?;
            if frontier.is_empty() && !was_empty {
                tracing::warn!(length = frontier.length, "frontier is empty");
            }
        }
        tracing::info!(paths = out.len(), "generation finished");
        Ok(out)
    }
}

#[cfg(test)]
mod tests;
