//! Pass/fail partition and inference of forced edges.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use crate::cage::{Cage, Edge};
use crate::error::Result;
use crate::path::Path;

use super::occupancy::{Constraint, Occupancy};

/// Paths split by whether their signature satisfies every constraint.
/// Input order is kept within each side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub pass: Vec<Path>,
    pub fail: Vec<Path>,
}

fn signatures(cage: &Cage, paths: &[Path]) -> Result<Vec<Occupancy>> {
    let blank = Occupancy::blank(cage);
    paths
        .par_iter()
        .map(|p| blank.marked(cage, p))
        .collect()
}

/// Partition `paths` against `constraints`.
pub fn filter(cage: &Cage, paths: Vec<Path>, constraints: &[Constraint]) -> Result<Partition> {
    let ok: Vec<bool> = signatures(cage, &paths)?
        .par_iter()
        .map(|occ| occ.satisfies(constraints))
        .collect();
    let mut out = Partition::default();
    for (p, keep) in paths.into_iter().zip(ok) {
        if keep {
            out.pass.push(p);
        } else {
            out.fail.push(p);
        }
    }
    tracing::debug!(
        pass = out.pass.len(),
        fail = out.fail.len(),
        constraints = constraints.len(),
        "filtered"
    );
    Ok(out)
}

/// Edges whose value agrees across a whole pass set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inference {
    /// Empty pass set; nothing can be inferred.
    NoSolutions,
    Inferred {
        long: BTreeMap<Edge, bool>,
        short: BTreeMap<Edge, bool>,
    },
}

impl Inference {
    /// Forced value of `edge`, if inferred.
    pub fn get(&self, edge: Edge) -> Option<bool> {
        match self {
            Inference::NoSolutions => None,
            Inference::Inferred { long, short } => {
                long.get(&edge).or_else(|| short.get(&edge)).copied()
            }
        }
    }

    /// Every inferred edge, long edges first.
    pub fn edges(&self) -> Vec<(Edge, bool)> {
        match self {
            Inference::NoSolutions => Vec::new(),
            Inference::Inferred { long, short } => long
                .iter()
                .chain(short.iter())
                .map(|(&e, &v)| (e, v))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Inference::NoSolutions => 0,
            Inference::Inferred { long, short } => long.len() + short.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn intersect(acc: &mut BTreeMap<Edge, bool>, other: &BTreeMap<Edge, bool>) {
    acc.retain(|e, v| other.get(e) == Some(v));
}

/// Running intersection of the signatures of `pass`, with constrained edges
/// removed.
pub fn infer(cage: &Cage, pass: &[Path], constraints: &[Constraint]) -> Result<Inference> {
    let sigs = signatures(cage, pass)?;
    let Some((first, rest)) = sigs.split_first() else {
        tracing::debug!("empty pass set");
        return Ok(Inference::NoSolutions);
    };
    let named: BTreeSet<Edge> = constraints.iter().map(|c| c.edge).collect();
    let mut long = first.long.clone();
    let mut short = first.short.clone();
    long.retain(|e, _| !named.contains(e));
    short.retain(|e, _| !named.contains(e));
    for occ in rest {
        if long.is_empty() && short.is_empty() {
            break;
        }
        intersect(&mut long, &occ.long);
        intersect(&mut short, &occ.short);
    }
    tracing::debug!(long = long.len(), short = short.len(), "inferred edges");
    Ok(Inference::Inferred { long, short })
}
