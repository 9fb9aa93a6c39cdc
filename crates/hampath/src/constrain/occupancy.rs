//! Edge-occupancy signatures and edge constraints.

use std::collections::BTreeMap;

use crate::cage::{Cage, Edge, EdgeKind, Vertex};
use crate::error::{HampathError, Result};
use crate::path::Path;

/// An unordered edge that must (`present`) or must not be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    pub edge: Edge,
    pub present: bool,
}

impl Constraint {
    pub fn new(cage: &Cage, a: Vertex, b: Vertex, present: bool) -> Result<Self> {
        if cage.move_between(a, b).is_none() {
            return Err(HampathError::UnknownEdge {
                from: cage.label(a),
                to: cage.label(b),
            });
        }
        Ok(Self {
            edge: Edge::new(a, b),
            present,
        })
    }

    pub fn from_labels(cage: &Cage, a: char, b: char, present: bool) -> Result<Self> {
        Ok(Self {
            edge: cage.edge(a, b)?,
            present,
        })
    }
}

/// Used/unused flag for every edge of the cage, split by edge kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Occupancy {
    pub long: BTreeMap<Edge, bool>,
    pub short: BTreeMap<Edge, bool>,
}

impl Occupancy {
    /// Every edge unused.
    pub fn blank(cage: &Cage) -> Self {
        let unused = |kind: EdgeKind| -> BTreeMap<Edge, bool> {
            cage.edges(kind).into_iter().map(|e| (e, false)).collect()
        };
        Self {
            long: unused(EdgeKind::Long),
            short: unused(EdgeKind::Short),
        }
    }

    /// Signature of `path`. A consecutive pair without a move is an error.
    pub fn of(cage: &Cage, path: &Path) -> Result<Self> {
        Self::blank(cage).marked(cage, path)
    }

    /// Mark the edges of `path` on a copy of `self`.
    pub fn marked(&self, cage: &Cage, path: &Path) -> Result<Self> {
        let mut occ = self.clone();
        for w in path.vertices().windows(2) {
            let kind = cage.edge_kind(w[0], w[1]).ok_or(HampathError::NotAdjacent {
                from: cage.label(w[0]),
                to: cage.label(w[1]),
            })?;
            occ.kind_mut(kind).insert(Edge::new(w[0], w[1]), true);
        }
        Ok(occ)
    }

    pub fn kind(&self, kind: EdgeKind) -> &BTreeMap<Edge, bool> {
        match kind {
            EdgeKind::Long => &self.long,
            EdgeKind::Short => &self.short,
        }
    }

    fn kind_mut(&mut self, kind: EdgeKind) -> &mut BTreeMap<Edge, bool> {
        match kind {
            EdgeKind::Long => &mut self.long,
            EdgeKind::Short => &mut self.short,
        }
    }

    pub fn get(&self, edge: Edge) -> Option<bool> {
        self.long
            .get(&edge)
            .or_else(|| self.short.get(&edge))
            .copied()
    }

    pub fn satisfies(&self, constraints: &[Constraint]) -> bool {
        constraints
            .iter()
            .all(|c| self.get(c.edge).unwrap_or(false) == c.present)
    }

    /// `0`/`1` string over the edges of one kind, in `Edge` order.
    pub fn bits(&self, kind: EdgeKind) -> String {
        self.kind(kind)
            .values()
            .map(|&used| if used { '1' } else { '0' })
            .collect()
    }

    /// Number of used edges of one kind.
    pub fn used(&self, kind: EdgeKind) -> usize {
        self.kind(kind).values().filter(|&&u| u).count()
    }
}
