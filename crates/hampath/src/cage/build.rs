//! Cage construction from switch pairs and rotation cycles, or from
//! connectivity rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{HampathError, Result};

use super::types::{Move, Vertex};
use super::Cage;

/// Serializable geometry description.
///
/// `switches` holds two-label strings (`"ab"`), `rotations` holds one string
/// per hub cycle listed in clockwise order (`"atNud"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CageSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub switches: Vec<String>,
    #[serde(default)]
    pub rotations: Vec<String>,
}

/// One connectivity row: a vertex and its neighbours by move slot
/// (switch, clockwise, anticlockwise).
pub type ConnectivityRow = (char, [Option<char>; 3]);

#[derive(Default)]
struct CageBuilder {
    labels: Vec<char>,
    index: HashMap<char, Vertex>,
    moves: Vec<[Option<Vertex>; 3]>,
}

impl CageBuilder {
    fn intern(&mut self, label: char) -> Vertex {
        if let Some(&v) = self.index.get(&label) {
            return v;
        }
        let v = Vertex(self.labels.len() as u16);
        self.labels.push(label);
        self.index.insert(label, v);
        self.moves.push([None; 3]);
        v
    }

    fn declare(&mut self, label: char) -> Result<Vertex> {
        if self.index.contains_key(&label) {
            return Err(HampathError::DuplicateLabel(label));
        }
        Ok(self.intern(label))
    }

    fn lookup(&self, label: char) -> Result<Vertex> {
        self.index
            .get(&label)
            .copied()
            .ok_or(HampathError::UnknownLabel(label))
    }

    fn set(&mut self, from: Vertex, mv: Move, to: Vertex) -> Result<()> {
        let slot = &mut self.moves[from.index()][mv.slot()];
        match *slot {
            Some(prev) if prev != to => Err(HampathError::ConflictingMove {
                label: self.labels[from.index()],
                kind: match mv {
                    Move::Switch => "switch",
                    Move::Clockwise | Move::Anticlockwise => "rotation",
                },
            }),
            _ => {
                *slot = Some(to);
                Ok(())
            }
        }
    }

    fn rotation(&mut self, cycle: &str) -> Result<()> {
        let labels: Vec<char> = cycle.chars().collect();
        if labels.len() < 3 {
            return Err(HampathError::ShortCycle {
                cycle: cycle.to_string(),
                len: labels.len(),
            });
        }
        let verts: Vec<Vertex> = labels.iter().map(|&c| self.intern(c)).collect();
        for (i, &v) in verts.iter().enumerate() {
            if verts[..i].contains(&v) {
                return Err(HampathError::DuplicateLabel(labels[i]));
            }
            // A vertex sits on exactly one hub.
            if self.moves[v.index()][Move::Clockwise.slot()].is_some() {
                return Err(HampathError::ConflictingMove {
                    label: labels[i],
                    kind: "rotation",
                });
            }
        }
        let n = verts.len();
        for i in 0..n {
            let next = verts[(i + 1) % n];
            self.set(verts[i], Move::Clockwise, next)?;
            self.set(next, Move::Anticlockwise, verts[i])?;
        }
        Ok(())
    }

    fn switch(&mut self, pair: &str) -> Result<()> {
        let labels: Vec<char> = pair.chars().collect();
        let &[a, b] = labels.as_slice() else {
            return Err(HampathError::InvalidConfig(format!(
                "switch {pair:?} must name exactly two vertices"
            )));
        };
        if a == b {
            return Err(HampathError::InvalidConfig(format!(
                "switch {pair:?} pairs a vertex with itself"
            )));
        }
        let (va, vb) = (self.intern(a), self.intern(b));
        for (v, label) in [(va, a), (vb, b)] {
            if self.moves[v.index()][Move::Switch.slot()].is_some() {
                return Err(HampathError::ConflictingMove {
                    label,
                    kind: "switch",
                });
            }
        }
        self.set(va, Move::Switch, vb)?;
        self.set(vb, Move::Switch, va)
    }

    fn finish(self) -> Result<Cage> {
        // Distinct targets per vertex keep move resolution unique.
        for (i, slots) in self.moves.iter().enumerate() {
            let targets: Vec<Vertex> = slots.iter().flatten().copied().collect();
            for (k, t) in targets.iter().enumerate() {
                if targets[..k].contains(t) {
                    return Err(HampathError::AmbiguousMove {
                        from: self.labels[i],
                        to: self.labels[t.index()],
                    });
                }
            }
        }
        Ok(Cage {
            labels: self.labels,
            index: self.index,
            moves: self.moves,
        })
    }
}

impl Cage {
    /// Build from a geometry description. Vertex order follows first mention,
    /// rotation cycles first.
    pub fn from_spec(spec: &CageSpec) -> Result<Self> {
        let mut b = CageBuilder::default();
        for cycle in &spec.rotations {
            b.rotation(cycle)?;
        }
        for pair in &spec.switches {
            b.switch(pair)?;
        }
        let cage = b.finish()?;
        tracing::debug!(
            name = spec.name.as_deref().unwrap_or("unnamed"),
            vertices = cage.len(),
            "cage built"
        );
        Ok(cage)
    }

    /// Build from connectivity rows. Every neighbour must be declared as a row
    /// head, and the rows must agree with each other (switches are mutual,
    /// clockwise from `a` to `b` is anticlockwise from `b` to `a`).
    pub fn from_connectivity<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConnectivityRow>,
    {
        let rows: Vec<ConnectivityRow> = rows.into_iter().collect();
        let mut b = CageBuilder::default();
        for &(label, _) in &rows {
            b.declare(label)?;
        }
        for &(label, neighbours) in &rows {
            let from = b.lookup(label)?;
            for (mv, target) in Move::ALL.into_iter().zip(neighbours) {
                if let Some(t) = target {
                    let to = b.lookup(t)?;
                    b.set(from, mv, to)?;
                }
            }
        }
        let cage = b.finish()?;
        for v in cage.vertices() {
            for mv in Move::ALL {
                if let Some(to) = cage.step(v, mv) {
                    if cage.step(to, mv.mirror()) != Some(v) {
                        return Err(HampathError::InvalidConfig(format!(
                            "move {} from {:?} to {:?} has no matching reverse move",
                            mv,
                            cage.label(v),
                            cage.label(to)
                        )));
                    }
                }
            }
        }
        Ok(cage)
    }

    /// Connectivity rows in vertex order; inverse of `from_connectivity`.
    pub fn rows(&self) -> Vec<ConnectivityRow> {
        self.vertices()
            .map(|v| {
                let slots = self.moves[v.index()].map(|t| t.map(|t| self.label(t)));
                (self.label(v), slots)
            })
            .collect()
    }
}
