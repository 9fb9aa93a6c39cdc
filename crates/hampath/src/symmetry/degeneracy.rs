//! Rotational frames: vertex relabelings from the degeneracy table.
//!
//! Row 0 lists the reference frame's vertex order; every other row lists the
//! same vertices after one rotation of the cage, column-aligned to row 0. A
//! row is named by its first vertex, the image of the reference vertex.

use std::collections::BTreeMap;

use crate::cage::{Cage, Move, Vertex};
use crate::error::{HampathError, Result};
use crate::path::Path;

/// Total bijection on vertex indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relabeling(Vec<Vertex>);

impl Relabeling {
    pub fn identity(n: usize) -> Self {
        Relabeling((0..n).map(|i| Vertex(i as u16)).collect())
    }

    #[inline]
    pub fn apply(&self, v: Vertex) -> Vertex {
        self.0[v.index()]
    }

    /// Pointwise image of a path; bijections keep paths simple.
    pub fn path(&self, p: &Path) -> Path {
        Path::from_vec_unchecked(p.vertices().iter().map(|&v| self.apply(v)).collect())
    }

    pub fn inverse(&self) -> Relabeling {
        let mut inv = vec![Vertex(0); self.0.len()];
        for (i, &img) in self.0.iter().enumerate() {
            inv[img.index()] = Vertex(i as u16);
        }
        Relabeling(inv)
    }

    /// Whether every move kind commutes with the relabeling.
    pub fn preserves_moves(&self, cage: &Cage) -> bool {
        cage.vertices().all(|v| {
            Move::ALL
                .into_iter()
                .all(|mv| cage.step(v, mv).map(|t| self.apply(t)) == cage.step(self.apply(v), mv))
        })
    }
}

#[derive(Clone, Debug)]
struct Frame {
    /// Reference frame -> this frame.
    forward: Relabeling,
    /// This frame -> reference frame.
    back: Relabeling,
}

/// Degeneracy table with both directions of every frame precomputed.
#[derive(Clone, Debug)]
pub struct DegeneracyTable {
    rows: Vec<Vec<Vertex>>,
    frames: BTreeMap<Vertex, Frame>,
}

impl DegeneracyTable {
    /// Build from label rows. Row 0 must list every cage vertex once; every
    /// other row must be a permutation of row 0 with a distinct first vertex.
    pub fn from_rows(cage: &Cage, rows: &[Vec<char>]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|&c| cage.vertex(c)).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        Self::from_vertex_rows(cage, rows)
    }

    fn from_vertex_rows(cage: &Cage, rows: Vec<Vec<Vertex>>) -> Result<Self> {
        let Some(row0) = rows.first() else {
            return Err(HampathError::BadDegeneracy("table has no rows".into()));
        };
        if row0.is_empty() || row0.len() != cage.len() {
            return Err(HampathError::BadDegeneracy(format!(
                "row 0 has {} entries, cage has {} vertices",
                row0.len(),
                cage.len()
            )));
        }
        let mut frames = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != row0.len() {
                return Err(HampathError::BadDegeneracy(format!(
                    "row {i} has {} entries, row 0 has {}",
                    row.len(),
                    row0.len()
                )));
            }
            let mut forward = vec![None; cage.len()];
            let mut hit = vec![false; cage.len()];
            for (&from, &to) in row0.iter().zip(row) {
                if forward[from.index()].is_some() {
                    return Err(HampathError::BadDegeneracy(format!(
                        "row 0 repeats {:?}",
                        cage.label(from)
                    )));
                }
                if hit[to.index()] {
                    return Err(HampathError::BadDegeneracy(format!(
                        "row {i} repeats {:?}",
                        cage.label(to)
                    )));
                }
                forward[from.index()] = Some(to);
                hit[to.index()] = true;
            }
            // Lengths match and nothing repeats, so every slot is filled.
            let forward = Relabeling(forward.into_iter().flatten().collect());
            let name = row[0];
            let frame = Frame {
                back: forward.inverse(),
                forward,
            };
            if frames.insert(name, frame).is_some() {
                return Err(HampathError::BadDegeneracy(format!(
                    "frame {:?} listed twice",
                    cage.label(name)
                )));
            }
        }
        Ok(Self { rows, frames })
    }

    /// Derive every move-preserving relabeling of `cage` that moves
    /// `reference` somewhere, one row per image. Row 0 is the identity with
    /// `reference` first and the other vertices in index order.
    pub fn from_cage(cage: &Cage, reference: Vertex) -> Result<Self> {
        let mut row0 = vec![reference];
        row0.extend(cage.vertices().filter(|&v| v != reference));
        let mut rows = Vec::new();
        for target in std::iter::once(reference).chain(cage.vertices().filter(|&v| v != reference))
        {
            if let Some(map) = derive_symmetry(cage, reference, target)? {
                rows.push(row0.iter().map(|&v| map.apply(v)).collect());
            }
        }
        tracing::debug!(frames = rows.len(), "derived rotational frames");
        Self::from_vertex_rows(cage, rows)
    }

    /// The vertex every path is anchored at.
    pub fn reference(&self) -> Vertex {
        self.rows[0][0]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Vertex>] {
        &self.rows
    }

    pub fn frames(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.frames.keys().copied()
    }

    pub fn contains(&self, frame: Vertex) -> bool {
        self.frames.contains_key(&frame)
    }

    fn frame(&self, cage: &Cage, frame: Vertex) -> Result<&Frame> {
        self.frames
            .get(&frame)
            .ok_or(HampathError::MissingFrame(cage.label(frame)))
    }

    /// Relabeling that carries the reference frame onto `frame`.
    pub fn to_frame(&self, cage: &Cage, frame: Vertex) -> Result<&Relabeling> {
        Ok(&self.frame(cage, frame)?.forward)
    }

    /// Relabeling that carries `frame` back onto the reference frame.
    pub fn to_reference(&self, cage: &Cage, frame: Vertex) -> Result<&Relabeling> {
        Ok(&self.frame(cage, frame)?.back)
    }

    /// Re-describe `path` as if it started from the reference vertex.
    pub fn reanchor(&self, cage: &Cage, path: &Path) -> Result<Path> {
        let Some(start) = path.first() else {
            return Ok(path.clone());
        };
        Ok(self.to_reference(cage, start)?.path(path))
    }

    /// Every cage vertex must name a frame (needed when any vertex can become
    /// a path start).
    pub fn check_covers(&self, cage: &Cage) -> Result<()> {
        match cage.vertices().find(|v| !self.contains(*v)) {
            Some(v) => Err(HampathError::MissingFrame(cage.label(v))),
            None => Ok(()),
        }
    }

    /// Frames whose relabeling is not a symmetry of `cage`.
    pub fn non_symmetric_frames(&self, cage: &Cage) -> Vec<Vertex> {
        self.frames
            .iter()
            .filter(|(_, f)| !f.forward.preserves_moves(cage))
            .map(|(&v, _)| v)
            .collect()
    }

    pub fn to_label_rows(&self, cage: &Cage) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|&v| cage.label(v)).collect())
            .collect()
    }
}

/// Propagate `reference -> target` along every move kind. Returns the
/// relabeling if it is a consistent bijection covering the whole cage.
fn derive_symmetry(cage: &Cage, reference: Vertex, target: Vertex) -> Result<Option<Relabeling>> {
    let n = cage.len();
    let mut map: Vec<Option<Vertex>> = vec![None; n];
    let mut used = vec![false; n];
    map[reference.index()] = Some(target);
    used[target.index()] = true;
    let mut stack = vec![reference];
    while let Some(x) = stack.pop() {
        let Some(fx) = map[x.index()] else { continue };
        for mv in Move::ALL {
            match (cage.step(x, mv), cage.step(fx, mv)) {
                (None, None) => {}
                (Some(y), Some(fy)) => match map[y.index()] {
                    Some(prev) if prev != fy => return Ok(None),
                    Some(_) => {}
                    None => {
                        if used[fy.index()] {
                            return Ok(None);
                        }
                        map[y.index()] = Some(fy);
                        used[fy.index()] = true;
                        stack.push(y);
                    }
                },
                _ => return Ok(None),
            }
        }
    }
    if map.iter().any(Option::is_none) {
        return Err(HampathError::InvalidConfig(
            "cage is not connected; rotational frames are undefined".into(),
        ));
    }
    Ok(Some(Relabeling(map.into_iter().flatten().collect())))
}
