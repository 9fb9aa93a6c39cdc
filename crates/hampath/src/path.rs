//! Paths as vertex sequences and as move encodings.
//!
//! A `Path` is simple by construction: every public constructor rejects a
//! repeated vertex. An `Encoding` is the cage-independent move string
//! (`1` switch, `2` clockwise, `3` anticlockwise); together with a start vertex
//! it determines the vertex sequence again.

use std::fmt;
use std::str::FromStr;

use crate::cage::{Cage, Edge, Move, Vertex};
use crate::error::{HampathError, Result};

/// Simple path: ordered vertices, none repeated.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<Vertex>);

impl Path {
    /// Validate membership in `cage` and simplicity.
    pub fn from_vertices(cage: &Cage, vertices: Vec<Vertex>) -> Result<Self> {
        for (i, v) in vertices.iter().enumerate() {
            cage.check(*v)?;
            if vertices[..i].contains(v) {
                return Err(HampathError::RepeatedVertex(cage.label(*v)));
            }
        }
        Ok(Path(vertices))
    }

    /// Caller guarantees the sequence is simple.
    #[inline]
    pub(crate) fn from_vec_unchecked(vertices: Vec<Vertex>) -> Self {
        debug_assert!(vertices
            .iter()
            .enumerate()
            .all(|(i, v)| !vertices[..i].contains(v)));
        Path(vertices)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Vertex> {
        self.0.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Vertex> {
        self.0.last().copied()
    }

    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        self.0.contains(&v)
    }

    pub fn ends_with(&self, suffix: &[Vertex]) -> bool {
        self.0.ends_with(suffix)
    }

    /// `self` followed by `v`; `v` must not already be on the path.
    pub(crate) fn extended(&self, v: Vertex) -> Path {
        let mut out = Vec::with_capacity(self.0.len() + 1);
        out.extend_from_slice(&self.0);
        out.push(v);
        Path(out)
    }

    /// `v` followed by `self`; `v` must not already be on the path.
    pub(crate) fn prepended(&self, v: Vertex) -> Path {
        let mut out = Vec::with_capacity(self.0.len() + 1);
        out.push(v);
        out.extend_from_slice(&self.0);
        Path(out)
    }

    /// Same vertices traversed from the other end.
    pub fn reversed(&self) -> Path {
        Path(self.0.iter().rev().copied().collect())
    }

    /// Consecutive pairs as unordered edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.0.windows(2).map(|w| Edge::new(w[0], w[1]))
    }

    /// Contiguous sub-path `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Path {
        Path(self.0[start..end].to_vec())
    }

    /// Translate to move notation. A consecutive pair with no connecting move
    /// is a fatal input error.
    pub fn encode(&self, cage: &Cage) -> Result<Encoding> {
        self.0
            .windows(2)
            .map(|w| {
                cage.move_between(w[0], w[1])
                    .ok_or(HampathError::NotAdjacent {
                        from: cage.label(w[0]),
                        to: cage.label(w[1]),
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Encoding)
    }
}

/// Move-notation path, independent of where it starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Encoding(Vec<Move>);

impl Encoding {
    pub fn new(moves: Vec<Move>) -> Self {
        Encoding(moves)
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Moves in opposite order, symbols unchanged.
    pub fn reversed(&self) -> Encoding {
        Encoding(self.0.iter().rev().copied().collect())
    }

    /// Rotation directions exchanged.
    pub fn mirrored(&self) -> Encoding {
        Encoding(self.0.iter().map(|m| m.mirror()).collect())
    }

    pub fn slice(&self, start: usize, end: usize) -> Encoding {
        Encoding(self.0[start..end].to_vec())
    }

    /// Walk the moves from `start`. Fails if a move does not exist at the
    /// current vertex or the walk revisits a vertex.
    pub fn walk(&self, cage: &Cage, start: Vertex) -> Result<Path> {
        let mut verts = Vec::with_capacity(self.0.len() + 1);
        verts.push(start);
        let mut at = start;
        for &mv in &self.0 {
            at = cage.step(at, mv).ok_or(HampathError::MoveUnavailable {
                symbol: mv.symbol(),
                at: cage.label(at),
            })?;
            if verts.contains(&at) {
                return Err(HampathError::RepeatedVertex(cage.label(at)));
            }
            verts.push(at);
        }
        Ok(Path(verts))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.0 {
            write!(f, "{}", m.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Encoding {
    type Err = HampathError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(Move::from_symbol)
            .collect::<Result<Vec<_>>>()
            .map(Encoding)
    }
}
