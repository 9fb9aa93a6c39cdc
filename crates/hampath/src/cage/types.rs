//! Vertex, move and edge identifiers.
//!
//! Kept small and `Copy` so paths and signatures stay cheap to clone across
//! rayon workers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HampathError, Result};

/// Dense vertex index into a `Cage`. Labels live on the cage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex(pub u16);

impl Vertex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Move alphabet. The discriminant order matches the symbol order, so
/// `Ord` on encodings agrees with string order of their digit form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Across the two-fold partner (long edge).
    Switch,
    /// One step clockwise around the hub cycle (short edge).
    Clockwise,
    /// One step anticlockwise around the hub cycle (short edge).
    Anticlockwise,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Switch, Move::Clockwise, Move::Anticlockwise];

    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Move::Switch => 0,
            Move::Clockwise => 1,
            Move::Anticlockwise => 2,
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Move::Switch => '1',
            Move::Clockwise => '2',
            Move::Anticlockwise => '3',
        }
    }

    pub fn from_symbol(c: char) -> Result<Self> {
        match c {
            '1' => Ok(Move::Switch),
            '2' => Ok(Move::Clockwise),
            '3' => Ok(Move::Anticlockwise),
            other => Err(HampathError::BadSymbol(other)),
        }
    }

    /// Exchange the two rotation directions; switches are their own mirror.
    #[inline]
    pub fn mirror(self) -> Self {
        match self {
            Move::Switch => Move::Switch,
            Move::Clockwise => Move::Anticlockwise,
            Move::Anticlockwise => Move::Clockwise,
        }
    }

    #[inline]
    pub fn edge_kind(self) -> EdgeKind {
        match self {
            Move::Switch => EdgeKind::Long,
            Move::Clockwise | Move::Anticlockwise => EdgeKind::Short,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Edge category used by occupancy signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Switch edges.
    Long,
    /// Rotation edges.
    Short,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Long => write!(f, "long"),
            EdgeKind::Short => write!(f, "short"),
        }
    }
}

/// Unordered edge; the smaller index is always stored first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(Vertex, Vertex);

impl Edge {
    #[inline]
    pub fn new(a: Vertex, b: Vertex) -> Self {
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }

    #[inline]
    pub fn ends(self) -> (Vertex, Vertex) {
        (self.0, self.1)
    }
}
