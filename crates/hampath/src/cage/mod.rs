//! Graph Model: vertices, the move alphabet, and the edges they induce.
//!
//! Purpose
//! - Describe a polyhedral cage as the union of two move kinds: a switch
//!   matching (every vertex has at most one two-fold partner) and disjoint
//!   rotation cycles around hubs, each listed clockwise.
//! - Serve as the immutable configuration object every other stage borrows.
//!
//! Why this design
//! - Vertices are dense `u16` indices; labels are single characters so that a
//!   path prints as a plain string (`"abf..."`), matching the line-oriented
//!   path files the tool chain exchanges.
//! - The three move slots are validated at build time to reach distinct
//!   neighbours, so translating a vertex pair into a move is never ambiguous.

mod build;
pub mod presets;
mod types;

use std::collections::HashMap;

pub use build::{CageSpec, ConnectivityRow};
pub use types::{Edge, EdgeKind, Move, Vertex};

use crate::error::{HampathError, Result};
use crate::path::Path;

/// Immutable connectivity graph of a cage.
#[derive(Clone, Debug)]
pub struct Cage {
    labels: Vec<char>,
    index: HashMap<char, Vertex>,
    moves: Vec<[Option<Vertex>; 3]>, // per vertex, indexed by `Move::slot`
}

impl Cage {
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..self.labels.len()).map(|i| Vertex(i as u16))
    }

    #[inline]
    pub fn label(&self, v: Vertex) -> char {
        self.labels[v.index()]
    }

    /// `v` if it indexes a vertex of this cage.
    pub fn check(&self, v: Vertex) -> Result<Vertex> {
        if v.index() < self.len() {
            Ok(v)
        } else {
            Err(HampathError::InvalidConfig(format!(
                "vertex index {} outside cage of {} vertices",
                v.index(),
                self.len()
            )))
        }
    }

    pub fn vertex(&self, label: char) -> Result<Vertex> {
        self.index
            .get(&label)
            .copied()
            .ok_or(HampathError::UnknownLabel(label))
    }

    /// Target of `mv` from `v`, if the move exists there.
    #[inline]
    pub fn step(&self, v: Vertex, mv: Move) -> Option<Vertex> {
        self.moves[v.index()][mv.slot()]
    }

    /// Neighbours in move-symbol order (switch, clockwise, anticlockwise).
    pub fn neighbours(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.moves[v.index()].iter().flatten().copied()
    }

    /// The unique move leading from `a` to `b`.
    pub fn move_between(&self, a: Vertex, b: Vertex) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&mv| self.step(a, mv) == Some(b))
    }

    pub fn edge_kind(&self, a: Vertex, b: Vertex) -> Option<EdgeKind> {
        self.move_between(a, b).map(Move::edge_kind)
    }

    /// Every edge of one kind, each listed once, ordered by `Edge`.
    pub fn edges(&self, kind: EdgeKind) -> Vec<Edge> {
        let mut out: Vec<Edge> = self
            .vertices()
            .flat_map(|v| {
                Move::ALL
                    .into_iter()
                    .filter(move |mv| mv.edge_kind() == kind)
                    .filter_map(move |mv| self.step(v, mv).map(|t| Edge::new(v, t)))
            })
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Edge between two labels, rejecting non-adjacent pairs.
    pub fn edge(&self, a: char, b: char) -> Result<Edge> {
        let (va, vb) = (self.vertex(a)?, self.vertex(b)?);
        if self.move_between(va, vb).is_none() {
            return Err(HampathError::UnknownEdge { from: a, to: b });
        }
        Ok(Edge::new(va, vb))
    }

    /// Two-character label form of an edge, smaller index first.
    pub fn edge_label(&self, e: Edge) -> String {
        let (a, b) = e.ends();
        [self.label(a), self.label(b)].iter().collect()
    }

    /// Parse a label string (`"abf"`) into a simple path.
    pub fn path(&self, labels: &str) -> Result<Path> {
        let verts = labels
            .chars()
            .map(|c| self.vertex(c))
            .collect::<Result<Vec<_>>>()?;
        Path::from_vertices(self, verts)
    }

    pub fn path_label(&self, path: &Path) -> String {
        path.vertices().iter().map(|&v| self.label(v)).collect()
    }
}
