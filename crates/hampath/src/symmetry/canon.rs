//! Symmetry group on move encodings and representative selection.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use crate::cage::Move;
use crate::path::{Encoding, Path};

/// One element of the four-element group acting on encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    /// Traverse the move string backwards.
    Reverse,
    /// Exchange clockwise and anticlockwise.
    Mirror,
    /// Both: the same physical path described from its other end.
    ReverseMirror,
}

impl Symmetry {
    pub const ALL: [Symmetry; 4] = [
        Symmetry::Identity,
        Symmetry::Reverse,
        Symmetry::Mirror,
        Symmetry::ReverseMirror,
    ];

    pub fn apply(self, enc: &Encoding) -> Encoding {
        match self {
            Symmetry::Identity => enc.clone(),
            Symmetry::Reverse => enc.reversed(),
            Symmetry::Mirror => enc.mirrored(),
            Symmetry::ReverseMirror => {
                Encoding::new(enc.moves().iter().rev().map(|m| m.mirror()).collect())
            }
        }
    }

    /// Group product: `self` after `other`.
    pub fn compose(self, other: Symmetry) -> Symmetry {
        let (r1, m1) = self.parts();
        let (r2, m2) = other.parts();
        Symmetry::from_parts(r1 ^ r2, m1 ^ m2)
    }

    fn parts(self) -> (bool, bool) {
        match self {
            Symmetry::Identity => (false, false),
            Symmetry::Reverse => (true, false),
            Symmetry::Mirror => (false, true),
            Symmetry::ReverseMirror => (true, true),
        }
    }

    fn from_parts(reverse: bool, mirror: bool) -> Symmetry {
        match (reverse, mirror) {
            (false, false) => Symmetry::Identity,
            (true, false) => Symmetry::Reverse,
            (false, true) => Symmetry::Mirror,
            (true, true) => Symmetry::ReverseMirror,
        }
    }
}

/// Subgroup used to decide which encodings describe the same path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymmetryGroup {
    /// All four elements: direction and handedness are both unobservable.
    #[default]
    Full,
    /// Identity and `ReverseMirror`: only the direction of description is
    /// unobservable.
    Direction,
}

impl SymmetryGroup {
    pub fn members(self) -> &'static [Symmetry] {
        match self {
            SymmetryGroup::Full => &Symmetry::ALL,
            SymmetryGroup::Direction => &[Symmetry::Identity, Symmetry::ReverseMirror],
        }
    }
}

/// Distinct images of `enc` under `group`, sorted.
pub fn orbit(enc: &Encoding, group: SymmetryGroup) -> Vec<Encoding> {
    let mut out: Vec<Encoding> = group.members().iter().map(|s| s.apply(enc)).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Lexicographically smallest member of the orbit.
pub fn canonical(enc: &Encoding, group: SymmetryGroup) -> Encoding {
    group
        .members()
        .iter()
        .map(|s| s.apply(enc))
        .min()
        .unwrap_or_else(|| enc.clone())
}

pub fn equivalent(a: &Encoding, b: &Encoding, group: SymmetryGroup) -> bool {
    a.len() == b.len() && canonical(a, group) == canonical(b, group)
}

/// One representative per equivalence class present in the input: the
/// smallest member that actually occurs. Equals `canonical` whenever the input
/// is closed under `group`.
pub fn reduce<I>(encodings: I, group: SymmetryGroup) -> BTreeSet<Encoding>
where
    I: IntoIterator<Item = Encoding>,
{
    let items: Vec<Encoding> = encodings.into_iter().collect();
    let keyed: Vec<(Encoding, Encoding)> = items
        .into_par_iter()
        .map(|e| (canonical(&e, group), e))
        .collect();
    let mut best: BTreeMap<Encoding, Encoding> = BTreeMap::new();
    for (key, e) in keyed {
        match best.get_mut(&key) {
            Some(cur) if e < *cur => *cur = e,
            Some(_) => {}
            None => {
                best.insert(key, e);
            }
        }
    }
    let out: BTreeSet<Encoding> = best.into_values().collect();
    tracing::debug!(classes = out.len(), ?group, "reduced");
    out
}

/// Closure of the input under `group`.
pub fn expand<I>(encodings: I, group: SymmetryGroup) -> BTreeSet<Encoding>
where
    I: IntoIterator<Item = Encoding>,
{
    encodings
        .into_iter()
        .flat_map(|e| orbit(&e, group))
        .collect()
}

/// A path with its leading and trailing rotation moves removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trimmed {
    pub moves: Encoding,
    pub path: Path,
}

/// Index range `[first switch, last switch]` of an encoding.
fn switch_span(enc: &Encoding) -> Option<(usize, usize)> {
    let moves = enc.moves();
    let first = moves.iter().position(|&m| m == Move::Switch)?;
    let last = moves.iter().rposition(|&m| m == Move::Switch)?;
    Some((first, last))
}

/// Strip rotation moves before the first and after the last switch.
/// `None` when the encoding has no switch at all.
pub fn trim_encoding(enc: &Encoding) -> Option<Encoding> {
    let (first, last) = switch_span(enc)?;
    Some(enc.slice(first, last + 1))
}

/// Trim `moves` and cut the matching vertex sub-path out of `path`.
/// `moves` must be the encoding of `path`.
pub fn trim(path: &Path, moves: &Encoding) -> Option<Trimmed> {
    debug_assert_eq!(path.len(), moves.len() + 1);
    let Some((first, last)) = switch_span(moves) else {
        tracing::warn!(len = moves.len(), "path has no switch move; nothing to trim to");
        return None;
    };
    Some(Trimmed {
        moves: moves.slice(first, last + 1),
        path: path.slice(first, last + 2),
    })
}
