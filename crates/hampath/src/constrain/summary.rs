//! Before/after counts and reference-first ordering for presentation.

use std::collections::BTreeSet;

use crate::cage::Cage;
use crate::error::Result;
use crate::path::{Encoding, Path};
use crate::symmetry::{orbit, trim, SymmetryGroup};

/// Distinct trimmed paths before and after filtering, and how many of the
/// survivors are a form of the designated best path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub original: usize,
    pub processed: usize,
    pub best: usize,
}

/// Trimmed `(moves, sub-path)` pairs; a path with no switch stays whole.
fn trimmed_set(cage: &Cage, paths: &[Path]) -> Result<BTreeSet<(Encoding, Path)>> {
    paths
        .iter()
        .map(|p| {
            let moves = p.encode(cage)?;
            Ok(match trim(p, &moves) {
                Some(t) => (t.moves, t.path),
                None => (moves, p.clone()),
            })
        })
        .collect()
}

impl Summary {
    pub fn of(cage: &Cage, input: &[Path], pass: &[Path], best: &Encoding) -> Result<Self> {
        let before = trimmed_set(cage, input)?;
        let after = trimmed_set(cage, pass)?;
        let forms = orbit(best, SymmetryGroup::Full);
        let best = after.iter().filter(|(m, _)| forms.contains(m)).count();
        Ok(Self {
            original: before.len(),
            processed: after.len(),
            best,
        })
    }
}

/// Stable reorder putting items whose encoding is a form of any `preferred`
/// encoding first.
pub fn rank_preferred<T, F>(items: Vec<T>, preferred: &[Encoding], moves: F) -> Vec<T>
where
    F: Fn(&T) -> &Encoding,
{
    let forms: BTreeSet<Encoding> = preferred
        .iter()
        .flat_map(|e| orbit(e, SymmetryGroup::Full))
        .collect();
    let (mut first, rest): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|it| forms.contains(moves(it)));
    first.extend(rest);
    first
}
