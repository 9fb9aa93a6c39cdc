//! Extension strategies: one growth step for a single path.

use crate::cage::Cage;
use crate::error::Result;
use crate::path::Path;
use crate::symmetry::DegeneracyTable;

use super::rules::Rules;
use super::Frontier;

/// Grows one path by one vertex in every legal way.
///
/// Implementations push candidates into `out` and never deduplicate; the
/// generator merges all candidates of a step at the stage boundary.
pub trait Extension: Sync {
    fn extend_into(&self, cage: &Cage, rules: &Rules, path: &Path, out: &mut Vec<Path>)
        -> Result<()>;

    /// Bring a start frontier into the form this strategy grows from.
    fn prepare(&self, _cage: &Cage, start: Frontier) -> Result<Frontier> {
        Ok(start)
    }
}

/// Append at the path's last vertex only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Forward;

impl Extension for Forward {
    fn extend_into(
        &self,
        cage: &Cage,
        rules: &Rules,
        path: &Path,
        out: &mut Vec<Path>,
    ) -> Result<()> {
        let Some(end) = path.last() else {
            return Ok(());
        };
        for next in cage.neighbours(end) {
            if !path.contains(next) && rules.allows(path, next) {
                out.push(path.extended(next));
            }
        }
        Ok(())
    }
}

/// Append at the last vertex and prepend at the first. A prepended path is
/// re-anchored so it starts at the table's reference vertex again.
#[derive(Clone, Copy, Debug)]
pub struct Bidirectional<'t> {
    table: &'t DegeneracyTable,
}

impl<'t> Bidirectional<'t> {
    /// Any vertex can become a start after prepending, so the table must hold
    /// a frame for every vertex of `cage`.
    pub fn new(cage: &Cage, table: &'t DegeneracyTable) -> Result<Self> {
        table.check_covers(cage)?;
        Ok(Self { table })
    }
}

impl Extension for Bidirectional<'_> {
    fn extend_into(
        &self,
        cage: &Cage,
        rules: &Rules,
        path: &Path,
        out: &mut Vec<Path>,
    ) -> Result<()> {
        Forward.extend_into(cage, rules, path, out)?;
        let Some(start) = path.first() else {
            return Ok(());
        };
        for prev in cage.neighbours(start) {
            if !path.contains(prev) && rules.allows(path, prev) {
                out.push(self.table.reanchor(cage, &path.prepended(prev))?);
            }
        }
        Ok(())
    }

    /// Start paths are re-anchored too, so both growth directions share one
    /// start vertex from the first step on.
    fn prepare(&self, cage: &Cage, start: Frontier) -> Result<Frontier> {
        let length = start.length();
        let paths = start
            .into_paths()
            .into_iter()
            .map(|p| self.table.reanchor(cage, &p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Frontier::merged(length, paths))
    }
}
