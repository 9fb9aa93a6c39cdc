//! Require/preclude predicates applied to every candidate extension.

use std::collections::HashMap;

use crate::cage::{Cage, Vertex};
use crate::error::Result;
use crate::path::Path;

/// Visitation rules keyed by the vertex being moved to. A vertex without an
/// entry is unrestricted.
#[derive(Clone, Debug, Default)]
pub struct Rules {
    require: HashMap<Vertex, Vec<Vertex>>,
    preclude: HashMap<Vertex, Vec<Vertex>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moving to `target` needs every vertex in `visited` on the path first.
    pub fn require(mut self, target: Vertex, visited: Vec<Vertex>) -> Self {
        self.require.entry(target).or_default().extend(visited);
        self
    }

    /// Moving to `target` is illegal once any vertex in `visited` is on the path.
    pub fn preclude(mut self, target: Vertex, visited: Vec<Vertex>) -> Self {
        self.preclude.entry(target).or_default().extend(visited);
        self
    }

    /// Build from label rows `(target, [vertices...])`.
    pub fn from_labels(
        cage: &Cage,
        require: &[(char, Vec<char>)],
        preclude: &[(char, Vec<char>)],
    ) -> Result<Self> {
        let resolve = |row: &(char, Vec<char>)| -> Result<(Vertex, Vec<Vertex>)> {
            let target = cage.vertex(row.0)?;
            let visited = row
                .1
                .iter()
                .map(|&c| cage.vertex(c))
                .collect::<Result<Vec<_>>>()?;
            Ok((target, visited))
        };
        let mut rules = Rules::new();
        for row in require {
            let (t, vs) = resolve(row)?;
            rules = rules.require(t, vs);
        }
        for row in preclude {
            let (t, vs) = resolve(row)?;
            rules = rules.preclude(t, vs);
        }
        Ok(rules)
    }

    pub fn is_empty(&self) -> bool {
        self.require.is_empty() && self.preclude.is_empty()
    }

    /// Whether `path` may grow onto `next`. Simplicity is checked separately.
    pub fn allows(&self, path: &Path, next: Vertex) -> bool {
        let required = self
            .require
            .get(&next)
            .map_or(true, |vs| vs.iter().all(|&v| path.contains(v)));
        let precluded = self
            .preclude
            .get(&next)
            .is_some_and(|vs| vs.iter().any(|&v| path.contains(v)));
        required && !precluded
    }
}
