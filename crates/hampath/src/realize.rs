//! Realizer: canonical paths into every symmetric physical instance.
//!
//! Purpose
//! - `Realizer` relabels a vertex path into each requested rotational frame
//!   of a degeneracy table, optionally adding the reversed instance.
//! - `instantiate` walks a generalized move encoding from each requested
//!   start vertex and pairs every instance with its edge-occupancy signature.
//!
//! Why this design
//! - Frames are validated when the realizer is built, so a mismatched table
//!   fails before any path is touched. Instance sets are `BTreeSet`s, so
//!   overlapping orbits collapse without a separate dedup pass.

use std::collections::{BTreeSet, HashSet};

use rayon::prelude::*;

use crate::cage::{Cage, Vertex};
use crate::constrain::Occupancy;
use crate::error::{HampathError, Result};
use crate::path::{Encoding, Path};
use crate::symmetry::DegeneracyTable;

/// Which frames to realize into and whether to add reversed instances.
#[derive(Clone, Debug, Default)]
pub struct RealizeCfg {
    /// Empty means every frame of the table.
    pub frames: Vec<Vertex>,
    pub backwards: bool,
}

pub struct Realizer<'a> {
    cage: &'a Cage,
    table: &'a DegeneracyTable,
    frames: Vec<Vertex>,
    backwards: bool,
}

impl<'a> Realizer<'a> {
    pub fn new(cage: &'a Cage, table: &'a DegeneracyTable, cfg: RealizeCfg) -> Result<Self> {
        let frames = if cfg.frames.is_empty() {
            table.frames().collect()
        } else {
            cfg.frames
        };
        for &f in &frames {
            cage.check(f)?;
        }
        if let Some(&missing) = frames.iter().find(|&&f| !table.contains(f)) {
            return Err(HampathError::MissingFrame(cage.label(missing)));
        }
        Ok(Self {
            cage,
            table,
            frames,
            backwards: cfg.backwards,
        })
    }

    pub fn frames(&self) -> &[Vertex] {
        &self.frames
    }

    /// Instances of one path, in frame order, reversed instance after its
    /// forward one.
    pub fn realize(&self, path: &Path) -> Result<Vec<Path>> {
        let mut out = Vec::with_capacity(self.frames.len() * if self.backwards { 2 } else { 1 });
        for &frame in &self.frames {
            let inst = self.table.to_frame(self.cage, frame)?.path(path);
            if self.backwards {
                let back = inst.reversed();
                out.push(inst);
                out.push(back);
            } else {
                out.push(inst);
            }
        }
        Ok(out)
    }

    /// Deduplicated instances of every path.
    pub fn realize_all(&self, paths: &[Path]) -> Result<BTreeSet<Path>> {
        let batches: Vec<Vec<Path>> = paths
            .par_iter()
            .map(|p| self.realize(p))
            .collect::<Result<_>>()?;
        let out: BTreeSet<Path> = batches.into_iter().flatten().collect();
        tracing::debug!(
            input = paths.len(),
            frames = self.frames.len(),
            instances = out.len(),
            "realized"
        );
        Ok(out)
    }
}

/// Move notation of every instance.
pub fn encode_all(cage: &Cage, paths: &BTreeSet<Path>) -> Result<BTreeSet<Encoding>> {
    paths.iter().map(|p| p.encode(cage)).collect()
}

/// One walk of a generalized encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub start: Vertex,
    pub moves: Encoding,
    pub path: Path,
    pub occupancy: Occupancy,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instantiated {
    pub instances: Vec<Instance>,
    /// Number of distinct occupancy signatures among `instances`.
    pub distinct: usize,
}

/// Walk every encoding from every start vertex. A walk that leaves the cage
/// or revisits a vertex is an error.
pub fn instantiate(cage: &Cage, encodings: &[Encoding], starts: &[Vertex]) -> Result<Instantiated> {
    for &s in starts {
        cage.check(s)?;
    }
    let blank = Occupancy::blank(cage);
    let jobs: Vec<(&Encoding, Vertex)> = encodings
        .iter()
        .flat_map(|e| starts.iter().map(move |&s| (e, s)))
        .collect();
    let instances: Vec<Instance> = jobs
        .par_iter()
        .map(|&(moves, start)| {
            let path = moves.walk(cage, start)?;
            let occupancy = blank.marked(cage, &path)?;
            Ok(Instance {
                start,
                moves: moves.clone(),
                path,
                occupancy,
            })
        })
        .collect::<Result<_>>()?;
    let distinct = instances
        .iter()
        .map(|i| &i.occupancy)
        .collect::<HashSet<_>>()
        .len();
    tracing::debug!(instances = instances.len(), distinct, "instantiated");
    Ok(Instantiated {
        instances,
        distinct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cage::Move;
    use crate::fixtures::{ms2, pair, prism};
    use crate::symmetry::{canonical, SymmetryGroup};
    use proptest::prelude::*;

    #[test]
    fn two_vertex_cage_realizes_into_other_frame() {
        let cage = pair();
        let a = cage.vertex('A').unwrap();
        let b = cage.vertex('B').unwrap();
        let table = DegeneracyTable::from_cage(&cage, a).unwrap();
        let ab = cage.path("AB").unwrap();
        let cfg = RealizeCfg {
            frames: vec![b],
            backwards: false,
        };
        let r = Realizer::new(&cage, &table, cfg).unwrap();
        let out = r.realize(&ab).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(cage.path_label(&out[0]), "BA");

        let both = Realizer::new(
            &cage,
            &table,
            RealizeCfg {
                frames: vec![b],
                backwards: true,
            },
        )
        .unwrap();
        let all = both.realize_all(&[ab]).unwrap();
        let labels: Vec<String> = all.iter().map(|p| cage.path_label(p)).collect();
        assert_eq!(labels, vec!["AB", "BA"]);
        let moves = encode_all(&cage, &all).unwrap();
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn unknown_frame_fails_up_front() {
        let cage = prism();
        let rows: Vec<Vec<char>> = ["abcdef", "bacdef"]
            .iter()
            .map(|r| r.chars().collect())
            .collect();
        let table = DegeneracyTable::from_rows(&cage, &rows).unwrap();
        let c = cage.vertex('c').unwrap();
        let err = Realizer::new(
            &cage,
            &table,
            RealizeCfg {
                frames: vec![c],
                backwards: false,
            },
        )
        .err();
        assert_eq!(err, Some(HampathError::MissingFrame('c')));
        // Empty frame list means the table's own frames.
        let r = Realizer::new(&cage, &table, RealizeCfg::default()).unwrap();
        assert_eq!(r.frames().len(), 2);
    }

    #[test]
    fn ms2_start_covers_sixty_frames() {
        let cage = ms2();
        let a = cage.vertex('a').unwrap();
        let table = DegeneracyTable::from_cage(&cage, a).unwrap();
        let r = Realizer::new(
            &cage,
            &table,
            RealizeCfg {
                frames: Vec::new(),
                backwards: true,
            },
        )
        .unwrap();
        let start = cage.path(crate::cage::presets::MS2_START).unwrap();
        let out = r.realize_all(&[start]).unwrap();
        assert_eq!(out.len(), 120);
        let starts: BTreeSet<Vertex> = out.iter().filter_map(Path::first).collect();
        assert_eq!(starts.len(), 60);
    }

    #[test]
    fn instantiate_counts_distinct_signatures() {
        let cage = prism();
        let starts: Vec<Vertex> = cage.vertices().collect();
        let enc: Encoding = "22133".parse().unwrap();
        let out = instantiate(&cage, &[enc.clone()], &starts).unwrap();
        assert_eq!(out.instances.len(), 6);
        // Each path shares its edge set with its reversed twin.
        assert_eq!(out.distinct, 3);
        for inst in &out.instances {
            assert_eq!(inst.path.first(), Some(inst.start));
            assert_eq!(inst.path.encode(&cage).unwrap(), enc);
        }

        let bad: Encoding = "222".parse().unwrap();
        assert!(instantiate(&cage, &[bad], &starts).is_err());
    }

    #[test]
    fn ms2_preferred_paths_instantiate_from_every_start_hub() {
        use crate::cage::presets::{ms2_start_labels, MS2_PREFERRED};
        let cage = ms2();
        let starts: Vec<Vertex> = ms2_start_labels()
            .into_iter()
            .map(|c| cage.vertex(c).unwrap())
            .collect();
        let encs: Vec<Encoding> = MS2_PREFERRED.iter().map(|s| s.parse().unwrap()).collect();
        for enc in encs {
            let out = instantiate(&cage, &[enc], &starts).unwrap();
            assert_eq!(out.instances.len(), 40);
            assert_eq!(out.distinct, 40);
        }
    }

    #[test]
    fn vertices_outside_the_cage_are_rejected() {
        let cage = prism();
        let a = cage.vertex('a').unwrap();
        let table = DegeneracyTable::from_cage(&cage, a).unwrap();
        let outside = Vertex(cage.len() as u16);
        let err = Realizer::new(
            &cage,
            &table,
            RealizeCfg {
                frames: vec![a, outside],
                backwards: false,
            },
        )
        .err();
        assert!(matches!(err, Some(HampathError::InvalidConfig(_))));

        let enc: Encoding = "2".parse().unwrap();
        let err = instantiate(&cage, &[enc], &[a, outside]).unwrap_err();
        assert!(matches!(err, HampathError::InvalidConfig(_)));
    }

    proptest! {
        // Re-canonicalizing any realized instance gives back the class of
        // the source path.
        #[test]
        fn realized_instances_share_the_canonical_form(
            symbols in proptest::collection::vec(0usize..3, 1..12),
            backwards in any::<bool>(),
        ) {
            let cage = ms2();
            let a = cage.vertex('a').unwrap();
            let table = DegeneracyTable::from_cage(&cage, a).unwrap();
            let enc = Encoding::new(symbols.into_iter().map(|i| Move::ALL[i]).collect());
            if let Ok(path) = enc.walk(&cage, a) {
                let r = Realizer::new(&cage, &table, RealizeCfg { frames: Vec::new(), backwards }).unwrap();
                let want = canonical(&enc, SymmetryGroup::Direction);
                for inst in r.realize(&path).unwrap() {
                    let got = canonical(&inst.encode(&cage).unwrap(), SymmetryGroup::Direction);
                    prop_assert_eq!(&got, &want);
                }
            }
        }
    }
}
