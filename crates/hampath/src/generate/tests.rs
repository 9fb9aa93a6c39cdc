use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::cage::presets::MS2_START;
use crate::fixtures::{ms2, pair, prism};
use crate::symmetry::DegeneracyTable;

fn start(cage: &Cage, labels: &[&str]) -> Frontier {
    Frontier::from_starts(labels.iter().map(|l| cage.path(l).unwrap()).collect()).unwrap()
}

fn cfg(lengths: &[usize]) -> GenerateCfg {
    GenerateCfg {
        lengths: lengths.to_vec(),
        ..GenerateCfg::default()
    }
}

fn labels(cage: &Cage, paths: &[Path]) -> Vec<String> {
    let mut out: Vec<String> = paths.iter().map(|p| cage.path_label(p)).collect();
    out.sort();
    out
}

#[derive(Default)]
struct Recorder(Vec<(usize, usize)>);

impl FrontierStore for Recorder {
    type Error = HampathError;

    fn store(&mut self, frontier: &Frontier) -> Result<()> {
        self.0.push((frontier.length(), frontier.len()));
        Ok(())
    }
}

#[test]
fn ms2_forward_counts() {
    let cage = ms2();
    let rules = Rules::new();
    let generator = Generator::new(&cage, &rules, &Forward, cfg(&[3, 4, 5, 6, 7, 8]));
    let mut rec = Recorder::default();
    let out = generator.run(start(&cage, &[MS2_START]), &mut rec).unwrap();
    let counts: Vec<usize> = out.by_length.values().map(Vec::len).collect();
    assert_eq!(counts, vec![1, 2, 4, 8, 14, 28]);
    // The start frontier is not stored; every grown one is.
    assert_eq!(rec.0, vec![(4, 2), (5, 4), (6, 8), (7, 14), (8, 28)]);
}

#[test]
fn prism_counts_and_hamiltonian_paths() {
    let cage = prism();
    let rules = Rules::new();
    let generator = Generator::new(&cage, &rules, &Forward, cfg(&[1, 2, 3, 4, 5, 6]));
    let out = generator.run(start(&cage, &["a"]), &mut NoStore).unwrap();
    let counts: Vec<usize> = out.by_length.values().map(Vec::len).collect();
    assert_eq!(counts, vec![1, 3, 6, 10, 14, 10]);
    assert_eq!(
        labels(&cage, &out.by_length[&6]),
        vec![
            "abcfde", "abcfed", "abedfc", "acbedf", "acbefd", "acfdeb", "adebcf", "adefcb",
            "adfcbe", "adfebc"
        ]
    );
}

#[test]
fn default_length_is_hamiltonian() {
    let cage = prism();
    let rules = Rules::new();
    let generator = Generator::new(&cage, &rules, &Forward, GenerateCfg::default());
    let out = generator.run(start(&cage, &["a"]), &mut NoStore).unwrap();
    assert_eq!(out.by_length.keys().copied().collect::<Vec<_>>(), vec![6]);
    assert_eq!(out.len(), 10);
}

#[test]
fn bidirectional_matches_forward_on_prism() {
    let cage = prism();
    let a = cage.vertex('a').unwrap();
    let table = DegeneracyTable::from_cage(&cage, a).unwrap();
    let both = Bidirectional::new(&cage, &table).unwrap();
    let rules = Rules::new();
    let lengths = [2, 3, 4, 5, 6];
    let fwd = Generator::new(&cage, &rules, &Forward, cfg(&lengths))
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    let bi = Generator::new(&cage, &rules, &both, cfg(&lengths))
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(fwd, bi);
    assert!(bi.paths().all(|p| p.first() == Some(a)));
}

#[test]
fn bidirectional_start_is_reanchored_to_reference() {
    let cage = prism();
    let a = cage.vertex('a').unwrap();
    let table = DegeneracyTable::from_cage(&cage, a).unwrap();
    let both = Bidirectional::new(&cage, &table).unwrap();
    let rules = Rules::new();
    let generator = Generator::new(&cage, &rules, &both, cfg(&[1, 3]));
    let from_b = generator.run(start(&cage, &["b"]), &mut NoStore).unwrap();
    let from_a = generator.run(start(&cage, &["a"]), &mut NoStore).unwrap();
    assert_eq!(from_b, from_a);
    assert_eq!(labels(&cage, &from_b.by_length[&1]), vec!["a"]);
    assert_eq!(
        labels(&cage, &from_b.by_length[&3]),
        vec!["abc", "abe", "acb", "acf", "ade", "adf"]
    );
    // One path per move class: no class survives under two anchors.
    let encs: BTreeSet<String> = from_b.by_length[&3]
        .iter()
        .map(|p| p.encode(&cage).unwrap().to_string())
        .collect();
    assert_eq!(encs.len(), 6);
    // The forward strategy leaves starts where they are.
    let fwd = Generator::new(&cage, &rules, &Forward, cfg(&[1]))
        .run(start(&cage, &["b"]), &mut NoStore)
        .unwrap();
    assert_eq!(labels(&cage, &fwd.by_length[&1]), vec!["b"]);
}

#[test]
fn bidirectional_growth_differs_under_rules() {
    let cage = prism();
    let a = cage.vertex('a').unwrap();
    let table = DegeneracyTable::from_cage(&cage, a).unwrap();
    let both = Bidirectional::new(&cage, &table).unwrap();
    let rules = Rules::from_labels(&cage, &[('e', vec!['c'])], &[('d', vec!['b'])]).unwrap();
    let fwd = Generator::new(&cage, &rules, &Forward, GenerateCfg::default())
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(labels(&cage, &fwd.by_length[&6]), vec!["acfdeb", "adfcbe"]);
    let bi = Generator::new(&cage, &rules, &both, GenerateCfg::default())
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(
        labels(&cage, &bi.by_length[&6]),
        vec![
            "abcfde", "abcfed", "abedfc", "acbedf", "acbefd", "acfdeb", "adebcf", "adefcb",
            "adfcbe"
        ]
    );
    for p in bi.paths() {
        assert_eq!(p.first(), Some(a));
        assert!(Path::from_vertices(&cage, p.vertices().to_vec()).is_ok());
    }
}

#[test]
fn empty_frontier_is_a_completed_length() {
    let frontier = Frontier::empty(4);
    assert!(frontier.is_empty());
    assert_eq!(frontier.length(), 4);
    let cage = prism();
    let rules = Rules::new();
    let out = Generator::new(&cage, &rules, &Forward, cfg(&[4, 6]))
        .run(frontier, &mut NoStore)
        .unwrap();
    assert_eq!(out.by_length[&4].len(), 0);
    assert_eq!(out.by_length[&6].len(), 0);
}

#[test]
fn bidirectional_needs_every_frame() {
    let cage = prism();
    let rows: Vec<Vec<char>> = ["abcdef", "bacdef"]
        .iter()
        .map(|r| r.chars().collect())
        .collect();
    let table = DegeneracyTable::from_rows(&cage, &rows).unwrap();
    assert_eq!(
        Bidirectional::new(&cage, &table).unwrap_err(),
        HampathError::MissingFrame('c')
    );
}

#[test]
fn require_and_preclude_prune_growth() {
    let cage = prism();
    let required = Rules::from_labels(&cage, &[('d', vec!['b'])], &[]).unwrap();
    let out = Generator::new(&cage, &required, &Forward, cfg(&[2]))
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(labels(&cage, &out.by_length[&2]), vec!["ab", "ac"]);

    let precluded = Rules::from_labels(&cage, &[], &[('b', vec!['a'])]).unwrap();
    let out = Generator::new(&cage, &precluded, &Forward, cfg(&[2]))
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(labels(&cage, &out.by_length[&2]), vec!["ac", "ad"]);

    assert!(Rules::new().is_empty());
    assert!(!precluded.is_empty());
    assert_eq!(
        Rules::from_labels(&cage, &[('z', vec![])], &[]).unwrap_err(),
        HampathError::UnknownLabel('z')
    );
}

#[test]
fn end_suffixes_filter_output() {
    let cage = prism();
    let rules = Rules::new();
    let ends = |suffixes: &[&str]| GenerateCfg {
        ends: suffixes
            .iter()
            .map(|s| cage.path(s).unwrap().vertices().to_vec())
            .collect(),
        ..GenerateCfg::default()
    };
    let out = Generator::new(&cage, &rules, &Forward, ends(&["e"]))
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(labels(&cage, &out.by_length[&6]), vec!["abcfde", "adfcbe"]);
    let out = Generator::new(&cage, &rules, &Forward, ends(&["de"]))
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(labels(&cage, &out.by_length[&6]), vec!["abcfde"]);
}

#[test]
fn multiple_lengths_union() {
    let cage = prism();
    let rules = Rules::new();
    let out = Generator::new(&cage, &rules, &Forward, cfg(&[6, 2, 6]))
        .run(start(&cage, &["a"]), &mut NoStore)
        .unwrap();
    assert_eq!(out.len(), 13);
    assert_eq!(out.paths().next().map(Path::len), Some(2));
}

#[test]
fn two_vertex_cage() {
    let cage = pair();
    let rules = Rules::new();
    let out = Generator::new(&cage, &rules, &Forward, cfg(&[2]))
        .run(start(&cage, &["A"]), &mut NoStore)
        .unwrap();
    assert_eq!(labels(&cage, &out.by_length[&2]), vec!["AB"]);
    // Past the vertex count nothing is left.
    let out = Generator::new(&cage, &rules, &Forward, cfg(&[3]))
        .run(start(&cage, &["A"]), &mut NoStore)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn start_sets_are_validated() {
    let cage = prism();
    assert_eq!(
        Frontier::from_starts(Vec::new()).unwrap_err(),
        HampathError::NoStartPaths
    );
    let mixed = vec![cage.path("a").unwrap(), cage.path("ab").unwrap()];
    assert_eq!(
        Frontier::from_starts(mixed).unwrap_err(),
        HampathError::LengthMismatch {
            expected: 1,
            found: 2
        }
    );
    let dup = start(&cage, &["ab", "ab", "ac"]);
    assert_eq!(dup.len(), 2);

    let rules = Rules::new();
    for bad in [[0], [1]] {
        let err = Generator::new(&cage, &rules, &Forward, cfg(&bad))
            .run(start(&cage, &["ab"]), &mut NoStore)
            .unwrap_err();
        assert!(matches!(err, HampathError::InvalidConfig(_)));
    }
}

#[test]
fn sequential_and_parallel_agree() {
    let cage = ms2();
    let rules = Rules::new();
    let par = Generator::new(&cage, &rules, &Forward, cfg(&[10]));
    let seq = Generator::new(
        &cage,
        &rules,
        &Forward,
        GenerateCfg {
            parallel: false,
            ..cfg(&[10])
        },
    );
    let a = par.run(start(&cage, &[MS2_START]), &mut NoStore).unwrap();
    let b = seq.run(start(&cage, &[MS2_START]), &mut NoStore).unwrap();
    assert_eq!(a, b);
}

#[test]
fn random_starts_grow_simple_connected_paths() {
    let cage = ms2();
    let rules = Rules::new();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let v = Vertex(rng.gen_range(0..cage.len() as u16));
        let frontier = Frontier::from_starts(vec![Path::from_vertices(&cage, vec![v]).unwrap()])
            .unwrap();
        let out = Generator::new(&cage, &rules, &Forward, cfg(&[7]))
            .run(frontier, &mut NoStore)
            .unwrap();
        assert!(!out.is_empty());
        for p in out.paths() {
            assert_eq!(p.first(), Some(v));
            assert!(Path::from_vertices(&cage, p.vertices().to_vec()).is_ok());
            assert_eq!(p.encode(&cage).unwrap().len(), 6);
        }
    }
}
