use super::*;
use crate::cage::{Cage, EdgeKind};
use crate::error::HampathError;
use crate::fixtures::{pair, prism};
use crate::path::{Encoding, Path};
use proptest::prelude::*;

const PRISM_HAMILTONIAN: [&str; 10] = [
    "abcfde", "abcfed", "abedfc", "acbedf", "acbefd", "acfdeb", "adebcf", "adefcb", "adfcbe",
    "adfebc",
];

fn paths(cage: &Cage, labels: &[&str]) -> Vec<Path> {
    labels.iter().map(|l| cage.path(l).unwrap()).collect()
}

fn names(cage: &Cage, ps: &[Path]) -> Vec<String> {
    ps.iter().map(|p| cage.path_label(p)).collect()
}

fn present(cage: &Cage, a: char, b: char) -> Constraint {
    Constraint::from_labels(cage, a, b, true).unwrap()
}

#[test]
fn occupancy_marks_path_edges() {
    let cage = prism();
    let occ = Occupancy::of(&cage, &cage.path("abcfde").unwrap()).unwrap();
    assert_eq!(occ.long.len(), 3);
    assert_eq!(occ.short.len(), 6);
    assert_eq!(occ.used(EdgeKind::Long), 1);
    assert_eq!(occ.used(EdgeKind::Short), 4);
    assert_eq!(occ.get(cage.edge('f', 'c').unwrap()), Some(true));
    assert_eq!(occ.get(cage.edge('a', 'd').unwrap()), Some(false));
    assert_eq!(occ.bits(EdgeKind::Long).len(), 3);
    assert_eq!(
        Occupancy::of(&cage, &cage.path("af").unwrap()).unwrap_err(),
        HampathError::NotAdjacent { from: 'a', to: 'f' }
    );
}

#[test]
fn constraints_must_name_edges() {
    let cage = prism();
    assert_eq!(
        Constraint::from_labels(&cage, 'a', 'f', true).unwrap_err(),
        HampathError::UnknownEdge { from: 'a', to: 'f' }
    );
    let (a, f) = (cage.vertex('a').unwrap(), cage.vertex('f').unwrap());
    assert!(Constraint::new(&cage, a, f, false).is_err());
    // Direction does not matter.
    assert_eq!(present(&cage, 'b', 'a'), present(&cage, 'a', 'b'));
}

#[test]
fn filter_and_infer_on_prism() {
    let cage = prism();
    let all = paths(&cage, &PRISM_HAMILTONIAN);
    let cs = [present(&cage, 'a', 'b')];
    let part = filter(&cage, all, &cs).unwrap();
    assert_eq!(names(&cage, &part.pass), vec!["abcfde", "abcfed", "abedfc"]);
    assert_eq!(part.fail.len(), 7);

    let inf = infer(&cage, &part.pass, &cs).unwrap();
    let e = |a, b| cage.edge(a, b).unwrap();
    let Inference::Inferred { long, short } = &inf else {
        panic!("expected inferred edges");
    };
    assert_eq!(
        long.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(),
        vec![(e('a', 'd'), false), (e('c', 'f'), true)]
    );
    assert_eq!(short.len(), 2);
    assert_eq!(inf.get(e('a', 'c')), Some(false));
    assert_eq!(inf.get(e('d', 'e')), Some(true));
    assert_eq!(inf.get(e('a', 'b')), None);
    assert_eq!(inf.len(), 4);
}

#[test]
fn absent_constraints_filter_too() {
    let cage = prism();
    let all = paths(&cage, &PRISM_HAMILTONIAN);
    let cs = [Constraint::from_labels(&cage, 'a', 'd', false).unwrap()];
    let part = filter(&cage, all, &cs).unwrap();
    assert_eq!(part.pass.len(), 6);
    assert!(names(&cage, &part.pass).iter().all(|n| !n.starts_with("ad")));
}

#[test]
fn extra_satisfied_constraint_keeps_inference() {
    let cage = prism();
    let all = paths(&cage, &PRISM_HAMILTONIAN);
    let one = [present(&cage, 'a', 'b')];
    let two = [present(&cage, 'a', 'b'), present(&cage, 'c', 'f')];
    let p1 = filter(&cage, all.clone(), &one).unwrap().pass;
    let p2 = filter(&cage, all, &two).unwrap().pass;
    assert_eq!(p1, p2);
    let i1 = infer(&cage, &p1, &one).unwrap();
    let i2 = infer(&cage, &p2, &two).unwrap();
    for (edge, value) in i1.edges() {
        let named = two.iter().any(|c| c.edge == edge);
        assert!(named || i2.get(edge) == Some(value));
    }
}

#[test]
fn empty_pass_set_has_no_solutions() {
    let cage = prism();
    let all = paths(&cage, &PRISM_HAMILTONIAN);
    // A start vertex of a path uses exactly one of its edges.
    let cs = [present(&cage, 'a', 'b'), present(&cage, 'a', 'c')];
    let part = filter(&cage, all, &cs).unwrap();
    assert!(part.pass.is_empty());
    let inf = infer(&cage, &part.pass, &cs).unwrap();
    assert_eq!(inf, Inference::NoSolutions);
    assert!(inf.is_empty());
    assert!(inf.edges().is_empty());
}

#[test]
fn two_vertex_cage_infers_nothing() {
    let cage = pair();
    let cs = [present(&cage, 'A', 'B')];
    let part = filter(&cage, paths(&cage, &["AB"]), &cs).unwrap();
    assert_eq!(names(&cage, &part.pass), vec!["AB"]);
    let inf = infer(&cage, &part.pass, &cs).unwrap();
    assert!(matches!(inf, Inference::Inferred { .. }));
    assert!(inf.is_empty());
}

#[test]
fn summary_counts_trimmed_forms() {
    let cage = prism();
    let all = paths(&cage, &PRISM_HAMILTONIAN);
    let cs = [present(&cage, 'a', 'b')];
    let pass = filter(&cage, all.clone(), &cs).unwrap().pass;
    let s = Summary::of(&cage, &all, &pass, &"1".parse().unwrap()).unwrap();
    assert_eq!(
        s,
        Summary {
            original: 6,
            processed: 2,
            best: 2
        }
    );
    let s = Summary::of(&cage, &all, &pass, &"1213".parse().unwrap()).unwrap();
    assert_eq!(s.best, 0);
}

#[test]
fn preferred_forms_move_to_front() {
    let encs: Vec<Encoding> = ["22133", "12131", "33122", "13121"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let preferred: Vec<Encoding> = vec!["12131".parse().unwrap()];
    let ranked = rank_preferred(encs, &preferred, |e| e);
    let shown: Vec<String> = ranked.iter().map(|e| e.to_string()).collect();
    assert_eq!(shown, vec!["12131", "13121", "22133", "33122"]);
}

proptest! {
    // Every subset of the prism's Hamiltonian paths: inferred edges agree
    // with every member and never include a constrained edge.
    #[test]
    fn inferred_edges_hold_in_every_pass_path(mask in 1u16..1024) {
        let cage = prism();
        let chosen: Vec<Path> = paths(&cage, &PRISM_HAMILTONIAN)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, p)| p)
            .collect();
        let cs = [Constraint::from_labels(&cage, 'b', 'e', false).unwrap()];
        let pass = filter(&cage, chosen, &cs).unwrap().pass;
        let inf = infer(&cage, &pass, &cs).unwrap();
        prop_assert_eq!(pass.is_empty(), inf == Inference::NoSolutions);
        for p in &pass {
            let occ = Occupancy::of(&cage, p).unwrap();
            prop_assert!(occ.satisfies(&cs));
            for (edge, value) in inf.edges() {
                prop_assert!(edge != cs[0].edge);
                prop_assert_eq!(occ.get(edge), Some(value));
            }
        }
    }

    // Adding a constraint can shrink the pass set but never un-infers an
    // edge it does not name.
    #[test]
    fn added_constraint_keeps_inferred_edges(
        mask in 1u16..1024,
        pick in 0usize..9,
        value in any::<bool>(),
    ) {
        let cage = prism();
        let chosen: Vec<Path> = paths(&cage, &PRISM_HAMILTONIAN)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, p)| p)
            .collect();
        let one = [Constraint::from_labels(&cage, 'b', 'e', false).unwrap()];
        let pass1 = filter(&cage, chosen, &one).unwrap().pass;
        let i1 = infer(&cage, &pass1, &one).unwrap();

        let edges: Vec<_> = cage
            .edges(EdgeKind::Long)
            .into_iter()
            .chain(cage.edges(EdgeKind::Short))
            .collect();
        prop_assert_eq!(edges.len(), 9);
        let (a, b) = edges[pick].ends();
        let extra = Constraint::new(&cage, a, b, value).unwrap();
        let two = [one[0], extra];
        let pass2 = filter(&cage, pass1.clone(), &two).unwrap().pass;
        prop_assert!(pass2.len() <= pass1.len());
        let i2 = infer(&cage, &pass2, &two).unwrap();
        if !pass2.is_empty() {
            for (edge, v) in i1.edges() {
                prop_assert!(edge == extra.edge || i2.get(edge) == Some(v));
            }
        } else {
            prop_assert_eq!(i2, Inference::NoSolutions);
        }
    }
}
