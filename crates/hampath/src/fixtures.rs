//! Small cages shared by unit tests.

use crate::cage::{Cage, CageSpec};

/// Triangular prism: hubs `abc` and `dfe`, switches `ad be cf`.
/// Six vertices, six rotational symmetries.
pub fn prism() -> Cage {
    Cage::from_spec(&CageSpec {
        name: Some("prism".into()),
        switches: vec!["ad".into(), "be".into(), "cf".into()],
        rotations: vec!["abc".into(), "dfe".into()],
    })
    .unwrap()
}

/// Two vertices joined by one switch.
pub fn pair() -> Cage {
    Cage::from_spec(&CageSpec {
        name: Some("pair".into()),
        switches: vec!["AB".into()],
        rotations: vec![],
    })
    .unwrap()
}

pub fn ms2() -> Cage {
    Cage::ms2().unwrap()
}
