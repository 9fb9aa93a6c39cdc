//! Shipped geometries.
//!
//! MS2: the T=3 bacteriophage capsid, 60 coat-protein positions labelled
//! `a..z A..Z 0..7`, 12 five-fold hubs and 30 dimers.

use super::{Cage, CageSpec};
use crate::error::Result;

const MS2_ROTATIONS: [&str; 12] = [
    "atNud", "L6ROM", "pIKsr", "bfjmq", "cwyge", "vPSWx", "Q2YVT", "G537J", "lFHon", "hACki",
    "zXU0B", "D1Z4E",
];

const MS2_SWITCHES: [&str; 30] = [
    "ab", "cd", "ef", "gh", "ij", "kl", "mn", "op", "qr", "st", "uv", "wx", "yz", "AB", "CD",
    "EF", "GH", "IJ", "KL", "MN", "OP", "QR", "ST", "UV", "WX", "YZ", "01", "23", "45", "67",
];

/// Fixed opening used to seed MS2 generation.
pub const MS2_START: &str = "abf";

/// Hubs adjacent to the maturation protein; instances start on their vertices.
pub const MS2_START_HUBS: [&str; 8] = [
    "atNud", "L6ROM", "pIKsr", "bfjmq", "vPSWx", "Q2YVT", "G537J", "lFHon",
];

/// Trimmed move encoding of the best-supported MS2 path.
pub const MS2_BEST: &str = "13133331333313312222133331222213333122122221312133331331";

/// Reference solutions surfaced first when listing results.
pub const MS2_PREFERRED: [&str; 4] = [
    "12213313133121333313133331331213122221221333312222133331",
    "12122221221212222131221212213312222133121312212122133131",
    "13313133331333313312131222212213333122221333312222133331",
    MS2_BEST,
];

pub fn ms2_spec() -> CageSpec {
    CageSpec {
        name: Some("ms2".to_string()),
        switches: MS2_SWITCHES.iter().map(|s| s.to_string()).collect(),
        rotations: MS2_ROTATIONS.iter().map(|s| s.to_string()).collect(),
    }
}

impl Cage {
    pub fn ms2() -> Result<Self> {
        Cage::from_spec(&ms2_spec())
    }
}

/// Every vertex of the MS2 start hubs, in hub order.
pub fn ms2_start_labels() -> Vec<char> {
    MS2_START_HUBS.iter().flat_map(|h| h.chars()).collect()
}
