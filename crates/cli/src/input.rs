//! Loaders for the line-oriented input files.
//!
//! Every format is whitespace separated, one record per line, blank lines
//! ignored. Vertex labels are single characters.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};
use hampath::api::{
    ms2_spec, Cage, CageSpec, ConnectivityRow, Constraint, DegeneracyTable, Encoding, Path, Vertex,
};
use std::fs;
use std::path::{Path as FsPath, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Preset {
    Ms2,
}

/// Where the cage geometry comes from. Exactly one must be given.
#[derive(Args, Debug, Clone)]
pub struct CageArgs {
    /// Connectivity map: `vertex switch clockwise anticlockwise`, `-` if absent
    #[arg(short = 'c', long)]
    pub connectivity: Option<PathBuf>,
    /// JSON geometry with `switches` and `rotations`
    #[arg(long)]
    pub cage: Option<PathBuf>,
    /// Shipped geometry
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,
}

impl CageArgs {
    pub fn load(&self) -> Result<Cage> {
        match (&self.connectivity, &self.cage, self.preset) {
            (Some(path), None, None) => load_connectivity(path),
            (None, Some(path), None) => {
                let spec: CageSpec = serde_json::from_slice(
                    &fs::read(path).with_context(|| format!("reading {}", path.display()))?,
                )
                .with_context(|| format!("parsing {}", path.display()))?;
                Ok(Cage::from_spec(&spec)?)
            }
            (None, None, Some(Preset::Ms2)) => Ok(Cage::from_spec(&ms2_spec())?),
            (None, None, None) => bail!("one of --connectivity, --cage or --preset is required"),
            _ => bail!("--connectivity, --cage and --preset are mutually exclusive"),
        }
    }

    pub fn is_ms2(&self) -> bool {
        matches!(self.preset, Some(Preset::Ms2))
    }
}

/// Rotational frames: a table file, or derived from the cage.
#[derive(Args, Debug, Clone)]
pub struct DegeneracyArgs {
    /// Degeneracy table: row 0 the reference order, one rotation per row
    #[arg(short = 'd', long)]
    pub degeneracy: Option<PathBuf>,
    /// Derive the table from the cage's move-preserving relabelings
    #[arg(long, conflicts_with = "degeneracy")]
    pub derive_degeneracy: bool,
    /// Reference vertex for a derived table (default: first vertex)
    #[arg(long)]
    pub reference: Option<char>,
}

impl DegeneracyArgs {
    pub fn is_set(&self) -> bool {
        self.degeneracy.is_some() || self.derive_degeneracy
    }

    pub fn load(&self, cage: &Cage) -> Result<DegeneracyTable> {
        if let Some(path) = &self.degeneracy {
            return load_degeneracy(cage, path);
        }
        if !self.derive_degeneracy {
            bail!("a degeneracy table is required (--degeneracy or --derive-degeneracy)");
        }
        let reference = match self.reference {
            Some(c) => cage.vertex(c)?,
            None => cage
                .vertices()
                .next()
                .ok_or_else(|| anyhow!("cage has no vertices"))?,
        };
        Ok(DegeneracyTable::from_cage(cage, reference)?)
    }
}

pub fn read_lines(path: &FsPath) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn single_char(token: &str, path: &FsPath, line: usize) -> Result<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!(
            "{}:{}: expected a single-character label, found {token:?}",
            path.display(),
            line + 1
        ),
    }
}

pub fn parse_connectivity(path: &FsPath, lines: &[String]) -> Result<Vec<ConnectivityRow>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() > 4 {
                bail!(
                    "{}:{}: at most three neighbours (switch, clockwise, anticlockwise)",
                    path.display(),
                    i + 1
                );
            }
            let label = single_char(tokens[0], path, i)?;
            let mut slots = [None; 3];
            for (slot, tok) in slots.iter_mut().zip(&tokens[1..]) {
                if *tok != "-" {
                    *slot = Some(single_char(tok, path, i)?);
                }
            }
            Ok((label, slots))
        })
        .collect()
}

pub fn load_connectivity(path: &FsPath) -> Result<Cage> {
    let rows = parse_connectivity(path, &read_lines(path)?)?;
    Cage::from_connectivity(rows).with_context(|| format!("building cage from {}", path.display()))
}

/// One vertex path per line.
pub fn load_paths(cage: &Cage, path: &FsPath) -> Result<Vec<Path>> {
    read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, l)| {
            cage.path(l)
                .with_context(|| format!("{}:{}: bad path {l:?}", path.display(), i + 1))
        })
        .collect()
}

/// One move encoding per line.
pub fn load_encodings(path: &FsPath) -> Result<Vec<Encoding>> {
    read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, l)| {
            l.parse::<Encoding>()
                .with_context(|| format!("{}:{}: bad encoding {l:?}", path.display(), i + 1))
        })
        .collect()
}

/// Rows `target v1 v2 ...` for require/preclude files.
pub fn load_rule_rows(path: &FsPath) -> Result<Vec<(char, Vec<char>)>> {
    read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let mut tokens = l.split_whitespace();
            let target = single_char(tokens.next().unwrap_or_default(), path, i)?;
            let visited = tokens
                .map(|t| single_char(t, path, i))
                .collect::<Result<Vec<_>>>()?;
            Ok((target, visited))
        })
        .collect()
}

/// One label suffix per line.
pub fn load_ends(cage: &Cage, path: &FsPath) -> Result<Vec<Vec<Vertex>>> {
    read_lines(path)?
        .iter()
        .map(|l| {
            l.chars()
                .map(|c| cage.vertex(c).map_err(anyhow::Error::from))
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

/// Labels, one per line or run together on a line.
pub fn load_labels(cage: &Cage, path: &FsPath) -> Result<Vec<Vertex>> {
    read_lines(path)?
        .iter()
        .flat_map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
        .map(|c| cage.vertex(c).map_err(anyhow::Error::from))
        .collect()
}

pub fn load_degeneracy(cage: &Cage, path: &FsPath) -> Result<DegeneracyTable> {
    let rows: Vec<Vec<char>> = read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, l)| {
            l.split_whitespace()
                .map(|t| single_char(t, path, i))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<_>>()?;
    DegeneracyTable::from_rows(cage, &rows)
        .with_context(|| format!("loading degeneracy table {}", path.display()))
}

/// `ab 1` rows, or the older `L 1 a b` / `S 0 a b` rows with an edge-kind tag.
pub fn parse_constraint(cage: &Cage, line: &str) -> Result<Constraint> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (a, b, flag) = match tokens.as_slice() {
        [edge, flag] => {
            let mut cs = edge.chars();
            match (cs.next(), cs.next(), cs.next()) {
                (Some(a), Some(b), None) => (a, b, *flag),
                _ => bail!("edge {edge:?} must be two labels"),
            }
        }
        [kind, flag, a, b] if matches!(*kind, "L" | "S") => {
            let one = |t: &str| -> Result<char> {
                let mut cs = t.chars();
                match (cs.next(), cs.next()) {
                    (Some(c), None) => Ok(c),
                    _ => bail!("expected a single label, found {t:?}"),
                }
            };
            (one(*a)?, one(*b)?, *flag)
        }
        _ => bail!("unrecognised constraint line {line:?}"),
    };
    let present = match flag {
        "1" => true,
        "0" => false,
        other => bail!("constraint flag must be 0 or 1, found {other:?}"),
    };
    Ok(Constraint::from_labels(cage, a, b, present)?)
}

pub fn load_constraints(cage: &Cage, path: &FsPath) -> Result<Vec<Constraint>> {
    read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, l)| {
            parse_constraint(cage, l).with_context(|| format!("{}:{}", path.display(), i + 1))
        })
        .collect()
}
