//! Writers: line-oriented path files, per-length checkpoints, instance tables.

use anyhow::{Context, Result};
use hampath::api::{Cage, EdgeKind, Encoding, Frontier, FrontierStore, Occupancy, Path};
use polars::prelude::*;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path as FsPath, PathBuf};

fn create(path: &FsPath) -> Result<BufWriter<fs::File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn write_lines<I, S>(path: &FsPath, lines: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut w = create(path)?;
    let mut n = 0;
    for line in lines {
        writeln!(w, "{}", line.as_ref()).with_context(|| format!("writing {}", path.display()))?;
        n += 1;
    }
    w.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(n)
}

pub fn write_paths<'p, I>(cage: &Cage, path: &FsPath, paths: I) -> Result<usize>
where
    I: IntoIterator<Item = &'p Path>,
{
    write_lines(path, paths.into_iter().map(|p| cage.path_label(p)))
}

pub fn write_encodings<'e, I>(path: &FsPath, encodings: I) -> Result<usize>
where
    I: IntoIterator<Item = &'e Encoding>,
{
    write_lines(path, encodings.into_iter().map(|e| e.to_string()))
}

pub fn checkpoint_path(dir: &FsPath, length: usize) -> PathBuf {
    dir.join(format!("paths_{length:02}.txt"))
}

/// Writes every completed frontier to `paths_NN.txt`.
pub struct CheckpointStore<'a> {
    pub dir: PathBuf,
    pub cage: &'a Cage,
}

impl FrontierStore for CheckpointStore<'_> {
    type Error = anyhow::Error;

    fn store(&mut self, frontier: &Frontier) -> Result<()> {
        let path = checkpoint_path(&self.dir, frontier.length());
        write_paths(self.cage, &path, frontier.paths())?;
        tracing::debug!(path = %path.display(), "checkpoint written");
        Ok(())
    }
}

/// One row of an instance table.
pub struct TableRow {
    pub path: String,
    pub moves: String,
    pub start: String,
    pub occupancy: Occupancy,
}

impl TableRow {
    pub fn new(cage: &Cage, path: &Path, moves: &Encoding, occupancy: Occupancy) -> Self {
        Self {
            path: cage.path_label(path),
            moves: moves.to_string(),
            start: path
                .first()
                .map(|v| cage.label(v).to_string())
                .unwrap_or_default(),
            occupancy,
        }
    }
}

pub fn table_frame(rows: &[TableRow]) -> Result<DataFrame> {
    let df = df!(
        "path" => rows.iter().map(|r| r.path.clone()).collect::<Vec<_>>(),
        "moves" => rows.iter().map(|r| r.moves.clone()).collect::<Vec<_>>(),
        "start" => rows.iter().map(|r| r.start.clone()).collect::<Vec<_>>(),
        "long_bits" => rows.iter().map(|r| r.occupancy.bits(EdgeKind::Long)).collect::<Vec<_>>(),
        "short_bits" => rows.iter().map(|r| r.occupancy.bits(EdgeKind::Short)).collect::<Vec<_>>(),
        "long_used" => rows.iter().map(|r| r.occupancy.used(EdgeKind::Long) as u32).collect::<Vec<_>>(),
        "short_used" => rows.iter().map(|r| r.occupancy.used(EdgeKind::Short) as u32).collect::<Vec<_>>()
    )?;
    Ok(df)
}

/// CSV, or Parquet when the extension is `.parquet`.
pub fn write_table(path: &FsPath, rows: &[TableRow]) -> Result<()> {
    let mut df = table_frame(rows)?;
    let file = create(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(file)
                .finish(&mut df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        _ => {
            CsvWriter::new(file)
                .include_header(true)
                .finish(&mut df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }
    tracing::info!(rows = df.height(), path = %path.display(), "table written");
    Ok(())
}
