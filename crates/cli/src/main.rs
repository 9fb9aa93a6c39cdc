use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hampath::api::{
    expand, filter, infer, instantiate, rank_preferred, reduce, trim, trim_encoding, Bidirectional,
    Cage, Edge, EdgeKind, Encoding, Extension, Forward, Frontier, GenerateCfg, Generator, Inference,
    Occupancy, Path, RealizeCfg, Realizer, Rules, Summary, SymmetryGroup, Vertex, MS2_BEST,
    MS2_PREFERRED,
};
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path as FsPath, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod output;
mod provenance;

use input::{CageArgs, DegeneracyArgs};
use output::{checkpoint_path, CheckpointStore, TableRow};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Generate, reduce, constrain and realize paths on polyhedral cages")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Group {
    /// Reversal, mirror and both
    Full,
    /// Only the reverse-mirror (same path read from its other end)
    Direction,
}

impl From<Group> for SymmetryGroup {
    fn from(g: Group) -> Self {
        match g {
            Group::Full => SymmetryGroup::Full,
            Group::Direction => SymmetryGroup::Direction,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Grow paths length by length, checkpointing every length
    Generate {
        #[command(flatten)]
        cage: CageArgs,
        /// Start paths, all the same length
        #[arg(short, long)]
        start: PathBuf,
        /// Rows `target v1 v2 ...`: moving to target needs v1, v2, ... visited
        #[arg(short, long)]
        require: Option<PathBuf>,
        /// Rows `target v1 v2 ...`: moving to target is illegal once any is visited
        #[arg(short, long)]
        preclude: Option<PathBuf>,
        /// Accepted path endings, one label suffix per line
        #[arg(short, long)]
        end: Option<PathBuf>,
        /// Output lengths (default: number of vertices)
        #[arg(short, long, value_delimiter = ',')]
        length: Vec<usize>,
        /// Resume from the checkpoint of this length
        #[arg(short, long)]
        iteration: Option<usize>,
        /// Grow at both ends; needs a degeneracy table
        #[arg(short, long)]
        both: bool,
        #[command(flatten)]
        degeneracy: DegeneracyArgs,
        /// Map frontiers on one thread
        #[arg(long)]
        sequential: bool,
        #[arg(short, long, default_value = "paths")]
        output: PathBuf,
    },
    /// Reduce a path set to one move encoding per symmetry class
    Reduce {
        #[command(flatten)]
        cage: CageArgs,
        #[arg(short, long)]
        paths: PathBuf,
        /// Input lines are move encodings, not vertex labels
        #[arg(short, long)]
        moves: bool,
        #[arg(short, long, value_enum, default_value = "full")]
        group: Group,
        /// Strip rotation moves outside the first and last switch first
        #[arg(short, long)]
        trim: bool,
        /// Write the full symmetric closure instead of representatives
        #[arg(long)]
        expand: bool,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Copy paths into symmetric frames of the cage
    Realize {
        #[command(flatten)]
        cage: CageArgs,
        #[arg(short, long)]
        paths: PathBuf,
        #[command(flatten)]
        degeneracy: DegeneracyArgs,
        /// Frames to realize into (default: every frame of the table)
        #[arg(short, long)]
        frames: Option<PathBuf>,
        /// Add each instance read backwards
        #[arg(short, long)]
        backwards: bool,
        /// Also write move notation of every instance
        #[arg(short, long)]
        moves: bool,
        /// Instance table with occupancy bits (.csv or .parquet)
        #[arg(long)]
        table: Option<PathBuf>,
        #[arg(short, long, default_value = "realized")]
        output: PathBuf,
    },
    /// Walk move encodings from chosen start vertices
    Instantiate {
        #[command(flatten)]
        cage: CageArgs,
        /// Move encodings, one per line
        #[arg(short, long)]
        encodings: PathBuf,
        /// Start vertices (default: the MS2 start hubs with --preset ms2)
        #[arg(short, long)]
        starts: Option<PathBuf>,
        /// Instance table with occupancy bits (.csv or .parquet)
        #[arg(short, long)]
        table: PathBuf,
    },
    /// Filter paths by edge constraints and report inferred edges
    Constrain {
        #[command(flatten)]
        cage: CageArgs,
        #[arg(short, long)]
        paths: PathBuf,
        /// Rows `ab 1` (edge present) / `ab 0` (absent), or `L 1 a b`
        #[arg(short = 'x', long)]
        constraints: PathBuf,
        /// Also write move notation of passing paths
        #[arg(short, long)]
        moves: bool,
        /// Best reference encoding counted in the summary
        #[arg(long)]
        best: Option<String>,
        /// Reference encodings listed first
        #[arg(long)]
        preferred: Option<PathBuf>,
        #[arg(short, long, default_value = "constrained")]
        output: PathBuf,
    },
    /// Derive (or check) the rotational degeneracy table of a cage
    Symmetry {
        #[command(flatten)]
        cage: CageArgs,
        #[arg(long)]
        reference: Option<char>,
        /// Check this table instead of deriving one
        #[arg(long)]
        check: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report {
        /// Also log the shape of an exported table
        #[arg(long)]
        table: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            cage,
            start,
            require,
            preclude,
            end,
            length,
            iteration,
            both,
            degeneracy,
            sequential,
            output,
        } => generate(GenerateArgs {
            cage,
            start,
            require,
            preclude,
            end,
            length,
            iteration,
            both,
            degeneracy,
            sequential,
            output,
        }),
        Action::Reduce {
            cage,
            paths,
            moves,
            group,
            trim,
            expand,
            output,
        } => reduce_cmd(&cage, &paths, moves, group, trim, expand, &output),
        Action::Realize {
            cage,
            paths,
            degeneracy,
            frames,
            backwards,
            moves,
            table,
            output,
        } => realize_cmd(
            &cage,
            &paths,
            &degeneracy,
            frames.as_deref(),
            backwards,
            moves,
            table.as_deref(),
            &output,
        ),
        Action::Instantiate {
            cage,
            encodings,
            starts,
            table,
        } => instantiate_cmd(&cage, &encodings, starts.as_deref(), &table),
        Action::Constrain {
            cage,
            paths,
            constraints,
            moves,
            best,
            preferred,
            output,
        } => constrain_cmd(
            &cage,
            &paths,
            &constraints,
            moves,
            best.as_deref(),
            preferred.as_deref(),
            &output,
        ),
        Action::Symmetry {
            cage,
            reference,
            check,
            output,
        } => symmetry_cmd(&cage, reference, check.as_deref(), output.as_deref()),
        Action::Report { table } => report(table.as_deref()),
    }
}

struct GenerateArgs {
    cage: CageArgs,
    start: PathBuf,
    require: Option<PathBuf>,
    preclude: Option<PathBuf>,
    end: Option<PathBuf>,
    length: Vec<usize>,
    iteration: Option<usize>,
    both: bool,
    degeneracy: DegeneracyArgs,
    sequential: bool,
    output: PathBuf,
}

fn stem(path: &FsPath) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "paths".to_string())
}

fn generate(args: GenerateArgs) -> Result<()> {
    if args.both && !args.degeneracy.is_set() {
        bail!("--both requires --degeneracy or --derive-degeneracy");
    }
    let cage = args.cage.load()?;
    let starts = input::load_paths(&cage, &args.start)?;
    let first = Frontier::from_starts(starts)?;
    let rules = Rules::from_labels(
        &cage,
        &match &args.require {
            Some(p) => input::load_rule_rows(p)?,
            None => Vec::new(),
        },
        &match &args.preclude {
            Some(p) => input::load_rule_rows(p)?,
            None => Vec::new(),
        },
    )?;
    let ends = match &args.end {
        Some(p) => input::load_ends(&cage, p)?,
        None => Vec::new(),
    };
    let lengths = if args.length.is_empty() {
        vec![cage.len()]
    } else {
        args.length.clone()
    };

    // Resume: the frontier of the given length is read back from its checkpoint.
    let start = match args.iteration {
        None => {
            output::write_paths(
                &cage,
                &checkpoint_path(&args.output, first.length()),
                first.paths(),
            )?;
            first
        }
        Some(it) => {
            let path = checkpoint_path(&args.output, it);
            let stored = input::load_paths(&cage, &path)?;
            if stored.is_empty() {
                tracing::warn!(length = it, "resuming from an empty checkpoint");
                Frontier::empty(it)
            } else {
                let frontier = Frontier::from_starts(stored)
                    .with_context(|| format!("resuming from {}", path.display()))?;
                if frontier.length() != it {
                    bail!(
                        "{} holds paths of length {}, expected {it}",
                        path.display(),
                        frontier.length()
                    );
                }
                frontier
            }
        }
    };
    tracing::info!(
        vertices = cage.len(),
        start_length = start.length(),
        starts = start.len(),
        ?lengths,
        both = args.both,
        "generate"
    );

    let cfg = GenerateCfg {
        lengths: lengths
            .iter()
            .copied()
            .filter(|&l| l >= start.length())
            .collect(),
        ends,
        parallel: !args.sequential,
    };
    let mut out_lines: Vec<String> = Vec::new();
    // Lengths finished before a resume come straight from their checkpoints.
    let mut earlier: Vec<usize> = lengths
        .iter()
        .copied()
        .filter(|&l| l < start.length())
        .collect();
    earlier.sort_unstable();
    earlier.dedup();
    for l in earlier {
        for p in input::load_paths(&cage, &checkpoint_path(&args.output, l))? {
            if cfg.accepts_end(&p) {
                out_lines.push(cage.path_label(&p));
            }
        }
    }
    if !cfg.lengths.is_empty() {
        let table;
        let both;
        let extension: &dyn Extension = if args.both {
            table = args.degeneracy.load(&cage)?;
            both = Bidirectional::new(&cage, &table)?;
            &both
        } else {
            &Forward
        };
        let mut store = CheckpointStore {
            dir: args.output.clone(),
            cage: &cage,
        };
        let generated = Generator::new(&cage, &rules, extension, cfg).run(start, &mut store)?;
        out_lines.extend(generated.paths().map(|p| cage.path_label(p)));
    }

    let out = args.output.join("paths_out.txt");
    let n = output::write_lines(&out, &out_lines)?;
    tracing::info!(paths = n, out = %out.display(), "generation written");
    let payload = Payload::new(
        "generate",
        json!({
            "lengths": lengths,
            "iteration": args.iteration,
            "both": args.both,
            "sequential": args.sequential,
            "paths": n,
        }),
    )
    .input(Some(&args.start))
    .input(args.require.as_deref())
    .input(args.preclude.as_deref())
    .input(args.end.as_deref())
    .input(args.degeneracy.degeneracy.as_deref());
    write_sidecar(&out, payload)?;
    Ok(())
}

fn reduce_cmd(
    cage_args: &CageArgs,
    paths: &FsPath,
    moves: bool,
    group: Group,
    trim_first: bool,
    closure: bool,
    out: &FsPath,
) -> Result<()> {
    let encodings: Vec<Encoding> = if moves {
        input::load_encodings(paths)?
    } else {
        let cage = cage_args.load()?;
        input::load_paths(&cage, paths)?
            .iter()
            .map(|p| p.encode(&cage).map_err(anyhow::Error::from))
            .collect::<Result<_>>()?
    };
    let read = encodings.len();
    let encodings: Vec<Encoding> = if trim_first {
        encodings
            .iter()
            .filter_map(|e| {
                let t = trim_encoding(e);
                if t.is_none() {
                    tracing::warn!(encoding = %e, "no switch move; dropped");
                }
                t
            })
            .collect()
    } else {
        encodings
    };
    let reduced = reduce(encodings, group.into());
    let written = if closure {
        let all = expand(reduced.iter().cloned(), group.into());
        output::write_encodings(out, &all)?
    } else {
        output::write_encodings(out, &reduced)?
    };
    tracing::info!(read, classes = reduced.len(), written, "reduce");
    let payload = Payload::new(
        "reduce",
        json!({
            "moves_input": moves,
            "group": format!("{group:?}"),
            "trim": trim_first,
            "expand": closure,
            "read": read,
            "written": written,
        }),
    )
    .input(Some(paths));
    write_sidecar(out, payload)?;
    Ok(())
}

fn occupancy_rows(cage: &Cage, paths: &[Path]) -> Result<Vec<TableRow>> {
    let blank = Occupancy::blank(cage);
    paths
        .iter()
        .map(|p| -> Result<TableRow> {
            let moves = p.encode(cage)?;
            let occ = blank.marked(cage, p)?;
            Ok(TableRow::new(cage, p, &moves, occ))
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn realize_cmd(
    cage_args: &CageArgs,
    paths: &FsPath,
    degeneracy: &DegeneracyArgs,
    frames: Option<&FsPath>,
    backwards: bool,
    moves: bool,
    table_out: Option<&FsPath>,
    out_dir: &FsPath,
) -> Result<()> {
    let cage = cage_args.load()?;
    let table = degeneracy.load(&cage)?;
    let frames = match frames {
        Some(f) => input::load_labels(&cage, f)?,
        None => Vec::new(),
    };
    let realizer = Realizer::new(&cage, &table, RealizeCfg { frames, backwards })?;
    let input_paths = input::load_paths(&cage, paths)?;
    let instances = realizer.realize_all(&input_paths)?;
    let name = stem(paths);
    let out = out_dir.join(format!("{name}_realized.txt"));
    let n = output::write_paths(&cage, &out, &instances)?;
    tracing::info!(paths = input_paths.len(), frames = realizer.frames().len(), instances = n, "realize");
    let params = json!({
        "frames": realizer.frames().iter().map(|&v| cage.label(v).to_string()).collect::<Vec<_>>(),
        "backwards": backwards,
        "instances": n,
    });
    write_sidecar(
        &out,
        Payload::new("realize", params.clone())
            .input(Some(paths))
            .input(degeneracy.degeneracy.as_deref()),
    )?;
    if moves {
        let m_out = out_dir.join(format!("{name}_moves_realized.txt"));
        let encs = hampath::api::encode_all(&cage, &instances)?;
        output::write_encodings(&m_out, &encs)?;
        write_sidecar(&m_out, Payload::new("realize", params.clone()).input(Some(paths)))?;
    }
    if let Some(t) = table_out {
        let list: Vec<Path> = instances.into_iter().collect();
        output::write_table(t, &occupancy_rows(&cage, &list)?)?;
        write_sidecar(t, Payload::new("realize", params).input(Some(paths)))?;
    }
    Ok(())
}

fn instantiate_cmd(
    cage_args: &CageArgs,
    encodings: &FsPath,
    starts_file: Option<&FsPath>,
    table_out: &FsPath,
) -> Result<()> {
    let cage = cage_args.load()?;
    let starts: Vec<Vertex> = match starts_file {
        Some(f) => input::load_labels(&cage, f)?,
        None if cage_args.is_ms2() => hampath::api::ms2_start_labels()
            .into_iter()
            .map(|c| cage.vertex(c))
            .collect::<hampath::api::Result<_>>()?,
        None => bail!("--starts is required unless --preset ms2 is used"),
    };
    let encs = input::load_encodings(encodings)?;
    let result = instantiate(&cage, &encs, &starts)?;
    println!("CHECK UNIQUE: {} of {}", result.distinct, result.instances.len());
    let rows: Vec<TableRow> = result
        .instances
        .into_iter()
        .map(|i| TableRow::new(&cage, &i.path, &i.moves, i.occupancy))
        .collect();
    output::write_table(table_out, &rows)?;
    write_sidecar(
        table_out,
        Payload::new(
            "instantiate",
            json!({
                "starts": starts.len(),
                "encodings": encs.len(),
                "distinct": result.distinct,
            }),
        )
        .input(Some(encodings))
        .input(starts_file),
    )?;
    Ok(())
}

/// `<stem>_inferred.json`: forced edge values by label, split by kind.
#[derive(Debug, Default, Serialize)]
struct InferredDoc {
    solutions: bool,
    long: BTreeMap<String, bool>,
    short: BTreeMap<String, bool>,
}

fn print_summary(s: &Summary) {
    let line = |label: &str, n: usize| {
        let body = format!("**   {label:<10} {n}");
        format!("{body:<28}**")
    };
    println!("\n******************************");
    println!("**                          **");
    println!("{}", line("original:", s.original));
    println!("{}", line("processed:", s.processed));
    println!("{}", line("best:", s.best));
    println!("**                          **");
    println!("******************************\n");
}

fn print_inferred(cage: &Cage, inference: &Inference) {
    let Inference::Inferred { long, short } = inference else {
        println!("\nNO SOLUTIONS");
        return;
    };
    for (kind, map) in [(EdgeKind::Long, long), (EdgeKind::Short, short)] {
        println!("inferred {kind} edges: {}", map.len());
        for (&e, &v) in map {
            println!("  {} {}", cage.edge_label(e), u8::from(v));
        }
    }
}

fn constrain_cmd(
    cage_args: &CageArgs,
    paths: &FsPath,
    constraints: &FsPath,
    moves: bool,
    best: Option<&str>,
    preferred: Option<&FsPath>,
    out_dir: &FsPath,
) -> Result<()> {
    let cage = cage_args.load()?;
    let cs = input::load_constraints(&cage, constraints)?;
    let all = input::load_paths(&cage, paths)?;
    let partition = filter(&cage, all.clone(), &cs)?;
    let inference = infer(&cage, &partition.pass, &cs)?;

    let name = stem(paths);
    let out = out_dir.join(format!("{name}_constrained.txt"));
    let n = output::write_paths(&cage, &out, &partition.pass)?;
    let params = json!({
        "constraints": cs.len(),
        "input": all.len(),
        "pass": n,
    });
    write_sidecar(
        &out,
        Payload::new("constrain", params.clone())
            .input(Some(paths))
            .input(Some(constraints)),
    )?;
    if moves {
        let m_out = out_dir.join(format!("{name}_constrained_moves.txt"));
        let encs: Vec<Encoding> = partition
            .pass
            .iter()
            .map(|p| p.encode(&cage))
            .collect::<hampath::api::Result<_>>()?;
        output::write_encodings(&m_out, &encs)?;
        write_sidecar(&m_out, Payload::new("constrain", params.clone()).input(Some(paths)))?;
    }

    let inferred_out = out_dir.join(format!("{name}_inferred.json"));
    let labelled = |m: &BTreeMap<Edge, bool>| -> BTreeMap<String, bool> {
        m.iter().map(|(&e, &v)| (cage.edge_label(e), v)).collect()
    };
    let doc = match &inference {
        Inference::NoSolutions => InferredDoc::default(),
        Inference::Inferred { long, short } => InferredDoc {
            solutions: true,
            long: labelled(long),
            short: labelled(short),
        },
    };
    std::fs::write(&inferred_out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", inferred_out.display()))?;
    write_sidecar(&inferred_out, Payload::new("constrain", params).input(Some(constraints)))?;

    // Presentation: trimmed forms, references first.
    let best: Option<Encoding> = match best {
        Some(s) => Some(s.parse()?),
        None if cage_args.is_ms2() => Some(MS2_BEST.parse()?),
        None => None,
    };
    let preferred: Vec<Encoding> = match preferred {
        Some(p) => input::load_encodings(p)?,
        None if cage_args.is_ms2() => MS2_PREFERRED
            .iter()
            .map(|s| s.parse())
            .collect::<hampath::api::Result<_>>()?,
        None => Vec::new(),
    };
    if let Some(best) = &best {
        print_summary(&Summary::of(&cage, &all, &partition.pass, best)?);
    }
    let mut shown = Vec::new();
    for p in &partition.pass {
        let m = p.encode(&cage)?;
        shown.push(match trim(p, &m) {
            Some(t) => (t.moves, t.path),
            None => (m, p.clone()),
        });
    }
    shown.sort();
    shown.dedup();
    let shown = rank_preferred(shown, &preferred, |(m, _)| m);
    if !shown.is_empty() && shown.len() < 20 {
        println!("SOLUTION PATHS\n");
        for (m, p) in shown.iter().take(5) {
            println!("{m}  {}", cage.path_label(p));
        }
        println!();
    }
    print_inferred(&cage, &inference);
    Ok(())
}

fn symmetry_cmd(
    cage_args: &CageArgs,
    reference: Option<char>,
    check: Option<&FsPath>,
    out: Option<&FsPath>,
) -> Result<()> {
    let cage = cage_args.load()?;
    let table = match check {
        Some(path) => {
            let table = input::load_degeneracy(&cage, path)?;
            let bad: String = table
                .non_symmetric_frames(&cage)
                .into_iter()
                .map(|v| cage.label(v))
                .collect();
            match table.check_covers(&cage) {
                Ok(()) => println!("frames: {} (every vertex covered)", table.len()),
                Err(e) => println!("frames: {} ({e})", table.len()),
            }
            if bad.is_empty() {
                println!("every frame preserves moves");
            } else {
                println!("frames that do not preserve moves: {bad}");
            }
            table
        }
        None => DegeneracyArgs {
            degeneracy: None,
            derive_degeneracy: true,
            reference,
        }
        .load(&cage)?,
    };
    let rows: Vec<String> = table
        .to_label_rows(&cage)
        .iter()
        .map(|r| {
            r.chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    match out {
        Some(path) => {
            output::write_lines(path, &rows)?;
            write_sidecar(
                path,
                Payload::new("symmetry", json!({"frames": table.len()}))
                    .input(cage_args.connectivity.as_deref())
                    .input(check),
            )?;
        }
        None if check.is_none() => {
            for r in &rows {
                println!("{r}");
            }
        }
        None => {}
    }
    Ok(())
}

fn report(table: Option<&FsPath>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "hampath_version": hampath::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    if let Some(t) = table {
        let df = match t.extension().and_then(|e| e.to_str()) {
            Some("parquet") => LazyFrame::scan_parquet(t, ScanArgsParquet::default())?
                .limit(5)
                .collect()?,
            _ => LazyCsvReader::new(t)
                .with_infer_schema_length(Some(100))
                .finish()?
                .limit(5)
                .collect()?,
        };
        tracing::info!(rows = df.height(), cols = df.width(), "table_head_shape");
    }
    Ok(())
}
