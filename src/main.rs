//! cubescan CLI
//!
//! Usage:
//!   cubescan --dir ./faces                      # U.png, R.png, ... in one directory
//!   cubescan --face U=up.jpg --face R=right.jpg ...  # explicit face images
//!   cubescan --state "UUUUUUUUU RRRRRRRRR ..."  # rebalance a raw state only
//!   cubescan --serve                            # HTTP API server
//!   cubescan --dir ./faces --json               # JSON output

use clap::{CommandFactory, Parser};
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;

use cubescan::core::{run_server, CubeAssembler, FaceImages, GlobalStateRepair, ImageSource};
use cubescan::types::{ColorSymbol, CubeState, GlobalRepairReport, ScanConfig, ScanReport};
use cubescan::{CANVAS_SIZE, MAX_CANVAS_SIZE, MIN_CANVAS_SIZE, VERSION};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

lazy_static! {
    static ref FACE_ARG: Regex = Regex::new(r"^\s*([URFDLBurfdlb])\s*=\s*(.+?)\s*$").unwrap();
}

#[derive(Parser, Debug)]
#[command(
    name = "cubescan",
    version = VERSION,
    about = "Detect a Rubik's Cube state string from six face photos",
    long_about = "cubescan samples a 3x3 grid on each face photo, classifies every sticker\n\
                  by HSV range, and rebalances the result to nine stickers of each color.\n\n\
                  Face order: U (white), R (red), F (green), D (yellow), L (orange), B (blue)\n\n\
                  Modes:\n  \
                  --dir / --face  Scan six images\n  \
                  --state         Rebalance a raw 54-char state\n  \
                  --serve         HTTP API server"
)]
struct Args {
    /// Directory holding U.png, R.png, F.png, D.png, L.png, B.png (or .jpg/.jpeg)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Face image as FACE=PATH (repeatable, overrides --dir for that face)
    #[arg(short, long = "face", value_name = "FACE=PATH")]
    faces: Vec<String>,

    /// Raw 54-char state to rebalance (no scanning)
    #[arg(long)]
    state: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:5000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show per-face breakdown and info logs
    #[arg(short, long)]
    verbose: bool,

    /// Write grid overlay PNGs for each face into this directory
    #[arg(long, value_name = "DIR")]
    debug_grid: Option<PathBuf>,

    /// Side of the square canvas faces are resized to
    #[arg(
        long,
        default_value_t = CANVAS_SIZE,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_CANVAS_SIZE)..=i64::from(MAX_CANVAS_SIZE))
    )]
    canvas_size: u32,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            canvas_size: self.canvas_size,
            debug_dir: self.debug_grid.clone(),
            ..ScanConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose || args.serve);

    let result = if args.serve {
        run_serve(&args).await
    } else if let Some(ref state) = args.state {
        run_repair(state, &args)
    } else if args.dir.is_some() || !args.faces.is_empty() {
        run_scan(&args)
    } else {
        let _ = Args::command().print_help();
        std::process::exit(2);
    };

    if let Err(e) = result {
        if args.no_color {
            eprintln!("error: {}", e);
        } else {
            eprintln!("{} {}", "error:".red().bold(), e);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--json` output stays parseable
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Scan six face images
fn run_scan(args: &Args) -> CliResult<()> {
    let images = collect_images(args)?;
    let assembler = CubeAssembler::new(args.scan_config());
    let report = assembler.assemble(&images)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if args.verbose {
            print_verbose_scan(&report, args.no_color);
        }
        if args.no_color {
            println!("{}", report.to_parseable_string());
        } else {
            println!("{}", report.to_terminal_string());
        }
    }
    print_residual_warning(&report.global, args.no_color);
    Ok(())
}

/// Rebalance a raw state string
fn run_repair(raw: &str, args: &Args) -> CliResult<()> {
    let state: CubeState = raw.parse()?;
    let report = GlobalStateRepair::new().repair_state(&state)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("before: {}", report.counts_before);
        println!("after:  {}", report.counts_after);
        println!("moved:  {:?}", report.changed_positions);
        println!("{}", report.cube_state);
    }
    print_residual_warning(&report, args.no_color);
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> CliResult<()> {
    println!();
    println!("cubescan API server v{}", VERSION);
    println!();
    run_server(&args.addr, args.scan_config()).await
}

/// Merge `--dir` and `--face` into one mapping
fn collect_images(args: &Args) -> CliResult<FaceImages> {
    let mut images = match &args.dir {
        Some(dir) => FaceImages::from_dir(dir),
        None => FaceImages::new(),
    };
    for arg in &args.faces {
        let (face, path) = parse_face_arg(arg)?;
        images.insert(face, ImageSource::Path(path));
    }
    Ok(images)
}

/// Parse `FACE=PATH` (face letter case-insensitive)
fn parse_face_arg(arg: &str) -> CliResult<(ColorSymbol, PathBuf)> {
    let caps = FACE_ARG
        .captures(arg)
        .ok_or_else(|| format!("expected FACE=PATH with FACE one of U,R,F,D,L,B, got '{}'", arg))?;
    let face: ColorSymbol = caps[1].to_uppercase().parse()?;
    Ok((face, PathBuf::from(&caps[2])))
}

/// Print per-face raw and repaired sequences
fn print_verbose_scan(report: &ScanReport, no_color: bool) {
    println!("┌─────────────────────────────────────────────");
    for face in &report.faces {
        let line = format!(
            "│ {}  raw={}  repaired={}  {}",
            face.face,
            face.raw,
            face.repaired,
            face.reason.code()
        );
        if no_color || !face.reason.modified() {
            println!("{}", line);
        } else {
            println!("{}", line.yellow());
        }
        println!("│    {}", face.counts_after);
    }
    println!("├─────────────────────────────────────────────");
    println!("│ before: {}", report.global.counts_before);
    println!("│ after:  {}", report.global.counts_after);
    println!("│ {}", report.global.reason);
    println!("└─────────────────────────────────────────────");
}

fn print_residual_warning(report: &GlobalRepairReport, no_color: bool) {
    for (color, n) in report.residual() {
        let msg = format!("warning: still have {} {} stickers", n, color);
        if no_color {
            eprintln!("{}", msg);
        } else {
            eprintln!("{}", msg.yellow());
        }
    }
}
