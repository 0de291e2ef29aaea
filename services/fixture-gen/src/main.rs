//! Nonogram fixture generator.
//!
//! Produces test images for the nonogram solver:
//! - `render`: an empty annotated grid from a constraints file
//! - `overlay`: filled and crossed cells drawn onto a rendered grid

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nonogram_common::{
    suggested_solution_path, CellCoord, FixtureError, LayoutRecord, MarkingSet,
};
use renderer::font::PREFERRED_FONT_PATHS;
use renderer::{ClueFace, GridRenderer, OverlayEditor};
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::LayoutOverrides;

/// Solver binary named in the suggested command line
const DEFAULT_SOLVER: &str = "nonogram-solver";

#[derive(Parser, Debug)]
#[command(name = "fixture-gen")]
#[command(about = "Generate nonogram grid images for solver testing")]
struct Args {
    /// Log level, used when RUST_LOG is unset or invalid
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// YAML configuration file (layout and font candidates)
    #[arg(long, global = true, env = "FIXTURE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an empty grid with clues from a constraints file
    Render(RenderArgs),
    /// Draw filled and crossed cells onto a rendered grid
    Overlay(OverlayArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
struct LayoutArgs {
    /// Cell edge length in pixels
    #[arg(long, env = "FIXTURE_CELL_SIZE")]
    cell_size: Option<u32>,

    /// Margin before the grid on both edges
    #[arg(long, env = "FIXTURE_MARGIN")]
    margin: Option<u32>,

    /// Margin left of the grid (row clue area)
    #[arg(long, env = "FIXTURE_MARGIN_LEFT")]
    margin_left: Option<u32>,

    /// Margin above the grid (column clue area)
    #[arg(long, env = "FIXTURE_MARGIN_TOP")]
    margin_top: Option<u32>,
}

impl From<&LayoutArgs> for LayoutOverrides {
    fn from(args: &LayoutArgs) -> Self {
        LayoutOverrides {
            cell_size: args.cell_size,
            margin: args.margin,
            margin_left: args.margin_left,
            margin_top: args.margin_top,
        }
    }
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Constraints JSON file
    #[arg(short, long)]
    constraints: PathBuf,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Font file to try before the built-in face (repeatable)
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Do not write the `.layout.json` record next to the image
    #[arg(long)]
    no_sidecar: bool,

    /// Solver binary shown in the suggested command
    #[arg(long, env = "FIXTURE_SOLVER", default_value = DEFAULT_SOLVER)]
    solver: String,
}

#[derive(clap::Args, Debug)]
struct OverlayArgs {
    /// Rendered grid image
    #[arg(short, long)]
    input: PathBuf,

    /// Output image path (must differ from the input)
    #[arg(short, long)]
    output: PathBuf,

    /// JSON file with `filled` and `crossed` cell lists
    #[arg(long)]
    markings: Option<PathBuf>,

    /// Cell to fill, as `row,col` (repeatable)
    #[arg(long = "filled", value_name = "ROW,COL")]
    filled: Vec<CellCoord>,

    /// Cell to cross out, as `row,col` (repeatable)
    #[arg(long = "crossed", value_name = "ROW,COL")]
    crossed: Vec<CellCoord>,

    #[command(flatten)]
    layout: LayoutArgs,
}

fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args.log_level, args.json_logs) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{:#}", err), "fixture-gen failed");
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref(), log_level);

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// RUST_LOG directives when they parse, otherwise `log_level` for every target.
fn log_filter(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }

    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
}

/// 2 for invalid input, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<FixtureError>())
        .map(FixtureError::exit_code)
        .unwrap_or(1)
}

fn run(args: Args) -> Result<()> {
    let file_config = config::load_file_config(args.config.as_deref())?;

    match args.command {
        Command::Render(render) => run_render(render, &file_config),
        Command::Overlay(overlay) => run_overlay(overlay, &file_config),
    }
}

fn run_render(args: RenderArgs, file_config: &config::FileConfig) -> Result<()> {
    let layout = config::render_layout(&LayoutOverrides::from(&args.layout), file_config);
    let candidates = config::font_candidates(&args.fonts, file_config, PREFERRED_FONT_PATHS);
    let renderer = GridRenderer::new(ClueFace::resolve(candidates.as_slice()));

    info!(
        constraints = %args.constraints.display(),
        output = %args.output.display(),
        "Rendering grid"
    );

    let record = renderer
        .render_file(&args.constraints, &layout, &args.output, !args.no_sidecar)
        .with_context(|| format!("Failed to render {}", args.constraints.display()))?;

    print_render_summary(&args, &record, renderer.face());
    Ok(())
}

fn print_render_summary(args: &RenderArgs, record: &LayoutRecord, face: &ClueFace) {
    let geometry = record.geometry();
    let (width, height) = geometry.canvas_size().unwrap_or_default();
    let layout = record.layout;

    println!("Rendered {} ({}x{} px)", args.output.display(), width, height);
    println!("  grid:        {}x{}", record.width, record.height);
    println!("  cell size:   {}", layout.cell_size);
    println!("  margins:     left {}, top {}", layout.margin_left, layout.margin_top);
    println!("  clue font:   {}", face);
    if !args.no_sidecar {
        println!(
            "  layout:      {}",
            LayoutRecord::sidecar_path(&args.output).display()
        );
    }

    let solution = suggested_solution_path(&args.output);
    let solver_args = record.solver_args(&args.output, &args.constraints, &solution);
    println!();
    println!("Solve with:");
    println!("  {}", shell_line(&args.solver, &solver_args));
}

/// Render a command as a copy-pasteable line, one flag per continuation.
fn shell_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        if arg.starts_with("--") {
            line.push_str(" \\\n    ");
        } else {
            line.push(' ');
        }
        line.push_str(&quote(arg));
    }
    line
}

fn quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_alphanumeric() || "-_./,=:".contains(c)) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

fn run_overlay(args: OverlayArgs, file_config: &config::FileConfig) -> Result<()> {
    let markings = collect_markings(&args)?;
    let recorded = LayoutRecord::read_for(&args.input)?.map(|record| record.layout);
    let requested = config::overlay_layout(&LayoutOverrides::from(&args.layout), file_config, recorded);

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        filled = markings.filled.len(),
        crossed = markings.crossed.len(),
        "Applying overlay"
    );

    let outcome = OverlayEditor::overlay_file(&args.input, &args.output, &markings, requested)
        .with_context(|| format!("Failed to overlay {}", args.input.display()))?;

    println!(
        "Wrote {} ({} filled, {} crossed)",
        outcome.output.display(),
        outcome.filled,
        outcome.crossed
    );
    println!(
        "  layout: cell size {}, margins left {}, top {}{}",
        outcome.layout.cell_size,
        outcome.layout.margin_left,
        outcome.layout.margin_top,
        if outcome.record.is_some() { " (checked against layout record)" } else { "" }
    );
    Ok(())
}

/// File markings first, then `--filled`/`--crossed` flags in order.
fn collect_markings(args: &OverlayArgs) -> Result<MarkingSet> {
    let mut markings = match &args.markings {
        Some(path) => load_markings(path)?,
        None => MarkingSet::default(),
    };
    markings.extend(MarkingSet::new(args.filled.clone(), args.crossed.clone()));
    Ok(markings)
}

fn load_markings(path: &Path) -> Result<MarkingSet> {
    let markings = MarkingSet::from_file(path)?;
    tracing::debug!(path = %path.display(), count = markings.len(), "Loaded markings");
    Ok(markings)
}
