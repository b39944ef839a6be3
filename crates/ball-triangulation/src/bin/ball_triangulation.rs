//! ball-triangulation CLI: solve observer pose from three detected balls.

use std::path::{Path, PathBuf};

use ball_triangulation::{BallOrdering, FrameInput, FrameReport};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[cfg(not(feature = "tracing"))]
use log::{info, warn};
#[cfg(feature = "tracing")]
use tracing::{info, warn};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ball-triangulation")]
#[command(about = "Estimate observer position and heading from three reference balls")]
#[command(version)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a frame described by a JSON input file.
    Solve(SolveArgs),

    /// Solve the built-in green/red/blue demo frame.
    Demo(OutputArgs),
}

#[derive(Debug, Clone, Args)]
struct SolveArgs {
    /// Path to the frame input (JSON).
    #[arg(long)]
    input: PathBuf,

    /// Read balls left to right instead of in input order.
    #[arg(long)]
    sorted: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    /// Path to write the JSON report.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = match cli.command {
        Commands::Solve(args) => run_solve(&args),
        Commands::Demo(args) => run_demo(&args),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// `--log-level` sets the default filter; `RUST_LOG` takes precedence where set.
#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn run_solve(args: &SolveArgs) -> CliResult<()> {
    let mut input = FrameInput::load(&args.input)?;
    if args.sorted {
        input.solver.ordering = BallOrdering::SortedByX;
    }
    info!(
        "loaded {} balls from {}",
        input.balls.len(),
        args.input.display()
    );
    solve_and_report(&input, Some(&args.input), &args.output)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn run_demo(args: &OutputArgs) -> CliResult<()> {
    let input = FrameInput::demo()?;
    for ball in &input.balls {
        info!("{ball}");
    }
    solve_and_report(&input, None, args)
}

fn solve_and_report(
    input: &FrameInput,
    input_path: Option<&Path>,
    output: &OutputArgs,
) -> CliResult<()> {
    let result = input.solve();

    if let Some(out) = &output.out {
        FrameReport::new(input, input_path, &result).write_json(out)?;
        info!("wrote report JSON to {}", out.display());
    }

    match result {
        Ok(t) => {
            println!("{:.6} {:.6} {:.6}", t.pose.x, t.pose.y, t.pose.rotation);
            Ok(())
        }
        Err(err) => {
            warn!("frame {} not solved", input.context.frame_index);
            Err(err.into())
        }
    }
}
