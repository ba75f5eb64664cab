use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use clap::Parser;
use mazewalk::{read_map, sequential, solve_with, SolverConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Sequential,
    /// Parallel search forking after this many steps.
    Parallel(usize),
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "sequential" {
            return Ok(Self::Sequential);
        }

        s.strip_prefix("parallel-")
            .and_then(|n| n.parse().ok())
            .map(Self::Parallel)
            .ok_or_else(|| format!("expected `sequential` or `parallel-N`, got `{s}`"))
    }
}

/// Find a path from the top left corner of a maze to a goal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Map file describing the maze
    map: PathBuf,

    /// `sequential`, or `parallel-N` to fork after N steps
    #[arg(short, long, default_value = "sequential")]
    solver: Mode,

    /// Worker threads for the parallel solver (default: one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Print the maze with the path marked
    #[arg(long)]
    show: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let maze = match read_map(&args.map) {
        Ok(maze) => maze,
        Err(e) => {
            error!(map = %args.map.display(), "{e}");
            return ExitCode::FAILURE;
        }
    };

    let started = Instant::now();
    let result = match args.solver {
        Mode::Sequential => sequential::solve(&maze).map_err(Into::into),
        Mode::Parallel(fork_after) => solve_with(
            &maze,
            &SolverConfig::default().with_fork_after(fork_after).with_threads_option(args.threads),
        ),
    };
    let elapsed = started.elapsed();

    let path = match result {
        Ok(path) => path,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(solver = ?args.solver, ?elapsed, "solved");

    match path {
        Some(path) => {
            println!("{}", path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "));
            if let Some(moves) = maze.moves(&path) {
                println!("{moves}");
            }
            if args.show {
                print!("{}", maze.render_path(&path));
            }
        }
        None => {
            println!("no path");
            if args.show {
                print!("{maze}");
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes() {
        assert_eq!("sequential".parse::<Mode>(), Ok(Mode::Sequential));
        assert_eq!("parallel-12".parse::<Mode>(), Ok(Mode::Parallel(12)));
        assert!("parallel".parse::<Mode>().is_err());
        assert!("parallel-x".parse::<Mode>().is_err());
    }
}
