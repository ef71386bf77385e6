//! Edge-Matching Puzzle Solver
//!
//! Solves a 4x4 puzzle of sixteen square pieces whose edges carry tabs and
//! blanks in four shapes. Every piece in every rotation is tried in the
//! top-left corner, and every complete arrangement where all shared edges
//! fit is printed. Rotated copies of a solution are not merged.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use edgematch::config::{Schedule, Strategy, SweepConfig};
use edgematch::grid::Solution;
use edgematch::pieces::PUZZLE;
use edgematch::solver::{Anchor, SweepReport};
use edgematch::PuzzleOps;

/// Finds every way to lay out the sixteen pieces of a 4x4 edge-matching puzzle.
#[derive(Parser)]
#[command(name = "edgematch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Search engine used for each anchor.
    #[arg(long, value_enum, default_value_t = Strategy::Frontier, global = true)]
    strategy: Strategy,

    /// Run anchors one after another or on a worker pool.
    #[arg(long, value_enum, default_value_t = Schedule::Parallel, global = true)]
    schedule: Schedule,

    /// Worker threads for the parallel schedule (default: one per core).
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Check every printed solution against the fit rules.
    #[arg(long, global = true)]
    verify: bool,

    /// Log per-anchor results.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search every anchor and print all solutions.
    Solve,
    /// Search every anchor and print how many solutions each one found.
    Count,
    /// Search a single anchor and print its solutions.
    Anchor {
        /// Piece placed in the top-left spot (0-15).
        #[arg(long)]
        piece: u8,
        /// Quarter turns applied to that piece (0-3).
        #[arg(long, default_value_t = 0)]
        rotation: u8,
    },
    /// List the pieces and their edge motifs.
    Catalog,
}

impl Cli {
    fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            strategy: self.strategy,
            schedule: self.schedule,
            threads: self.threads,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.sweep_config();
    let puzzle: &dyn PuzzleOps = &PUZZLE;

    match cli.command {
        Some(Command::Solve) | None => run_solve(puzzle, &config, cli.verify),
        Some(Command::Count) => run_count(puzzle, &config),
        Some(Command::Anchor { piece, rotation }) => {
            let anchor = Anchor {
                piece_id: piece,
                rotation,
            };
            run_anchor(puzzle, anchor, config.strategy, cli.verify)
        }
        Some(Command::Catalog) => run_catalog(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Solves the puzzle and prints every solution.
fn run_solve(puzzle: &dyn PuzzleOps, config: &SweepConfig, verify: bool) -> Result<()> {
    let solutions = puzzle.solve(config)?;
    if verify {
        verify_all(puzzle, &solutions)?;
    }

    for (i, solution) in solutions.iter().enumerate() {
        println!("Solution {}:", i + 1);
        println!("{}", puzzle.format_solution(solution));
    }
    println!("Found {} solutions", solutions.len());
    Ok(())
}

/// Prints the per-anchor solution counts.
fn run_count(puzzle: &dyn PuzzleOps, config: &SweepConfig) -> Result<()> {
    let report = puzzle.anchor_counts(config)?;
    println!("{}", format_anchor_counts(&report));
    Ok(())
}

/// Prints the solutions of a single anchor.
fn run_anchor(puzzle: &dyn PuzzleOps, anchor: Anchor, strategy: Strategy, verify: bool) -> Result<()> {
    let solutions = puzzle.search_anchor(anchor, strategy)?;
    if verify {
        verify_all(puzzle, &solutions)?;
    }
    println!("{}", format_anchor_solutions(puzzle, anchor, &solutions));
    Ok(())
}

/// Lists the catalog with motif names.
fn run_catalog() -> Result<()> {
    for piece in PUZZLE.catalog()? {
        let [top, right, bottom, left] = piece.edges;
        println!(
            "{:>2}: [{} {} {} {}]  top {}, right {}, bottom {}, left {}",
            piece.id,
            top,
            right,
            bottom,
            left,
            top.motif(),
            right.motif(),
            bottom.motif(),
            left.motif()
        );
    }
    Ok(())
}

fn verify_all(puzzle: &dyn PuzzleOps, solutions: &[Solution]) -> Result<()> {
    for (i, solution) in solutions.iter().enumerate() {
        puzzle
            .verify_solution(solution)
            .map_err(|violation| anyhow!("solution {} is invalid: {violation}", i + 1))?;
    }
    tracing::info!(solutions = solutions.len(), "all solutions verified");
    Ok(())
}

fn format_anchor_counts(report: &SweepReport) -> String {
    let mut lines = vec![format!(
        "Found {} solutions across {} anchors:\n",
        report.total(),
        report.anchors.len()
    )];
    for count in &report.anchors {
        lines.push(format!(
            "piece {:>2} rotation {}: {}",
            count.anchor.piece_id, count.anchor.rotation, count.solutions
        ));
    }
    lines.join("\n")
}

fn format_anchor_solutions(puzzle: &dyn PuzzleOps, anchor: Anchor, solutions: &[Solution]) -> String {
    let mut output = format!(
        "Anchor piece {} rotation {}: {} solutions\n",
        anchor.piece_id,
        anchor.rotation,
        solutions.len()
    );
    for (i, solution) in solutions.iter().enumerate() {
        output.push_str(&format!("\nSolution {}:\n", i + 1));
        output.push_str(&puzzle.format_solution(solution));
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_counts_snapshot() {
        let report = PUZZLE.anchor_counts(&SweepConfig::default()).unwrap();
        insta::assert_snapshot!("anchor_counts", format_anchor_counts(&report));
    }

    #[test]
    fn test_anchor_solutions_snapshot() {
        let anchor = Anchor {
            piece_id: 0,
            rotation: 1,
        };
        let solutions = PUZZLE.search_anchor(anchor, Strategy::Frontier).unwrap();
        insta::assert_snapshot!(
            "anchor_0_1_solutions",
            format_anchor_solutions(&PUZZLE, anchor, &solutions)
        );
    }

    #[test]
    fn test_solution_count() {
        let solutions = PUZZLE.solve(&SweepConfig::default()).unwrap();
        assert_eq!(solutions.len(), 48);
        assert!(verify_all(&PUZZLE, &solutions).is_ok());
    }

    #[test]
    fn test_cli_flags_build_sweep_config() {
        let cli = Cli::try_parse_from([
            "edgematch",
            "anchor",
            "--piece",
            "3",
            "--rotation",
            "2",
            "--strategy",
            "depth-first",
            "--schedule",
            "sequential",
            "--threads",
            "2",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Some(Command::Anchor {
                piece: 3,
                rotation: 2
            })
        ));
        assert_eq!(
            cli.sweep_config(),
            SweepConfig {
                strategy: Strategy::DepthFirst,
                schedule: Schedule::Sequential,
                threads: Some(2),
            }
        );
    }

    #[test]
    fn test_cli_defaults_to_parallel_frontier() {
        let cli = Cli::try_parse_from(["edgematch"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.sweep_config(), SweepConfig::default());
    }
}
