//! Edge-Matching Puzzle Solver Library
//!
//! Enumerates every placement of square tab-and-blank pieces into a square
//! grid such that all shared edges fit.

pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod pieces;
pub mod solver;

use config::{Strategy, SweepConfig};
use error::Result;
use grid::{Solution, Violation};
use pieces::Puzzle;
use solver::{Anchor, SweepReport};

/// Trait that erases compile-time puzzle parameters for dynamic dispatch.
///
/// The const generics (`SIDE`, `GRID_SIZE`) are hidden behind the vtable,
/// so callers can work with any puzzle without turbofish.
pub trait PuzzleOps {
    fn solve(&self, config: &SweepConfig) -> Result<Vec<Solution>>;
    fn anchor_counts(&self, config: &SweepConfig) -> Result<SweepReport>;
    fn search_anchor(&self, anchor: Anchor, strategy: Strategy) -> Result<Vec<Solution>>;
    fn format_solution(&self, solution: &[index::Placement]) -> String;
    fn verify_solution(&self, solution: &[index::Placement]) -> std::result::Result<(), Violation>;
    fn num_pieces(&self) -> usize;
}

impl<const SIDE: usize, const GRID_SIZE: usize> PuzzleOps for Puzzle<SIDE, GRID_SIZE> {
    fn solve(&self, config: &SweepConfig) -> Result<Vec<Solution>> {
        Puzzle::solve(self, config)
    }

    fn anchor_counts(&self, config: &SweepConfig) -> Result<SweepReport> {
        Puzzle::anchor_counts(self, config)
    }

    fn search_anchor(&self, anchor: Anchor, strategy: Strategy) -> Result<Vec<Solution>> {
        Puzzle::search_anchor(self, anchor, strategy)
    }

    fn format_solution(&self, solution: &[index::Placement]) -> String {
        grid::format_solution::<SIDE, GRID_SIZE>(solution)
    }

    fn verify_solution(&self, solution: &[index::Placement]) -> std::result::Result<(), Violation> {
        grid::verify_solution::<SIDE, GRID_SIZE>(solution)
    }

    fn num_pieces(&self) -> usize {
        self.rows.len()
    }
}
