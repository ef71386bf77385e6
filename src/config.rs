//! Sweep configuration.

use clap::ValueEnum;

/// Which search engine expands an anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Breadth-style expansion holding every partial solution per spot.
    #[default]
    Frontier,
    /// Explicit-stack backtracking; same solutions, lower peak memory.
    DepthFirst,
}

/// How the anchors of a full sweep are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Schedule {
    /// One anchor after another, in anchor order.
    Sequential,
    /// Anchors spread over a rayon worker pool.
    #[default]
    Parallel,
}

/// Options for a full anchor sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepConfig {
    pub strategy: Strategy,
    pub schedule: Schedule,
    /// Worker count for [`Schedule::Parallel`]; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl SweepConfig {
    /// A single-threaded sweep with the given strategy.
    pub fn sequential(strategy: Strategy) -> Self {
        Self {
            strategy,
            schedule: Schedule::Sequential,
            threads: None,
        }
    }
}
