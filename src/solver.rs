//! Exhaustive edge-matching search.
//!
//! Spot 0 is seeded with an anchor placement; every later spot is filled in
//! row-major order from the candidates the constraint index offers for the
//! edges already placed to its left and above. Pieces are tracked in a `u32`
//! bitmask so the reuse check is a single AND.
//!
//! Key points:
//! - Fixed-size partial solutions, copied by value when they grow
//! - Candidates come straight from the index; no catalog scans
//! - Anchors are independent, so a full sweep can run them on a worker pool

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::{Schedule, Strategy, SweepConfig};
use crate::error::{Error, Result};
use crate::geometry::{Orientation, ROTATIONS};
use crate::grid::{spot_constraint, Solution, SpotConstraint};
use crate::index::{build_constraint_index, ConstraintIndex, Placement};
use crate::pieces::{Piece, Puzzle};

/// The fixed choice of piece and rotation for spot 0 that seeds one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub piece_id: u8,
    pub rotation: u8,
}

impl Anchor {
    /// The placement this anchor puts at spot 0.
    pub fn seed(&self, catalog: &[Piece]) -> Result<Placement> {
        match catalog.get(self.piece_id as usize) {
            Some(piece) if self.rotation < ROTATIONS => Ok(Placement {
                piece_id: piece.id,
                orientation: Orientation::of(piece, self.rotation),
            }),
            _ => Err(Error::InvalidAnchor {
                piece_id: self.piece_id,
                rotation: self.rotation,
            }),
        }
    }
}

/// Every (piece, rotation) anchor, piece-major.
pub fn anchors(num_pieces: usize) -> impl Iterator<Item = Anchor> {
    (0..num_pieces as u8).flat_map(|piece_id| {
        (0..ROTATIONS).map(move |rotation| Anchor { piece_id, rotation })
    })
}

/// A partial solution covering spots `0..len`.
///
/// Uses a fixed-size array and a bitmask of used pieces to avoid heap
/// allocation per placement.
#[derive(Clone, Copy)]
struct PartialSolution<const GRID_SIZE: usize> {
    placements: [Placement; GRID_SIZE],
    len: usize,
    /// Bit `i` set = piece `i` already placed.
    used_pieces: u32,
}

impl<const GRID_SIZE: usize> PartialSolution<GRID_SIZE> {
    fn seeded(seed: Placement) -> Self {
        let mut placements = [Placement::EMPTY; GRID_SIZE];
        placements[0] = seed;
        Self {
            placements,
            len: 1,
            used_pieces: 1 << seed.piece_id,
        }
    }

    #[inline(always)]
    fn placed(&self) -> &[Placement] {
        &self.placements[..self.len]
    }

    #[inline(always)]
    fn uses(&self, piece_id: u8) -> bool {
        self.used_pieces & (1 << piece_id) != 0
    }

    /// A copy of this partial solution with `placement` in the next spot.
    #[inline]
    fn extended(&self, placement: Placement) -> Self {
        let mut next = *self;
        next.placements[next.len] = placement;
        next.len += 1;
        next.used_pieces |= 1 << placement.piece_id;
        next
    }

    fn is_complete(&self) -> bool {
        self.len == GRID_SIZE
    }

    fn to_solution(&self) -> Solution {
        self.placed().to_vec()
    }
}

/// Calls `visit` for every placement that fits `spot`, in index order.
///
/// First-column spots are looked up by their left edge and turned a quarter
/// so the matched edge faces the piece above.
#[inline]
fn for_each_candidate<const SIDE: usize>(
    index: &ConstraintIndex,
    placed: &[Placement],
    spot: usize,
    mut visit: impl FnMut(Placement),
) {
    match spot_constraint::<SIDE>(placed, spot) {
        // spot 0 always comes from the anchor
        SpotConstraint::Free => {}
        SpotConstraint::Left(left) => {
            for &candidate in index.lookup_by_single(left) {
                visit(candidate);
            }
        }
        SpotConstraint::Top(top) => {
            for candidate in index.lookup_by_single(top) {
                visit(Placement {
                    piece_id: candidate.piece_id,
                    orientation: candidate.orientation.quarter_turn(),
                });
            }
        }
        SpotConstraint::LeftTop(left, top) => {
            for &candidate in index.lookup_by_pair(left, top) {
                if candidate.orientation.left == left && candidate.orientation.top == top {
                    visit(candidate);
                }
            }
        }
    }
}

/// Grows the whole frontier one spot at a time until every spot is filled.
fn search_frontier<const SIDE: usize, const GRID_SIZE: usize>(
    index: &ConstraintIndex,
    seed: Placement,
    emit: &mut impl FnMut(Solution),
) -> usize {
    let mut frontier = vec![PartialSolution::<GRID_SIZE>::seeded(seed)];

    for spot in 1..GRID_SIZE {
        let mut next_frontier = Vec::new();
        for partial in &frontier {
            for_each_candidate::<SIDE>(index, partial.placed(), spot, |candidate| {
                if !partial.uses(candidate.piece_id) {
                    next_frontier.push(partial.extended(candidate));
                }
            });
        }
        tracing::trace!(spot, frontier = next_frontier.len(), "frontier expanded");

        frontier = next_frontier;
        if frontier.is_empty() {
            return 0;
        }
    }

    for partial in &frontier {
        emit(partial.to_solution());
    }
    frontier.len()
}

/// Iterative backtracking with an explicit stack.
///
/// Children are pushed in reverse so they pop in index order, which makes
/// the emission order identical to the frontier search.
fn search_depth_first<const SIDE: usize, const GRID_SIZE: usize>(
    index: &ConstraintIndex,
    seed: Placement,
    emit: &mut impl FnMut(Solution),
) -> usize {
    let mut search_stack = vec![PartialSolution::<GRID_SIZE>::seeded(seed)];
    let mut children = Vec::new();
    let mut found = 0;

    while let Some(partial) = search_stack.pop() {
        if partial.is_complete() {
            emit(partial.to_solution());
            found += 1;
            continue;
        }

        for_each_candidate::<SIDE>(index, partial.placed(), partial.len, |candidate| {
            if !partial.uses(candidate.piece_id) {
                children.push(partial.extended(candidate));
            }
        });
        search_stack.extend(children.drain(..).rev());
    }

    found
}

/// Runs one anchor to exhaustion, calling `emit` once per complete solution.
///
/// Returns the number of solutions emitted. An anchor that dead-ends emits
/// nothing and returns 0.
pub fn search<const SIDE: usize, const GRID_SIZE: usize>(
    index: &ConstraintIndex,
    seed: Placement,
    strategy: Strategy,
    mut emit: impl FnMut(Solution),
) -> usize {
    debug_assert_eq!(index.num_pieces(), GRID_SIZE, "index built for another grid");
    match strategy {
        Strategy::Frontier => search_frontier::<SIDE, GRID_SIZE>(index, seed, &mut emit),
        Strategy::DepthFirst => search_depth_first::<SIDE, GRID_SIZE>(index, seed, &mut emit),
    }
}

/// Solutions found by one anchor of a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorCount {
    pub anchor: Anchor,
    pub solutions: usize,
}

/// Summary of a full sweep, in anchor order.
#[derive(Clone, Debug)]
pub struct SweepReport {
    pub anchors: Vec<AnchorCount>,
    pub elapsed: Duration,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.anchors.iter().map(|count| count.solutions).sum()
    }
}

/// Searches every anchor of `catalog`, emitting solutions in anchor order.
///
/// With [`Schedule::Parallel`] each anchor collects its solutions on a rayon
/// worker and the batches are emitted once all workers finish.
/// `on_complete` runs exactly once, after the last solution is emitted.
pub fn run_full_sweep<const SIDE: usize, const GRID_SIZE: usize>(
    catalog: &[Piece],
    config: &SweepConfig,
    mut emit: impl FnMut(Solution),
    on_complete: impl FnOnce(),
) -> Result<SweepReport> {
    let index = build_constraint_index::<GRID_SIZE>(catalog)?;
    let seeds = anchors(catalog.len())
        .map(|anchor| anchor.seed(catalog).map(|seed| (anchor, seed)))
        .collect::<Result<Vec<_>>>()?;

    let started = Instant::now();
    let mut counts = Vec::with_capacity(seeds.len());

    match config.schedule {
        Schedule::Sequential => {
            for (anchor, seed) in seeds {
                let found = search::<SIDE, GRID_SIZE>(&index, seed, config.strategy, &mut emit);
                log_anchor(anchor, found);
                counts.push(AnchorCount {
                    anchor,
                    solutions: found,
                });
            }
        }
        Schedule::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads.unwrap_or(0))
                .build()?;
            let batches: Vec<(Anchor, Vec<Solution>)> = pool.install(|| {
                seeds
                    .par_iter()
                    .map(|&(anchor, seed)| {
                        let mut batch = Vec::new();
                        search::<SIDE, GRID_SIZE>(&index, seed, config.strategy, |solution| {
                            batch.push(solution)
                        });
                        log_anchor(anchor, batch.len());
                        (anchor, batch)
                    })
                    .collect()
            });

            for (anchor, batch) in batches {
                counts.push(AnchorCount {
                    anchor,
                    solutions: batch.len(),
                });
                batch.into_iter().for_each(&mut emit);
            }
        }
    }

    let report = SweepReport {
        anchors: counts,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        anchors = report.anchors.len(),
        solutions = report.total(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        strategy = ?config.strategy,
        schedule = ?config.schedule,
        "sweep complete"
    );
    on_complete();
    Ok(report)
}

/// Searches a single anchor of `catalog`.
pub fn search_anchor<const SIDE: usize, const GRID_SIZE: usize>(
    catalog: &[Piece],
    anchor: Anchor,
    strategy: Strategy,
    emit: impl FnMut(Solution),
) -> Result<usize> {
    let index = build_constraint_index::<GRID_SIZE>(catalog)?;
    let seed = anchor.seed(catalog)?;
    let found = search::<SIDE, GRID_SIZE>(&index, seed, strategy, emit);
    log_anchor(anchor, found);
    Ok(found)
}

fn log_anchor(anchor: Anchor, solutions: usize) {
    tracing::debug!(
        piece = anchor.piece_id,
        rotation = anchor.rotation,
        solutions,
        "anchor searched"
    );
}

impl<const SIDE: usize, const GRID_SIZE: usize> Puzzle<SIDE, GRID_SIZE> {
    /// Runs a full sweep and collects every solution.
    pub fn solve(&self, config: &SweepConfig) -> Result<Vec<Solution>> {
        let catalog = self.catalog()?;
        let mut solutions = Vec::new();
        run_full_sweep::<SIDE, GRID_SIZE>(&catalog, config, |s| solutions.push(s), || {})?;
        Ok(solutions)
    }

    /// Runs a full sweep and reports how many solutions each anchor found.
    pub fn anchor_counts(&self, config: &SweepConfig) -> Result<SweepReport> {
        let catalog = self.catalog()?;
        run_full_sweep::<SIDE, GRID_SIZE>(&catalog, config, |_| {}, || {})
    }

    /// Collects the solutions of a single anchor.
    pub fn search_anchor(&self, anchor: Anchor, strategy: Strategy) -> Result<Vec<Solution>> {
        let catalog = self.catalog()?;
        let mut solutions = Vec::new();
        search_anchor::<SIDE, GRID_SIZE>(&catalog, anchor, strategy, |s| solutions.push(s))?;
        Ok(solutions)
    }
}
