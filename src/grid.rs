//! Grid layout, solution rendering and invariant checks.
//!
//! Generic over the grid side (`SIDE`) and total spot count
//! (`GRID_SIZE = SIDE^2`). Spots are numbered row-major from the top-left
//! corner: `row = spot / SIDE`, `col = spot % SIDE`.

use std::fmt;

use crate::index::Placement;
use crate::pieces::Shape;

/// A complete solution: one placement per spot, in spot order.
pub type Solution = Vec<Placement>;

/// Converts (row, col) to a spot index.
#[inline(always)]
pub const fn cell_to_spot<const SIDE: usize>(row: usize, col: usize) -> usize {
    row * SIDE + col
}

/// Converts a spot index to (row, col).
#[inline(always)]
pub const fn spot_to_cell<const SIDE: usize>(spot: usize) -> (usize, usize) {
    (spot / SIDE, spot % SIDE)
}

/// The edges a spot must match, given the pieces already to its left and above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpotConstraint {
    /// The anchor spot; anything fits.
    Free,
    /// First row: only the left neighbor constrains the spot.
    Left(Shape),
    /// First column below the first row: only the piece above constrains it.
    Top(Shape),
    /// Interior: both neighbors constrain it.
    LeftTop(Shape, Shape),
}

/// Derives the constraint for `spot` from the placements filling spots `0..spot`.
#[inline]
pub fn spot_constraint<const SIDE: usize>(placed: &[Placement], spot: usize) -> SpotConstraint {
    let (row, col) = spot_to_cell::<SIDE>(spot);
    let left = || placed[spot - 1].orientation.right.invert();
    let top = || placed[spot - SIDE].orientation.bottom.invert();
    match (row, col) {
        (0, 0) => SpotConstraint::Free,
        (0, _) => SpotConstraint::Left(left()),
        (_, 0) => SpotConstraint::Top(top()),
        _ => SpotConstraint::LeftTop(left(), top()),
    }
}

/// The first invariant a candidate solution breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    WrongLength { expected: usize, actual: usize },
    DuplicatePiece { piece_id: u8, spot: usize },
    UnknownPiece { piece_id: u8, spot: usize },
    HorizontalMismatch { spot: usize },
    VerticalMismatch { spot: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WrongLength { expected, actual } => {
                write!(f, "solution covers {actual} spots, expected {expected}")
            }
            Violation::DuplicatePiece { piece_id, spot } => {
                write!(f, "piece {piece_id} reused at spot {spot}")
            }
            Violation::UnknownPiece { piece_id, spot } => {
                write!(f, "piece {piece_id} at spot {spot} is not in the catalog")
            }
            Violation::HorizontalMismatch { spot } => {
                write!(f, "spot {spot} does not fit its left neighbor")
            }
            Violation::VerticalMismatch { spot } => {
                write!(f, "spot {spot} does not fit the piece above")
            }
        }
    }
}

/// Checks that a solution uses every piece once and that all shared edges fit.
pub fn verify_solution<const SIDE: usize, const GRID_SIZE: usize>(
    solution: &[Placement],
) -> Result<(), Violation> {
    if solution.len() != GRID_SIZE {
        return Err(Violation::WrongLength {
            expected: GRID_SIZE,
            actual: solution.len(),
        });
    }

    let mut used = 0u64;
    for (spot, placement) in solution.iter().enumerate() {
        let piece_id = placement.piece_id;
        if piece_id as usize >= GRID_SIZE {
            return Err(Violation::UnknownPiece { piece_id, spot });
        }
        if used & (1 << piece_id) != 0 {
            return Err(Violation::DuplicatePiece { piece_id, spot });
        }
        used |= 1 << piece_id;

        let (row, col) = spot_to_cell::<SIDE>(spot);
        let here = placement.orientation;
        if col > 0 && here.left != solution[spot - 1].orientation.right.invert() {
            return Err(Violation::HorizontalMismatch { spot });
        }
        if row > 0 && here.top != solution[spot - SIDE].orientation.bottom.invert() {
            return Err(Violation::VerticalMismatch { spot });
        }
    }

    Ok(())
}

/// Formats a solution as one text line per grid row.
///
/// Each cell shows the piece id followed by its edges as placed, in
/// `[top right bottom left]` order, e.g. ` 3[+2 -1 -2 +1]`.
pub fn format_solution<const SIDE: usize, const GRID_SIZE: usize>(solution: &[Placement]) -> String {
    let mut output = String::new();

    for row in solution.chunks(SIDE) {
        for (col, placement) in row.iter().enumerate() {
            if col > 0 {
                output.push_str("  ");
            }
            let o = placement.orientation;
            output.push_str(&format!(
                "{:>2}[{} {} {} {}]",
                placement.piece_id, o.top, o.right, o.bottom, o.left
            ));
        }
        output.push('\n');
    }

    output
}
