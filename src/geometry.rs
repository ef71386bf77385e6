//! Quarter-turn rotations of square pieces.
//!
//! A square piece has 4 orientations. Rotation `r` brings canonical edge `r`
//! to the left side and the following edges clockwise around the piece, so
//! rotation 3 is the piece exactly as listed in the catalog.

use crate::pieces::{Piece, Shape, EDGES};

/// Number of distinct quarter-turn rotations.
pub const ROTATIONS: u8 = 4;

/// The four edge shapes of a piece as seen after rotating it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub top: Shape,
    pub right: Shape,
    pub bottom: Shape,
    pub left: Shape,
}

impl Orientation {
    /// Orients a piece so that edge `rotation % 4` faces left.
    #[inline]
    pub fn of(piece: &Piece, rotation: u8) -> Self {
        let r = (rotation % ROTATIONS) as usize;
        let edges = &piece.edges;
        Self {
            top: edges[(r + 1) % EDGES],
            right: edges[(r + 2) % EDGES],
            bottom: edges[(r + 3) % EDGES],
            left: edges[r],
        }
    }

    /// Turns the orientation a quarter so its left edge ends up on top.
    ///
    /// Column-0 candidates are looked up by their left edge and then turned
    /// with this so the looked-up edge faces the piece above.
    #[inline(always)]
    pub fn quarter_turn(self) -> Self {
        Self {
            top: self.left,
            right: self.top,
            bottom: self.right,
            left: self.bottom,
        }
    }

    /// Edges in `[top, right, bottom, left]` order.
    pub fn edges(&self) -> [Shape; EDGES] {
        [self.top, self.right, self.bottom, self.left]
    }
}

/// Returns the orientations of a piece for rotations 0 through 3.
///
/// Symmetric pieces repeat an orientation; nothing is deduplicated, since
/// each rotation is a distinct way to lay the piece down.
pub fn all_orientations(piece: &Piece) -> [Orientation; ROTATIONS as usize] {
    std::array::from_fn(|r| Orientation::of(piece, r as u8))
}
