//! Puzzle piece definitions and edge shapes.
//!
//! Each piece is a square tile with one shape on each of its four edges,
//! listed in canonical `[top, right, bottom, left]` order. A positive shape
//! is a tab and the matching negative value is the blank it fits into.

use std::fmt;

use crate::error::{Error, Result};

/// Number of edges on a piece.
pub const EDGES: usize = 4;

/// Largest shape magnitude.
pub const MAX_SHAPE: i8 = 4;

/// Largest catalog the solver supports (used pieces are tracked in a `u32`).
pub const MAX_PIECES: usize = 32;

/// A tab (positive) or blank (negative) edge motif.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape(i8);

impl Shape {
    pub const CROSS: Self = Self(1);
    pub const OCTAGON: Self = Self(2);
    pub const SHORT_ARROW: Self = Self(3);
    pub const LONG_ARROW: Self = Self(4);

    /// Creates a shape, rejecting zero and magnitudes above [`MAX_SHAPE`].
    pub fn new(value: i8) -> Result<Self> {
        if is_valid_shape(value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidShape(value))
        }
    }

    /// The shape that fits into this one.
    #[inline(always)]
    pub const fn invert(self) -> Self {
        Self(-self.0)
    }

    #[inline(always)]
    pub const fn value(self) -> i8 {
        self.0
    }

    pub const fn is_tab(self) -> bool {
        self.0 > 0
    }

    pub const fn motif(self) -> Motif {
        match self.0.unsigned_abs() {
            1 => Motif::Cross,
            2 => Motif::Octagon,
            3 => Motif::ShortArrow,
            _ => Motif::LongArrow,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

const fn is_valid_shape(value: i8) -> bool {
    value != 0 && value >= -MAX_SHAPE && value <= MAX_SHAPE
}

/// The picture printed on the physical pieces for each shape magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motif {
    Cross,
    Octagon,
    ShortArrow,
    LongArrow,
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Motif::Cross => "cross",
            Motif::Octagon => "octagon",
            Motif::ShortArrow => "short arrow",
            Motif::LongArrow => "long arrow",
        };
        f.write_str(name)
    }
}

/// An immutable catalog entry. Identity is `id`, its position in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub id: u8,
    /// Edge shapes in `[top, right, bottom, left]` order.
    pub edges: [Shape; EDGES],
}

/// Converts raw edge rows into pieces, numbering them by position.
pub fn catalog_from_rows(rows: &[[i8; EDGES]]) -> Result<Vec<Piece>> {
    rows.iter()
        .enumerate()
        .map(|(position, row)| -> Result<Piece> {
            let mut edges = [Shape::CROSS; EDGES];
            for (edge, &value) in edges.iter_mut().zip(row) {
                *edge = Shape::new(value)?;
            }
            Ok(Piece {
                id: position as u8,
                edges,
            })
        })
        .collect()
}

/// Puzzle definition with compile-time parameters.
///
/// - `SIDE`: number of spots along each side of the square grid
/// - `GRID_SIZE`: total spots in the grid (must equal SIDE^2), which is
///   also the number of pieces
pub struct Puzzle<const SIDE: usize, const GRID_SIZE: usize> {
    /// Raw edge rows, one per piece, in `[top, right, bottom, left]` order.
    pub rows: &'static [[i8; EDGES]],
}

impl<const SIDE: usize, const GRID_SIZE: usize> Puzzle<SIDE, GRID_SIZE> {
    /// Creates a new puzzle definition with compile-time validation.
    pub const fn new(rows: &'static [[i8; EDGES]]) -> Self {
        assert!(SIDE * SIDE == GRID_SIZE, "GRID_SIZE must equal SIDE^2");
        assert!(rows.len() == GRID_SIZE, "rows.len() must equal GRID_SIZE");
        assert!(GRID_SIZE <= MAX_PIECES, "GRID_SIZE must be <= 32 (u32 bitmask)");
        let mut i = 0;
        while i < rows.len() {
            let mut edge = 0;
            while edge < EDGES {
                assert!(is_valid_shape(rows[i][edge]), "shape outside ±1..=±4");
                edge += 1;
            }
            i += 1;
        }
        Self { rows }
    }

    /// The puzzle's pieces as validated catalog entries.
    pub fn catalog(&self) -> Result<Vec<Piece>> {
        catalog_from_rows(self.rows)
    }
}

/// The sixteen pieces of the 4x4 edge-matching puzzle.
///
/// Magnitudes: 1 cross, 2 octagon, 3 short arrow, 4 long arrow.
pub const CATALOG: &[[i8; EDGES]] = &[
    [1, 4, -1, -3],
    [1, 4, -4, -2],
    [4, 2, -2, -1],
    [2, 1, -1, -2],
    [2, 1, -4, -4],
    [4, 2, -2, -4],
    [2, 1, -3, -2],
    [3, 3, -2, -1],
    [2, 3, -1, -3],
    [2, 3, -2, -1],
    [3, 1, -4, -3],
    [2, 2, -2, -4],
    [2, 3, -3, -4],
    [3, 4, -4, -2],
    [3, 3, -4, -1],
    [4, 4, -2, -3],
];

/// 4x4 puzzle constants.
pub const BOARD_SIDE: usize = 4;
pub const BOARD_SIZE: usize = 16;

/// The 4x4 puzzle definition.
pub const PUZZLE: Puzzle<BOARD_SIDE, BOARD_SIZE> = Puzzle::new(CATALOG);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_is_an_involution() {
        for value in [-4, -3, -2, -1, 1, 2, 3, 4] {
            let shape = Shape::new(value).unwrap();
            assert_eq!(shape.invert().value(), -value);
            assert_eq!(shape.invert().invert(), shape);
            assert_ne!(shape.is_tab(), shape.invert().is_tab());
        }
    }

    #[test]
    fn test_rejects_out_of_range_shapes() {
        assert_eq!(Shape::new(0), Err(Error::InvalidShape(0)));
        assert_eq!(Shape::new(5), Err(Error::InvalidShape(5)));
        assert_eq!(Shape::new(-5), Err(Error::InvalidShape(-5)));
    }

    #[test]
    fn test_catalog_numbers_pieces_by_position() {
        let pieces = PUZZLE.catalog().unwrap();
        assert_eq!(pieces.len(), BOARD_SIZE);
        for (position, piece) in pieces.iter().enumerate() {
            assert_eq!(piece.id as usize, position);
            let raw: Vec<i8> = piece.edges.iter().map(|s| s.value()).collect();
            assert_eq!(raw, CATALOG[position]);
        }
    }

    #[test]
    fn test_catalog_from_rows_reports_bad_shape() {
        let rows = [[1, 2, 3, 4], [1, 0, -1, -2]];
        assert_eq!(catalog_from_rows(&rows), Err(Error::InvalidShape(0)));
    }

    #[test]
    fn test_motif_ignores_sign() {
        let cross = Shape::new(-1).unwrap();
        assert_eq!(cross.motif(), Motif::Cross);
        assert_eq!(Shape::new(4).unwrap().motif(), Motif::LongArrow);
        assert_eq!(cross.to_string(), "-1");
        assert_eq!(Shape::new(3).unwrap().to_string(), "+3");
    }
}
