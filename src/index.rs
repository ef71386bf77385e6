//! Precomputed edge-constraint index.
//!
//! Every rotation of every piece is registered twice: once under the shape
//! on its left edge, and once under its `(left, top)` pair. Spots in the
//! first row and first column only constrain one edge; interior spots
//! constrain both. Grouping the candidates ahead of time means the search
//! never scans the whole catalog for a spot.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::geometry::{all_orientations, Orientation};
use crate::pieces::{Piece, Shape, MAX_PIECES};

/// A piece bound to one orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub piece_id: u8,
    pub orientation: Orientation,
}

impl Placement {
    /// A placeholder for fixed-size array initialization.
    pub const EMPTY: Self = Self {
        piece_id: 0,
        orientation: Orientation {
            top: Shape::CROSS,
            right: Shape::CROSS,
            bottom: Shape::CROSS,
            left: Shape::CROSS,
        },
    };
}

/// Candidate placements keyed by the edge constraints they satisfy.
///
/// Read-only after construction, so one index can be shared by any number
/// of concurrent searches.
#[derive(Debug, Default)]
pub struct ConstraintIndex {
    by_left: FxHashMap<Shape, Vec<Placement>>,
    by_left_top: FxHashMap<(Shape, Shape), Vec<Placement>>,
    num_pieces: usize,
}

impl ConstraintIndex {
    /// Registers every rotation of every piece under both key kinds.
    fn from_pieces(catalog: &[Piece]) -> Self {
        let mut index = Self {
            num_pieces: catalog.len(),
            ..Self::default()
        };

        for piece in catalog {
            for orientation in all_orientations(piece) {
                let placement = Placement {
                    piece_id: piece.id,
                    orientation,
                };
                index
                    .by_left
                    .entry(orientation.left)
                    .or_default()
                    .push(placement);
                index
                    .by_left_top
                    .entry((orientation.left, orientation.top))
                    .or_default()
                    .push(placement);
            }
        }

        index
    }

    /// Placements whose left edge is `left`.
    #[inline]
    pub fn lookup_by_single(&self, left: Shape) -> &[Placement] {
        self.by_left.get(&left).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Placements whose left edge is `left` and whose top edge is `top`.
    #[inline]
    pub fn lookup_by_pair(&self, left: Shape, top: Shape) -> &[Placement] {
        self.by_left_top
            .get(&(left, top))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of pieces the index was built from.
    pub fn num_pieces(&self) -> usize {
        self.num_pieces
    }
}

/// Validates a catalog for a grid of `GRID_SIZE` spots and indexes it.
///
/// Fails fast when the catalog does not hold exactly one piece per spot or
/// when piece ids are not `0..GRID_SIZE` in order.
pub fn build_constraint_index<const GRID_SIZE: usize>(
    catalog: &[Piece],
) -> Result<ConstraintIndex> {
    if catalog.len() != GRID_SIZE || GRID_SIZE > MAX_PIECES {
        return Err(Error::WrongPieceCount {
            expected: GRID_SIZE,
            actual: catalog.len(),
        });
    }
    if let Some((position, piece)) = catalog
        .iter()
        .enumerate()
        .find(|(position, piece)| piece.id as usize != *position)
    {
        return Err(Error::MisnumberedPiece {
            position,
            id: piece.id,
        });
    }

    let index = ConstraintIndex::from_pieces(catalog);
    tracing::debug!(
        pieces = catalog.len(),
        single_keys = index.by_left.len(),
        pair_keys = index.by_left_top.len(),
        "constraint index built"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geometry::ROTATIONS;
    use crate::pieces::{catalog_from_rows, BOARD_SIZE, CATALOG, EDGES};

    fn shape(value: i8) -> Shape {
        Shape::new(value).unwrap()
    }

    fn real_index() -> ConstraintIndex {
        let catalog = catalog_from_rows(CATALOG).unwrap();
        build_constraint_index::<BOARD_SIZE>(&catalog).unwrap()
    }

    /// Every (piece, rotation) placement in the catalog, by brute force.
    fn all_placements(catalog: &[Piece]) -> Vec<Placement> {
        catalog
            .iter()
            .flat_map(|piece| {
                (0..ROTATIONS).map(move |r| Placement {
                    piece_id: piece.id,
                    orientation: Orientation::of(piece, r),
                })
            })
            .collect()
    }

    fn sorted(mut placements: Vec<Placement>) -> Vec<Placement> {
        placements.sort_by_key(|p| (p.piece_id, p.orientation.edges()));
        placements
    }

    #[test]
    fn test_every_placement_is_registered_under_both_keys() {
        let index = real_index();
        let catalog = catalog_from_rows(CATALOG).unwrap();
        let mut single_total = 0;
        for value in [-4, -3, -2, -1, 1, 2, 3, 4] {
            single_total += index.lookup_by_single(shape(value)).len();
        }
        assert_eq!(single_total, BOARD_SIZE * ROTATIONS as usize);

        for placement in all_placements(&catalog) {
            let o = placement.orientation;
            assert!(index.lookup_by_single(o.left).contains(&placement));
            assert!(index.lookup_by_pair(o.left, o.top).contains(&placement));
        }
    }

    #[test]
    fn test_missing_key_yields_empty_slice() {
        let catalog = catalog_from_rows(&[[1, 1, 1, 1]]).unwrap();
        let index = build_constraint_index::<1>(&catalog).unwrap();
        assert!(index.lookup_by_single(shape(-1)).is_empty());
        assert!(index.lookup_by_pair(shape(1), shape(-1)).is_empty());
        assert_eq!(index.lookup_by_single(shape(1)).len(), 4);
    }

    #[test]
    fn test_rejects_wrong_piece_count() {
        let catalog = catalog_from_rows(&CATALOG[..15]).unwrap();
        let err = build_constraint_index::<BOARD_SIZE>(&catalog).unwrap_err();
        assert_eq!(
            err,
            Error::WrongPieceCount {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_rejects_misnumbered_pieces() {
        let mut catalog = catalog_from_rows(&CATALOG[..4]).unwrap();
        catalog.swap(1, 2);
        let err = build_constraint_index::<4>(&catalog).unwrap_err();
        assert_eq!(err, Error::MisnumberedPiece { position: 1, id: 2 });
    }

    fn shape_value() -> impl Strategy<Value = i8> + Clone {
        prop_oneof![-4i8..=-1, 1i8..=4]
    }

    proptest! {
        #[test]
        fn prop_single_lookup_matches_brute_force(
            rows in prop::collection::vec(prop::array::uniform4(shape_value()), 4),
            key in shape_value(),
        ) {
            let rows: Vec<[i8; EDGES]> = rows;
            let catalog = catalog_from_rows(&rows).unwrap();
            let index = build_constraint_index::<4>(&catalog).unwrap();
            let key = shape(key);

            let expected: Vec<Placement> = all_placements(&catalog)
                .into_iter()
                .filter(|p| p.orientation.left == key)
                .collect();
            prop_assert_eq!(
                sorted(index.lookup_by_single(key).to_vec()),
                sorted(expected)
            );
        }

        #[test]
        fn prop_pair_lookup_matches_brute_force(
            rows in prop::collection::vec(prop::array::uniform4(shape_value()), 4),
            left in shape_value(),
            top in shape_value(),
        ) {
            let rows: Vec<[i8; EDGES]> = rows;
            let catalog = catalog_from_rows(&rows).unwrap();
            let index = build_constraint_index::<4>(&catalog).unwrap();
            let (left, top) = (shape(left), shape(top));

            let expected: Vec<Placement> = all_placements(&catalog)
                .into_iter()
                .filter(|p| p.orientation.left == left && p.orientation.top == top)
                .collect();
            prop_assert_eq!(
                sorted(index.lookup_by_pair(left, top).to_vec()),
                sorted(expected)
            );
        }
    }
}
