//! Validates the piece and boundary data model: edge extraction, positional
//! consistency under translation, and edge comparison

use std::sync::Arc;

use ndarray::Array2;
use seamsolve::spatial::{Boundary, EdgePos, GridDelta, GridPos, Piece, Rgb, Side};

fn grey(value: u8) -> Rgb {
    [value, value, value]
}

fn piece_from(name: &str, rows: &[&[u8]]) -> Piece {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    let image = Array2::from_shape_fn((height, width), |(row, col)| {
        grey(
            rows.get(row)
                .and_then(|values| values.get(col))
                .copied()
                .unwrap_or(0),
        )
    });
    Piece::new(name, Arc::new(image))
}

#[test]
fn test_boundaries_extracted_from_image_edges() {
    // 2 rows x 3 cols:
    //   1 2 3
    //   4 5 6
    let piece = piece_from("p", &[&[1, 2, 3], &[4, 5, 6]]);

    assert_eq!(
        piece.boundary(Side::Top).pixels(),
        &[grey(1), grey(2), grey(3)]
    );
    assert_eq!(
        piece.boundary(Side::Bottom).pixels(),
        &[grey(4), grey(5), grey(6)]
    );
    assert_eq!(piece.boundary(Side::Left).pixels(), &[grey(1), grey(4)]);
    assert_eq!(piece.boundary(Side::Right).pixels(), &[grey(3), grey(6)]);
}

#[test]
fn test_boundary_positions_sit_half_a_cell_from_centre() {
    let piece = piece_from("p", &[&[1, 2], &[3, 4]]);

    assert_eq!(piece.position(), GridPos::ORIGIN);
    assert_eq!(
        piece.boundary(Side::Top).position(),
        EdgePos { x2: 0, y2: -1 }
    );
    assert_eq!(
        piece.boundary(Side::Left).position(),
        EdgePos { x2: -1, y2: 0 }
    );
    assert_eq!(
        piece.boundary(Side::Bottom).position(),
        EdgePos { x2: 0, y2: 1 }
    );
    assert_eq!(
        piece.boundary(Side::Right).position(),
        EdgePos { x2: 1, y2: 0 }
    );
}

#[test]
fn test_translation_moves_all_boundaries_atomically() {
    let mut piece = piece_from("p", &[&[1, 2], &[3, 4]]);
    let before: Vec<EdgePos> = Side::ALL
        .iter()
        .map(|&side| piece.boundary(side).position())
        .collect();

    let target = GridPos::new(3, -2);
    piece.translate_to(target);

    assert_eq!(piece.position(), target);
    let delta = GridDelta::new(3, -2);
    for (index, &side) in Side::ALL.iter().enumerate() {
        let original = before.get(index).copied().unwrap_or(EdgePos { x2: 0, y2: 0 });
        assert_eq!(piece.boundary(side).position(), original.translated(delta));
    }
}

#[test]
fn test_facing_edges_of_adjacent_pieces_coincide() {
    let left = piece_from("l", &[&[1, 2], &[3, 4]]);
    let mut right = piece_from("r", &[&[5, 6], &[7, 8]]);
    right.translate_to(GridPos::new(1, 0));

    assert_eq!(
        left.boundary(Side::Right).position(),
        right.boundary(Side::Left).position()
    );

    let mut below = piece_from("b", &[&[5, 6], &[7, 8]]);
    below.translate_to(GridPos::new(0, 1));
    assert_eq!(
        left.boundary(Side::Bottom).position(),
        below.boundary(Side::Top).position()
    );
}

#[test]
fn test_compatibility_is_symmetric() {
    let short = Boundary::new(vec![grey(1), grey(2)], EdgePos { x2: 0, y2: -1 });
    let same = Boundary::new(vec![grey(3), grey(4)], EdgePos { x2: 0, y2: 1 });
    let long = Boundary::new(
        vec![grey(1), grey(2), grey(3)],
        EdgePos { x2: 1, y2: 0 },
    );

    assert!(short.is_compatible_with(&same));
    assert!(same.is_compatible_with(&short));
    assert!(!short.is_compatible_with(&long));
    assert!(!long.is_compatible_with(&short));
}

#[test]
fn test_difference_is_zero_only_for_identical_pixels() {
    let a = Boundary::new(vec![[1, 2, 3], [4, 5, 6]], EdgePos { x2: 1, y2: 0 });
    let b = Boundary::new(vec![[1, 2, 3], [4, 5, 6]], EdgePos { x2: -1, y2: 0 });
    let c = Boundary::new(vec![[4, 6, 8], [4, 5, 6]], EdgePos { x2: -1, y2: 0 });

    assert_eq!(a.difference_from(&b), 0);
    // First pixel differs by (3, 4, 5) per channel: 9 + 16 + 25.
    assert_eq!(a.difference_from(&c), 50);
    assert_eq!(c.difference_from(&a), 50);
}

#[test]
fn test_new_boundaries_are_external() {
    let boundary = Boundary::new(vec![grey(1)], EdgePos { x2: 0, y2: -1 });
    assert!(!boundary.is_internal());
}

#[test]
fn test_parallel_edges_yield_whole_cell_delta() {
    let anchor = EdgePos { x2: 1, y2: 0 };
    let other = EdgePos { x2: -1, y2: 0 };

    assert_eq!(
        anchor.cell_delta_from(other),
        Some(GridDelta::new(1, 0))
    );
}

#[test]
fn test_perpendicular_edges_yield_no_delta() {
    let horizontal = EdgePos { x2: 0, y2: -1 };
    let vertical = EdgePos { x2: -1, y2: 0 };

    assert_eq!(horizontal.cell_delta_from(vertical), None);
    assert_eq!(vertical.cell_delta_from(horizontal), None);
}
