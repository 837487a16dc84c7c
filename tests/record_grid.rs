use crier::record::{Grid, GridError, PodRecord, MAX_GRID_CELLS};

#[test]
fn zero_dimensions_are_rejected() {
    assert_eq!(
        Grid::new(0, 5).unwrap_err(),
        GridError::ZeroDimension { rows: 0, cols: 5 }
    );
    assert_eq!(
        Grid::new(3, 0).unwrap_err(),
        GridError::ZeroDimension { rows: 3, cols: 0 }
    );
}

#[test]
fn oversized_grids_are_rejected() {
    assert_eq!(
        Grid::new(MAX_GRID_CELLS, 2).unwrap_err(),
        GridError::TooLarge {
            rows: MAX_GRID_CELLS,
            cols: 2
        }
    );
    // Multiplication overflow must not wrap into a small allocation.
    assert!(matches!(
        Grid::new(usize::MAX, usize::MAX),
        Err(GridError::TooLarge { .. })
    ));
    // The boundary itself is fine.
    assert!(Grid::new(MAX_GRID_CELLS, 1).is_ok());
}

#[test]
fn get_and_set_stay_inside_the_grid() {
    let mut grid = Grid::new(2, 3).unwrap();
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 3);
    assert_eq!(grid.get(0, 0).unwrap(), 0.0);

    grid.set(1, 2, 42.5).unwrap();
    assert_eq!(grid.get(1, 2).unwrap(), 42.5);
    // Row-major layout: the neighbours are untouched.
    assert_eq!(grid.get(1, 1).unwrap(), 0.0);
    assert_eq!(grid.get(0, 2).unwrap(), 0.0);

    assert_eq!(
        grid.get(2, 0).unwrap_err(),
        GridError::OutOfBounds {
            row: 2,
            col: 0,
            rows: 2,
            cols: 3
        }
    );
    assert_eq!(
        grid.set(0, 3, 1.0).unwrap_err(),
        GridError::OutOfBounds {
            row: 0,
            col: 3,
            rows: 2,
            cols: 3
        }
    );
}

#[test]
fn filled_sets_every_cell() {
    let grid = Grid::filled(2, 2, 7.0).unwrap();
    for row in 0..2 {
        for col in 0..2 {
            assert_eq!(grid.get(row, col).unwrap(), 7.0);
        }
    }
}

#[test]
fn demo_record_carries_tag_one_and_a_single_cell() {
    let record = PodRecord::demo();
    assert_eq!(record.tag, 1);
    assert!(record.label.is_empty());
    assert_eq!(record.grid.rows(), 1);
    assert_eq!(record.grid.cols(), 1);
    assert_eq!(record.grid.get(0, 0).unwrap(), 101.0);
}
