//! Derived neighbor counts of a mine mask.

use ndarray::Array2;

use crate::*;

/// Number of mines among the clipped 8-neighborhood of `coords`.
pub fn adjacent_mines(mines: &Array2<bool>, coords: Coord2) -> u8 {
    mines
        .iter_neighbors(coords)
        .filter(|&pos| mines[pos.to_nd_index()])
        .count() as u8
}

/// Count grid for a whole board. Mine cells carry 0.
pub fn adjacency_counts(mines: &Array2<bool>) -> Array2<u8> {
    let mut counts = Array2::zeros(mines.dim());
    for ((row, col), &is_mine) in mines.indexed_iter() {
        if is_mine {
            continue;
        }
        let coords = (row as Coord, col as Coord);
        counts[(row, col)] = adjacent_mines(mines, coords);
    }
    counts
}
