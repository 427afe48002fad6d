#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure transition system computing the next Game of Life generation.
//!
//! The computation is deterministic and side-effect free: the source grid is
//! only read, a fresh cell buffer of identical dimensions is produced, and
//! identical inputs always yield bit-identical outputs. Neighbor lookups wrap
//! around both axes, so the left/right and top/bottom edges are adjacent
//! (toroidal topology) and no boundary special-casing exists.

use torus_life_core::{GridState, GridView};

/// Relative offsets of the eight neighboring cells.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Computes the next generation of the provided grid.
///
/// A live cell survives with two or three live neighbors; a dead cell with
/// exactly three live neighbors becomes alive; every other cell is dead in
/// the next generation. The returned grid always has the same dimensions as
/// the source.
#[must_use]
pub fn next_generation(current: &GridState) -> GridState {
    let view = current.view();
    let (width, height) = view.dimensions();

    let mut next_cells = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let neighbors = live_neighbors(&view, x, y);
            let alive = view.alive(x, y);
            next_cells.push(matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3)));
        }
    }

    GridState::from_cells(width, height, next_cells)
        .expect("dimensions are preserved from the source grid")
}

/// Counts the live neighbors of a cell under toroidal adjacency.
fn live_neighbors(view: &GridView<'_>, x: u32, y: u32) -> u8 {
    let (width, height) = view.dimensions();
    let mut count = 0;
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let neighbor_x = wrap(x, dx, width);
        let neighbor_y = wrap(y, dy, height);
        if view.alive(neighbor_x, neighbor_y) {
            count += 1;
        }
    }
    count
}

/// Offsets a coordinate by a signed delta, wrapping within the extent.
fn wrap(value: u32, delta: i64, extent: u32) -> u32 {
    let wrapped = (i64::from(value) + delta).rem_euclid(i64::from(extent));
    wrapped as u32
}
