//! Randomized depth-first maze carving used by the world crate.

use maze_explorer_core::{CellCoord, Direction};
use rand::Rng;

use crate::grid::Grid;

/// Carves a spanning tree of open walls over the grid.
///
/// Iterative depth-first search: the stack top is the frontier cell; an
/// unvisited neighbour is chosen uniformly at random, the shared wall is
/// opened, and the neighbour becomes the new frontier. Dead ends backtrack by
/// popping. Every cell is visited exactly once, so the carved graph is
/// connected, acyclic, and contains `width * height - 1` openings. A 1x1 grid
/// has no neighbours to carve and keeps all walls intact.
pub(crate) fn carve<R: Rng>(grid: &mut Grid, start: CellCoord, rng: &mut R) {
    let Some(cell) = grid.cell_mut(start) else {
        return;
    };
    cell.mark_visited();

    let mut stack = vec![start];
    while let Some(current) = stack.last().copied() {
        let (candidates, count) = unvisited_neighbors(grid, current);
        if count == 0 {
            let _ = stack.pop();
            continue;
        }

        let Some(next) = candidates[rng.gen_range(0..count)] else {
            let _ = stack.pop();
            continue;
        };

        grid.open_between(current, next);
        if let Some(cell) = grid.cell_mut(next) {
            cell.mark_visited();
        }
        stack.push(next);
    }
}

fn unvisited_neighbors(grid: &Grid, cell: CellCoord) -> ([Option<CellCoord>; 4], usize) {
    let mut candidates = [None; 4];
    let mut count = 0;

    for direction in Direction::ALL {
        let Some(neighbor) = grid.neighbor(cell, direction) else {
            continue;
        };
        let visited = grid
            .cell(neighbor)
            .map_or(true, |neighbor_cell| neighbor_cell.is_visited());
        if !visited {
            candidates[count] = Some(neighbor);
            count += 1;
        }
    }

    (candidates, count)
}

#[cfg(test)]
mod tests {
    use super::carve;
    use crate::grid::Grid;
    use maze_explorer_core::{CellCoord, Direction, GridSize};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn carved(width: u32, height: u32, seed: u64) -> Grid {
        let mut grid = Grid::sealed(GridSize::new(width, height));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        carve(&mut grid, CellCoord::new(0, 0), &mut rng);
        grid
    }

    fn open_pair_count(grid: &Grid) -> u64 {
        let size = grid.size();
        let mut openings = 0;
        for y in 0..size.height() {
            for x in 0..size.width() {
                let cell = CellCoord::new(x, y);
                for direction in [Direction::South, Direction::East] {
                    if grid.neighbor(cell, direction).is_some() && !grid.has_wall(cell, direction) {
                        openings += 1;
                    }
                }
            }
        }
        openings
    }

    #[test]
    fn carving_opens_exactly_a_spanning_tree_worth_of_walls() {
        for seed in 0..4 {
            let grid = carved(7, 5, seed);
            assert_eq!(open_pair_count(&grid), 7 * 5 - 1, "seed {seed}");
        }
    }

    #[test]
    fn every_cell_becomes_reachable_from_the_start() {
        let grid = carved(6, 6, 11);
        let size = grid.size();
        let mut seen = vec![false; 36];
        let mut frontier = vec![CellCoord::new(0, 0)];
        seen[0] = true;

        while let Some(cell) = frontier.pop() {
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(cell, direction) else {
                    continue;
                };
                if grid.has_wall(cell, direction) {
                    continue;
                }
                let index = (next.y() * size.width() + next.x()) as usize;
                if !seen[index] {
                    seen[index] = true;
                    frontier.push(next);
                }
            }
        }

        assert!(seen.iter().all(|reached| *reached));
    }

    #[test]
    fn single_cell_grids_keep_every_wall() {
        let grid = carved(1, 1, 3);
        for direction in Direction::ALL {
            assert!(grid.has_wall(CellCoord::new(0, 0), direction));
        }
    }

    #[test]
    fn wall_flags_stay_symmetric_across_every_boundary() {
        let grid = carved(8, 4, 29);
        let size = grid.size();
        for y in 0..size.height() {
            for x in 0..size.width() {
                let cell = CellCoord::new(x, y);
                for direction in Direction::ALL {
                    let Some(neighbor) = grid.neighbor(cell, direction) else {
                        continue;
                    };
                    assert_eq!(
                        grid.has_wall(cell, direction),
                        grid.has_wall(neighbor, direction.opposite()),
                        "one-sided wall between {cell:?} and {neighbor:?}",
                    );
                }
            }
        }
    }
}
