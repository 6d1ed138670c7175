//! Grid and wall model underpinning the maze.

use maze_explorer_core::{CellCoord, Direction, GridSize, NpcId};

use crate::entities::{Activity, Item};

/// One grid unit of the maze with four wall flags and optional content.
#[derive(Debug)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
    item: Option<Item>,
    activities: Vec<Activity>,
    npcs: Vec<NpcId>,
}

impl Cell {
    fn sealed() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
            item: None,
            activities: Vec::new(),
            npcs: Vec::new(),
        }
    }

    /// Reports whether the wall toward the provided direction is present.
    #[must_use]
    pub fn wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    /// Item resting in the cell, if any.
    #[must_use]
    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    /// Activities available in the cell, in placement order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Identifiers of the NPCs present in the cell, in placement order.
    #[must_use]
    pub fn npcs(&self) -> &[NpcId] {
        &self.npcs
    }

    pub(crate) fn place_item(&mut self, item: Item) {
        self.item = Some(item);
    }

    pub(crate) fn item_mut(&mut self) -> Option<&mut Item> {
        self.item.as_mut()
    }

    pub(crate) fn place_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub(crate) fn first_activity_mut(&mut self) -> Option<&mut Activity> {
        self.activities.first_mut()
    }

    pub(crate) fn place_npc(&mut self, npc: NpcId) {
        self.npcs.push(npc);
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn is_visited(&self) -> bool {
        self.visited
    }
}

/// Owns the dense cell array and enforces the wall invariants.
///
/// Walls come in matching pairs: the only wall mutation, [`Grid::open_between`],
/// always clears both sides of a boundary, and nothing after generation calls
/// it, so `a.wall_towards(b) == b.wall_towards(a)` holds for the lifetime of
/// the grid.
#[derive(Debug)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn sealed(size: GridSize) -> Self {
        let capacity = usize::try_from(size.cell_count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            cells.push(Cell::sealed());
        }
        Self { size, cells }
    }

    /// Dimensions of the grid in cells.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Borrow of the cell at the provided coordinate, if it is in bounds.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    pub(crate) fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.index(coord)
            .and_then(|index| self.cells.get_mut(index))
    }

    /// Coordinate of the adjacent cell in the provided direction, bounds
    /// checked against the grid size.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction)
            .filter(|next| self.size.contains(*next))
    }

    /// Reports whether a wall blocks the boundary from `cell` toward
    /// `direction`. Out-of-bounds coordinates always read as walled.
    #[must_use]
    pub fn has_wall(&self, cell: CellCoord, direction: Direction) -> bool {
        self.cell(cell).map_or(true, |cell| cell.wall(direction))
    }

    /// Clears the matching pair of wall flags between two adjacent cells.
    ///
    /// # Panics
    ///
    /// Panics when the cells are not grid-adjacent; that indicates a carving
    /// bug, not a recoverable condition.
    pub(crate) fn open_between(&mut self, a: CellCoord, b: CellCoord) {
        let direction = direction_between(a, b)
            .filter(|_| self.size.contains(a) && self.size.contains(b));
        let Some(direction) = direction else {
            panic!("open_between requires grid-adjacent cells, got {a:?} and {b:?}");
        };

        if let Some(cell) = self.cell_mut(a) {
            cell.walls[direction.index()] = false;
        }
        if let Some(cell) = self.cell_mut(b) {
            cell.walls[direction.opposite().index()] = false;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.size.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.y()).ok()?;
        let column = usize::try_from(cell.x()).ok()?;
        let width = usize::try_from(self.size.width()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Direction of the single-step move from `from` to `to`, when they are
/// Manhattan-adjacent.
#[must_use]
pub(crate) fn direction_between(from: CellCoord, to: CellCoord) -> Option<Direction> {
    let x_diff = from.x().abs_diff(to.x());
    let y_diff = from.y().abs_diff(to.y());

    if x_diff + y_diff != 1 {
        return None;
    }

    if x_diff == 1 {
        if to.x() > from.x() {
            Some(Direction::East)
        } else {
            Some(Direction::West)
        }
    } else if to.y() > from.y() {
        Some(Direction::South)
    } else {
        Some(Direction::North)
    }
}
