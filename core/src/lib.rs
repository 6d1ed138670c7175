#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Explorer engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Everything the player ever reads is narrated from one
//! event plus read-only queries, so adapters never invent world state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when a maze session boots.
pub const WELCOME_BANNER: &str = "Welcome to the maze! Try to find your way out.";

/// Commands that express all permissible world mutations.
///
/// Inspecting items, describing the current location, and rendering the map
/// are pure queries and intentionally absent: only operations that may change
/// world state travel through this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player advance one cell in the given direction.
    Move {
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Requests use of the item resting in the player's current cell.
    UseItem,
    /// Requests interaction with the first activity in the player's cell.
    Interact,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two adjacent cells.
    PlayerMoved {
        /// Cell the player occupied before the step.
        from: CellCoord,
        /// Cell the player occupies after the step.
        to: CellCoord,
    },
    /// Reports that a movement request was rejected without mutating state.
    MoveRejected {
        /// Cell the player still occupies.
        from: CellCoord,
        /// Direction of the rejected step.
        direction: Direction,
        /// Specific reason the step failed.
        reason: MoveRejection,
    },
    /// Confirms that the item in the player's cell was used.
    ItemUsed {
        /// Display name of the item.
        name: String,
        /// Uses left after this one; `None` for items without durability.
        remaining: Option<u32>,
        /// Text produced by the item's side effect, if it carries one.
        effect: Option<String>,
    },
    /// Reports that the item in the player's cell is already worn out.
    ItemWornOut {
        /// Display name of the exhausted item.
        name: String,
    },
    /// Reports that the player's cell holds no item to use.
    ItemMissing,
    /// Confirms that an activity ran and produced a result.
    ActivityPerformed {
        /// Description of the activity that ran.
        description: String,
        /// Result text returned by the activity effect.
        outcome: String,
    },
    /// Reports that an activity effect failed at its collaborator boundary.
    ActivityFailed {
        /// Description of the activity that failed.
        description: String,
        /// User-facing failure text converted from the collaborator error.
        reason: String,
    },
    /// Reports that the player's cell holds no activity.
    ActivityMissing,
}

/// Reasons a movement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// A wall blocks the step on at least one side of the boundary.
    Blocked,
    /// The destination lies outside the maze bounds.
    OutOfBounds,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in fixed N/S/E/W order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Returns the direction pointing back across the same boundary.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Stable index used by wall-flag arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Compass name shown to the player.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }

    /// Parses a player-supplied direction token.
    ///
    /// Accepts full compass names, single-letter abbreviations, and the
    /// up/down/right/left synonym family, all case-insensitively. Unknown
    /// tokens produce a [`DirectionParseError`] that adapters narrate as a
    /// hint rather than raise.
    pub fn parse_token(token: &str) -> Result<Direction, DirectionParseError> {
        match token.to_ascii_lowercase().as_str() {
            "north" | "n" | "up" | "u" => Ok(Direction::North),
            "south" | "s" | "down" | "d" => Ok(Direction::South),
            "east" | "e" | "right" | "r" => Ok(Direction::East),
            "west" | "w" | "left" | "l" => Ok(Direction::West),
            _ => Err(DirectionParseError {
                token: token.to_owned(),
            }),
        }
    }
}

/// Error produced when a direction token cannot be recognized.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized direction token `{token}`")]
pub struct DirectionParseError {
    token: String,
}

impl DirectionParseError {
    /// The token that failed to parse, preserved for narration.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Location of a single maze cell expressed as zero-based x/y coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Coordinate one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative coordinate
    /// space; upper-bound checks belong to the grid that knows its size.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.y.checked_sub(1).map(|y| CellCoord::new(self.x, y)),
            Direction::South => self.y.checked_add(1).map(|y| CellCoord::new(self.x, y)),
            Direction::East => self.x.checked_add(1).map(|x| CellCoord::new(x, self.y)),
            Direction::West => self.x.checked_sub(1).map(|x| CellCoord::new(x, self.y)),
        }
    }
}

/// Dimensions of the maze grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x() < self.width && cell.y() < self.height
    }

    /// Total number of cells covered by the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Unique identifier assigned to an NPC by the world's NPC table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Conversational participants eligible to act in a session.
///
/// The turn machine both consumes this (as the last actor) and produces it
/// (as the next eligible actor); there is no separate state enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// The human explorer driving the session.
    Player,
    /// The narrating controller that answers every player action.
    Bot,
    /// An NPC co-located with the player.
    Npc(NpcId),
}

/// Error rejecting an unusable world configuration before generation starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldBuildError {
    /// Width or height of zero leaves no cell for the player to occupy.
    #[error("world dimensions must be at least 1x1, got {width}x{height}")]
    EmptyGrid {
        /// Requested grid width.
        width: u32,
        /// Requested grid height.
        height: u32,
    },
    /// A fixed start point fell outside the requested grid.
    #[error("start point ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        /// Requested start column.
        x: u32,
        /// Requested start row.
        y: u32,
        /// Requested grid width.
        width: u32,
        /// Requested grid height.
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, GridSize};

    #[test]
    fn opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn parse_accepts_synonyms_case_insensitively() {
        for token in ["north", "N", "up", "U", "nOrTh"] {
            assert_eq!(Direction::parse_token(token), Ok(Direction::North));
        }
        for token in ["south", "s", "DOWN", "d"] {
            assert_eq!(Direction::parse_token(token), Ok(Direction::South));
        }
        for token in ["east", "E", "right", "r"] {
            assert_eq!(Direction::parse_token(token), Ok(Direction::East));
        }
        for token in ["west", "w", "LEFT", "L"] {
            assert_eq!(Direction::parse_token(token), Ok(Direction::West));
        }
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        let error = Direction::parse_token("sideways").expect_err("token must not parse");
        assert_eq!(error.token(), "sideways");
    }

    #[test]
    fn step_respects_the_coordinate_floor() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.step(Direction::North), None);
        assert_eq!(origin.step(Direction::West), None);
        assert_eq!(origin.step(Direction::South), Some(CellCoord::new(0, 1)));
        assert_eq!(origin.step(Direction::East), Some(CellCoord::new(1, 0)));
    }

    #[test]
    fn grid_size_contains_matches_bounds() {
        let size = GridSize::new(3, 2);
        assert!(size.contains(CellCoord::new(2, 1)));
        assert!(!size.contains(CellCoord::new(3, 1)));
        assert!(!size.contains(CellCoord::new(2, 2)));
        assert_eq!(size.cell_count(), 6);
    }
}
