#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Explorer.
//!
//! The world owns the carved grid, the entity tables, and the player's
//! location. Adapters mutate it exclusively through [`apply`] and read it
//! exclusively through the [`query`] module; the narration of events into
//! player-facing text lives with the adapters.

mod entities;
mod generation;
mod grid;

pub use entities::{
    Activity, ActivityEffect, ActivityFailure, Item, ItemEffect, ItemUse, Npc, NpcSeed,
    EXHAUSTED_DIALOGUE,
};
pub use grid::{Cell, Grid};

use maze_explorer_core::{
    CellCoord, Command, Direction, Event, GridSize, MoveRejection, NpcId, WorldBuildError,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const STARTING_ITEM_NAME: &str = "Map";
const STARTING_ITEM_DESCRIPTION: &str = "An old map showing hints of hidden doors.";
const STARTING_ITEM_DETAIL: &str = "The path to the exit is marked with a red line. \
    When you inspect the map, it reads 'The key to the exit is in the room with the sword.'";
const STARTING_ITEM_USES: u32 = 5;
const STARTING_ITEM_EFFECT: &str = "A hidden door opens somewhere in the maze.";

const STARTING_ACTIVITY_DESCRIPTION: &str = "Mine for rare crystals";
const STARTING_ACTIVITY_RESULT: &str = "You found some rare crystals!";

/// Chooses where the player begins and the carving is rooted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartRule {
    /// Deterministic start at the provided cell.
    Fixed(CellCoord),
    /// Uniformly random start among all cells, drawn from the world seed.
    Random,
}

/// Configuration parameters required to construct a world.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    width: u32,
    height: u32,
    start_rule: StartRule,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration for a `width x height` maze.
    #[must_use]
    pub const fn new(width: u32, height: u32, start_rule: StartRule, rng_seed: u64) -> Self {
        Self {
            width,
            height,
            start_rule,
            rng_seed,
        }
    }
}

/// Represents the authoritative Maze Explorer world state.
///
/// Immutable in shape after generation; mutable only in per-cell content and
/// the player's location. One session owns one world; sharing a grid across
/// sessions is not supported.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    start_point: CellCoord,
    finish_point: CellCoord,
    npcs: Vec<Npc>,
    player: CellCoord,
}

impl World {
    /// Generates a new world ready for exploration.
    ///
    /// Generation is deterministic in the configuration: equal configs and
    /// NPC rosters produce identical worlds. The first NPC is placed at the
    /// start cell; any further NPCs land on independently drawn random cells
    /// with no collision avoidance.
    pub fn new(config: Config, npcs: Vec<NpcSeed>) -> Result<Self, WorldBuildError> {
        let size = GridSize::new(config.width, config.height);
        if size.width() == 0 || size.height() == 0 {
            return Err(WorldBuildError::EmptyGrid {
                width: size.width(),
                height: size.height(),
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let start_point = match config.start_rule {
            StartRule::Fixed(cell) => {
                if !size.contains(cell) {
                    return Err(WorldBuildError::StartOutOfBounds {
                        x: cell.x(),
                        y: cell.y(),
                        width: size.width(),
                        height: size.height(),
                    });
                }
                cell
            }
            StartRule::Random => random_cell(size, &mut rng),
        };
        // Fixed-corner convention, clamped so tiny grids still construct.
        // Start == finish is allowed and unguarded.
        let finish_point = CellCoord::new(
            size.width().saturating_sub(2),
            size.height().saturating_sub(2),
        );

        let mut grid = Grid::sealed(size);
        generation::carve(&mut grid, start_point, &mut rng);

        let mut world = Self {
            grid,
            start_point,
            finish_point,
            npcs: Vec::new(),
            player: start_point,
        };
        world.place_starting_loot();
        world.place_starting_activity();
        world.place_npcs(npcs, &mut rng);
        Ok(world)
    }

    fn place_starting_loot(&mut self) {
        let item = Item::new(STARTING_ITEM_NAME, STARTING_ITEM_DESCRIPTION)
            .with_inspection_detail(STARTING_ITEM_DETAIL)
            .with_durability(STARTING_ITEM_USES)
            .with_effect(Box::new(|| String::from(STARTING_ITEM_EFFECT)));
        if let Some(cell) = self.grid.cell_mut(self.start_point) {
            cell.place_item(item);
        }
    }

    fn place_starting_activity(&mut self) {
        let activity = Activity::new(
            STARTING_ACTIVITY_DESCRIPTION,
            Box::new(|| Ok(String::from(STARTING_ACTIVITY_RESULT))),
        );
        if let Some(cell) = self.grid.cell_mut(self.start_point) {
            cell.place_activity(activity);
        }
    }

    fn place_npcs<R: Rng>(&mut self, seeds: Vec<NpcSeed>, rng: &mut R) {
        for (index, seed) in seeds.into_iter().enumerate() {
            let id = NpcId::new(index as u32);
            let cell = if index == 0 {
                self.start_point
            } else {
                random_cell(self.grid.size(), rng)
            };
            let npc = Npc::from_seed(id, seed);
            log::info!("NPC {} placed at ({}, {})", npc.name(), cell.x(), cell.y());
            self.npcs.push(npc);
            if let Some(target) = self.grid.cell_mut(cell) {
                target.place_npc(id);
            }
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.player;
        let Some(to) = self.grid.neighbor(from, direction) else {
            out_events.push(Event::MoveRejected {
                from,
                direction,
                reason: MoveRejection::OutOfBounds,
            });
            return;
        };

        // Both sides of the boundary are checked even though generation
        // guarantees symmetry.
        let open = !self.grid.has_wall(from, direction)
            && !self.grid.has_wall(to, direction.opposite());
        if !open {
            out_events.push(Event::MoveRejected {
                from,
                direction,
                reason: MoveRejection::Blocked,
            });
            return;
        }

        self.player = to;
        out_events.push(Event::PlayerMoved { from, to });
    }

    fn use_item(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player;
        let Some(item) = self
            .grid
            .cell_mut(player)
            .and_then(|cell| cell.item_mut())
        else {
            out_events.push(Event::ItemMissing);
            return;
        };

        let name = item.name().to_owned();
        match item.use_once() {
            ItemUse::Applied { remaining, effect } => out_events.push(Event::ItemUsed {
                name,
                remaining,
                effect,
            }),
            ItemUse::WornOut => out_events.push(Event::ItemWornOut { name }),
        }
    }

    fn interact(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player;
        let Some(activity) = self
            .grid
            .cell_mut(player)
            .and_then(|cell| cell.first_activity_mut())
        else {
            out_events.push(Event::ActivityMissing);
            return;
        };

        let description = activity.description().to_owned();
        match activity.perform() {
            Ok(outcome) => out_events.push(Event::ActivityPerformed {
                description,
                outcome,
            }),
            Err(failure) => {
                log::warn!("activity `{description}` failed: {failure}");
                out_events.push(Event::ActivityFailed {
                    description,
                    reason: failure.to_string(),
                });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => world.move_player(direction, out_events),
        Command::UseItem => world.use_item(out_events),
        Command::Interact => world.interact(out_events),
    }
}

/// Speaks the next scripted line of the identified NPC.
///
/// This is the conversational layer's entry point; the dialogue cursor is the
/// only state it touches, so it sits beside [`apply`] rather than inside the
/// command enum.
pub fn advance_npc_dialogue(world: &mut World, id: NpcId) -> Option<String> {
    world
        .npcs
        .iter_mut()
        .find(|npc| npc.id() == id)
        .map(|npc| npc.next_line().to_owned())
}

/// Installs an additional activity into a cell during session setup.
///
/// Returns `false` when the coordinate lies outside the grid. Shape stays
/// immutable; this only decorates cell content, like construction-time
/// placement does.
pub fn place_activity(world: &mut World, at: CellCoord, activity: Activity) -> bool {
    match world.grid.cell_mut(at) {
        Some(cell) => {
            cell.place_activity(activity);
            true
        }
        None => false,
    }
}

fn random_cell<R: Rng>(size: GridSize, rng: &mut R) -> CellCoord {
    CellCoord::new(
        rng.gen_range(0..size.width()),
        rng.gen_range(0..size.height()),
    )
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use maze_explorer_core::{CellCoord, Direction, NpcId};

    /// Current location of the player.
    #[must_use]
    pub fn player_location(world: &World) -> CellCoord {
        world.player
    }

    /// Cell where exploration began.
    #[must_use]
    pub fn start_point(world: &World) -> CellCoord {
        world.start_point
    }

    /// Cell designated as the maze exit.
    #[must_use]
    pub fn finish_point(world: &World) -> CellCoord {
        world.finish_point
    }

    /// Provides read-only access to the carved grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Directions the player can actually walk from the current cell: the
    /// wall must be open and the destination in bounds.
    #[must_use]
    pub fn open_directions(world: &World) -> Vec<Direction> {
        let player = world.player;
        Direction::ALL
            .into_iter()
            .filter(|direction| {
                world.grid.neighbor(player, *direction).is_some()
                    && !world.grid.has_wall(player, *direction)
            })
            .collect()
    }

    /// Identifiers of the NPCs sharing the player's cell, used by the
    /// participant selector.
    #[must_use]
    pub fn npcs_here(world: &World) -> Vec<NpcId> {
        world
            .grid
            .cell(world.player)
            .map(|cell| cell.npcs().to_vec())
            .unwrap_or_default()
    }

    /// Borrow of the NPC with the provided id, if it exists.
    #[must_use]
    pub fn npc(world: &World, id: NpcId) -> Option<&super::Npc> {
        world.npcs.iter().find(|npc| npc.id() == id)
    }

    /// Full inspection text of the item in the player's cell, if any.
    #[must_use]
    pub fn inspect_item(world: &World) -> Option<String> {
        world
            .grid
            .cell(world.player)
            .and_then(|cell| cell.item())
            .map(|item| item.inspection_text())
    }

    /// Captures everything the location description needs in one snapshot.
    #[must_use]
    pub fn location_view(world: &World) -> LocationView {
        let player = world.player;
        let cell = world.grid.cell(player);

        let item = cell.and_then(|cell| cell.item()).map(|item| ItemSummary {
            name: item.name().to_owned(),
            description: item.description().to_owned(),
        });

        let npcs = cell
            .map(|cell| {
                cell.npcs()
                    .iter()
                    .filter_map(|id| npc(world, *id))
                    .map(|npc| NpcProfile {
                        id: npc.id(),
                        name: npc.name().to_owned(),
                        greeting: npc.greeting().to_owned(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let activities = cell
            .map(|cell| {
                cell.activities()
                    .iter()
                    .map(|activity| activity.description().to_owned())
                    .collect()
            })
            .unwrap_or_default();

        LocationView {
            location: player,
            open_paths: open_directions(world),
            item,
            npcs,
            activities,
        }
    }

    /// Immutable snapshot of the player's current cell used for narration.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct LocationView {
        /// Coordinates of the player's cell.
        pub location: CellCoord,
        /// Directions with an open, in-bounds path.
        pub open_paths: Vec<Direction>,
        /// Item resting in the cell, if any.
        pub item: Option<ItemSummary>,
        /// NPCs present in the cell, in placement order.
        pub npcs: Vec<NpcProfile>,
        /// Descriptions of the activities available in the cell.
        pub activities: Vec<String>,
    }

    /// Name and one-line description of a cell's item.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ItemSummary {
        /// Display name of the item.
        pub name: String,
        /// One-line description of the item.
        pub description: String,
    }

    /// Identity and greeting of an NPC present in a cell.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct NpcProfile {
        /// Identifier in the world's NPC table.
        pub id: NpcId,
        /// Display name of the NPC.
        pub name: String,
        /// Line spoken when the player encounters the NPC.
        pub greeting: String,
    }
}
