#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session adapter exposing the maze core to conversational runtimes.
//!
//! A [`Session`] owns one world and turns every operation into the exact text
//! a player reads: commands are dispatched through the world's `apply` entry
//! point and the resulting events are narrated, queries are rendered
//! directly. The conversational/LLM runtime, the transport that ferries the
//! strings, and the claim service behind [`claims`] all stay outside.

pub mod claims;
mod map;
pub mod narrate;
pub mod wire;

use maze_explorer_core::{
    Actor, CellCoord, Command, Direction, Event, NpcId, WorldBuildError, WELCOME_BANNER,
};
use maze_explorer_system_turn_order::next_actor;
use maze_explorer_world::{
    advance_npc_dialogue, apply, place_activity, query, Activity, Config, NpcSeed, World,
};

use crate::wire::MapMessage;

/// One player's exclusive view of one world.
///
/// Access is serialized by construction: one command in, one response out.
/// Embedding servers must create an independent session per connection.
#[derive(Debug)]
pub struct Session {
    world: World,
}

impl Session {
    /// Generates a world from the configuration and NPC roster and opens a
    /// session on it.
    pub fn new(config: Config, npcs: Vec<NpcSeed>) -> Result<Self, WorldBuildError> {
        let world = World::new(config, npcs)?;
        Ok(Self { world })
    }

    /// Read-only access to the underlying world for query composition.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Welcome banner plus the initial location description.
    #[must_use]
    pub fn intro_text(&self) -> String {
        format!("{}\n{}", WELCOME_BANNER, self.describe())
    }

    /// Description of the player's current location. Never mutates state.
    #[must_use]
    pub fn describe(&self) -> String {
        narrate::location_description(&query::location_view(&self.world))
    }

    /// Moves the player by a raw direction token.
    ///
    /// Unrecognized tokens and illegal moves fail softly with their canonical
    /// messages; a successful move answers with the new location description.
    pub fn move_player(&mut self, token: &str) -> String {
        let Ok(direction) = Direction::parse_token(token) else {
            return String::from(narrate::INVALID_DIRECTION);
        };
        self.dispatch(Command::Move { direction })
    }

    /// Detailed inspection of the item in the current cell. Never mutates
    /// state.
    #[must_use]
    pub fn inspect_item(&self) -> String {
        query::inspect_item(&self.world)
            .unwrap_or_else(|| String::from(narrate::NO_ITEM_TO_INSPECT))
    }

    /// Uses the item in the current cell, wearing it down if it has
    /// durability.
    pub fn use_item(&mut self) -> String {
        self.dispatch(Command::UseItem)
    }

    /// Performs the first activity in the current cell.
    pub fn interact_with_activity(&mut self) -> String {
        self.dispatch(Command::Interact)
    }

    /// Renders the fixed-width ASCII map with the player marked.
    #[must_use]
    pub fn render_map(&self) -> String {
        map::render(query::grid(&self.world), query::player_location(&self.world))
    }

    /// Wraps the rendered map for the WebSocket transport.
    #[must_use]
    pub fn map_message(&self) -> MapMessage {
        MapMessage::new(self.render_map())
    }

    /// NPCs sharing the player's current cell.
    #[must_use]
    pub fn npcs_here(&self) -> Vec<NpcId> {
        query::npcs_here(&self.world)
    }

    /// Selects the next eligible actor from fresh co-location data.
    ///
    /// Presence is re-queried on every call, so the answer is always based on
    /// the player's current cell even right after a move.
    #[must_use]
    pub fn next_actor(&self, last_actor: Actor) -> Actor {
        next_actor(last_actor, &self.npcs_here())
    }

    /// Speaks the identified NPC's next scripted line.
    pub fn npc_line(&mut self, id: NpcId) -> Option<String> {
        advance_npc_dialogue(&mut self.world, id)
    }

    /// Installs an additional activity, such as a [`claims`] activity, into a
    /// cell during session setup.
    pub fn install_activity(&mut self, at: CellCoord, activity: Activity) -> bool {
        place_activity(&mut self.world, at, activity)
    }

    fn dispatch(&mut self, command: Command) -> String {
        let mut events = Vec::new();
        apply(&mut self.world, command, &mut events);
        let Some(event) = events.first() else {
            log::warn!("command {command:?} produced no events");
            return String::new();
        };
        match event {
            Event::PlayerMoved { .. } => self.describe(),
            other => narrate::event_text(other),
        }
    }
}
