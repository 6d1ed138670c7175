#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Participant selection for the turn-coordination protocol.
//!
//! After every player action the session asks this system who may act next.
//! The answer is a pure function of the last actor and the NPCs sharing the
//! player's current cell, so callers must re-query NPC presence after every
//! move; feeding stale co-location data here is a correctness bug.

use maze_explorer_core::{Actor, NpcId};

/// Selects the next eligible actor.
///
/// The player always hands over to the narrating bot; the bot hands over to
/// the first co-located NPC when one is present and back to the player
/// otherwise; an NPC always returns control to the player.
#[must_use]
pub fn next_actor(last_actor: Actor, npcs_here: &[NpcId]) -> Actor {
    match last_actor {
        Actor::Player => Actor::Bot,
        Actor::Bot => match npcs_here.first() {
            Some(npc) => Actor::Npc(*npc),
            None => Actor::Player,
        },
        Actor::Npc(_) => Actor::Player,
    }
}
