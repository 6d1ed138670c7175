//! Canonical user-facing strings narrated from world events and queries.
//!
//! Every message the player reads comes from this module, so the wording is
//! the compatibility contract with existing transcripts. Nothing here touches
//! world state.

use maze_explorer_core::{Event, MoveRejection};
use maze_explorer_world::query::LocationView;

/// Rejection shown when a wall blocks the requested step.
pub const MOVE_BLOCKED: &str = "You can't move that way.";

/// Rejection shown when the step would leave the maze.
pub const MOVE_OUT_OF_BOUNDS: &str = "You can't move beyond the maze boundaries.";

/// Hint shown when a direction token cannot be recognized.
pub const INVALID_DIRECTION: &str = "Invalid direction. Use 'north', 'south', 'east', 'west', \
    or their abbreviations and synonyms like 'up' for north.";

/// Message shown when the current cell holds no item to inspect.
pub const NO_ITEM_TO_INSPECT: &str = "There is no item here to inspect.";

/// Message shown when the current cell holds no item to use.
pub const NO_ITEM_TO_USE: &str = "There is no item here to use.";

/// Message shown when the current cell holds no activity.
pub const NO_ACTIVITY: &str = "There is no activity here to interact with.";

/// Renders the full location description block.
pub(crate) fn location_description(view: &LocationView) -> String {
    let paths = if view.open_paths.is_empty() {
        String::from("You are trapped with no paths available.")
    } else {
        let names: Vec<&str> = view
            .open_paths
            .iter()
            .map(|direction| direction.name())
            .collect();
        format!("Paths available: {}", names.join(", "))
    };

    let mut description = format!(
        "You are now at location ({}, {}). {}",
        view.location.x(),
        view.location.y(),
        paths
    );

    match &view.item {
        Some(item) => {
            description.push_str(&format!(
                "\nYou see an item here: {} - {}",
                item.name, item.description
            ));
        }
        None => description.push_str("\nThere is nothing of interest here."),
    }

    for npc in &view.npcs {
        description.push_str(&format!(
            "\nYou encounter a character: {}. {}",
            npc.name, npc.greeting
        ));
    }

    for activity in &view.activities {
        description.push_str(&format!("\nActivity available: {activity}"));
    }

    description
}

/// Renders the narration for a world event that is not a successful move.
///
/// Successful moves are narrated as the destination's location description,
/// which needs query access the event does not carry; the session handles
/// that case before calling here.
pub(crate) fn event_text(event: &Event) -> String {
    match event {
        Event::PlayerMoved { to, .. } => {
            // Fallback wording only; the session describes the new location.
            format!("You move to ({}, {}).", to.x(), to.y())
        }
        Event::MoveRejected { reason, .. } => match reason {
            MoveRejection::Blocked => String::from(MOVE_BLOCKED),
            MoveRejection::OutOfBounds => String::from(MOVE_OUT_OF_BOUNDS),
        },
        Event::ItemUsed {
            name,
            remaining,
            effect,
        } => item_used_text(name, *remaining, effect.as_deref()),
        Event::ItemWornOut { name } => {
            format!("The {name} is already worn out and cannot be used.")
        }
        Event::ItemMissing => String::from(NO_ITEM_TO_USE),
        Event::ActivityPerformed { outcome, .. } => outcome.clone(),
        Event::ActivityFailed { reason, .. } => reason.clone(),
        Event::ActivityMissing => String::from(NO_ACTIVITY),
    }
}

fn item_used_text(name: &str, remaining: Option<u32>, effect: Option<&str>) -> String {
    let mut message = match remaining {
        Some(0) => format!("You use the {name}. It has worn out and can no longer be used."),
        Some(uses) => format!("You use the {name}. It can be used {uses} more times."),
        None => format!("You use the {name}, but it seems to last forever."),
    };
    if let Some(effect) = effect {
        message.push(' ');
        message.push_str(effect);
    }
    message
}
