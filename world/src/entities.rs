//! Items, activities, and NPCs that decorate maze cells.

use std::fmt;

use maze_explorer_core::NpcId;
use thiserror::Error;

/// Line spoken by an NPC whose scripted dialogue ran out.
pub const EXHAUSTED_DIALOGUE: &str = "I have told you all I know.";

/// Side effect invoked when an item is used, producing narration text.
pub type ItemEffect = Box<dyn FnMut() -> String + Send>;

/// Effect invoked when an activity is performed.
///
/// Effects that reach external collaborators report trouble as an
/// [`ActivityFailure`]; the world converts those into events instead of
/// letting collaborator errors escape the controller calling convention.
pub type ActivityEffect = Box<dyn FnMut() -> Result<String, ActivityFailure> + Send>;

/// User-facing failure produced at an activity's collaborator boundary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActivityFailure {
    message: String,
}

impl ActivityFailure {
    /// Wraps an already user-facing failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a single item use.
#[derive(Debug, PartialEq, Eq)]
pub enum ItemUse {
    /// The item applied; `remaining` is `None` for items without durability.
    Applied {
        /// Uses left after this one, if the item wears down at all.
        remaining: Option<u32>,
        /// Narration produced by the item's side effect, if any.
        effect: Option<String>,
    },
    /// Durability already sat at zero; the side effect was not invoked.
    WornOut,
}

/// An object resting in a maze cell that the player can inspect and use.
pub struct Item {
    name: String,
    description: String,
    inspection_detail: Option<String>,
    durability: Option<u32>,
    effect: Option<ItemEffect>,
}

impl Item {
    /// Creates an item with unlimited uses and no hidden detail or effect.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            inspection_detail: None,
            durability: None,
            effect: None,
        }
    }

    /// Attaches detail text revealed only when the item is inspected.
    #[must_use]
    pub fn with_inspection_detail(mut self, detail: impl Into<String>) -> Self {
        self.inspection_detail = Some(detail.into());
        self
    }

    /// Limits the item to the provided number of uses.
    #[must_use]
    pub fn with_durability(mut self, uses: u32) -> Self {
        self.durability = Some(uses);
        self
    }

    /// Attaches a side effect invoked on every successful use.
    #[must_use]
    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Display name of the item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description shown when the item is noticed in a cell.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Uses left before the item wears out, if it wears out at all.
    #[must_use]
    pub fn durability(&self) -> Option<u32> {
        self.durability
    }

    /// Full inspection text, including the hidden detail when present.
    #[must_use]
    pub fn inspection_text(&self) -> String {
        match &self.inspection_detail {
            Some(detail) => format!(
                "{} - {}. Further Details: {}",
                self.name, self.description, detail
            ),
            None => format!(
                "{} - {}. No additional details available.",
                self.name, self.description
            ),
        }
    }

    /// Uses the item once.
    ///
    /// Durability never drops below zero: once exhausted, every further call
    /// reports [`ItemUse::WornOut`] without touching the side effect.
    pub fn use_once(&mut self) -> ItemUse {
        match self.durability {
            Some(0) => ItemUse::WornOut,
            Some(uses) => {
                let remaining = uses - 1;
                self.durability = Some(remaining);
                ItemUse::Applied {
                    remaining: Some(remaining),
                    effect: self.run_effect(),
                }
            }
            None => ItemUse::Applied {
                remaining: None,
                effect: self.run_effect(),
            },
        }
    }

    fn run_effect(&mut self) -> Option<String> {
        self.effect.as_mut().map(|effect| effect())
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("inspection_detail", &self.inspection_detail)
            .field("durability", &self.durability)
            .field("has_effect", &self.effect.is_some())
            .finish()
    }
}

/// A capability of a cell that the player can trigger repeatedly.
///
/// Activities carry no lifecycle of their own; single-use semantics, when
/// wanted, belong to the effect (a claim activity consumes its code list, a
/// mining activity simply runs again).
pub struct Activity {
    description: String,
    effect: ActivityEffect,
}

impl Activity {
    /// Creates an activity from its description and effect.
    #[must_use]
    pub fn new(description: impl Into<String>, effect: ActivityEffect) -> Self {
        Self {
            description: description.into(),
            effect,
        }
    }

    /// Description advertised in the location text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Runs the activity effect once.
    pub fn perform(&mut self) -> Result<String, ActivityFailure> {
        (self.effect)()
    }
}

impl fmt::Debug for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activity")
            .field("description", &self.description)
            .finish()
    }
}

/// Blueprint for an NPC supplied by the caller at world construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpcSeed {
    name: String,
    greeting: String,
    dialogue: Vec<String>,
}

impl NpcSeed {
    /// Creates a blueprint from a name, an encounter greeting, and scripted
    /// dialogue lines spoken in order.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        greeting: impl Into<String>,
        dialogue: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            greeting: greeting.into(),
            dialogue,
        }
    }
}

/// An NPC placed into exactly one cell at world setup.
///
/// NPCs are owned by the world's table; cells only record their ids. They
/// are never moved or destroyed once placed.
#[derive(Clone, Debug)]
pub struct Npc {
    id: NpcId,
    name: String,
    greeting: String,
    dialogue: Vec<String>,
    cursor: usize,
}

impl Npc {
    pub(crate) fn from_seed(id: NpcId, seed: NpcSeed) -> Self {
        Self {
            id,
            name: seed.name,
            greeting: seed.greeting,
            dialogue: seed.dialogue,
            cursor: 0,
        }
    }

    /// Identifier assigned by the world's NPC table.
    #[must_use]
    pub fn id(&self) -> NpcId {
        self.id
    }

    /// Display name of the NPC.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line spoken when the player first encounters the NPC in a cell.
    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Speaks the next scripted line.
    ///
    /// The cursor only ever advances; once the script is exhausted every
    /// further call repeats [`EXHAUSTED_DIALOGUE`].
    pub fn next_line(&mut self) -> &str {
        match self.dialogue.get(self.cursor) {
            Some(line) => {
                self.cursor += 1;
                line
            }
            None => EXHAUSTED_DIALOGUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Activity, ActivityFailure, Item, ItemUse, Npc, NpcSeed, EXHAUSTED_DIALOGUE};
    use maze_explorer_core::NpcId;

    #[test]
    fn durability_counts_down_and_floors_at_zero() {
        let mut item = Item::new("Lantern", "A battered lantern.").with_durability(2);

        assert_eq!(
            item.use_once(),
            ItemUse::Applied {
                remaining: Some(1),
                effect: None,
            }
        );
        assert_eq!(
            item.use_once(),
            ItemUse::Applied {
                remaining: Some(0),
                effect: None,
            }
        );
        assert_eq!(item.use_once(), ItemUse::WornOut);
        assert_eq!(item.use_once(), ItemUse::WornOut);
        assert_eq!(item.durability(), Some(0));
    }

    #[test]
    fn worn_out_items_skip_the_side_effect() {
        let mut item = Item::new("Charm", "A cracked charm.")
            .with_durability(1)
            .with_effect(Box::new(|| String::from("It glows.")));

        assert_eq!(
            item.use_once(),
            ItemUse::Applied {
                remaining: Some(0),
                effect: Some(String::from("It glows.")),
            }
        );
        assert_eq!(item.use_once(), ItemUse::WornOut);
    }

    #[test]
    fn items_without_durability_last_forever() {
        let mut item = Item::new("Compass", "A steady compass.");
        for _ in 0..10 {
            assert_eq!(
                item.use_once(),
                ItemUse::Applied {
                    remaining: None,
                    effect: None,
                }
            );
        }
    }

    #[test]
    fn inspection_text_reveals_the_hidden_detail() {
        let plain = Item::new("Coin", "A shiny gold coin");
        assert_eq!(
            plain.inspection_text(),
            "Coin - A shiny gold coin. No additional details available."
        );

        let detailed = plain.with_inspection_detail("An old king's face marks one side");
        assert_eq!(
            detailed.inspection_text(),
            "Coin - A shiny gold coin. Further Details: An old king's face marks one side"
        );
    }

    #[test]
    fn activity_failures_surface_as_values() {
        let mut activity = Activity::new(
            "Pull the lever",
            Box::new(|| Err(ActivityFailure::new("The lever snaps off."))),
        );
        assert_eq!(
            activity.perform(),
            Err(ActivityFailure::new("The lever snaps off."))
        );
    }

    #[test]
    fn dialogue_cursor_is_monotonic_and_exhausts() {
        let seed = NpcSeed::new(
            "Oberon",
            "A legend nods at you.",
            vec![String::from("First."), String::from("Second.")],
        );
        let mut npc = Npc::from_seed(NpcId::new(0), seed);

        assert_eq!(npc.next_line(), "First.");
        assert_eq!(npc.next_line(), "Second.");
        assert_eq!(npc.next_line(), EXHAUSTED_DIALOGUE);
        assert_eq!(npc.next_line(), EXHAUSTED_DIALOGUE);
    }
}
