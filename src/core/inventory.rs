//! Resources and per-player inventory.
//!
//! ## Inventory
//!
//! A bounded bag of resources plus two side counters:
//! - `x2_active`: one-shot flag doubling the next resource-space gain
//! - `bottlecaps`: scored 1:1 at game end, never spent
//!
//! The sum of held resource counts never exceeds `capacity`; callers clamp
//! gains before adding. Entries that drop to zero are removed, not retained.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A spendable resource kind.
///
/// Bottlecaps are not a `Resource`: they live in their own inventory
/// counter, take no bag space, and are never part of a price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Cheese,
    TinCan,
    Soda,
    Lightbulb,
}

impl Resource {
    /// All resource kinds.
    pub const ALL: [Resource; 4] = [
        Resource::Cheese,
        Resource::TinCan,
        Resource::Soda,
        Resource::Lightbulb,
    ];
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Cheese => "cheese",
            Resource::TinCan => "tin can",
            Resource::Soda => "soda",
            Resource::Lightbulb => "lightbulb",
        };
        write!(f, "{name}")
    }
}

/// A player's resource holding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Upper bound on total held resource units. Grows only via the mole
    /// shop (purchase or theft).
    pub capacity: u32,

    /// Held counts. Invariant: no zero-count entries.
    res: FxHashMap<Resource, u32>,

    /// One-shot doubling flag from the frog shop.
    pub x2_active: bool,

    /// Endgame points, 1:1 by default.
    pub bottlecaps: u32,
}

impl Inventory {
    /// Create an empty inventory with the given capacity.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            res: FxHashMap::default(),
            x2_active: false,
            bottlecaps: 0,
        }
    }

    /// Total resource units held.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.res.values().sum()
    }

    /// Units of free space remaining.
    #[must_use]
    pub fn free_space(&self) -> u32 {
        self.capacity.saturating_sub(self.total())
    }

    /// Held count of one resource.
    #[must_use]
    pub fn count(&self, resource: Resource) -> u32 {
        self.res.get(&resource).copied().unwrap_or(0)
    }

    /// Check whether at least `amount` of `resource` is held.
    #[must_use]
    pub fn has(&self, resource: Resource, amount: u32) -> bool {
        self.count(resource) >= amount
    }

    /// Add resources. Does not check capacity; callers clamp with
    /// [`free_space`](Self::free_space) first.
    pub fn add(&mut self, resource: Resource, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.res.entry(resource).or_insert(0) += amount;
    }

    /// Remove resources, saturating at zero. A count that reaches zero is
    /// dropped from the map entirely.
    pub fn remove(&mut self, resource: Resource, amount: u32) {
        if amount == 0 {
            return;
        }
        if let Some(count) = self.res.get_mut(&resource) {
            *count = count.saturating_sub(amount);
            if *count == 0 {
                self.res.remove(&resource);
            }
        }
    }

    /// Iterate over (resource, count) pairs.
    pub fn resources(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        self.res.iter().map(|(r, c)| (*r, *c))
    }
}
