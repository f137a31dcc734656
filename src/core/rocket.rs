//! The shared rocket and its five buildable parts.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// One of the five rocket parts. Each is built by at most one player, ever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RocketPart {
    Nose,
    Tank,
    Engine,
    FinA,
    FinB,
}

impl RocketPart {
    pub const COUNT: usize = 5;

    /// All parts, in build-slot order.
    pub const ALL: [RocketPart; Self::COUNT] = [
        RocketPart::Nose,
        RocketPart::Tank,
        RocketPart::Engine,
        RocketPart::FinA,
        RocketPart::FinB,
    ];

    /// Slot index of this part.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            RocketPart::Nose => 0,
            RocketPart::Tank => 1,
            RocketPart::Engine => 2,
            RocketPart::FinA => 3,
            RocketPart::FinB => 4,
        }
    }
}

impl std::fmt::Display for RocketPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RocketPart::Nose => "NOSE",
            RocketPart::Tank => "TANK",
            RocketPart::Engine => "ENGINE",
            RocketPart::FinA => "FIN_A",
            RocketPart::FinB => "FIN_B",
        };
        write!(f, "{name}")
    }
}

/// The shared rocket: one optional builder per part slot.
///
/// A part, once built, is permanently owned by its builder; there is no
/// operation that clears or reassigns a slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rocket {
    builders: [Option<PlayerId>; RocketPart::COUNT],
}

impl Rocket {
    /// Create an unbuilt rocket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a part has been built.
    #[must_use]
    pub fn is_built(&self, part: RocketPart) -> bool {
        self.builders[part.index()].is_some()
    }

    /// The player who built a part, if any.
    #[must_use]
    pub fn builder(&self, part: RocketPart) -> Option<PlayerId> {
        self.builders[part.index()]
    }

    /// Record a part as built. Callers must have checked
    /// [`is_built`](Self::is_built) first; building an already-built part
    /// is a rules-layer error.
    pub fn build(&mut self, part: RocketPart, builder: PlayerId) {
        self.builders[part.index()] = Some(builder);
    }

    /// Number of built parts (game-wide scoring markers).
    #[must_use]
    pub fn built_count(&self) -> usize {
        self.builders.iter().filter(|b| b.is_some()).count()
    }

    /// Iterate over (part, builder) pairs for all five slots.
    pub fn slots(&self) -> impl Iterator<Item = (RocketPart, Option<PlayerId>)> + '_ {
        RocketPart::ALL.iter().map(|&part| (part, self.builders[part.index()]))
    }
}
