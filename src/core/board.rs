//! Board geometry: spaces, colors, shops, and movement arithmetic.
//!
//! The board is an ordered run of spaces from the start space (index 0) to
//! the launch pad (last index). It is immutable after construction; all
//! mutation during play happens on rats and inventories, never on spaces.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::inventory::Resource;

/// Space color. Every space carries exactly one; a multi-rat move must land
/// all of its rats on a single color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Blue,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Red => "RED",
            Color::Blue => "BLUE",
        };
        write!(f, "{name}")
    }
}

/// The three shop flavors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopKind {
    /// Sells inventory capacity.
    Mole,
    /// Sells the one-shot double-next drink.
    Frog,
    /// Sells bottlecaps.
    Crow,
}

impl std::fmt::Display for ShopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShopKind::Mole => "mole",
            ShopKind::Frog => "frog",
            ShopKind::Crow => "crow",
        };
        write!(f, "{name}")
    }
}

/// What a space is, including its kind-specific payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceKind {
    /// The start space; rats spawn and return here.
    Start,
    /// The final space; landing here boards the rat onto the rocket.
    LaunchPad,
    /// Grants `amount` of `resource` on landing (subject to capacity).
    Resource { resource: Resource, amount: u32 },
    /// A shop; interacted with via Buy/Steal, no landing effect.
    Shop(ShopKind),
    /// Advances the lightbulb progress track by `gain` on landing.
    LightbulbTrack { gain: u32 },
    /// Reachable by movement; no landing effect in the current rule set.
    Shortcut,
    /// Reachable by movement; no landing effect in the current rule set.
    Hazard,
}

/// One immutable board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub index: usize,
    pub color: Color,
    pub kind: SpaceKind,
}

/// The full board: ordered spaces plus the shortcut redirect map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spaces: Vec<Space>,
    pub start_index: usize,
    pub launch_index: usize,
    /// Movement redirects: a raw landing index matching a key is replaced
    /// by its value before clamping.
    pub shortcuts: FxHashMap<usize, usize>,
}

impl Board {
    /// Create a board from prebuilt spaces.
    #[must_use]
    pub fn new(
        spaces: Vec<Space>,
        start_index: usize,
        launch_index: usize,
        shortcuts: FxHashMap<usize, usize>,
    ) -> Self {
        Self {
            spaces,
            start_index,
            launch_index,
            shortcuts,
        }
    }

    /// Number of spaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Check that an index addresses a space.
    #[must_use]
    pub fn in_bounds(&self, index: usize) -> bool {
        index < self.spaces.len()
    }

    /// The space at `index`. Panics on an out-of-bounds index; callers get
    /// in-bounds indices from [`next_index`](Self::next_index).
    #[must_use]
    pub fn space(&self, index: usize) -> &Space {
        &self.spaces[index]
    }

    /// Iterate over all spaces in order.
    pub fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    /// Landing index after moving `steps` forward from `from`.
    ///
    /// The raw target is shortcut-redirected first, then clamped to the
    /// board end, so a long move always lands on the launch pad rather
    /// than overshooting.
    #[must_use]
    pub fn next_index(&self, from: usize, steps: usize) -> usize {
        if steps == 0 {
            return from;
        }
        let mut target = from + steps;
        if let Some(&redirect) = self.shortcuts.get(&target) {
            target = redirect;
        }
        target.min(self.spaces.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_board(len: usize) -> Board {
        let spaces = (0..len)
            .map(|i| Space {
                index: i,
                color: Color::Green,
                kind: if i == 0 {
                    SpaceKind::Start
                } else if i == len - 1 {
                    SpaceKind::LaunchPad
                } else {
                    SpaceKind::Resource {
                        resource: Resource::Cheese,
                        amount: 1,
                    }
                },
            })
            .collect();
        Board::new(spaces, 0, len - 1, FxHashMap::default())
    }

    #[test]
    fn test_next_index_simple() {
        let board = straight_board(10);

        assert_eq!(board.next_index(0, 3), 3);
        assert_eq!(board.next_index(4, 1), 5);
    }

    #[test]
    fn test_next_index_zero_steps() {
        let board = straight_board(10);
        assert_eq!(board.next_index(4, 0), 4);
    }

    #[test]
    fn test_next_index_clamps_to_launch() {
        let board = straight_board(10);

        assert_eq!(board.next_index(8, 5), 9);
        assert_eq!(board.next_index(9, 1), 9);
    }

    #[test]
    fn test_next_index_shortcut_redirect() {
        let mut board = straight_board(10);
        board.shortcuts.insert(3, 7);

        // Raw target 3 redirects to 7.
        assert_eq!(board.next_index(1, 2), 7);
        // Landing elsewhere is unaffected.
        assert_eq!(board.next_index(1, 3), 4);
    }

    #[test]
    fn test_shortcut_applies_before_clamp() {
        let mut board = straight_board(10);
        board.shortcuts.insert(12, 5);

        // Raw 12 is out of bounds but redirects to 5 before clamping.
        assert_eq!(board.next_index(9, 3), 5);
    }

    #[test]
    fn test_in_bounds() {
        let board = straight_board(4);

        assert!(board.in_bounds(0));
        assert!(board.in_bounds(3));
        assert!(!board.in_bounds(4));
    }

    #[test]
    fn test_color_display_is_uppercase() {
        assert_eq!(format!("{}", Color::Yellow), "YELLOW");
        assert_eq!(format!("{}", Color::Blue), "BLUE");
    }

    #[test]
    fn test_board_serialization_round_trip() {
        let mut board = straight_board(6);
        board.shortcuts.insert(2, 4);

        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(board, back);
    }
}
