//! # Rarity
//!
//! Converts an item's rarity into the difficulty of the check to find it.

use serde::{Deserialize, Serialize};

/// Difficulty dice and challenge upgrades for an availability check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Difficulty {
    pub difficulty: u32,
    pub challenge: u32,
}

impl Difficulty {
    pub fn new(difficulty: u32, challenge: u32) -> Self {
        Self {
            difficulty,
            challenge,
        }
    }
}

/// Maps an effective rarity (item rarity plus location modifier) to a check
/// difficulty.
///
/// Rarity up to 10 gives one difficulty die per two points. Above 10 the
/// remainder is turned into challenge upgrades. Division and remainder use
/// floor semantics, and a pool never holds fewer than zero dice.
///
/// # Examples
///
/// ```
/// use shopwright::{rarity_to_difficulty, Difficulty};
///
/// assert_eq!(rarity_to_difficulty(6), Difficulty::new(3, 0));
/// assert_eq!(rarity_to_difficulty(11), Difficulty::new(4, 1));
/// ```
pub fn rarity_to_difficulty(effective_rarity: i32) -> Difficulty {
    if effective_rarity <= 10 {
        let difficulty = effective_rarity.div_euclid(2).max(0);
        Difficulty::new(difficulty as u32, 0)
    } else {
        let remainder = effective_rarity.rem_euclid(10);
        let difficulty = (5 - remainder).max(0);
        Difficulty::new(difficulty as u32, remainder as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_rarities() {
        assert_eq!(rarity_to_difficulty(0), Difficulty::new(0, 0));
        assert_eq!(rarity_to_difficulty(1), Difficulty::new(0, 0));
        assert_eq!(rarity_to_difficulty(6), Difficulty::new(3, 0));
        assert_eq!(rarity_to_difficulty(7), Difficulty::new(3, 0));
        assert_eq!(rarity_to_difficulty(10), Difficulty::new(5, 0));
    }

    #[test]
    fn test_rarities_above_ten() {
        assert_eq!(rarity_to_difficulty(11), Difficulty::new(4, 1));
        assert_eq!(rarity_to_difficulty(14), Difficulty::new(1, 4));
        assert_eq!(rarity_to_difficulty(15), Difficulty::new(0, 5));
        assert_eq!(rarity_to_difficulty(20), Difficulty::new(5, 0));
    }

    #[test]
    fn test_negative_rarities_clamp() {
        assert_eq!(rarity_to_difficulty(-1), Difficulty::new(0, 0));
        assert_eq!(rarity_to_difficulty(-2), Difficulty::new(0, 0));
    }

    #[test]
    fn test_remainders_past_five_drop_difficulty_to_zero() {
        assert_eq!(rarity_to_difficulty(17), Difficulty::new(0, 7));
    }

    #[test]
    fn test_conversion_is_pure() {
        for rarity in -2..=24 {
            assert_eq!(rarity_to_difficulty(rarity), rarity_to_difficulty(rarity));
        }
    }
}
