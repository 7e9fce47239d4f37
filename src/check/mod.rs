//! # Check Module
//!
//! Skill checks that decide whether a shop actually has an item in stock.
//!
//! The generator only supplies a difficulty, a number of challenge upgrades and
//! a skill, then reads back the rolled symbol counts. How the dice are built and
//! rolled is up to the [`CheckEngine`] implementation; [`DicePoolCheckEngine`]
//! rolls narrative dice against actors resolved through an [`ActorLookup`].

pub mod actors;
pub mod dice;

pub use actors::*;
pub use dice::*;

use crate::ShopResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the character whose skill is used for checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Skills used to find items in a shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    /// Used for restricted items
    Negotiation,
    /// Used for everything else
    Streetwise,
}

impl Skill {
    /// The skill rolled to find an item with the given legality.
    pub fn for_item(is_restricted: bool) -> Self {
        if is_restricted {
            Skill::Negotiation
        } else {
            Skill::Streetwise
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Skill::Negotiation => "Negotiation",
            Skill::Streetwise => "Streetwise",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a check engine needs to perform one availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub actor: ActorId,
    pub difficulty: u32,
    pub challenge: u32,
    pub skill: Skill,
}

/// Net symbol counts of a rolled check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub success: u32,
    pub advantage: u32,
    pub triumph: u32,
    pub threat: u32,
    pub despair: u32,
}

impl CheckOutcome {
    /// Whether the check passed.
    pub fn is_success(&self) -> bool {
        self.success >= 1
    }

    /// Renders the outcome as symbol glyphs: `s` success, `a` advantage,
    /// `x` triumph, `t` threat, `y` despair.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopwright::CheckOutcome;
    ///
    /// let outcome = CheckOutcome { success: 2, advantage: 1, threat: 0, triumph: 1, despair: 0 };
    /// assert_eq!(outcome.symbols(), "ssax");
    /// ```
    pub fn symbols(&self) -> String {
        [
            ('s', self.success),
            ('a', self.advantage),
            ('x', self.triumph),
            ('t', self.threat),
            ('y', self.despair),
        ]
        .iter()
        .flat_map(|&(glyph, count)| std::iter::repeat(glyph).take(count as usize))
        .collect()
    }
}

/// What a check engine hands back: the outcome plus the pool it rolled, if it
/// rolled physical dice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub outcome: CheckOutcome,
    pub dice_expression: Option<String>,
}

impl CheckReport {
    pub fn new(outcome: CheckOutcome, dice_expression: impl Into<String>) -> Self {
        Self {
            outcome,
            dice_expression: Some(dice_expression.into()),
        }
    }
}

impl From<CheckOutcome> for CheckReport {
    fn from(outcome: CheckOutcome) -> Self {
        Self {
            outcome,
            dice_expression: None,
        }
    }
}

/// Performs availability checks.
#[async_trait]
pub trait CheckEngine: Send + Sync {
    /// Rolls a check and reports its outcome.
    async fn perform_check(&self, request: &CheckRequest) -> ShopResult<CheckReport>;
}
