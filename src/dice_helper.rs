//! # Dice Helper
//!
//! Reacts to rolled checks by offering help spending the interesting results.
//!
//! Combat rolls qualify when they show advantage, triumph, threat or despair;
//! social rolls qualify when they show anything at all. A qualifying roll gets
//! a [`HelpPrompt`], which starts out offered and expands once clicked.

use log::debug;
use serde::{Deserialize, Serialize};

const COMBAT_SKILLS: [&str; 6] = [
    "Brawl",
    "Lightsaber",
    "Melee",
    "Gunnery",
    "Ranged (Heavy)",
    "Ranged (Light)",
];

const SOCIAL_SKILLS: [&str; 1] = ["Deception"];

/// Raw symbol counts read off a rolled check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResults {
    pub success: u32,
    pub failure: u32,
    pub advantage: u32,
    pub triumph: u32,
    pub threat: u32,
    pub despair: u32,
}

impl RollResults {
    /// Whether any symbol at all was rolled.
    pub fn has_any(&self) -> bool {
        self.success + self.failure + self.advantage + self.triumph + self.threat + self.despair
            > 0
    }

    /// Whether the roll shows symbols that can be spent in combat.
    pub fn has_spendable(&self) -> bool {
        self.advantage > 0 || self.triumph > 0 || self.threat > 0 || self.despair > 0
    }
}

/// Broad kind of skill a roll was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillGroup {
    Combat,
    Social,
    Other,
}

impl SkillGroup {
    pub fn classify(skill: &str) -> Self {
        if COMBAT_SKILLS.contains(&skill) {
            SkillGroup::Combat
        } else if SOCIAL_SKILLS.contains(&skill) {
            SkillGroup::Social
        } else {
            SkillGroup::Other
        }
    }
}

/// Extracts the skill name from a roll's flavor text.
///
/// # Examples
///
/// ```
/// use shopwright::skill_from_flavor;
///
/// assert_eq!(skill_from_flavor("Rolling Ranged (Light)..."), "Ranged (Light)");
/// ```
pub fn skill_from_flavor(flavor: &str) -> String {
    flavor
        .replace("Rolling ", "")
        .replace("...", "")
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

/// A chat message carrying a rolled check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollMessage {
    pub flavor: String,
    pub content: String,
    pub is_roll: bool,
    /// Whether a help prompt was already attached to this message
    pub has_helper: bool,
    pub results: RollResults,
}

impl RollMessage {
    fn is_initiative(&self) -> bool {
        self.content.to_lowercase().contains("initiative")
    }
}

/// Display state of a help prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptState {
    /// A button offering help
    Offered,
    /// The full breakdown of the results
    Expanded,
}

/// Offer to help spend the results of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpPrompt {
    pub skill: String,
    pub group: SkillGroup,
    pub results: RollResults,
    pub state: PromptState,
}

impl HelpPrompt {
    /// Expands the prompt. Returns `false` if it was already expanded.
    pub fn expand(&mut self) -> bool {
        match self.state {
            PromptState::Offered => {
                debug!("Expanding help for {} roll", self.skill);
                self.state = PromptState::Expanded;
                true
            }
            PromptState::Expanded => false,
        }
    }
}

/// Setting-gated reaction to rolled checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceHelper {
    pub enabled: bool,
}

impl Default for DiceHelper {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl DiceHelper {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Decides whether `message` deserves a help prompt.
    ///
    /// Only the GM sees prompts, and only for fresh, non-initiative rolls.
    pub fn react(&self, viewer_is_gm: bool, message: &RollMessage) -> Option<HelpPrompt> {
        if !self.enabled {
            return None;
        }
        if !viewer_is_gm || !message.is_roll || message.has_helper || message.is_initiative() {
            debug!("Ignoring message that is not a fresh roll for the GM");
            return None;
        }

        let skill = skill_from_flavor(&message.flavor);
        let group = SkillGroup::classify(&skill);
        let relevant = match group {
            SkillGroup::Combat => message.results.has_spendable(),
            SkillGroup::Social => message.results.has_any(),
            SkillGroup::Other => false,
        };

        if !relevant {
            debug!("{} roll had no relevant results, skipping", skill);
            return None;
        }

        debug!("{} roll had relevant results, offering help", skill);
        Some(HelpPrompt {
            skill,
            group,
            results: message.results,
            state: PromptState::Offered,
        })
    }
}
