//! # Actor Lookup
//!
//! Resolves a checking actor and skill to the numbers needed to build a pool.

use super::{ActorId, Skill};
use crate::{ShopError, ShopResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Characteristic and skill ranks relevant to one check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub characteristic: u32,
    pub rank: u32,
    pub boost: u32,
    pub setback: u32,
}

/// Resolves actors to skill profiles.
pub trait ActorLookup: Send + Sync {
    fn skill_profile(&self, actor: &ActorId, skill: Skill) -> ShopResult<SkillProfile>;
}

/// A skill as written on a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Name of the characteristic the skill is rolled with
    pub characteristic: String,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub boost: u32,
    #[serde(default)]
    pub setback: u32,
}

/// The parts of a character sheet used for shopping checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSheet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub characteristics: HashMap<String, u32>,
    #[serde(default)]
    pub skills: HashMap<String, SkillEntry>,
}

/// Actors held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActors {
    actors: HashMap<ActorId, ActorSheet>,
}

impl InMemoryActors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object mapping actor ids to sheets.
    pub fn from_json_str(json: &str) -> ShopResult<Self> {
        let raw: HashMap<String, ActorSheet> = serde_json::from_str(json)?;
        Ok(Self {
            actors: raw
                .into_iter()
                .map(|(id, sheet)| (ActorId(id), sheet))
                .collect(),
        })
    }

    pub fn load(path: &Path) -> ShopResult<Self> {
        let contents = fs::read_to_string(path)?;
        let actors = Self::from_json_str(&contents)?;
        info!("Loaded {} actors from {:?}", actors.actors.len(), path);
        Ok(actors)
    }

    pub fn insert(&mut self, id: ActorId, sheet: ActorSheet) {
        self.actors.insert(id, sheet);
    }

    pub fn contains(&self, id: &ActorId) -> bool {
        self.actors.contains_key(id)
    }
}

impl ActorLookup for InMemoryActors {
    fn skill_profile(&self, actor: &ActorId, skill: Skill) -> ShopResult<SkillProfile> {
        let sheet = self
            .actors
            .get(actor)
            .ok_or_else(|| ShopError::ActorUnavailable(format!("unknown actor '{}'", actor)))?;

        let entry = sheet.skills.get(skill.name()).ok_or_else(|| {
            ShopError::ActorUnavailable(format!("actor '{}' has no {} skill", actor, skill))
        })?;

        let characteristic = sheet
            .characteristics
            .get(&entry.characteristic)
            .copied()
            .ok_or_else(|| {
                ShopError::ActorUnavailable(format!(
                    "actor '{}' has no {} characteristic",
                    actor, entry.characteristic
                ))
            })?;

        Ok(SkillProfile {
            characteristic,
            rank: entry.rank,
            boost: entry.boost,
            setback: entry.setback,
        })
    }
}
