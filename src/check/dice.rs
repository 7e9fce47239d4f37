//! # Narrative Dice
//!
//! A reference [`CheckEngine`] that builds and rolls a narrative dice pool.
//!
//! Positive dice (ability, proficiency, boost) come from the actor's
//! characteristic and skill; negative dice (difficulty, challenge, setback) from
//! the requested difficulty and the skill's setbacks. Rolled symbols cancel out
//! pairwise before being reported.

use super::{ActorLookup, CheckEngine, CheckOutcome, CheckReport, CheckRequest, SkillProfile};
use crate::ShopResult;
use async_trait::async_trait;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Mutex;

/// Raw symbols shown on one or more die faces, before cancellation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Symbols {
    pub success: u32,
    pub failure: u32,
    pub advantage: u32,
    pub threat: u32,
    pub triumph: u32,
    pub despair: u32,
}

impl Symbols {
    const fn face(success: u32, failure: u32, advantage: u32, threat: u32) -> Self {
        Self {
            success,
            failure,
            advantage,
            threat,
            triumph: 0,
            despair: 0,
        }
    }

    const BLANK: Symbols = Symbols::face(0, 0, 0, 0);
    const TRIUMPH: Symbols = Symbols {
        triumph: 1,
        ..Symbols::BLANK
    };
    const DESPAIR: Symbols = Symbols {
        despair: 1,
        ..Symbols::BLANK
    };

    fn add(&mut self, other: Symbols) {
        self.success += other.success;
        self.failure += other.failure;
        self.advantage += other.advantage;
        self.threat += other.threat;
        self.triumph += other.triumph;
        self.despair += other.despair;
    }

    /// Cancels opposing symbols. Triumph counts as a success and despair as a
    /// failure, but both are also reported in their own right.
    pub fn net(&self) -> CheckOutcome {
        let successes = self.success + self.triumph;
        let failures = self.failure + self.despair;

        CheckOutcome {
            success: successes.saturating_sub(failures),
            advantage: self.advantage.saturating_sub(self.threat),
            triumph: self.triumph,
            threat: self.threat.saturating_sub(self.advantage),
            despair: self.despair,
        }
    }
}

const ABILITY: [Symbols; 8] = [
    Symbols::BLANK,
    Symbols::face(1, 0, 0, 0),
    Symbols::face(1, 0, 0, 0),
    Symbols::face(2, 0, 0, 0),
    Symbols::face(0, 0, 1, 0),
    Symbols::face(0, 0, 1, 0),
    Symbols::face(1, 0, 1, 0),
    Symbols::face(0, 0, 2, 0),
];

const PROFICIENCY: [Symbols; 12] = [
    Symbols::BLANK,
    Symbols::face(1, 0, 0, 0),
    Symbols::face(1, 0, 0, 0),
    Symbols::face(2, 0, 0, 0),
    Symbols::face(2, 0, 0, 0),
    Symbols::face(0, 0, 1, 0),
    Symbols::face(1, 0, 1, 0),
    Symbols::face(1, 0, 1, 0),
    Symbols::face(1, 0, 1, 0),
    Symbols::face(0, 0, 2, 0),
    Symbols::face(0, 0, 2, 0),
    Symbols::TRIUMPH,
];

const BOOST: [Symbols; 6] = [
    Symbols::BLANK,
    Symbols::BLANK,
    Symbols::face(1, 0, 0, 0),
    Symbols::face(1, 0, 1, 0),
    Symbols::face(0, 0, 2, 0),
    Symbols::face(0, 0, 1, 0),
];

const DIFFICULTY: [Symbols; 8] = [
    Symbols::BLANK,
    Symbols::face(0, 1, 0, 0),
    Symbols::face(0, 2, 0, 0),
    Symbols::face(0, 0, 0, 1),
    Symbols::face(0, 0, 0, 1),
    Symbols::face(0, 0, 0, 1),
    Symbols::face(0, 0, 0, 2),
    Symbols::face(0, 1, 0, 1),
];

const CHALLENGE: [Symbols; 12] = [
    Symbols::BLANK,
    Symbols::face(0, 1, 0, 0),
    Symbols::face(0, 1, 0, 0),
    Symbols::face(0, 2, 0, 0),
    Symbols::face(0, 2, 0, 0),
    Symbols::face(0, 0, 0, 1),
    Symbols::face(0, 0, 0, 1),
    Symbols::face(0, 1, 0, 1),
    Symbols::face(0, 1, 0, 1),
    Symbols::face(0, 0, 0, 2),
    Symbols::face(0, 0, 0, 2),
    Symbols::DESPAIR,
];

const SETBACK: [Symbols; 6] = [
    Symbols::BLANK,
    Symbols::BLANK,
    Symbols::face(0, 1, 0, 0),
    Symbols::face(0, 1, 0, 0),
    Symbols::face(0, 0, 0, 1),
    Symbols::face(0, 0, 0, 1),
];

/// Counts of each die type in a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DicePool {
    pub ability: u32,
    pub proficiency: u32,
    pub boost: u32,
    pub difficulty: u32,
    pub challenge: u32,
    pub setback: u32,
}

impl DicePool {
    /// Builds the pool for a check by `profile` against `difficulty` purple dice
    /// with `challenge` upgrades.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopwright::{DicePool, SkillProfile};
    ///
    /// let profile = SkillProfile { characteristic: 3, rank: 1, boost: 0, setback: 0 };
    /// let pool = DicePool::for_check(&profile, 3, 1);
    /// assert_eq!((pool.proficiency, pool.ability), (1, 2));
    /// assert_eq!((pool.challenge, pool.difficulty), (1, 2));
    /// ```
    pub fn for_check(profile: &SkillProfile, difficulty: u32, challenge: u32) -> Self {
        let mut pool = DicePool {
            ability: profile.characteristic.max(profile.rank),
            boost: profile.boost,
            setback: profile.setback,
            difficulty,
            ..Default::default()
        };
        pool.upgrade_ability(profile.characteristic.min(profile.rank));
        pool.upgrade_difficulty(challenge);
        pool
    }

    /// Upgrades ability dice to proficiency dice. An upgrade with no ability
    /// die left adds an ability die instead.
    pub fn upgrade_ability(&mut self, times: u32) {
        for _ in 0..times {
            if self.ability > 0 {
                self.ability -= 1;
                self.proficiency += 1;
            } else {
                self.ability += 1;
            }
        }
    }

    /// Upgrades difficulty dice to challenge dice. An upgrade with no
    /// difficulty die left adds a difficulty die instead.
    pub fn upgrade_difficulty(&mut self, times: u32) {
        for _ in 0..times {
            if self.difficulty > 0 {
                self.difficulty -= 1;
                self.challenge += 1;
            } else {
                self.difficulty += 1;
            }
        }
    }

    /// Compact description of the pool, one letter per die.
    ///
    /// `P` proficiency, `A` ability, `B` boost, `C` challenge, `D` difficulty,
    /// `S` setback.
    pub fn expression(&self) -> String {
        [
            ('P', self.proficiency),
            ('A', self.ability),
            ('B', self.boost),
            ('C', self.challenge),
            ('D', self.difficulty),
            ('S', self.setback),
        ]
        .iter()
        .flat_map(|&(letter, count)| std::iter::repeat(letter).take(count as usize))
        .collect()
    }

    /// Rolls every die in the pool and sums the raw symbols.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbols {
        let mut total = Symbols::default();
        let dice: [(&[Symbols], u32); 6] = [
            (&ABILITY[..], self.ability),
            (&PROFICIENCY[..], self.proficiency),
            (&BOOST[..], self.boost),
            (&DIFFICULTY[..], self.difficulty),
            (&CHALLENGE[..], self.challenge),
            (&SETBACK[..], self.setback),
        ];

        for (faces, count) in dice {
            for _ in 0..count {
                total.add(faces[rng.gen_range(0..faces.len())]);
            }
        }

        total
    }
}

/// Rolls narrative dice pools for actors resolved through an [`ActorLookup`].
pub struct DicePoolCheckEngine<A> {
    actors: A,
    rng: Mutex<StdRng>,
}

impl<A: ActorLookup> DicePoolCheckEngine<A> {
    pub fn new(actors: A, rng: StdRng) -> Self {
        Self {
            actors,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl<A: ActorLookup> CheckEngine for DicePoolCheckEngine<A> {
    async fn perform_check(&self, request: &CheckRequest) -> ShopResult<CheckReport> {
        let profile = self.actors.skill_profile(&request.actor, request.skill)?;
        let pool = DicePool::for_check(&profile, request.difficulty, request.challenge);

        let symbols = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            pool.roll(&mut *rng)
        };
        let outcome = symbols.net();
        let expression = pool.expression();

        debug!(
            "{} rolled {} for {}: {}",
            request.actor,
            expression,
            request.skill,
            outcome.symbols()
        );
        Ok(CheckReport::new(outcome, expression))
    }
}
