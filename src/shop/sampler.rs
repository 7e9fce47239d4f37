//! # Item Sampler
//!
//! The stocking loop: draws candidates without replacement, filters them, and
//! checks each eligible one for availability until the shop is full or the
//! pool runs dry.

use super::configuration::ShopConfiguration;
use super::rarity::rarity_to_difficulty;
use crate::{
    CandidateItem, CatalogEntry, CatalogId, CatalogProvider, CheckEngine, CheckOutcome,
    CheckRequest, ItemRef, ItemType, ShopResult, Skill,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio_util::sync::CancellationToken;

/// The parts of an accepted item worth keeping with the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemRef,
    pub name: String,
    pub image: Option<String>,
    pub item_type: ItemType,
    pub catalog: CatalogId,
    pub restricted: bool,
}

impl From<&CandidateItem> for ItemSummary {
    fn from(item: &CandidateItem) -> Self {
        Self {
            id: item.item_ref.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            item_type: item.item_type,
            catalog: item.catalog.clone(),
            restricted: item.is_restricted,
        }
    }
}

/// One stocked item, with the roll that found it and its asking price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub item: ItemSummary,
    pub rolled_outcome: CheckOutcome,
    /// The rolled outcome as symbol glyphs
    pub roll: String,
    /// The dice pool that was rolled, when the check engine rolls dice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice_expression: Option<String>,
    pub final_price: f64,
}

/// How a sampling run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// The requested number of items was stocked
    Filled,
    /// The candidate pool ran out first
    Exhausted,
    /// The caller cancelled; records hold what was stocked so far
    Cancelled,
}

/// Records produced by a run, in acceptance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Item count drawn for this run, before clamping to the pool size
    pub target_count: usize,
    pub records: Vec<ResultRecord>,
    pub completion: Completion,
}

/// Why a drawn candidate did not make it into the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Restricted,
    UnacceptedType(ItemType),
    UnacceptedAttachment(Option<ItemType>),
    FailedCheck,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Restricted => write!(f, "item is restricted and this is not a shady store"),
            Rejection::UnacceptedType(item_type) => {
                write!(f, "{} is not stocked by this kind of store", item_type)
            }
            Rejection::UnacceptedAttachment(Some(target)) => {
                write!(f, "item is a mod for {}, which this store does not stock", target)
            }
            Rejection::UnacceptedAttachment(None) => {
                write!(f, "item is a mod with no target item type")
            }
            Rejection::FailedCheck => write!(f, "failed check to find it"),
        }
    }
}

/// Draws the number of items a shop should hold.
///
/// `floor(random * (max - min)) + min`, so `max` itself is only reached when it
/// equals `min`.
pub fn draw_target_count<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    let span = max.saturating_sub(min) as f64;
    (rng.gen::<f64>() * span).floor() as usize + min
}

/// Asking price for an item.
///
/// # Examples
///
/// ```
/// use shopwright::final_price;
///
/// assert_eq!(final_price(100, 2, 50), 100.0);
/// assert_eq!(final_price(250, 1, 100), 250.0);
/// ```
pub fn final_price(base_price: u32, price_modifier: u32, base_price_percent: u32) -> f64 {
    f64::from(base_price) * f64::from(price_modifier) * (f64::from(base_price_percent) / 100.0)
}

/// Runs the stocking loop for one configuration.
///
/// Candidates are drawn and evaluated strictly one at a time; each detail fetch
/// and check is awaited before the next draw.
pub struct ItemSampler<'a, P: ?Sized, C: ?Sized> {
    config: &'a ShopConfiguration,
    catalog: &'a P,
    checks: &'a C,
}

impl<'a, P, C> ItemSampler<'a, P, C>
where
    P: CatalogProvider + ?Sized,
    C: CheckEngine + ?Sized,
{
    pub fn new(config: &'a ShopConfiguration, catalog: &'a P, checks: &'a C) -> Self {
        Self {
            config,
            catalog,
            checks,
        }
    }

    /// Checks the legality and type filters, in that order.
    pub fn eligibility(&self, item: &CandidateItem) -> Result<(), Rejection> {
        if item.is_restricted && !self.config.allow_restricted_items() {
            return Err(Rejection::Restricted);
        }
        if !self.config.accepts(item.item_type) {
            return Err(Rejection::UnacceptedType(item.item_type));
        }
        if item.item_type == ItemType::Attachment {
            match item.attachment_type {
                Some(target) if self.config.accepts(target) => {}
                other => return Err(Rejection::UnacceptedAttachment(other)),
            }
        }
        Ok(())
    }

    /// Stocks the shop from `pool`.
    ///
    /// The pool is consumed: every drawn candidate is removed whatever its fate.
    /// Cancelling `cancel` ends the run early with the records gathered so far.
    ///
    /// # Errors
    ///
    /// Catalog and check failures abort the run; records gathered before the
    /// failure are discarded.
    pub async fn sample(
        &self,
        mut pool: Vec<CatalogEntry>,
        rng: &mut StdRng,
        cancel: &CancellationToken,
    ) -> ShopResult<GenerationOutcome> {
        let min = self.config.min_item_count();
        let max = self.config.max_item_count();
        let target_count = draw_target_count(rng, min, max);
        let reachable = target_count.min(pool.len());
        info!(
            "Our shop will have {} items (between {} and {}), choosing from {} candidates",
            target_count,
            min,
            max,
            pool.len()
        );

        let mut records = Vec::with_capacity(reachable);

        let completion = loop {
            if records.len() >= reachable {
                if reachable < target_count {
                    break Completion::Exhausted;
                }
                break Completion::Filled;
            }
            if cancel.is_cancelled() {
                break Completion::Cancelled;
            }
            if pool.is_empty() {
                info!(
                    "Unable to find sufficient items, stopping with {} items",
                    records.len()
                );
                break Completion::Exhausted;
            }

            let entry = pool.swap_remove(rng.gen_range(0..pool.len()));
            debug!(
                "Drew candidate {} ({}) from {}",
                entry.display_name, entry.item_ref, entry.catalog
            );

            let item = tokio::select! {
                biased;
                _ = cancel.cancelled() => break Completion::Cancelled,
                detail = self.catalog.fetch_detail(&entry.catalog, &entry.item_ref) => detail?,
            };

            if let Err(rejection) = self.eligibility(&item) {
                debug!("Rejected item {} ({})", item.name, rejection);
                continue;
            }

            let difficulty = rarity_to_difficulty(
                item.rarity.saturating_add(self.config.location_modifier().value()),
            );
            let request = CheckRequest {
                actor: self.config.checking_actor().clone(),
                difficulty: difficulty.difficulty,
                challenge: difficulty.challenge,
                skill: Skill::for_item(item.is_restricted),
            };

            let report = tokio::select! {
                biased;
                _ = cancel.cancelled() => break Completion::Cancelled,
                report = self.checks.perform_check(&request) => report?,
            };
            let outcome = report.outcome;

            if !outcome.is_success() {
                debug!("Rejected item {} ({})", item.name, Rejection::FailedCheck);
                continue;
            }

            let price = final_price(
                item.base_price,
                self.config.price_modifier(),
                self.config.base_price_percent(),
            );
            info!("Passed the check, adding {} to the shop at {}", item.name, price);
            records.push(ResultRecord {
                item: ItemSummary::from(&item),
                rolled_outcome: outcome,
                roll: outcome.symbols(),
                dice_expression: report.dice_expression,
                final_price: price,
            });
        };

        info!(
            "Finished stocking the shop: {} items ({:?})",
            records.len(),
            completion
        );
        Ok(GenerationOutcome {
            target_count,
            records,
            completion,
        })
    }
}
