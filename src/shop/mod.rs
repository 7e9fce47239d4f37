//! # Shop Module
//!
//! Shop inventory generation.
//!
//! [`ShopGenerator`] ties the pieces together: it builds the candidate pool from
//! the catalogs a [`ShopConfiguration`] names, seeds a random number generator,
//! and hands both to an [`ItemSampler`]. The resulting [`ShopInventory`] is what
//! callers persist or display.

pub mod configuration;
pub mod rarity;
pub mod sampler;

pub use configuration::*;
pub use rarity::*;
pub use sampler::*;

use crate::utils::create_rng;
use crate::{build_candidate_pool, ActorId, CatalogProvider, CheckEngine, ShopResult};
use log::info;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// A generated shop, ready to hand to whatever stores or shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopInventory {
    pub id: Uuid,
    pub category: Category,
    pub actor: ActorId,
    pub target_count: usize,
    pub completion: Completion,
    pub records: Vec<ResultRecord>,
}

impl ShopInventory {
    fn new(config: &ShopConfiguration, outcome: GenerationOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: config.category(),
            actor: config.checking_actor().clone(),
            target_count: outcome.target_count,
            completion: outcome.completion,
            records: outcome.records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of the asking prices of everything in stock.
    pub fn total_price(&self) -> f64 {
        self.records.iter().map(|record| record.final_price).sum()
    }
}

/// Generates shops from a catalog source and a check engine.
pub struct ShopGenerator<'a, P: ?Sized, C: ?Sized> {
    catalog: &'a P,
    checks: &'a C,
}

impl<'a, P, C> ShopGenerator<'a, P, C>
where
    P: CatalogProvider + ?Sized,
    C: CheckEngine + ?Sized,
{
    pub fn new(catalog: &'a P, checks: &'a C) -> Self {
        Self { catalog, checks }
    }

    /// Generates a shop, running to completion.
    pub async fn generate(&self, config: &ShopConfiguration) -> ShopResult<ShopInventory> {
        self.generate_until(config, &CancellationToken::new()).await
    }

    /// Generates a shop, stopping early with a partial inventory if `cancel` fires.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::ShopError::CatalogUnavailable`] if a catalog cannot be
    /// listed, and with whatever the providers report if an item or check fails
    /// mid-run.
    pub async fn generate_until(
        &self,
        config: &ShopConfiguration,
        cancel: &CancellationToken,
    ) -> ShopResult<ShopInventory> {
        info!(
            "Let's go shopping! {} shop for {}",
            config.category(),
            config.checking_actor()
        );

        let pool = build_candidate_pool(self.catalog, config.source_catalogs()).await?;
        info!("Found {} possible items for the shop", pool.len());

        let mut rng = create_rng(config.seed());
        let outcome = ItemSampler::new(config, self.catalog, self.checks)
            .sample(pool, &mut rng, cancel)
            .await?;

        Ok(ShopInventory::new(config, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GEAR_CATALOG;
    use crate::{
        CandidateItem, CatalogId, CheckOutcome, CheckReport, CheckRequest, InMemoryCatalog,
        ItemRef, ItemType, ShopError,
    };
    use async_trait::async_trait;

    struct Lucky;

    #[async_trait]
    impl CheckEngine for Lucky {
        async fn perform_check(&self, _request: &CheckRequest) -> ShopResult<CheckReport> {
            Ok(CheckOutcome {
                success: 2,
                ..Default::default()
            }
            .into())
        }
    }

    fn gear_catalog(count: usize) -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        for i in 0..count {
            catalog.insert(CandidateItem {
                catalog: CatalogId::new(GEAR_CATALOG),
                item_ref: ItemRef::new(format!("gear-{}", i)),
                name: format!("Gear {}", i),
                image: None,
                item_type: ItemType::Gear,
                attachment_type: None,
                is_restricted: false,
                rarity: 2,
                base_price: 10 * (i as u32 + 1),
            });
        }
        catalog
    }

    fn gear_shop(min: usize, max: usize, seed: u64) -> ShopConfiguration {
        ShopConfiguration::new(
            Category::Gear,
            false,
            min,
            max,
            LocationModifier::NoChange,
            100,
            ActorId::new("pc"),
        )
        .unwrap()
        .with_seed(seed)
    }

    #[tokio::test]
    async fn test_generate_fills_shop() {
        let catalog = gear_catalog(6);
        let generator = ShopGenerator::new(&catalog, &Lucky);

        let inventory = generator.generate(&gear_shop(4, 4, 9)).await.unwrap();
        assert_eq!(inventory.len(), 4);
        assert_eq!(inventory.completion, Completion::Filled);
        assert_eq!(inventory.category, Category::Gear);
        assert!(inventory.total_price() > 0.0);
    }

    #[tokio::test]
    async fn test_seeded_runs_are_reproducible() {
        let catalog = gear_catalog(10);
        let generator = ShopGenerator::new(&catalog, &Lucky);
        let config = gear_shop(2, 8, 1234);

        let first = generator.generate(&config).await.unwrap();
        let second = generator.generate(&config).await.unwrap();

        assert_eq!(first.records, second.records);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_missing_catalog_fails_generation() {
        let catalog = InMemoryCatalog::new();
        let generator = ShopGenerator::new(&catalog, &Lucky);

        let result = generator.generate(&gear_shop(1, 1, 0)).await;
        assert!(matches!(result, Err(ShopError::CatalogUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_inventory_serializes() {
        let catalog = gear_catalog(2);
        let generator = ShopGenerator::new(&catalog, &Lucky);
        let inventory = generator.generate(&gear_shop(1, 1, 3)).await.unwrap();

        let json = serde_json::to_string(&inventory).unwrap();
        let back: ShopInventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inventory);
    }
}
