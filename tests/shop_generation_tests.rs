//! End-to-end shop generation scenarios.

mod common;

use common::{catalog_of, item, AlwaysFind, CancelAfter, OddChallengeLog};
use shopwright::{
    final_price, ActorId, Category, Completion, ItemType, LocationModifier, ShopConfiguration,
    ShopError, ShopGenerator, ShopResult,
};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

fn gear_shop(
    min: usize,
    max: usize,
    location: LocationModifier,
    percent: u32,
) -> ShopConfiguration {
    ShopConfiguration::new(
        Category::Gear,
        false,
        min,
        max,
        location,
        percent,
        ActorId::new("scout"),
    )
    .expect("valid configuration")
    .with_seed(4242)
}

#[tokio::test]
async fn test_five_candidates_target_three() -> ShopResult<()> {
    let items: Vec<_> = (1..=5)
        .map(|i| item(&format!("gear-{}", i), ItemType::Gear, 3, i * 100))
        .collect();
    let catalog = catalog_of(&items);
    let config = gear_shop(3, 3, LocationModifier::PlusTwo, 50);

    let inventory = ShopGenerator::new(&catalog, &AlwaysFind)
        .generate(&config)
        .await?;

    assert_eq!(inventory.len(), 3);
    assert_eq!(inventory.target_count, 3);
    assert_eq!(inventory.completion, Completion::Filled);

    let ids: HashSet<_> = inventory.records.iter().map(|r| r.item.id.clone()).collect();
    assert_eq!(ids.len(), 3);

    for record in &inventory.records {
        let source = items
            .iter()
            .find(|candidate| candidate.item_ref == record.item.id)
            .expect("record comes from the catalog");
        assert_eq!(record.final_price, final_price(source.base_price, 2, 50));
        assert_eq!(record.final_price, f64::from(source.base_price));
        assert_eq!(record.roll, "s");
    }

    Ok(())
}

#[tokio::test]
async fn test_pool_exhaustion_is_not_an_error() -> ShopResult<()> {
    let items = vec![
        item("medpac", ItemType::Gear, 2, 50),
        item("breath-mask", ItemType::Gear, 1, 25),
    ];
    let catalog = catalog_of(&items);
    let config = gear_shop(5, 5, LocationModifier::NoChange, 100);

    let inventory = ShopGenerator::new(&catalog, &AlwaysFind)
        .generate(&config)
        .await?;

    assert!(inventory.len() <= 2);
    assert_eq!(inventory.target_count, 5);
    assert_eq!(inventory.completion, Completion::Exhausted);

    Ok(())
}

#[tokio::test]
async fn test_records_keep_acceptance_order() -> ShopResult<()> {
    // Rarities 11 to 15 roll challenges 1 to 5, so each check is distinguishable
    let items: Vec<_> = (11..=15)
        .map(|rarity| item(&format!("rare-{}", rarity), ItemType::Gear, rarity, 100))
        .collect();
    let catalog = catalog_of(&items);
    let config = gear_shop(5, 5, LocationModifier::NoChange, 100);
    let checks = OddChallengeLog::default();

    let inventory = ShopGenerator::new(&catalog, &checks)
        .generate(&config)
        .await?;

    let stocked: Vec<u32> = inventory
        .records
        .iter()
        .map(|record| {
            let source = items
                .iter()
                .find(|candidate| candidate.item_ref == record.item.id)
                .expect("record comes from the catalog");
            (source.rarity - 10) as u32
        })
        .collect();
    let passed = checks.passed.lock().unwrap().clone();

    assert_eq!(passed.len(), 3);
    assert_eq!(stocked, passed);
    assert_eq!(inventory.completion, Completion::Exhausted);
    Ok(())
}

#[tokio::test]
async fn test_empty_bounds_give_empty_shop() -> ShopResult<()> {
    let items = vec![item("glowrod", ItemType::Gear, 1, 10)];
    let catalog = catalog_of(&items);
    let config = gear_shop(0, 0, LocationModifier::NoChange, 100);

    let inventory = ShopGenerator::new(&catalog, &AlwaysFind)
        .generate(&config)
        .await?;

    assert!(inventory.is_empty());
    assert_eq!(inventory.completion, Completion::Filled);
    Ok(())
}

#[tokio::test]
async fn test_cancellation_keeps_accumulated_records() -> ShopResult<()> {
    let items: Vec<_> = (0..10)
        .map(|i| item(&format!("gear-{}", i), ItemType::Gear, 2, 100))
        .collect();
    let catalog = catalog_of(&items);
    let config = gear_shop(5, 5, LocationModifier::NoChange, 100);

    let cancel = CancellationToken::new();
    let checks = CancelAfter::new(cancel.clone(), 2);

    let inventory = ShopGenerator::new(&catalog, &checks)
        .generate_until(&config, &cancel)
        .await?;

    assert_eq!(inventory.target_count, 5);
    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory.completion, Completion::Cancelled);
    Ok(())
}

#[tokio::test]
async fn test_ineligible_items_never_stocked() -> ShopResult<()> {
    let mut contraband = item("spice", ItemType::Gear, 2, 500);
    contraband.is_restricted = true;
    let mut armor_mod = item("plating", ItemType::Attachment, 2, 300);
    armor_mod.attachment_type = Some(ItemType::Armour);
    let items = vec![
        contraband,
        armor_mod,
        item("vest", ItemType::Armour, 2, 200),
        item("blaster", ItemType::Weapon, 2, 400),
    ];
    let catalog = catalog_of(&items);

    let config = ShopConfiguration::new(
        Category::Weapon,
        false,
        4,
        4,
        LocationModifier::NoChange,
        100,
        ActorId::new("scout"),
    )?
    .with_seed(7);

    let inventory = ShopGenerator::new(&catalog, &AlwaysFind)
        .generate(&config)
        .await?;

    // Only the weapons catalog is drawn from, and it holds one weapon
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.records[0].item.name, "blaster");
    assert_eq!(inventory.completion, Completion::Exhausted);
    Ok(())
}

#[tokio::test]
async fn test_general_store_filters_restricted_and_mods() -> ShopResult<()> {
    let mut contraband = item("spice", ItemType::Gear, 2, 500);
    contraband.is_restricted = true;
    let orphan_mod = item("mystery-mod", ItemType::Attachment, 2, 50);
    let mut scope = item("scope", ItemType::Attachment, 2, 150);
    scope.attachment_type = Some(ItemType::Weapon);
    let items = vec![contraband, orphan_mod, scope, item("vest", ItemType::Armour, 2, 200)];
    let catalog = catalog_of(&items);

    let config = ShopConfiguration::new(
        Category::General,
        false,
        4,
        4,
        LocationModifier::NoChange,
        100,
        ActorId::new("scout"),
    )?
    .with_seed(99);

    let inventory = ShopGenerator::new(&catalog, &AlwaysFind)
        .generate(&config)
        .await?;

    let mut names: Vec<_> = inventory
        .records
        .iter()
        .map(|r| r.item.name.as_str())
        .collect();
    names.sort();
    assert_eq!(names, vec!["scope", "vest"]);
    Ok(())
}

#[tokio::test]
async fn test_invalid_configuration_rejected_before_generation() {
    let result = ShopConfiguration::new(
        Category::Armor,
        false,
        6,
        2,
        LocationModifier::NoChange,
        100,
        ActorId::new("scout"),
    );

    assert!(matches!(result, Err(ShopError::InvalidConfiguration(_))));
}
