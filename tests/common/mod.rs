//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use shopwright::config::{ARMOR_CATALOG, ATTACHMENTS_CATALOG, GEAR_CATALOG, WEAPONS_CATALOG};
use shopwright::{
    CandidateItem, CatalogId, CheckEngine, CheckOutcome, CheckReport, CheckRequest,
    InMemoryCatalog, ItemRef, ItemType, ShopResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Catalog an item of the given type is normally found in.
pub fn home_catalog(item_type: ItemType) -> CatalogId {
    CatalogId::new(match item_type {
        ItemType::Armour => ARMOR_CATALOG,
        ItemType::Gear => GEAR_CATALOG,
        ItemType::Weapon => WEAPONS_CATALOG,
        ItemType::Attachment => ATTACHMENTS_CATALOG,
    })
}

pub fn item(id: &str, item_type: ItemType, rarity: i32, base_price: u32) -> CandidateItem {
    CandidateItem {
        catalog: home_catalog(item_type),
        item_ref: ItemRef::new(id),
        name: id.to_string(),
        image: None,
        item_type,
        attachment_type: None,
        is_restricted: false,
        rarity,
        base_price,
    }
}

pub fn catalog_of(items: &[CandidateItem]) -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for item_type in ItemType::ALL {
        catalog.add_catalog(home_catalog(item_type));
    }
    for item in items {
        catalog.insert(item.clone());
    }
    catalog
}

/// Passes every check with a single success.
pub struct AlwaysFind;

#[async_trait]
impl CheckEngine for AlwaysFind {
    async fn perform_check(&self, _request: &CheckRequest) -> ShopResult<CheckReport> {
        Ok(CheckOutcome {
            success: 1,
            ..Default::default()
        }
        .into())
    }
}

/// Passes every check, cancelling `token` once `limit` checks have been served.
pub struct CancelAfter {
    pub token: CancellationToken,
    pub limit: usize,
    pub served: AtomicUsize,
}

impl CancelAfter {
    pub fn new(token: CancellationToken, limit: usize) -> Self {
        Self {
            token,
            limit,
            served: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CheckEngine for CancelAfter {
    async fn perform_check(&self, _request: &CheckRequest) -> ShopResult<CheckReport> {
        let served = self.served.fetch_add(1, Ordering::SeqCst) + 1;
        if served >= self.limit {
            self.token.cancel();
        }
        Ok(CheckOutcome {
            success: 1,
            ..Default::default()
        }
        .into())
    }
}

/// Passes checks whose total dice count is even.
pub struct EvenDice;

#[async_trait]
impl CheckEngine for EvenDice {
    async fn perform_check(&self, request: &CheckRequest) -> ShopResult<CheckReport> {
        let success = u32::from((request.difficulty + request.challenge) % 2 == 0);
        Ok(CheckOutcome {
            success,
            threat: 1 - success,
            ..Default::default()
        }
        .into())
    }
}

/// Passes checks with an odd challenge count and logs each passed challenge.
#[derive(Default)]
pub struct OddChallengeLog {
    pub passed: Mutex<Vec<u32>>,
}

#[async_trait]
impl CheckEngine for OddChallengeLog {
    async fn perform_check(&self, request: &CheckRequest) -> ShopResult<CheckReport> {
        let success = request.challenge % 2;
        if success == 1 {
            self.passed.lock().unwrap().push(request.challenge);
        }
        Ok(CheckOutcome {
            success,
            ..Default::default()
        }
        .into())
    }
}
