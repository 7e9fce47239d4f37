//! # In-Memory Catalog
//!
//! A [`CatalogProvider`] backed by item lists held in memory, loadable from a
//! JSON document keyed by catalog id.

use super::{CandidateItem, CatalogId, CatalogProvider, IndexEntry, ItemRef, ItemType};
use crate::{ShopError, ShopResult};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// An item as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub attachment_type: Option<ItemType>,
    #[serde(default)]
    pub restricted: bool,
    pub rarity: i32,
    pub price: u32,
}

impl CatalogRecord {
    fn into_candidate(self, catalog: CatalogId) -> CandidateItem {
        CandidateItem {
            catalog,
            item_ref: ItemRef(self.id),
            name: self.name,
            image: self.img,
            item_type: self.item_type,
            attachment_type: self.attachment_type,
            is_restricted: self.restricted,
            rarity: self.rarity,
            base_price: self.price,
        }
    }
}

/// Catalogs held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    catalogs: HashMap<CatalogId, Vec<CandidateItem>>,
}

impl InMemoryCatalog {
    /// Creates an empty set of catalogs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses catalogs from a JSON object mapping catalog ids to item lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopwright::InMemoryCatalog;
    ///
    /// let json = r#"{
    ///     "world.oggdudegear": [
    ///         { "id": "g1", "name": "Stimpack", "type": "gear", "rarity": 1, "price": 25 }
    ///     ]
    /// }"#;
    /// let catalog = InMemoryCatalog::from_json_str(json).unwrap();
    /// assert_eq!(catalog.item_count(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> ShopResult<Self> {
        let raw: HashMap<String, Vec<CatalogRecord>> = serde_json::from_str(json)?;

        let catalogs = raw
            .into_iter()
            .map(|(id, records)| {
                let catalog = CatalogId(id);
                let items = records
                    .into_iter()
                    .map(|record| record.into_candidate(catalog.clone()))
                    .collect();
                (catalog, items)
            })
            .collect();

        Ok(Self { catalogs })
    }

    /// Loads catalogs from a JSON file.
    pub fn load(path: &Path) -> ShopResult<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} items across {} catalogs from {:?}",
            catalog.item_count(),
            catalog.catalogs.len(),
            path
        );
        Ok(catalog)
    }

    /// Registers a catalog with no items.
    pub fn add_catalog(&mut self, catalog: CatalogId) {
        self.catalogs.entry(catalog).or_default();
    }

    /// Adds an item to the catalog named by `item.catalog`, creating it if needed.
    pub fn insert(&mut self, item: CandidateItem) {
        self.catalogs
            .entry(item.catalog.clone())
            .or_default()
            .push(item);
    }

    /// Total number of items across all catalogs.
    pub fn item_count(&self) -> usize {
        self.catalogs.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn list_index(&self, catalog: &CatalogId) -> ShopResult<Vec<IndexEntry>> {
        let items = self
            .catalogs
            .get(catalog)
            .ok_or_else(|| ShopError::CatalogUnavailable {
                catalog: catalog.to_string(),
                reason: "no such catalog".to_string(),
            })?;

        Ok(items
            .iter()
            .map(|item| IndexEntry {
                item_ref: item.item_ref.clone(),
                display_name: item.name.clone(),
                image: item.image.clone(),
            })
            .collect())
    }

    async fn fetch_detail(
        &self,
        catalog: &CatalogId,
        item: &ItemRef,
    ) -> ShopResult<CandidateItem> {
        self.catalogs
            .get(catalog)
            .and_then(|items| items.iter().find(|candidate| &candidate.item_ref == item))
            .cloned()
            .ok_or_else(|| ShopError::ItemUnavailable {
                catalog: catalog.to_string(),
                item: item.to_string(),
                reason: "not found".to_string(),
            })
    }
}
