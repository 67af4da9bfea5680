//! Domain types shared by the text, vector and recommendation crates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque catalog identifier.
///
/// Menus carry either numeric ids (seed data) or string ids (`dish_<ts>`
/// from the admin screen). The two are distinct values: `1` never matches
/// `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Int(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Text(s)
    }
}

/// A single orderable dish.
///
/// - `id`: unique within one catalog
/// - `veg`: vegetarian flag, rendered as `Veg`/`Non-Veg` in documents
/// - `image`/`notes`: display-only, never vectorized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub veg: bool,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        category: impl Into<String>,
        veg: bool,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            veg,
            price,
            image: None,
            notes: None,
        }
    }
}

/// One line of a placed order. Only `id` is consulted by the recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veg: Option<bool>,
}

impl OrderLine {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self { id: id.into(), name: None, qty: None, price: None, veg: None }
    }
}

/// A past order. History is ordered oldest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl HistoryOrder {
    pub fn with_items(items: Vec<OrderLine>) -> Self {
        Self { items, ..Self::default() }
    }
}

/// The id of the first line of the most recent order, if any.
pub fn reference_item(history: &[HistoryOrder]) -> Option<&ItemId> {
    history.last()?.items.first().map(|line| &line.id)
}

/// Dense TF-IDF weights for one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemVector {
    pub id: ItemId,
    pub vector: Vec<f64>,
}

/// The persisted vector model.
///
/// `vocabulary[i]` names dimension `i` of every vector. `vectors` keep
/// catalog order. `built_at` is epoch milliseconds. `catalog_digest` is a
/// fingerprint of the ordered catalog ids the model was built from; blobs
/// written before it existed simply lack it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfIdfModel {
    #[serde(alias = "vocab")]
    pub vocabulary: Vec<String>,
    pub vectors: Vec<ItemVector>,
    #[serde(alias = "createdAt")]
    pub built_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_digest: Option<String>,
}

impl TfIdfModel {
    pub fn vector_for(&self, id: &ItemId) -> Option<&[f64]> {
        self.vectors
            .iter()
            .find(|v| &v.id == id)
            .map(|v| v.vector.as_slice())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }
}

/// A catalog id paired with its similarity to the reference item.
/// Higher is always better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub id: ItemId,
    pub score: f64,
}
