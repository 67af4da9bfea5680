//! menurec-recommend
//!
//! Picks dishes similar to the customer's most recent purchase. The first line
//! of the last order is the reference item; everything else in the catalog is
//! ranked by TF-IDF cosine similarity to it. Without a usable reference the
//! first `top_n` catalog items are returned in catalog order.

use std::collections::HashMap;

use menurec_core::config::Settings;
use menurec_core::traits::{ModelStore, Recommend};
use menurec_core::types::{reference_item, CatalogItem, HistoryOrder, ItemId};
use menurec_text::DocumentTemplate;
use menurec_vector::{rank_against, ModelCache, TfIdfBuilder};
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 5;

/// A recommended item. `score` is `None` for the catalog-order fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub item: CatalogItem,
    pub score: Option<f64>,
}

pub struct ContentRecommender<S: ModelStore> {
    cache: ModelCache<S>,
    default_top_n: usize,
}

impl<S: ModelStore> ContentRecommender<S> {
    pub fn new(store: S) -> Self {
        Self::with_cache(ModelCache::new(store, TfIdfBuilder::default()))
    }

    pub fn with_cache(cache: ModelCache<S>) -> Self {
        Self { cache, default_top_n: DEFAULT_TOP_N }
    }

    pub fn from_settings(store: S, settings: &Settings) -> Self {
        let builder = TfIdfBuilder::new(DocumentTemplate::new(settings.document.currency_symbol.clone()));
        let cache = ModelCache::new(store, builder).with_validation(settings.cache.validation);
        Self { cache, default_top_n: settings.recommend.top_n }
    }

    pub fn cache(&self) -> &ModelCache<S> { &self.cache }

    pub fn default_top_n(&self) -> usize { self.default_top_n }

    pub fn recommend(&self, catalog: &[CatalogItem], history: &[HistoryOrder], top_n: usize) -> Vec<CatalogItem> {
        self.recommend_scored(catalog, history, top_n)
            .into_iter()
            .map(|r| r.item)
            .collect()
    }

    /// [`Self::recommend`] with the configured default size.
    pub fn recommend_default(&self, catalog: &[CatalogItem], history: &[HistoryOrder]) -> Vec<CatalogItem> {
        self.recommend(catalog, history, self.default_top_n)
    }

    pub fn recommend_scored(&self, catalog: &[CatalogItem], history: &[HistoryOrder], top_n: usize) -> Vec<Recommendation> {
        if catalog.is_empty() {
            return Vec::new();
        }
        // ensured before the history checks so the next call finds a warm cache
        let model = self.cache.ensure_model(catalog);

        let Some(reference) = reference_item(history) else {
            debug!("no purchase history; falling back to catalog order");
            return catalog_order(catalog, top_n);
        };
        let Some(ranked) = rank_against(&model, reference) else {
            debug!(reference = %reference, "reference item missing from model; falling back to catalog order");
            return catalog_order(catalog, top_n);
        };

        let by_id: HashMap<&ItemId, &CatalogItem> = catalog.iter().map(|item| (&item.id, item)).collect();
        ranked
            .into_iter()
            .filter(|scored| &scored.id != reference)
            .take(top_n)
            .filter_map(|scored| {
                let item = by_id.get(&scored.id)?;
                Some(Recommendation { item: (*item).clone(), score: Some(scored.score) })
            })
            .collect()
    }
}

impl<S: ModelStore> Recommend for ContentRecommender<S> {
    fn recommend(&self, catalog: &[CatalogItem], history: &[HistoryOrder], top_n: usize) -> Vec<CatalogItem> {
        Self::recommend(self, catalog, history, top_n)
    }
}

/// One-shot recommendation against `store` with default settings.
pub fn recommend(store: &dyn ModelStore, catalog: &[CatalogItem], history: &[HistoryOrder], top_n: usize) -> Vec<CatalogItem> {
    ContentRecommender::new(store).recommend(catalog, history, top_n)
}

fn catalog_order(catalog: &[CatalogItem], top_n: usize) -> Vec<Recommendation> {
    catalog
        .iter()
        .take(top_n)
        .map(|item| Recommendation { item: item.clone(), score: None })
        .collect()
}
