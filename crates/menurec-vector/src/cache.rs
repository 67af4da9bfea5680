//! Validated access to the stored TF-IDF model.
//!
//! The stored model is reused while it still fits the catalog and rebuilt
//! wholesale otherwise. Store failures never reach the caller: a blob that
//! cannot be loaded is a miss, a save that fails is logged and the freshly
//! built model is returned anyway.

use menurec_core::config::CacheValidation;
use menurec_core::error::Result;
use menurec_core::traits::ModelStore;
use menurec_core::types::{CatalogItem, TfIdfModel};
use tracing::{debug, info, warn};

use crate::tfidf::{catalog_digest, TfIdfBuilder};

pub struct ModelCache<S: ModelStore> {
    store: S,
    builder: TfIdfBuilder,
    validation: CacheValidation,
}

impl<S: ModelStore> ModelCache<S> {
    pub fn new(store: S, builder: TfIdfBuilder) -> Self {
        Self { store, builder, validation: CacheValidation::default() }
    }

    pub fn with_validation(mut self, validation: CacheValidation) -> Self {
        self.validation = validation;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Option<TfIdfModel> {
        self.store.load()
    }

    pub fn save(&self, model: &TfIdfModel) -> Result<()> {
        self.store.save(model)
    }

    /// The stored model if it is valid for `catalog`, else a rebuilt one.
    pub fn ensure_model(&self, catalog: &[CatalogItem]) -> TfIdfModel {
        match self.store.load() {
            Some(model) if self.accepts(&model, catalog) => {
                debug!(items = model.len(), built_at = model.built_at, "using cached tf-idf model");
                model
            }
            Some(model) => {
                debug!(cached = model.len(), catalog = catalog.len(), "cached tf-idf model is stale");
                self.rebuild(catalog)
            }
            None => {
                debug!("no usable cached tf-idf model");
                self.rebuild(catalog)
            }
        }
    }

    /// Build from scratch and try to persist. Never fails.
    pub fn rebuild(&self, catalog: &[CatalogItem]) -> TfIdfModel {
        let model = self.builder.build(catalog);
        info!(items = model.len(), vocabulary = model.dim(), "built tf-idf model");
        if let Err(e) = self.store.save(&model) {
            warn!(error = %e, "failed to persist tf-idf model; using in-memory copy");
        }
        model
    }

    fn accepts(&self, model: &TfIdfModel, catalog: &[CatalogItem]) -> bool {
        if model.len() != catalog.len() {
            return false;
        }
        let digest = catalog_digest(catalog);
        let same_ids = model.catalog_digest.as_deref() == Some(digest.as_str());
        match self.validation {
            CacheValidation::Cardinality => {
                if !same_ids {
                    debug!("cached model has the catalog's size but not its ids; accepting");
                }
                true
            }
            CacheValidation::Digest => same_ids,
        }
    }
}
