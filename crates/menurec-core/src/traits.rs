use std::sync::Arc;

use crate::error::Result;
use crate::types::{CatalogItem, HistoryOrder, TfIdfModel};

/// Whole-document persistence for the vector model.
///
/// `load` never fails: a missing, unreadable or wrongly shaped blob is
/// `None`. `save` replaces the stored document as a whole.
pub trait ModelStore: Send + Sync {
    fn load(&self) -> Option<TfIdfModel>;
    fn save(&self, model: &TfIdfModel) -> Result<()>;
}

impl<S: ModelStore + ?Sized> ModelStore for &S {
    fn load(&self) -> Option<TfIdfModel> { (**self).load() }
    fn save(&self, model: &TfIdfModel) -> Result<()> { (**self).save(model) }
}

impl<S: ModelStore + ?Sized> ModelStore for Box<S> {
    fn load(&self) -> Option<TfIdfModel> { (**self).load() }
    fn save(&self, model: &TfIdfModel) -> Result<()> { (**self).save(model) }
}

impl<S: ModelStore + ?Sized> ModelStore for Arc<S> {
    fn load(&self) -> Option<TfIdfModel> { (**self).load() }
    fn save(&self, model: &TfIdfModel) -> Result<()> { (**self).save(model) }
}

pub trait Recommend: Send + Sync {
    fn recommend(&self, catalog: &[CatalogItem], history: &[HistoryOrder], top_n: usize) -> Vec<CatalogItem>;
}
