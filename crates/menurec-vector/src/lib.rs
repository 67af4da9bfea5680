//! menurec-vector
//!
//! Dense TF-IDF vectors over the menu catalog: building the model, caching it
//! through a [`ModelStore`](menurec_core::traits::ModelStore), and ranking
//! items by cosine similarity.
pub mod cache;
pub mod search;
pub mod store;
pub mod tfidf;

pub use cache::ModelCache;
pub use search::{cosine_similarity, rank, rank_against};
pub use store::{FileModelStore, MemoryModelStore};
pub use tfidf::{catalog_digest, TfIdfBuilder};
