//! menurec-text
//!
//! Text side of the recommender: the synthesized per-item document, the
//! tokenizer, and the vocabulary that maps tokens to vector dimensions.
pub mod document;
pub mod tokenize;
pub mod vocab;

pub use document::DocumentTemplate;
pub use tokenize::tokenize;
pub use vocab::{build_vocabulary, Vocabulary};
