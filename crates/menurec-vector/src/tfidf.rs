//! TF-IDF model builder.
//!
//! One dense vector per catalog item over the vocabulary of all synthesized
//! item documents. TF is the token count normalized by document length; IDF
//! uses the smoothed form `ln(1 + N / (1 + df))`, which stays finite and
//! strictly positive even for tokens present in every document.

use chrono::Utc;
use menurec_core::types::{CatalogItem, ItemId, ItemVector, TfIdfModel};
use menurec_text::{tokenize, DocumentTemplate, Vocabulary};

#[derive(Debug, Clone, Default)]
pub struct TfIdfBuilder {
    template: DocumentTemplate,
}

impl TfIdfBuilder {
    pub fn new(template: DocumentTemplate) -> Self {
        Self { template }
    }

    /// Build a fresh model for `catalog`. An empty catalog yields an empty
    /// vocabulary and no vectors.
    pub fn build(&self, catalog: &[CatalogItem]) -> TfIdfModel {
        let documents = self.template.render_all(catalog);
        let token_lists: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();
        let vocab = Vocabulary::from_token_lists(&token_lists);

        let idf = inverse_document_frequencies(&token_lists, &vocab);
        let vectors = catalog
            .iter()
            .zip(&token_lists)
            .map(|(item, tokens)| {
                let tf = term_frequencies(tokens, &vocab);
                ItemVector { id: item.id.clone(), vector: weigh(&tf, &idf) }
            })
            .collect();

        TfIdfModel {
            vocabulary: vocab.into_tokens(),
            vectors,
            built_at: Utc::now().timestamp_millis(),
            catalog_digest: Some(catalog_digest(catalog)),
        }
    }
}

/// Per-dimension frequency of each token in one document, normalized by the
/// document's token count (1 for an empty document). Tokens missing from
/// `vocab` are counted in the length but get no dimension.
pub fn term_frequencies(tokens: &[String], vocab: &Vocabulary) -> Vec<f64> {
    let mut tf = vec![0.0; vocab.len()];
    for token in tokens {
        if let Some(idx) = vocab.get(token) {
            tf[idx] += 1.0;
        }
    }
    let len = tokens.len().max(1) as f64;
    for v in &mut tf {
        *v /= len;
    }
    tf
}

/// Smoothed IDF per vocabulary dimension over `token_lists` (one per document).
pub fn inverse_document_frequencies(token_lists: &[Vec<String>], vocab: &Vocabulary) -> Vec<f64> {
    let n_docs = token_lists.len() as f64;
    let mut df = vec![0usize; vocab.len()];
    let mut seen = vec![false; vocab.len()];
    for tokens in token_lists {
        seen.iter_mut().for_each(|s| *s = false);
        for token in tokens {
            if let Some(idx) = vocab.get(token) {
                if !seen[idx] {
                    seen[idx] = true;
                    df[idx] += 1;
                }
            }
        }
    }
    df.into_iter()
        .map(|count| (1.0 + n_docs / (1.0 + count as f64)).ln())
        .collect()
}

fn weigh(tf: &[f64], idf: &[f64]) -> Vec<f64> {
    tf.iter().zip(idf).map(|(t, i)| t * i).collect()
}

/// blake3 fingerprint of the ordered catalog ids.
///
/// Numeric and string ids hash differently so `1` and `"1"` never collide.
pub fn catalog_digest(catalog: &[CatalogItem]) -> String {
    let mut hasher = blake3::Hasher::new();
    for item in catalog {
        match &item.id {
            ItemId::Int(n) => {
                hasher.update(b"i:");
                hasher.update(n.to_string().as_bytes());
            }
            ItemId::Text(s) => {
                hasher.update(b"s:");
                hasher.update(s.as_bytes());
            }
        }
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}
