use std::cmp::Ordering;

use menurec_core::types::{ItemId, ScoredItem, TfIdfModel};

/// Cosine of the angle between `a` and `b`, over their shared prefix.
///
/// A zero-norm side gives 0 instead of NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Score every model vector against `reference`, best first.
///
/// The sort is stable, so equal scores keep model (catalog) order.
pub fn rank(model: &TfIdfModel, reference: &[f64]) -> Vec<ScoredItem> {
    let mut scored: Vec<ScoredItem> = model
        .vectors
        .iter()
        .map(|v| ScoredItem { id: v.id.clone(), score: cosine_similarity(reference, &v.vector) })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

/// [`rank`] using the stored vector of `id`; `None` if the model lacks it.
pub fn rank_against(model: &TfIdfModel, id: &ItemId) -> Option<Vec<ScoredItem>> {
    model.vector_for(id).map(|reference| rank(model, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use menurec_core::types::ItemVector;

    fn model(vectors: Vec<(i64, Vec<f64>)>) -> TfIdfModel {
        TfIdfModel {
            vocabulary: vec![],
            vectors: vectors.into_iter().map(|(id, vector)| ItemVector { id: ItemId::Int(id), vector }).collect(),
            built_at: 0,
            catalog_digest: None,
        }
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn uses_shared_prefix_only() {
        let s = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 5.0]);
        assert!((s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }

    #[test]
    fn rank_is_descending_and_stable_on_ties() {
        let m = model(vec![
            (1, vec![1.0, 0.0]),
            (2, vec![0.0, 1.0]),
            (3, vec![2.0, 0.0]),
            (4, vec![0.0, 2.0]),
        ]);
        let ranked = rank(&m, &[1.0, 0.0]);
        let ids: Vec<ItemId> = ranked.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![ItemId::Int(1), ItemId::Int(3), ItemId::Int(2), ItemId::Int(4)]);
    }

    #[test]
    fn rank_against_unknown_id_is_none() {
        let m = model(vec![(1, vec![1.0])]);
        assert!(rank_against(&m, &ItemId::Int(9)).is_none());
        assert_eq!(rank_against(&m, &ItemId::Int(1)).map(|r| r.len()), Some(1));
    }
}
