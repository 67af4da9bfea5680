use std::collections::HashMap;

use crate::tokenize::tokenize;

/// Token → dimension index.
///
/// Indices are handed out in first-occurrence order and never reassigned, so
/// `tokens()[i]` is always the token of dimension `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self { Self::default() }

    /// Build from already tokenized documents, in document then token order.
    pub fn from_token_lists<T: AsRef<[String]>>(token_lists: &[T]) -> Self {
        let mut vocab = Self::new();
        for tokens in token_lists {
            for token in tokens.as_ref() {
                vocab.intern(token);
            }
        }
        vocab
    }

    /// Index of `token`, assigning the next free one if it is unseen.
    pub fn intern(&mut self, token: &str) -> usize {
        if let Some(&idx) = self.index.get(token) {
            return idx;
        }
        let idx = self.tokens.len();
        self.tokens.push(token.to_string());
        self.index.insert(token.to_string(), idx);
        idx
    }

    pub fn get(&self, token: &str) -> Option<usize> { self.index.get(token).copied() }

    pub fn len(&self) -> usize { self.tokens.len() }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn tokens(&self) -> &[String] { &self.tokens }

    pub fn into_tokens(self) -> Vec<String> { self.tokens }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.tokens.iter().enumerate().map(|(i, t)| (t.as_str(), i))
    }
}

pub fn build_vocabulary<S: AsRef<str>>(documents: &[S]) -> Vocabulary {
    let token_lists: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
    Vocabulary::from_token_lists(&token_lists)
}
