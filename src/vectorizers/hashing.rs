//! Hashing trick: без словаря, знак и колонка берутся из xxh3

use std::collections::HashMap;

use sprs::CsMat;
use xxhash_rust::xxh3::xxh3_64;

use super::sparse::{counts_to_row, csr_from_rows, l2_normalize};
use crate::preprocessing::Tokenizer;

pub const DEFAULT_N_FEATURES: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct HashingVectorizer {
    tokenizer: Tokenizer,
    n_features: usize,
}

impl HashingVectorizer {
    pub fn new(stopwords: Option<&[String]>) -> Self {
        Self::with_features(stopwords, DEFAULT_N_FEATURES)
    }

    pub fn with_features(stopwords: Option<&[String]>, n_features: usize) -> Self {
        let tokenizer = match stopwords {
            Some(words) => Tokenizer::with_stopwords(words),
            None => Tokenizer::new(),
        };
        Self {
            tokenizer,
            n_features: n_features.max(1),
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// (колонка, знак) для термина
    pub fn bucket(&self, term: &str) -> (usize, f64) {
        let hash = xxh3_64(term.as_bytes());
        let idx = (hash % self.n_features as u64) as usize;
        let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
        (idx, sign)
    }

    /// Состояния нет, поэтому fit не нужен
    pub fn transform(&self, texts: &[String]) -> CsMat<f64> {
        let rows = texts
            .iter()
            .map(|text| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in self.tokenizer.tokenize(text) {
                    let (idx, sign) = self.bucket(&token);
                    *counts.entry(idx).or_insert(0.0) += sign;
                }
                let mut row = counts_to_row(counts);
                l2_normalize(&mut row);
                row
            })
            .collect();

        csr_from_rows(self.n_features, rows)
    }

    pub fn fit_transform(&self, texts: &[String]) -> CsMat<f64> {
        self.transform(texts)
    }
}

impl Default for HashingVectorizer {
    fn default() -> Self {
        Self::new(None)
    }
}
