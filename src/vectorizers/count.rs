//! Мешок слов: матрица документ × термин

use std::collections::{BTreeSet, HashMap};

use sprs::CsMat;
use tracing::info;

use super::sparse::{counts_to_row, csr_from_rows, SparseRow};
use crate::error::{PipelineError, Result};
use crate::preprocessing::Tokenizer;

#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    tokenizer: Tokenizer,
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn new(stopwords: Option<&[String]>) -> Self {
        let tokenizer = match stopwords {
            Some(words) => Tokenizer::with_stopwords(words),
            None => Tokenizer::new(),
        };
        Self {
            tokenizer,
            vocabulary: HashMap::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Термин → номер колонки (колонки отсортированы по алфавиту)
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<(&String, &usize)> = self.vocabulary.iter().collect();
        names.sort_by_key(|(_, idx)| **idx);
        names.into_iter().map(|(term, _)| term.clone()).collect()
    }

    pub fn fit(&mut self, texts: &[String]) -> Result<()> {
        let terms: BTreeSet<String> = texts
            .iter()
            .flat_map(|t| self.tokenizer.tokenize(t))
            .collect();

        if terms.is_empty() {
            return Err(PipelineError::EmptyVocabulary);
        }

        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        info!("CountVectorizer: {} documents, {} terms", texts.len(), self.vocabulary.len());
        Ok(())
    }

    /// Строки с сырыми частотами; неизвестные термины игнорируются
    pub(crate) fn count_rows(&self, texts: &[String]) -> Result<Vec<SparseRow>> {
        if !self.is_fitted() {
            return Err(PipelineError::NotFitted("CountVectorizer"));
        }

        Ok(texts
            .iter()
            .map(|text| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in self.tokenizer.tokenize(text) {
                    if let Some(&idx) = self.vocabulary.get(&token) {
                        *counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
                counts_to_row(counts)
            })
            .collect())
    }

    pub fn transform(&self, texts: &[String]) -> Result<CsMat<f64>> {
        let rows = self.count_rows(texts)?;
        Ok(csr_from_rows(self.vocabulary.len(), rows))
    }

    pub fn fit_transform(&mut self, texts: &[String]) -> Result<CsMat<f64>> {
        self.fit(texts)?;
        self.transform(texts)
    }
}
