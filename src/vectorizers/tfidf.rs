//! TF-IDF: частоты × сглаженный idf, строки нормированы по L2

use std::collections::HashMap;

use sprs::CsMat;

use super::count::CountVectorizer;
use super::sparse::{csr_from_rows, l2_normalize};
use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    counter: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(stopwords: Option<&[String]>) -> Self {
        Self {
            counter: CountVectorizer::new(stopwords),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        self.counter.vocabulary()
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn fit(&mut self, texts: &[String]) -> Result<()> {
        self.counter.fit(texts)?;
        let rows = self.counter.count_rows(texts)?;

        let n_terms = self.counter.vocabulary().len();
        let mut df = vec![0usize; n_terms];
        for row in &rows {
            for (idx, _) in row {
                df[*idx] += 1;
            }
        }

        // idf(t) = ln((1 + n) / (1 + df(t))) + 1
        let n = texts.len() as f64;
        self.idf = df
            .into_iter()
            .map(|d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();
        Ok(())
    }

    pub fn transform(&self, texts: &[String]) -> Result<CsMat<f64>> {
        if self.idf.is_empty() {
            return Err(PipelineError::NotFitted("TfidfVectorizer"));
        }

        let rows = self
            .counter
            .count_rows(texts)?
            .into_iter()
            .map(|mut row| {
                for (idx, value) in row.iter_mut() {
                    *value *= self.idf[*idx];
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(csr_from_rows(self.idf.len(), rows))
    }

    pub fn fit_transform(&mut self, texts: &[String]) -> Result<CsMat<f64>> {
        self.fit(texts)?;
        self.transform(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<String> {
        vec![
            "hund katze".to_string(),
            "hund maus".to_string(),
            "hund".to_string(),
        ]
    }

    #[test]
    fn test_smooth_idf() {
        let mut vec = TfidfVectorizer::new(None);
        vec.fit(&docs()).unwrap();
        let hund = vec.vocabulary()["hund"];
        let katze = vec.vocabulary()["katze"];
        // hund во всех документах
        assert!((vec.idf()[hund] - 1.0).abs() < 1e-12);
        assert!((vec.idf()[katze] - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_unit_norm() {
        let mut vec = TfidfVectorizer::new(None);
        let m = vec.fit_transform(&docs()).unwrap();
        for row in m.outer_iterator() {
            let norm: f64 = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
        // единственный термин → вес 1
        let hund = vec.vocabulary()["hund"];
        assert!((m.get(2, hund).copied().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rare_term_weighs_more() {
        let mut vec = TfidfVectorizer::new(None);
        let m = vec.fit_transform(&docs()).unwrap();
        let hund = vec.vocabulary()["hund"];
        let katze = vec.vocabulary()["katze"];
        assert!(m.get(0, katze).unwrap() > m.get(0, hund).unwrap());
    }

    #[test]
    fn test_transform_before_fit() {
        let vec = TfidfVectorizer::new(None);
        assert!(vec.transform(&docs()).is_err());
    }
}
