//! Лемматизация по таблице "форма → лемма"

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{PipelineError, Result};

pub trait Lemmatizer {
    fn lemma(&self, token: &str) -> String;

    /// Лемматизирует каждый токен и склеивает через пробел
    fn lemmatize(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.lemma(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default)]
pub struct LookupLemmatizer {
    exact: HashMap<String, String>,
    folded: HashMap<String, String>,
}

impl LookupLemmatizer {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut lemmatizer = Self::default();
        for (form, lemma) in pairs {
            let form: String = form.into();
            let lemma: String = lemma.into();
            lemmatizer
                .folded
                .entry(form.to_lowercase())
                .or_insert_with(|| lemma.clone());
            lemmatizer.exact.insert(form, lemma);
        }
        lemmatizer
    }

    /// TSV: `форма<TAB>лемма`, строки с `#` и пустые пропускаются
    pub fn from_tsv(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let mut pairs = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (form, lemma) = line.split_once('\t').ok_or_else(|| PipelineError::Malformed {
                path: path.to_path_buf(),
                message: format!("line {}: expected 'form<TAB>lemma'", line_no + 1),
            })?;
            pairs.push((form.trim().to_string(), lemma.trim().to_string()));
        }

        let lemmatizer = Self::from_pairs(pairs);
        info!("Loaded {} lemma forms from {}", lemmatizer.len(), path.display());
        Ok(lemmatizer)
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

impl Lemmatizer for LookupLemmatizer {
    fn lemma(&self, token: &str) -> String {
        self.exact
            .get(token)
            .or_else(|| self.folded.get(&token.to_lowercase()))
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let lem = LookupLemmatizer::from_pairs([("Häuser", "Haus"), ("ging", "gehen")]);
        assert_eq!(lem.lemmatize("die häuser ging schnell"), "die Haus gehen schnell");
    }

    #[test]
    fn test_exact_wins_over_folded() {
        let lem = LookupLemmatizer::from_pairs([("Essen", "Essen"), ("essen", "essen")]);
        assert_eq!(lem.lemma("Essen"), "Essen");
        assert_eq!(lem.lemma("essen"), "essen");
    }

    #[test]
    fn test_from_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemmas.tsv");
        std::fs::write(&path, "# form\tlemma\nKinder\tKind\n\nsah\tsehen\n").unwrap();
        let lem = LookupLemmatizer::from_tsv(&path).unwrap();
        assert_eq!(lem.len(), 2);
        assert_eq!(lem.lemmatize("kinder sah"), "Kind sehen");
    }

    #[test]
    fn test_malformed_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemmas.tsv");
        std::fs::write(&path, "nur-ein-feld\n").unwrap();
        assert!(matches!(
            LookupLemmatizer::from_tsv(&path),
            Err(PipelineError::Malformed { .. })
        ));
    }
}
