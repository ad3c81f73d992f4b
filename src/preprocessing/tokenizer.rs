//! Токенизация: слова от двух символов (`\b\w\w+\b`)

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("compile token pattern"));

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Токены в нижнем регистре, без стоп-слов
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }

    pub fn tokenize_all(&self, texts: &[String]) -> Vec<Vec<String>> {
        texts.iter().map(|t| self.tokenize(t)).collect()
    }
}

/// Разбиение по пробелам, для аугментаций на уровне слов
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
