//! Стемминг (Snowball, немецкий)

use rust_stemmers::{Algorithm, Stemmer};

pub struct SnowballStemmer {
    inner: Stemmer,
}

impl SnowballStemmer {
    pub fn german() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::German),
        }
    }

    pub fn stem_word(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }

    /// Стемминг по словам
    pub fn stem(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|w| self.inner.stem(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::german()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stems_each_word() {
        let stemmer = SnowballStemmer::german();
        let out = stemmer.stem("katzen laufen");
        assert_eq!(out, format!("{} {}", stemmer.stem_word("katzen"), stemmer.stem_word("laufen")));
        assert_eq!(stemmer.stem_word("katzen"), "katz");
        assert_eq!(stemmer.stem_word("laufen"), "lauf");
    }

    #[test]
    fn test_empty() {
        assert_eq!(SnowballStemmer::german().stem(""), "");
    }
}
