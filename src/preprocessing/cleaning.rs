//! Очистка сырого текста перед объединением датасетов

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::types::Corpus;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("compile digit regex"));
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{P}").expect("compile punctuation regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("compile whitespace regex"));

/// Перевод строки заменяется пробелом, чтобы слова соседних строк не слипались
pub fn remove_newlines(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

pub fn remove_numbers(text: &str) -> String {
    DIGITS.replace_all(text, "").into_owned()
}

pub fn remove_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").into_owned()
}

/// Схлопывает последовательности пробелов и обрезает края
pub fn remove_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Все шаги очистки для одного текста
pub fn clean_text(text: &str) -> String {
    let text = remove_newlines(text);
    let text = remove_numbers(&text);
    let text = remove_punctuation(&text);
    let text = remove_whitespace(&text);
    text.to_lowercase()
}

/// Очистка всего корпуса с логированием шагов
pub fn clean_corpus(corpus: &mut Corpus) {
    info!("removing newline command");
    corpus.map_text(remove_newlines);

    info!("removing numbers from data");
    corpus.map_text(remove_numbers);

    info!("removing punctuation from data");
    corpus.map_text(remove_punctuation);

    info!("removing whitespace sequences from data");
    corpus.map_text(remove_whitespace);

    info!("Normalizing sentences");
    corpus.map_text(|t| t.to_lowercase());
}
