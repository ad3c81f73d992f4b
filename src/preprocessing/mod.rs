/// Модуль предобработки данных

pub mod cleaning;
pub mod normalization;
pub mod stopwords;
pub mod tokenizer;

pub use cleaning::{clean_corpus, clean_text};
pub use normalization::DataNormalizer;
pub use tokenizer::Tokenizer;
