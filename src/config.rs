//! Конфигурация пайплайна (JSON)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::types::DatasetSelection;
use crate::vectorizers::word2vec::Algorithm;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub datasets: DatasetSelection,
    #[serde(default)]
    pub augmentation: AugmentationConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentationConfig {
    #[serde(default)]
    pub backtrans: bool,
    #[serde(default)]
    pub lemmatization: bool,
    #[serde(default)]
    pub stemming: bool,
    #[serde(default)]
    pub randword_swap: bool,
    #[serde(default)]
    pub randword_del: bool,
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    /// Без seed разбиение и аугментация недетерминированы
    #[serde(default)]
    pub seed: Option<u64>,
    /// TSV "форма<TAB>лемма"
    #[serde(default)]
    pub lemma_table: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// LibreTranslate-совместимый endpoint, например http://localhost:5000
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerConfig {
    #[serde(default = "default_vectorizer_kind")]
    pub kind: String,
    #[serde(default)]
    pub stopwords: Option<StopwordsSetting>,
    /// z-score для плотных признаков (word2vec)
    #[serde(default)]
    pub standardize: bool,
    #[serde(default)]
    pub word2vec: Word2VecConfig,
}

/// `"german"` или явный список слов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopwordsSetting {
    Named(String),
    List(Vec<String>),
}

impl StopwordsSetting {
    pub fn resolve(&self) -> Result<Vec<String>> {
        match self {
            StopwordsSetting::Named(name) if name.eq_ignore_ascii_case("german") => {
                Ok(crate::preprocessing::stopwords::german())
            }
            StopwordsSetting::Named(name) => Err(PipelineError::InvalidConfig(format!(
                "unknown stopword list '{name}'"
            ))),
            StopwordsSetting::List(words) => Ok(words.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word2VecConfig {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_lr")]
    pub lr: f64,
    #[serde(default = "default_min_lr")]
    pub min_lr: f64,
    #[serde(default = "default_num_features")]
    pub num_features: usize,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default = "default_negative")]
    pub negative: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_test_size() -> f64 { 0.1 }
fn default_timeout_secs() -> u64 { 30 }
fn default_vectorizer_kind() -> String { "tfidf".to_string() }
fn default_epochs() -> usize { 10 }
fn default_lr() -> f64 { 0.05 }
fn default_min_lr() -> f64 { 0.0001 }
fn default_num_features() -> usize { 120 }
fn default_window_size() -> usize { 10 }
fn default_min_count() -> usize { 7 }
fn default_negative() -> usize { 5 }
fn default_model_path() -> PathBuf { PathBuf::from("data/word2vec.json") }

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            backtrans: false,
            lemmatization: false,
            stemming: false,
            randword_swap: false,
            randword_del: false,
            test_size: default_test_size(),
            seed: None,
            lemma_table: None,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            kind: default_vectorizer_kind(),
            stopwords: None,
            standardize: false,
            word2vec: Word2VecConfig::default(),
        }
    }
}

impl Default for Word2VecConfig {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            lr: default_lr(),
            min_lr: default_min_lr(),
            num_features: default_num_features(),
            window_size: default_window_size(),
            min_count: default_min_count(),
            algorithm: Algorithm::default(),
            negative: default_negative(),
            seed: None,
            model_path: default_model_path(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            datasets: DatasetSelection::default(),
            augmentation: AugmentationConfig::default(),
            translator: TranslatorConfig::default(),
            vectorizer: VectorizerConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let config: PipelineConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let test_size = self.augmentation.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "test_size must be in (0, 1), got {test_size}"
            )));
        }

        let w2v = &self.vectorizer.word2vec;
        if w2v.num_features == 0 || w2v.window_size == 0 || w2v.epochs == 0 {
            return Err(PipelineError::InvalidConfig(
                "word2vec num_features, window_size and epochs must be positive".to_string(),
            ));
        }
        if w2v.min_lr > w2v.lr {
            return Err(PipelineError::InvalidConfig(format!(
                "word2vec min_lr ({}) exceeds lr ({})",
                w2v.min_lr, w2v.lr
            )));
        }

        if let Some(stopwords) = &self.vectorizer.stopwords {
            stopwords.resolve()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.datasets.is_empty());
        assert_eq!(config.augmentation.test_size, 0.1);
        assert_eq!(config.vectorizer.kind, "tfidf");
        assert_eq!(config.vectorizer.word2vec.num_features, 120);
        assert_eq!(config.vectorizer.word2vec.algorithm, Algorithm::SkipGram);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_sections() {
        let json = r#"{
            "datasets": {"use_textcomp19": true},
            "augmentation": {"stemming": true, "seed": 7},
            "vectorizer": {"kind": "hash", "stopwords": "german"}
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert!(config.datasets.use_textcomp19);
        assert!(!config.datasets.use_dw);
        assert!(config.augmentation.stemming);
        assert_eq!(config.augmentation.seed, Some(7));
        assert_eq!(
            config.vectorizer.stopwords,
            Some(StopwordsSetting::Named("german".to_string()))
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_stopword_list() {
        let json = r#"{"vectorizer": {"stopwords": ["der", "die"]}}"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        let words = config.vectorizer.stopwords.unwrap().resolve().unwrap();
        assert_eq!(words, vec!["der".to_string(), "die".to_string()]);
    }

    #[test]
    fn test_invalid_test_size() {
        let mut config = PipelineConfig::default();
        config.augmentation.test_size = 1.0;
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_stopword_list() {
        let mut config = PipelineConfig::default();
        config.vectorizer.stopwords = Some(StopwordsSetting::Named("klingon".to_string()));
        assert!(config.validate().is_err());
    }
}
