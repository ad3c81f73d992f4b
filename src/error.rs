//! Ошибки библиотеки

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("dataset {name} not found at {path} (download it first)")]
    DatasetMissing { name: &'static str, path: PathBuf },

    #[error("column {column} missing in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("malformed data in {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("no dataset selected: enable at least one of textcomp19, weebit, dw")]
    NoDatasetSelected,

    #[error(
        "Vectorizer {0} not implemented. Please select one of the following options: \
         'tfidf', 'count', 'hash', 'word2vec', 'pretrained_word2vec'."
    )]
    UnknownVectorizer(String),

    #[error("mode {0} unknown. Please choose 'train' or 'load'")]
    UnknownMode(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,

    #[error("{0} not fitted")]
    NotFitted(&'static str),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
