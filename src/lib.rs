//! Complexity features - датасеты сложности текста, аугментация и векторизация

pub mod augmentation;
pub mod config;
pub mod datasets;
pub mod error;
pub mod pipeline;
pub mod preprocessing;
pub mod types;
pub mod vectorizers;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use types::*;

// Re-export для удобства
pub use pipeline::{all_data, augmented_all, read_augmented, store_augmented, TrainTest};
pub use vectorizers::{vectorize, vectorizer_wrapper, FeatureMatrix, Vectorized};
