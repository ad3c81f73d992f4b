//! Сохранение и чтение аугментированных выборок (JSON, ключи train/test)

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::augment::{augmented_all, TrainTest};
use crate::augmentation::{Lemmatizer, Translator};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::types::DatasetSelection;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSplit {
    pub created_at: DateTime<Utc>,
    pub datasets: DatasetSelection,
    pub train: crate::types::Corpus,
    pub test: crate::types::Corpus,
}

pub fn write_split(path: &Path, datasets: DatasetSelection, split: &TrainTest) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }

    let stored = StoredSplit {
        created_at: Utc::now(),
        datasets,
        train: split.train.clone(),
        test: split.test.clone(),
    };
    let file = std::fs::File::create(path).map_err(|e| PipelineError::io(path, e))?;
    serde_json::to_writer(std::io::BufWriter::new(file), &stored)?;

    info!(
        "Stored {} train / {} test records at {}",
        split.train.len(),
        split.test.len(),
        path.display()
    );
    Ok(())
}

/// Строит выборки и сохраняет их: подготовка долгая, результат переиспользуется
pub fn store_augmented(
    path: &Path,
    config: &PipelineConfig,
    translator: Option<&dyn Translator>,
    lemmatizer: Option<&dyn Lemmatizer>,
) -> Result<TrainTest> {
    let split = augmented_all(config, translator, lemmatizer)?;
    write_split(path, config.datasets, &split)?;
    Ok(split)
}

pub fn read_stored(path: &Path) -> Result<StoredSplit> {
    let file = std::fs::File::open(path).map_err(|e| PipelineError::io(path, e))?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

/// Как `augmented_all`, но выборки читаются из файла
pub fn read_augmented(path: &Path) -> Result<TrainTest> {
    let stored = read_stored(path)?;
    Ok(TrainTest {
        train: stored.train,
        test: stored.test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Record, Source};

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("augmented.json");
        let split = TrainTest {
            train: vec![Record::new("ein satz", 2.5, Source::TextComplexityDe19)]
                .into_iter()
                .collect(),
            test: vec![Record::new("noch einer", 1.0, Source::TextComplexityDe19)]
                .into_iter()
                .collect(),
        };
        write_split(&path, DatasetSelection::new(true, false, false), &split).unwrap();

        let stored = read_stored(&path).unwrap();
        assert!(stored.datasets.use_textcomp19);
        assert_eq!(read_augmented(&path).unwrap(), split);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("train").is_some());
        assert!(raw.get("test").is_some());
        assert_eq!(raw["train"][0]["source"], 0);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_augmented(&dir.path().join("nope.json")),
            Err(PipelineError::Io { .. })
        ));
    }
}
