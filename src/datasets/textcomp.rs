//! TextComplexityDE19: немецкие предложения с оценками сложности (MOS)

use std::path::{Path, PathBuf};

use tracing::info;

use super::encoding::read_windows_1252;
use super::{column_index, csv_reader};
use crate::error::{PipelineError, Result};
use crate::types::{Corpus, Record, Source};

pub const RATINGS_CSV: &str = "TextComplexityDE19/ratings.csv";

pub fn ratings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(RATINGS_CSV)
}

/// Колонки `Sentence` → `raw_text`, `MOS_Complexity` → `rating`, остальные отбрасываются
pub fn text_comp19_to_df(data_dir: &Path) -> Result<Corpus> {
    let path = ratings_path(data_dir);

    info!("Check for {}", RATINGS_CSV);
    if !path.is_file() {
        return Err(PipelineError::DatasetMissing {
            name: "TextComplexityDE19",
            path,
        });
    }

    info!("Reading in {}", RATINGS_CSV);
    let content = read_windows_1252(&path)?;
    parse_ratings(&content, &path)
}

pub(crate) fn parse_ratings(content: &str, path: &Path) -> Result<Corpus> {
    let mut reader = csv_reader(content);
    let headers = reader
        .headers()
        .map_err(|e| PipelineError::csv(path, e))?
        .clone();

    let sentence_idx = column_index(&headers, "Sentence", path)?;
    let rating_idx = column_index(&headers, "MOS_Complexity", path)?;

    let mut corpus = Corpus::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| PipelineError::csv(path, e))?;
        let sentence = row.get(sentence_idx).unwrap_or_default();
        let raw_rating = row.get(rating_idx).unwrap_or_default().trim();
        let rating: f64 = raw_rating.parse().map_err(|_| PipelineError::Malformed {
            path: path.to_path_buf(),
            message: format!("row {}: MOS_Complexity '{}' is not a number", line + 1, raw_rating),
        })?;
        corpus.push(Record::new(sentence, rating, Source::TextComplexityDe19));
    }

    info!("TextComplexityDE19: {} sentences", corpus.len());
    Ok(corpus)
}
