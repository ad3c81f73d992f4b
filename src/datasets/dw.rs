//! Deutsche Welle: тексты и абзацы статей с уровнями CEFR

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use super::rating::replace_rating;
use super::{column_index, csv_reader};
use crate::error::{PipelineError, Result};
use crate::types::{Corpus, Record, Source};

pub const PAGES_CSV: &str = "pages.csv";
pub const TEXT_CSV: &str = "text.csv";
pub const PARAGRAPHS_CSV: &str = "paragraphs.csv";

pub fn dw_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("dw")
}

/// Пары (url, text) из text.csv / paragraphs.csv
fn read_url_texts(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let mut reader = csv_reader(&content);
    let headers = reader
        .headers()
        .map_err(|e| PipelineError::csv(path, e))?
        .clone();
    let url_idx = column_index(&headers, "url", path)?;
    let text_idx = column_index(&headers, "text", path)?;

    reader
        .records()
        .map(|row| {
            let row = row.map_err(|e| PipelineError::csv(path, e))?;
            Ok((
                row.get(url_idx).unwrap_or_default().to_string(),
                row.get(text_idx).unwrap_or_default().to_string(),
            ))
        })
        .collect()
}

/// url → уровни (в порядке файла; url может встречаться несколько раз)
fn read_page_levels(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let mut reader = csv_reader(&content);
    let headers = reader
        .headers()
        .map_err(|e| PipelineError::csv(path, e))?
        .clone();
    let url_idx = column_index(&headers, "url", path)?;
    let levels_idx = column_index(&headers, "levels", path)?;

    let mut pages: HashMap<String, Vec<String>> = HashMap::new();
    for row in reader.records() {
        let row = row.map_err(|e| PipelineError::csv(path, e))?;
        pages
            .entry(row.get(url_idx).unwrap_or_default().to_string())
            .or_default()
            .push(row.get(levels_idx).unwrap_or_default().to_string());
    }
    Ok(pages)
}

/// Inner join по url с сохранением порядка левой таблицы
fn join_on_url(rows: Vec<(String, String)>, pages: &HashMap<String, Vec<String>>) -> Corpus {
    rows.into_iter()
        .flat_map(|(url, text)| {
            pages
                .get(&url)
                .into_iter()
                .flatten()
                .map(move |levels| {
                    Record::new(text.clone(), f64::from(replace_rating(levels)), Source::Dw)
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Тексты статей, затем абзацы; уровень берётся со страницы
pub fn dw_to_df(data_dir: &Path) -> Result<Corpus> {
    let dir = dw_dir(data_dir);

    info!("Check for dw dataset");
    for file in [PAGES_CSV, TEXT_CSV, PARAGRAPHS_CSV] {
        let path = dir.join(file);
        if !path.is_file() {
            return Err(PipelineError::DatasetMissing { name: "dw", path });
        }
    }

    info!("Reading in dw export");
    let pages = read_page_levels(&dir.join(PAGES_CSV))?;
    let texts = read_url_texts(&dir.join(TEXT_CSV))?;
    let paragraphs = read_url_texts(&dir.join(PARAGRAPHS_CSV))?;

    let corpus = join_on_url(texts, &pages).append(join_on_url(paragraphs, &pages));
    info!("dw: {} rows", corpus.len());
    Ok(corpus)
}
