//! Weebit: английские тексты по уровням чтения, переведённые на немецкий

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::encoding::read_windows_1252;
use super::rating::replace_rating;
use crate::augmentation::translation::Translator;
use crate::error::{PipelineError, Result};
use crate::types::{Corpus, Record, Source};

pub const TRANSLATED_CACHE: &str = "Weebit_translated.json";

const LEVEL_DIRS: [&str; 3] = ["Ele-Txt", "Adv-Txt", "Int-Txt"];

pub fn levels_root(data_dir: &Path) -> PathBuf {
    data_dir
        .join("WeebitDataset")
        .join("Texts-SeparatedByReadingLevel")
}

pub fn translated_cache_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TRANSLATED_CACHE)
}

/// Исходные (английские) тексты. Первая строка файла содержит уровень сложности.
pub fn read_weebit(data_dir: &Path) -> Result<Corpus> {
    let root = levels_root(data_dir);

    info!("Check for weebit dataset");
    for dir in LEVEL_DIRS {
        let path = root.join(dir);
        if !path.is_dir() {
            return Err(PipelineError::DatasetMissing {
                name: "Weebit",
                path,
            });
        }
    }

    info!("Reading in Weebit Ele-Txt, Int-Txt, Adv-Txt");
    let mut corpus = Corpus::new();
    for dir in LEVEL_DIRS {
        let dir_path = root.join(dir);
        let mut files: Vec<PathBuf> = std::fs::read_dir(&dir_path)
            .map_err(|e| PipelineError::io(&dir_path, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        for file in files {
            let content = read_windows_1252(&file)?;
            match parse_weebit_file(&content) {
                Some(record) => corpus.push(record),
                None => warn!("skipping empty weebit file {}", file.display()),
            }
        }
    }

    info!("Weebit: {} texts", corpus.len());
    Ok(corpus)
}

pub(crate) fn parse_weebit_file(content: &str) -> Option<Record> {
    if content.is_empty() {
        return None;
    }
    let (level, text) = content.split_once('\n').unwrap_or((content, ""));
    Some(Record::new(
        text,
        f64::from(replace_rating(level)),
        Source::Weebit,
    ))
}

/// Читает Weebit и переводит каждый текст на немецкий
pub fn weebit_to_df(data_dir: &Path, translator: &dyn Translator) -> Result<Corpus> {
    let mut corpus = read_weebit(data_dir)?;

    info!("Translating Weebit dataset to german...");
    corpus.try_map_text(|text| translator.translate(text, "en", "de"))?;
    Ok(corpus)
}

/// Сохраняет переведённый Weebit рядом с остальными данными
pub fn store_translated_weebit(data_dir: &Path, translator: &dyn Translator) -> Result<Corpus> {
    let corpus = weebit_to_df(data_dir, translator)?;
    let path = translated_cache_path(data_dir);
    let json = serde_json::to_string(&corpus)?;
    std::fs::write(&path, json).map_err(|e| PipelineError::io(&path, e))?;
    info!("Stored translated weebit dataset at {}", path.display());
    Ok(corpus)
}

/// Использует кэш перевода, если он есть; иначе переводит и сохраняет
pub fn load_or_translate_weebit(
    data_dir: &Path,
    translator: Option<&dyn Translator>,
) -> Result<Corpus> {
    let path = translated_cache_path(data_dir);

    info!("Check if translated weebit dataset exists...");
    if path.is_file() {
        let raw = std::fs::read_to_string(&path).map_err(|e| PipelineError::io(&path, e))?;
        return Ok(serde_json::from_str(&raw)?);
    }

    let translator = translator.ok_or_else(|| {
        PipelineError::Translation(
            "weebit cache missing and no translator endpoint configured".to_string(),
        )
    })?;
    store_translated_weebit(data_dir, translator)
}
