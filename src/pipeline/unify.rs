//! Объединение включённых датасетов в один корпус

use std::path::Path;

use tracing::info;

use crate::augmentation::Translator;
use crate::datasets::{dw_to_df, load_or_translate_weebit, text_comp19_to_df};
use crate::error::{PipelineError, Result};
use crate::preprocessing::clean_corpus;
use crate::types::{Corpus, DatasetSelection};

/// Склеивает загруженные датасеты в фиксированном порядке для каждой комбинации
pub fn concat_selected(
    text_comp19: Option<Corpus>,
    weebit: Option<Corpus>,
    dw: Option<Corpus>,
) -> Result<Corpus> {
    let corpus = match (text_comp19, weebit, dw) {
        (Some(tc), Some(wb), Some(dw)) => tc.append(wb).append(dw),
        (Some(tc), None, None) => tc,
        (None, Some(wb), None) => wb,
        (None, None, Some(dw)) => dw,
        (None, Some(wb), Some(dw)) => dw.append(wb),
        (Some(tc), Some(wb), None) => tc.append(wb),
        (Some(tc), None, Some(dw)) => tc.append(dw),
        (None, None, None) => return Err(PipelineError::NoDatasetSelected),
    };
    Ok(corpus)
}

/// Все выбранные датасеты одним корпусом, очищенные от переводов строк,
/// цифр, пунктуации и лишних пробелов, в нижнем регистре
pub fn all_data(
    data_dir: &Path,
    selection: DatasetSelection,
    translator: Option<&dyn Translator>,
) -> Result<Corpus> {
    if selection.is_empty() {
        return Err(PipelineError::NoDatasetSelected);
    }

    let text_comp19 = if selection.use_textcomp19 {
        Some(text_comp19_to_df(data_dir)?)
    } else {
        None
    };

    let dw = if selection.use_dw {
        Some(dw_to_df(data_dir)?)
    } else {
        None
    };

    let weebit = if selection.use_weebit {
        Some(load_or_translate_weebit(data_dir, translator)?)
    } else {
        None
    };

    let mut corpus = concat_selected(text_comp19, weebit, dw)?;
    clean_corpus(&mut corpus);

    info!("all_data: {} records", corpus.len());
    Ok(corpus)
}
