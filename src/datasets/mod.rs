/// Загрузка датасетов в общую схему

pub mod dw;
pub mod encoding;
pub mod rating;
pub mod textcomp;
pub mod weebit;

use std::path::Path;

use crate::error::{PipelineError, Result};

pub use dw::dw_to_df;
pub use rating::replace_rating;
pub use textcomp::text_comp19_to_df;
pub use weebit::{load_or_translate_weebit, store_translated_weebit, weebit_to_df};

pub(crate) fn csv_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes())
}

pub(crate) fn column_index(headers: &csv::StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| PipelineError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
}
