//! Чтение файлов в кодировке windows-1252

use std::path::Path;

use crate::error::{PipelineError, Result};

/// Символы для байтов 0x80..=0x9F; неопределённые байты остаются C1-символами
const HIGH_TABLE: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => HIGH_TABLE[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}

pub fn read_windows_1252(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::io(path, e))?;
    Ok(decode_windows_1252(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(decode_windows_1252(b"Satz, 1"), "Satz, 1");
    }

    #[test]
    fn test_latin1_umlauts() {
        // "Größe" in windows-1252
        assert_eq!(decode_windows_1252(&[0x47, 0x72, 0xF6, 0xDF, 0x65]), "Größe");
    }

    #[test]
    fn test_high_range() {
        assert_eq!(decode_windows_1252(&[0x80, 0x84, 0x93, 0x96]), "€„“–");
    }
}
