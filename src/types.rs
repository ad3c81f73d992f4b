/// Общая табличная схема датасетов

use serde::{Deserialize, Serialize};

/// Источник записи. Числовые id совпадают с колонкой `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Source {
    TextComplexityDe19,
    Weebit,
    Dw,
}

impl Source {
    pub fn id(self) -> u8 {
        match self {
            Source::TextComplexityDe19 => 0,
            Source::Weebit => 1,
            Source::Dw => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Source::TextComplexityDe19 => "TextComplexityDE19",
            Source::Weebit => "Weebit",
            Source::Dw => "dw",
        }
    }
}

impl From<Source> for u8 {
    fn from(source: Source) -> u8 {
        source.id()
    }
}

impl TryFrom<u8> for Source {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Source::TextComplexityDe19),
            1 => Ok(Source::Weebit),
            2 => Ok(Source::Dw),
            other => Err(format!("unknown source id {other}")),
        }
    }
}

/// Одна строка: `raw_text`, `rating`, `source`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub raw_text: String,
    pub rating: f64,
    pub source: Source,
}

impl Record {
    pub fn new(raw_text: impl Into<String>, rating: f64, source: Source) -> Self {
        Self {
            raw_text: raw_text.into(),
            rating,
            source,
        }
    }
}

/// Упорядоченный набор записей (аналог датафрейма с игнорируемым индексом)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Конкатенация: записи `other` добавляются в конец
    pub fn append(mut self, other: Corpus) -> Corpus {
        self.records.extend(other.records);
        self
    }

    pub fn filter_source(&self, source: Source) -> Corpus {
        self.records
            .iter()
            .filter(|r| r.source == source)
            .cloned()
            .collect()
    }

    pub fn count_source(&self, source: Source) -> usize {
        self.records.iter().filter(|r| r.source == source).count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.records.iter().map(|r| r.raw_text.clone()).collect()
    }

    pub fn ratings(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.rating).collect()
    }

    /// Применяет преобразование к тексту каждой записи
    pub fn map_text<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for record in &mut self.records {
            record.raw_text = f(&record.raw_text);
        }
    }

    /// Как `map_text`, но с возможностью ошибки
    pub fn try_map_text<F, E>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        for record in &mut self.records {
            record.raw_text = f(&record.raw_text)?;
        }
        Ok(())
    }
}

impl FromIterator<Record> for Corpus {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Corpus {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Какие из трёх датасетов включены
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSelection {
    #[serde(default)]
    pub use_textcomp19: bool,
    #[serde(default)]
    pub use_weebit: bool,
    #[serde(default)]
    pub use_dw: bool,
}

impl DatasetSelection {
    pub fn new(use_textcomp19: bool, use_weebit: bool, use_dw: bool) -> Self {
        Self {
            use_textcomp19,
            use_weebit,
            use_dw,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.use_textcomp19 || self.use_weebit || self.use_dw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_ids_roundtrip() {
        for source in [Source::TextComplexityDe19, Source::Weebit, Source::Dw] {
            assert_eq!(Source::try_from(source.id()).unwrap(), source);
        }
        assert!(Source::try_from(3).is_err());
    }

    #[test]
    fn test_source_serializes_as_number() {
        let record = Record::new("hallo welt", 1.0, Source::Dw);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"source\":2"));
    }

    #[test]
    fn test_append_keeps_order() {
        let a: Corpus = vec![Record::new("a", 0.0, Source::Dw)].into_iter().collect();
        let b: Corpus = vec![Record::new("b", 1.0, Source::Weebit)].into_iter().collect();
        let joined = a.append(b);
        assert_eq!(joined.texts(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(joined.count_source(Source::Weebit), 1);
    }

    #[test]
    fn test_empty_selection() {
        assert!(DatasetSelection::default().is_empty());
        assert!(!DatasetSelection::new(false, false, true).is_empty());
    }
}
