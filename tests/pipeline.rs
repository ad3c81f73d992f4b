use std::path::Path;

use complexity_features::{
    config::PipelineConfig,
    pipeline::{all_data, augmented_all, read_augmented, read_stored, write_split},
    types::{Corpus, DatasetSelection, Record, Source},
    vectorizers::{vectorize, FeatureMatrix},
    PipelineError,
};

fn write_textcomp(data_dir: &Path) {
    let dir = data_dir.join("TextComplexityDE19");
    std::fs::create_dir_all(&dir).unwrap();

    let mut bytes = b"ID,Article_ID,Article,Sentence,Votes_Complexity,MOS_Complexity,Std_Complexity\n".to_vec();
    for i in 0..10 {
        bytes.extend_from_slice(format!("{i},1,Artikel,\"Satz {i} ").as_bytes());
        // "über die Größe" в windows-1252
        bytes.extend_from_slice(b"\xFCber die Gr\xF6\xDF");
        bytes.extend_from_slice(format!("e, Teil {i}.\",5,{}.5,0.2\n", i % 7).as_bytes());
    }
    std::fs::write(dir.join("ratings.csv"), bytes).unwrap();
}

fn write_dw(data_dir: &Path) {
    let dir = data_dir.join("dw");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("pages.csv"),
        "url,levels\nhttp://a,B1\nhttp://b,\"B2, C1\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("text.csv"),
        "url,text\nhttp://a,Der Hund bellt im Garten\nhttp://b,Die Katze schläft am Fenster\n",
    )
    .unwrap();
    std::fs::write(dir.join("paragraphs.csv"), "url,text\n").unwrap();
}

fn write_weebit_cache(data_dir: &Path) {
    let corpus: Corpus = vec![
        Record::new("Ein einfacher Text.", 0.0, Source::Weebit),
        Record::new("Ein schwieriger Text!", 2.0, Source::Weebit),
    ]
    .into_iter()
    .collect();
    std::fs::write(
        data_dir.join("Weebit_translated.json"),
        serde_json::to_string(&corpus).unwrap(),
    )
    .unwrap();
}

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_textcomp(dir.path());
    write_dw(dir.path());
    write_weebit_cache(dir.path());
    dir
}

fn config(data_dir: &Path, selection: DatasetSelection) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.data_dir = data_dir.to_path_buf();
    config.datasets = selection;
    config.augmentation.seed = Some(3);
    config
}

#[test]
fn all_data_cleans_and_orders_sources() {
    let dir = data_dir();
    let corpus = all_data(dir.path(), DatasetSelection::new(true, true, true), None).unwrap();
    assert_eq!(corpus.len(), 14);
    assert_eq!(corpus.count_source(Source::TextComplexityDe19), 10);
    assert_eq!(corpus.count_source(Source::Weebit), 2);
    assert_eq!(corpus.count_source(Source::Dw), 2);

    let first = &corpus.records()[0];
    assert_eq!(first.raw_text, "satz über die größe teil");
    assert_eq!(corpus.records()[10].source, Source::Weebit);
    assert_eq!(corpus.records()[12].raw_text, "der hund bellt im garten");
    assert_eq!(corpus.records()[13].rating, 1.0);
}

#[test]
fn all_datasets_with_random_word_augmentation() {
    let dir = data_dir();
    let mut config = config(dir.path(), DatasetSelection::new(true, true, true));
    config.augmentation.randword_swap = true;
    config.augmentation.randword_del = true;

    let split = augmented_all(&config, None, None).unwrap();
    // 9 TC + 2 Weebit + 2 dw, затем ×2 перестановкой и ×2 удалением
    assert_eq!(split.train.len(), 13 * 4);
    assert_eq!(split.test.len(), 1);
    assert_eq!(split.test.records()[0].source, Source::TextComplexityDe19);
    assert_eq!(split.train.count_source(Source::Weebit), 8);
}

#[test]
fn test_set_depends_on_selection() {
    let dir = data_dir();

    let dw_only = augmented_all(&config(dir.path(), DatasetSelection::new(false, false, true)), None, None)
        .unwrap();
    assert_eq!(dw_only.train.len(), 2);
    assert_eq!(dw_only.test, dw_only.train);

    let wb_dw = augmented_all(&config(dir.path(), DatasetSelection::new(false, true, true)), None, None)
        .unwrap();
    assert_eq!(wb_dw.train.len(), 4);
    assert!(wb_dw.test.is_empty());

    let none = augmented_all(&config(dir.path(), DatasetSelection::default()), None, None);
    assert!(matches!(none, Err(PipelineError::NoDatasetSelected)));
}

#[test]
fn same_seed_same_split() {
    let dir = data_dir();
    let mut config = config(dir.path(), DatasetSelection::new(true, false, false));
    config.augmentation.randword_swap = true;

    let a = augmented_all(&config, None, None).unwrap();
    let b = augmented_all(&config, None, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn stemming_applies_to_train_and_test() {
    let dir = data_dir();
    let mut config = config(dir.path(), DatasetSelection::new(true, false, false));
    config.augmentation.stemming = true;

    let split = augmented_all(&config, None, None).unwrap();
    for record in split.train.records().iter().chain(split.test.records()) {
        assert!(!record.raw_text.contains("größe"), "{}", record.raw_text);
    }
}

#[test]
fn stored_split_roundtrip_and_vectorize() {
    let dir = data_dir();
    let config = config(dir.path(), DatasetSelection::new(true, true, true));
    let split = augmented_all(&config, None, None).unwrap();

    let path = dir.path().join("out").join("augmented.json");
    write_split(&path, config.datasets, &split).unwrap();

    let stored = read_stored(&path).unwrap();
    assert_eq!(stored.datasets, config.datasets);
    assert_eq!(read_augmented(&path).unwrap(), split);

    let vectorized = vectorize(&split.train.texts(), &config.vectorizer).unwrap();
    assert!(matches!(vectorized.features, FeatureMatrix::Sparse(_)));
    assert_eq!(vectorized.features.shape().0, split.train.len());

    let test_features = vectorized.vectorizer.transform(&split.test.texts()).unwrap();
    assert_eq!(test_features.shape().1, vectorized.features.shape().1);
}

#[test]
fn missing_dataset_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = all_data(dir.path(), DatasetSelection::new(false, false, true), None);
    assert!(matches!(result, Err(PipelineError::DatasetMissing { .. })));

    // Weebit без кэша и без переводчика
    let result = all_data(dir.path(), DatasetSelection::new(false, true, false), None);
    assert!(result.is_err());
}
