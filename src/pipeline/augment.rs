//! Train/test разбиение и аугментация обучающей выборки

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::split::train_test_split;
use super::unify::all_data;
use crate::augmentation::{Action, BackTranslator, Lemmatizer, RandomWordAug, SnowballStemmer, Translator};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::types::{Corpus, DatasetSelection, Record, Source};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainTest {
    pub train: Corpus,
    pub test: Corpus,
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Делит объединённый корпус. Тестовая выборка есть только у TextComplexityDE19;
/// Weebit и dw целиком идут в train.
pub fn split_sources(
    corpus: &Corpus,
    selection: DatasetSelection,
    test_size: f64,
    rng: &mut StdRng,
) -> Result<TrainTest> {
    info!("perform train-test split keeping dataset proportions the same");

    let (text_comp_train, text_comp_test) = if selection.use_textcomp19 {
        let records: Vec<Record> = corpus
            .filter_source(Source::TextComplexityDe19)
            .into_iter()
            .collect();
        let (train, test) = train_test_split(records, test_size, rng)?;
        (
            train.into_iter().collect::<Corpus>(),
            test.into_iter().collect::<Corpus>(),
        )
    } else {
        (Corpus::new(), Corpus::new())
    };

    let weebit_train = if selection.use_weebit {
        corpus.filter_source(Source::Weebit)
    } else {
        Corpus::new()
    };

    let dw_train = if selection.use_dw {
        corpus.filter_source(Source::Dw)
    } else {
        Corpus::new()
    };

    let test = match (selection.use_textcomp19, selection.use_weebit, selection.use_dw) {
        (true, _, _) => text_comp_test,
        (false, false, true) => {
            warn!("No dw test set available!");
            // только dw: тестом служит копия train
            dw_train.clone()
        }
        (false, true, false) => {
            warn!("No weebit test set available!");
            Corpus::new()
        }
        (false, true, true) => {
            warn!("No weebit and dw test set available!");
            Corpus::new()
        }
        (false, false, false) => return Err(PipelineError::NoDatasetSelected),
    };

    let train = text_comp_train.append(weebit_train).append(dw_train);
    Ok(TrainTest { train, test })
}

/// Применяет включённые аугментации по порядку: обратный перевод,
/// перестановка слов, удаление слов, лемматизация, стемминг
pub fn augment(
    mut split: TrainTest,
    config: &PipelineConfig,
    translator: Option<&dyn Translator>,
    lemmatizer: Option<&dyn Lemmatizer>,
    rng: &mut StdRng,
) -> Result<TrainTest> {
    let aug = &config.augmentation;
    info!("Start augmenting Data...");

    if aug.backtrans {
        info!("Back and forth translation...");
        let translator = translator.ok_or_else(|| {
            PipelineError::Translation("backtrans enabled but no translator endpoint configured".to_string())
        })?;
        let back = BackTranslator::german_via_english(translator);

        // Weebit уже переведён, повторно не переводим
        let mut translated: Corpus = split
            .train
            .records()
            .iter()
            .filter(|r| r.source != Source::Weebit)
            .cloned()
            .collect();
        translated.try_map_text(|text| back.augment(text))?;
        split.train = split.train.append(translated);
    }

    if aug.randword_swap {
        info!("Random word swap");
        let swap = RandomWordAug::new(Action::Swap);
        let mut swapped = split.train.clone();
        swapped.map_text(|text| swap.augment(text, rng));
        split.train = split.train.append(swapped);
    }

    if aug.randword_del {
        info!("Random word deletion");
        let delete = RandomWordAug::new(Action::Delete);
        let mut deleted = split.train.clone();
        deleted.map_text(|text| delete.augment(text, rng));
        split.train = split.train.append(deleted);
    }

    if aug.lemmatization {
        info!("lemmatizing");
        let lemmatizer = lemmatizer.ok_or_else(|| {
            PipelineError::InvalidConfig("lemmatization enabled but no lemma_table configured".to_string())
        })?;
        split.train.map_text(|text| lemmatizer.lemmatize(text));
        split.test.map_text(|text| lemmatizer.lemmatize(text));
    }

    if aug.stemming {
        info!("stemming");
        let stemmer = SnowballStemmer::german();
        split.train.map_text(|text| stemmer.stem(text));
        split.test.map_text(|text| stemmer.stem(text));
    }

    info!(
        train = split.train.len(),
        test = split.test.len(),
        "augmentation finished"
    );
    Ok(split)
}

/// Аугментированная обучающая выборка и тестовая выборка всех выбранных данных
pub fn augmented_all(
    config: &PipelineConfig,
    translator: Option<&dyn Translator>,
    lemmatizer: Option<&dyn Lemmatizer>,
) -> Result<TrainTest> {
    config.validate()?;
    let mut rng = make_rng(config.augmentation.seed);

    let corpus = all_data(&config.data_dir, config.datasets, translator)?;
    let split = split_sources(
        &corpus,
        config.datasets,
        config.augmentation.test_size,
        &mut rng,
    )?;
    augment(split, config, translator, lemmatizer, &mut rng)
}
