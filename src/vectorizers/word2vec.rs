//! Word2Vec (skip-gram / CBOW, negative sampling)
//!
//! Признаки предложения: среднее векторов его слов из словаря.

use std::collections::HashMap;
use std::path::Path;

use ndarray::{Array1, Array2};
use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Word2VecConfig;
use crate::error::{PipelineError, Result};
use crate::pipeline::augment::make_rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "skip-gram")]
    SkipGram,
    #[serde(rename = "CBOW")]
    Cbow,
}

/// Обучить новую модель или загрузить сохранённую
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Train,
    Load,
}

impl std::str::FromStr for Mode {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(Mode::Train),
            "load" => Ok(Mode::Load),
            other => Err(PipelineError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word2Vec {
    epochs: usize,
    lr: f64,
    min_lr: f64,
    window_size: usize,
    min_count: usize,
    negative: usize,
    algorithm: Algorithm,
    vocab: Vec<String>,
    counts: Vec<u64>,
    /// Векторы слов (вход)
    input: Array2<f64>,
    /// Векторы контекстов (выход)
    output: Array2<f64>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x.clamp(-30.0, 30.0)).exp())
}

impl Word2Vec {
    pub fn new(config: &Word2VecConfig) -> Self {
        Self {
            epochs: config.epochs,
            lr: config.lr,
            min_lr: config.min_lr,
            window_size: config.window_size.max(1),
            min_count: config.min_count,
            negative: config.negative,
            algorithm: config.algorithm,
            vocab: Vec::new(),
            counts: Vec::new(),
            input: Array2::zeros((0, config.num_features.max(1))),
            output: Array2::zeros((0, config.num_features.max(1))),
            index: HashMap::new(),
        }
    }

    /// Гиперпараметры обучения берутся из конфига, веса остаются
    pub fn with_params(mut self, config: &Word2VecConfig) -> Self {
        self.epochs = config.epochs;
        self.lr = config.lr;
        self.min_lr = config.min_lr;
        self.window_size = config.window_size.max(1);
        self.min_count = config.min_count;
        self.negative = config.negative;
        self.algorithm = config.algorithm;
        self
    }

    pub fn dim(&self) -> usize {
        self.input.ncols()
    }

    pub fn vocab(&self) -> &[String] {
        &self.vocab
    }

    pub fn vector(&self, word: &str) -> Option<Array1<f64>> {
        self.index.get(word).map(|&i| self.input.row(i).to_owned())
    }

    /// Добавляет в словарь слова с частотой ≥ min_count; известные слова сохраняют векторы
    pub fn build_vocab<R: Rng>(&mut self, corpus: &[Vec<String>], rng: &mut R) {
        let mut freq: HashMap<&str, u64> = HashMap::new();
        for sentence in corpus {
            for token in sentence {
                *freq.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        for (i, word) in self.vocab.iter().enumerate() {
            if let Some(c) = freq.get(word.as_str()) {
                self.counts[i] += c;
            }
        }

        let mut new_words: Vec<(&str, u64)> = freq
            .into_iter()
            .filter(|(w, c)| *c as usize >= self.min_count && !self.index.contains_key(*w))
            .collect();
        new_words.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        if new_words.is_empty() {
            return;
        }

        let dim = self.dim();
        let old_rows = self.vocab.len();
        let total_rows = old_rows + new_words.len();
        let bound = 0.5 / dim as f64;

        let mut input = Array2::zeros((total_rows, dim));
        let mut output = Array2::zeros((total_rows, dim));
        if old_rows > 0 {
            input
                .slice_mut(ndarray::s![..old_rows, ..])
                .assign(&self.input);
            output
                .slice_mut(ndarray::s![..old_rows, ..])
                .assign(&self.output);
        }
        for row in old_rows..total_rows {
            for col in 0..dim {
                input[[row, col]] = rng.gen_range(-bound..bound);
            }
        }

        for (word, count) in new_words {
            self.index.insert(word.to_string(), self.vocab.len());
            self.vocab.push(word.to_string());
            self.counts.push(count);
        }
        self.input = input;
        self.output = output;

        debug!("word2vec vocabulary: {} words", self.vocab.len());
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .vocab
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
    }

    /// Линейное затухание lr → min_lr
    pub fn learning_rate(&self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        self.lr - (self.lr - self.min_lr) * progress
    }

    /// Один шаг negative sampling для скрытого вектора `hidden`; возвращает градиент для него
    fn train_pair(
        &mut self,
        hidden: &Array1<f64>,
        target: usize,
        lr: f64,
        noise: &WeightedIndex<f64>,
        rng: &mut StdRng,
    ) -> Array1<f64> {
        let mut grad = Array1::zeros(hidden.len());
        for d in 0..=self.negative {
            let (word, label) = if d == 0 {
                (target, 1.0)
            } else {
                let sampled = noise.sample(rng);
                if sampled == target {
                    continue;
                }
                (sampled, 0.0)
            };

            let out = self.output.row(word).to_owned();
            let g = (label - sigmoid(hidden.dot(&out))) * lr;
            grad.scaled_add(g, &out);
            self.output.row_mut(word).scaled_add(g, hidden);
        }
        grad
    }

    pub fn train(&mut self, corpus: &[Vec<String>], seed: Option<u64>) -> Result<()> {
        let mut rng = make_rng(seed);

        self.build_vocab(corpus, &mut rng);
        if self.vocab.is_empty() {
            return Err(PipelineError::EmptyVocabulary);
        }

        // Распределение шума ~ count^0.75
        let weights: Vec<f64> = self.counts.iter().map(|&c| (c.max(1) as f64).powf(0.75)).collect();
        let noise = WeightedIndex::new(&weights)
            .map_err(|e| PipelineError::InvalidConfig(format!("word2vec noise distribution: {e}")))?;

        let sentences: Vec<Vec<usize>> = corpus
            .iter()
            .map(|s| s.iter().filter_map(|t| self.index.get(t).copied()).collect())
            .collect();
        let total_words: usize = sentences.iter().map(Vec::len).sum();
        let total_steps = (total_words * self.epochs).max(1) as f64;

        info!(
            "Training word2vec ({:?}): {} words in vocabulary, {} tokens, {} epochs",
            self.algorithm,
            self.vocab.len(),
            total_words,
            self.epochs
        );

        let mut step = 0usize;
        for epoch in 0..self.epochs {
            for sentence in &sentences {
                for (pos, &center) in sentence.iter().enumerate() {
                    let lr = self.learning_rate(step as f64 / total_steps);
                    step += 1;

                    // случайно укороченное окно
                    let reduced = rng.gen_range(1..=self.window_size);
                    let start = pos.saturating_sub(reduced);
                    let end = (pos + reduced + 1).min(sentence.len());
                    let context: Vec<usize> = (start..end)
                        .filter(|&j| j != pos)
                        .map(|j| sentence[j])
                        .collect();
                    if context.is_empty() {
                        continue;
                    }

                    match self.algorithm {
                        Algorithm::SkipGram => {
                            for &ctx in &context {
                                let hidden = self.input.row(ctx).to_owned();
                                let grad = self.train_pair(&hidden, center, lr, &noise, &mut rng);
                                self.input.row_mut(ctx).scaled_add(1.0, &grad);
                            }
                        }
                        Algorithm::Cbow => {
                            let mut hidden = Array1::zeros(self.dim());
                            for &ctx in &context {
                                hidden += &self.input.row(ctx);
                            }
                            hidden /= context.len() as f64;
                            let grad = self.train_pair(&hidden, center, lr, &noise, &mut rng);
                            for &ctx in &context {
                                self.input.row_mut(ctx).scaled_add(1.0, &grad);
                            }
                        }
                    }
                }
            }
            debug!("word2vec epoch {} done", epoch + 1);
        }

        Ok(())
    }

    /// Среднее векторов слов предложения; нули, если ни одного слова нет в словаре
    pub fn transform(&self, corpus: &[Vec<String>]) -> Array2<f64> {
        let mut features = Array2::zeros((corpus.len(), self.dim()));
        for (i, sentence) in corpus.iter().enumerate() {
            let known: Vec<usize> = sentence
                .iter()
                .filter_map(|t| self.index.get(t).copied())
                .collect();
            if known.is_empty() {
                continue;
            }
            let mut row = features.row_mut(i);
            for idx in &known {
                row += &self.input.row(*idx);
            }
            row /= known.len() as f64;
        }
        features
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        let file = std::fs::File::create(path).map_err(|e| PipelineError::io(path, e))?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)?;
        info!("word2vec model saved to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut model: Word2Vec = serde_json::from_reader(std::io::BufReader::new(file))?;
        model.rebuild_index();
        info!("word2vec model loaded from {} ({} words)", path.display(), model.vocab.len());
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn corpus() -> Vec<Vec<String>> {
        let sentences = [
            "der hund bellt laut",
            "der hund läuft schnell",
            "die katze schläft ruhig",
            "die katze läuft schnell",
            "selten",
        ];
        sentences
            .iter()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    fn config() -> Word2VecConfig {
        Word2VecConfig {
            epochs: 5,
            num_features: 8,
            window_size: 2,
            min_count: 2,
            seed: Some(42),
            ..Word2VecConfig::default()
        }
    }

    #[test]
    fn test_min_count_filters_vocab() {
        let mut model = Word2Vec::new(&config());
        model.train(&corpus(), Some(1)).unwrap();
        let vocab = model.vocab();
        assert!(vocab.contains(&"hund".to_string()));
        assert!(vocab.contains(&"schnell".to_string()));
        assert!(!vocab.contains(&"selten".to_string()));
        assert!(!vocab.contains(&"bellt".to_string()));
    }

    #[test]
    fn test_transform_shape_and_unknown_rows() {
        let mut model = Word2Vec::new(&config());
        model.train(&corpus(), Some(1)).unwrap();
        let features = model.transform(&corpus());
        assert_eq!(features.dim(), (5, 8));
        // "selten" не в словаре → нулевая строка
        assert!(features.row(4).iter().all(|v| *v == 0.0));
        assert!(features.row(0).iter().any(|v| *v != 0.0));
    }

    #[test]
    fn test_training_moves_vectors() {
        let mut model = Word2Vec::new(&config());
        let mut rng = StdRng::seed_from_u64(1);
        model.build_vocab(&corpus(), &mut rng);
        let before = model.vector("hund").unwrap();
        model.train(&corpus(), Some(1)).unwrap();
        assert_ne!(model.vector("hund").unwrap(), before);
    }

    #[test]
    fn test_cbow_trains() {
        let mut cfg = config();
        cfg.algorithm = Algorithm::Cbow;
        let mut model = Word2Vec::new(&cfg);
        model.train(&corpus(), Some(3)).unwrap();
        assert_eq!(model.transform(&corpus()).ncols(), 8);
    }

    #[test]
    fn test_learning_rate_decay() {
        let model = Word2Vec::new(&config());
        assert_eq!(model.learning_rate(0.0), 0.05);
        assert!((model.learning_rate(1.0) - 0.0001).abs() < 1e-12);
        assert!(model.learning_rate(0.5) < model.learning_rate(0.1));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w2v.json");
        let mut model = Word2Vec::new(&config());
        model.train(&corpus(), Some(5)).unwrap();
        model.save(&path).unwrap();

        let loaded = Word2Vec::load(&path).unwrap();
        assert_eq!(loaded.vocab(), model.vocab());
        assert_eq!(loaded.transform(&corpus()), model.transform(&corpus()));
    }

    #[test]
    fn test_finetune_extends_vocab() {
        let mut model = Word2Vec::new(&config());
        model.train(&corpus(), Some(5)).unwrap();
        let hund_before = model.vocab().iter().position(|w| w == "hund");

        let extra: Vec<Vec<String>> = vec![
            vec!["vogel".to_string(), "singt".to_string()],
            vec!["vogel".to_string(), "singt".to_string()],
        ];
        model.train(&extra, Some(6)).unwrap();
        assert!(model.vocab().contains(&"vogel".to_string()));
        assert_eq!(model.vocab().iter().position(|w| w == "hund"), hund_before);
    }

    #[test]
    fn test_empty_corpus() {
        let mut model = Word2Vec::new(&config());
        assert!(matches!(
            model.train(&[], Some(0)),
            Err(PipelineError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("train".parse::<Mode>().unwrap(), Mode::Train);
        assert!(matches!("fit".parse::<Mode>(), Err(PipelineError::UnknownMode(_))));
    }
}
