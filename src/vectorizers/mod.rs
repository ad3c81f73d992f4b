/// Векторизация текстов: мешок слов, TF-IDF, hashing trick, word2vec

pub mod count;
pub mod hashing;
pub mod sparse;
pub mod tfidf;
pub mod word2vec;

use std::path::Path;
use std::str::FromStr;

use linfa::DatasetBase;
use ndarray::{Array1, Array2};
use sprs::CsMat;
use tracing::info;

use crate::config::{VectorizerConfig, Word2VecConfig};
use crate::error::{PipelineError, Result};
use crate::preprocessing::{DataNormalizer, Tokenizer};

pub use count::CountVectorizer;
pub use hashing::HashingVectorizer;
pub use tfidf::TfidfVectorizer;
pub use word2vec::{Algorithm, Mode, Word2Vec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorizerKind {
    Tfidf,
    Count,
    Hash,
    Word2Vec,
    PretrainedWord2Vec,
}

impl FromStr for VectorizerKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tfidf" => Ok(VectorizerKind::Tfidf),
            "count" => Ok(VectorizerKind::Count),
            "hash" => Ok(VectorizerKind::Hash),
            "word2vec" => Ok(VectorizerKind::Word2Vec),
            "pretrained_word2vec" => Ok(VectorizerKind::PretrainedWord2Vec),
            other => Err(PipelineError::UnknownVectorizer(other.to_string())),
        }
    }
}

/// Разреженная (мешок слов) или плотная (эмбеддинги) матрица признаков
#[derive(Debug, Clone)]
pub enum FeatureMatrix {
    Sparse(CsMat<f64>),
    Dense(Array2<f64>),
}

impl FeatureMatrix {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            FeatureMatrix::Sparse(m) => m.shape(),
            FeatureMatrix::Dense(m) => m.dim(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, FeatureMatrix::Sparse(_))
    }

    /// Для 2^20 колонок hashing trick это очень много памяти
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            FeatureMatrix::Sparse(m) => m.to_dense(),
            FeatureMatrix::Dense(m) => m.clone(),
        }
    }
}

/// Обученный векторизатор, пригодный для transform на новых текстах
#[derive(Debug, Clone)]
pub enum FittedVectorizer {
    Count(CountVectorizer),
    Tfidf(TfidfVectorizer),
    Hash(HashingVectorizer),
    Word2Vec {
        model: Word2Vec,
        tokenizer: Tokenizer,
    },
}

impl FittedVectorizer {
    pub fn transform(&self, texts: &[String]) -> Result<FeatureMatrix> {
        Ok(match self {
            FittedVectorizer::Count(v) => FeatureMatrix::Sparse(v.transform(texts)?),
            FittedVectorizer::Tfidf(v) => FeatureMatrix::Sparse(v.transform(texts)?),
            FittedVectorizer::Hash(v) => FeatureMatrix::Sparse(v.transform(texts)),
            FittedVectorizer::Word2Vec { model, tokenizer } => {
                FeatureMatrix::Dense(model.transform(&tokenizer.tokenize_all(texts)))
            }
        })
    }

    pub fn word2vec(&self) -> Option<&Word2Vec> {
        match self {
            FittedVectorizer::Word2Vec { model, .. } => Some(model),
            _ => None,
        }
    }
}

pub struct Vectorized {
    pub features: FeatureMatrix,
    pub vectorizer: FittedVectorizer,
}

/// Мешок слов: count / tfidf / hash
pub fn ml_vectorizer_wrapper(
    texts: &[String],
    kind: VectorizerKind,
    stopwords: Option<&[String]>,
) -> Result<Vectorized> {
    let (features, vectorizer) = match kind {
        VectorizerKind::Count => {
            let mut v = CountVectorizer::new(stopwords);
            (v.fit_transform(texts)?, FittedVectorizer::Count(v))
        }
        VectorizerKind::Tfidf => {
            let mut v = TfidfVectorizer::new(stopwords);
            (v.fit_transform(texts)?, FittedVectorizer::Tfidf(v))
        }
        VectorizerKind::Hash => {
            let v = HashingVectorizer::new(stopwords);
            (v.fit_transform(texts), FittedVectorizer::Hash(v))
        }
        other => {
            return Err(PipelineError::InvalidConfig(format!(
                "{other:?} is not a bag-of-words vectorizer"
            )))
        }
    };

    Ok(Vectorized {
        features: FeatureMatrix::Sparse(features),
        vectorizer,
    })
}

/// Word2Vec на токенизированном корпусе.
///
/// `Mode::Load` берёт готовую модель из `params.model_path` без обучения.
/// `pretrained` дообучает загруженную модель на корпусе.
pub fn nn_vectorizer_wrapper(
    corpus: &[Vec<String>],
    params: &Word2VecConfig,
    mode: Mode,
    pretrained: bool,
) -> Result<Word2Vec> {
    match (mode, pretrained) {
        (Mode::Load, _) => Word2Vec::load(&params.model_path),
        (Mode::Train, true) => {
            let mut model = Word2Vec::load(&params.model_path)?.with_params(params);
            model.train(corpus, params.seed)?;
            Ok(model)
        }
        (Mode::Train, false) => {
            let mut model = Word2Vec::new(params);
            model.train(corpus, params.seed)?;
            Ok(model)
        }
    }
}

pub fn vectorizer_wrapper(
    texts: &[String],
    kind: &str,
    stopwords: Option<&[String]>,
    params: &Word2VecConfig,
) -> Result<Vectorized> {
    let kind: VectorizerKind = kind.parse()?;
    info!("Vectorizing {} texts with {:?}", texts.len(), kind);

    match kind {
        VectorizerKind::Word2Vec | VectorizerKind::PretrainedWord2Vec => {
            let tokenizer = match stopwords {
                Some(words) => Tokenizer::with_stopwords(words),
                None => Tokenizer::new(),
            };
            let corpus = tokenizer.tokenize_all(texts);
            let pretrained = kind == VectorizerKind::PretrainedWord2Vec;
            let model = nn_vectorizer_wrapper(&corpus, params, Mode::Train, pretrained)?;
            let features = model.transform(&corpus);
            Ok(Vectorized {
                features: FeatureMatrix::Dense(features),
                vectorizer: FittedVectorizer::Word2Vec { model, tokenizer },
            })
        }
        _ => ml_vectorizer_wrapper(texts, kind, stopwords),
    }
}

/// Векторизация по конфигу; плотные признаки при `standardize` приводятся к z-score
pub fn vectorize(texts: &[String], config: &VectorizerConfig) -> Result<Vectorized> {
    let stopwords = config.stopwords.as_ref().map(|s| s.resolve()).transpose()?;
    let mut vectorized = vectorizer_wrapper(
        texts,
        &config.kind,
        stopwords.as_deref(),
        &config.word2vec,
    )?;

    if config.standardize {
        if let FeatureMatrix::Dense(features) = &vectorized.features {
            let mut normalizer = DataNormalizer::new();
            vectorized.features = FeatureMatrix::Dense(normalizer.fit_transform(features)?);
        }
    }

    let (rows, cols) = vectorized.features.shape();
    info!("Feature matrix: {} x {}", rows, cols);
    Ok(vectorized)
}

pub fn save_word2vec(vectorized: &Vectorized, path: &Path) -> Result<()> {
    match vectorized.vectorizer.word2vec() {
        Some(model) => model.save(path),
        None => Err(PipelineError::InvalidConfig(
            "only word2vec vectorizers can be saved".to_string(),
        )),
    }
}

/// Плотные признаки + рейтинги → `linfa::Dataset`
pub fn to_linfa_dataset(
    features: Array2<f64>,
    ratings: &[f64],
) -> Result<DatasetBase<Array2<f64>, Array1<f64>>> {
    if features.nrows() != ratings.len() {
        return Err(PipelineError::InvalidConfig(format!(
            "{} feature rows but {} ratings",
            features.nrows(),
            ratings.len()
        )));
    }
    Ok(DatasetBase::new(features, Array1::from(ratings.to_vec())))
}
