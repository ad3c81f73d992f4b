/// CLI: сборка аугментированных выборок и их векторизация

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use complexity_features::{
    augmentation::{HttpTranslator, Lemmatizer, LookupLemmatizer, Translator},
    pipeline::{read_augmented, store_augmented},
    vectorizers::{save_word2vec, to_linfa_dataset, vectorize, FeatureMatrix},
    PipelineConfig,
};

#[derive(Debug, Parser)]
#[command(name = "complexity-features", version, about)]
struct Cli {
    /// JSON-конфиг пайплайна; без него используются значения по умолчанию
    #[arg(long, short, env = "COMPLEXITY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Объединить датасеты, разбить на train/test, аугментировать и сохранить
    Build {
        #[arg(long, short, env = "COMPLEXITY_OUTPUT", default_value = "data/augmented.json")]
        output: PathBuf,

        /// Переопределяет data_dir из конфига
        #[arg(long, env = "COMPLEXITY_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Векторизовать train-тексты сохранённой выборки
    Vectorize {
        #[arg(long, short, default_value = "data/augmented.json")]
        input: PathBuf,

        /// Переопределяет vectorizer.kind из конфига
        #[arg(long)]
        kind: Option<String>,

        /// Куда сохранить модель word2vec
        #[arg(long)]
        save_model: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn main() -> Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Build { output, data_dir } => {
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }

            let translator = HttpTranslator::from_config(&config.translator)?;
            let lemmatizer = config
                .augmentation
                .lemma_table
                .as_deref()
                .map(LookupLemmatizer::from_tsv)
                .transpose()?;

            let split = store_augmented(
                &output,
                &config,
                translator.as_ref().map(|t| t as &dyn Translator),
                lemmatizer.as_ref().map(|l| l as &dyn Lemmatizer),
            )
            .context("failed to build augmented datasets")?;

            println!(
                "train: {} records, test: {} records -> {}",
                split.train.len(),
                split.test.len(),
                output.display()
            );
        }
        Command::Vectorize {
            input,
            kind,
            save_model,
        } => {
            if let Some(kind) = kind {
                config.vectorizer.kind = kind;
            }

            let split = read_augmented(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let texts = split.train.texts();
            let vectorized = vectorize(&texts, &config.vectorizer)?;

            let (rows, cols) = vectorized.features.shape();
            println!("{}: {} x {}", config.vectorizer.kind, rows, cols);

            if let FeatureMatrix::Dense(features) = &vectorized.features {
                let dataset = to_linfa_dataset(features.clone(), &split.train.ratings())?;
                tracing::info!("linfa dataset with {} targets", dataset.targets.len());
            }

            if let Some(path) = save_model {
                save_word2vec(&vectorized, &path)?;
            }
        }
    }

    Ok(())
}
