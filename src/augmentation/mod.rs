/// Аугментация обучающих данных

pub mod lemmatization;
pub mod random_word;
pub mod stemming;
pub mod translation;

pub use lemmatization::{Lemmatizer, LookupLemmatizer};
pub use random_word::{Action, RandomWordAug};
pub use stemming::SnowballStemmer;
pub use translation::{BackTranslator, HttpTranslator, Translator};
