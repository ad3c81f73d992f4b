/// Пайплайн: объединение датасетов, train/test, аугментация

pub mod augment;
pub mod split;
pub mod store;
pub mod unify;

pub use augment::{augment, augmented_all, split_sources, TrainTest};
pub use split::train_test_split;
pub use store::{read_augmented, read_stored, store_augmented, write_split, StoredSplit};
pub use unify::{all_data, concat_selected};
