//! Разбиение на train/test

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{PipelineError, Result};

/// Перемешивает и делит на (train, test); в test попадает ceil(test_size * n) элементов
pub fn train_test_split<T, R>(mut items: Vec<T>, test_size: f64, rng: &mut R) -> Result<(Vec<T>, Vec<T>)>
where
    R: Rng + ?Sized,
{
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::InvalidConfig(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }

    let total = items.len();
    if total == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let n_test = (test_size * total as f64).ceil() as usize;
    if n_test >= total {
        return Err(PipelineError::InvalidConfig(format!(
            "with n_samples={total} and test_size={test_size}, the train set would be empty"
        )));
    }

    items.shuffle(rng);
    let train = items.split_off(n_test);

    tracing::debug!(
        "Dataset split: {} training, {} test",
        train.len(),
        items.len()
    );

    Ok((train, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_split_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let (train, test) = train_test_split((0..100).collect::<Vec<u32>>(), 0.1, &mut rng).unwrap();
        assert_eq!(train.len(), 90);
        assert_eq!(test.len(), 10);
    }

    #[test]
    fn test_test_size_rounds_up() {
        let mut rng = StdRng::seed_from_u64(1);
        let (train, test) = train_test_split((0..5).collect::<Vec<u32>>(), 0.1, &mut rng).unwrap();
        assert_eq!(test.len(), 1);
        assert_eq!(train.len(), 4);
    }

    #[test]
    fn test_all_items_preserved() {
        let mut rng = StdRng::seed_from_u64(9);
        let (train, test) = train_test_split((0..50).collect::<Vec<u32>>(), 0.3, &mut rng).unwrap();
        let mut all: Vec<u32> = train.into_iter().chain(test).collect();
        all.sort();
        assert_eq!(all, (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = train_test_split((0..20).collect::<Vec<u32>>(), 0.25, &mut StdRng::seed_from_u64(4)).unwrap();
        let b = train_test_split((0..20).collect::<Vec<u32>>(), 0.25, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_and_invalid() {
        let mut rng = StdRng::seed_from_u64(0);
        let (train, test) = train_test_split(Vec::<u32>::new(), 0.1, &mut rng).unwrap();
        assert!(train.is_empty() && test.is_empty());
        assert!(train_test_split(vec![1u32, 2], 0.0, &mut rng).is_err());
        assert!(train_test_split(vec![1u32], 0.1, &mut rng).is_err());
    }
}
