//! Случайная перестановка и удаление слов

use rand::seq::index::sample;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Swap,
    #[default]
    Delete,
}

#[derive(Debug, Clone)]
pub struct RandomWordAug {
    pub action: Action,
    pub aug_p: f64,
    pub aug_min: usize,
    pub aug_max: usize,
}

impl RandomWordAug {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            aug_p: 0.3,
            aug_min: 1,
            aug_max: 10,
        }
    }

    /// ceil(aug_p * n), ограниченное [aug_min, aug_max]
    pub fn aug_count(&self, n_words: usize) -> usize {
        if n_words == 0 {
            return 0;
        }
        let count = (self.aug_p * n_words as f64).ceil() as usize;
        count.max(self.aug_min).min(self.aug_max)
    }

    pub fn augment<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let augmented = match self.action {
            Action::Swap => self.swap(words, rng),
            Action::Delete => self.delete(words, rng),
        };
        augmented.join(" ")
    }

    fn swap<'t, R: Rng + ?Sized>(&self, mut words: Vec<&'t str>, rng: &mut R) -> Vec<&'t str> {
        if words.len() < 2 {
            return words;
        }
        let count = self.aug_count(words.len()).min(words.len());
        for idx in sample(rng, words.len(), count).into_iter() {
            let neighbour = if idx == 0 {
                1
            } else if idx == words.len() - 1 {
                idx - 1
            } else if rng.gen_bool(0.5) {
                idx - 1
            } else {
                idx + 1
            };
            words.swap(idx, neighbour);
        }
        words
    }

    fn delete<'t, R: Rng + ?Sized>(&self, words: Vec<&'t str>, rng: &mut R) -> Vec<&'t str> {
        if words.len() < 2 {
            return words;
        }
        // хотя бы одно слово остаётся
        let count = self.aug_count(words.len()).min(words.len() - 1);
        let dropped: std::collections::HashSet<usize> =
            sample(rng, words.len(), count).into_iter().collect();
        words
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !dropped.contains(i))
            .map(|(_, w)| w)
            .collect()
    }
}
