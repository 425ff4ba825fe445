//! Usage counters for balanced selection.
//!
//! A tracker maps each pool item to the number of variants that have drawn
//! it so far. Question pools keep the counter on the [`Question`] itself and
//! are keyed by index; word pools keep a separate map keyed by the word.
//! Counters are created fresh for every run and only ever grow.

use std::collections::BTreeMap;

use crate::variant_engine::models::Question;

pub trait UsageTracker {
    /// Stable identity of one pool item.
    type Key: Clone + PartialEq;

    /// Every tracked key, in deterministic pool order.
    fn keys(&self) -> Vec<Self::Key>;

    fn get(&self, key: &Self::Key) -> u32;

    fn set(&mut self, key: &Self::Key, count: u32);

    /// Smallest count among all tracked items, capped at `ceiling`.
    fn min_usage(&self, ceiling: u32) -> u32 {
        self.keys()
            .iter()
            .map(|k| self.get(k))
            .fold(ceiling, u32::min)
    }
}

impl UsageTracker for [Question] {
    type Key = usize;

    fn keys(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    fn get(&self, key: &usize) -> u32 {
        <[Question]>::get(self, *key).map_or(0, |q| q.used)
    }

    fn set(&mut self, key: &usize, count: u32) {
        if let Some(q) = self.get_mut(*key) {
            q.used = count;
        }
    }

    fn min_usage(&self, ceiling: u32) -> u32 {
        self.iter().map(|q| q.used).fold(ceiling, u32::min)
    }
}

/// Usage counts for a word bank, ordered by word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordUsage {
    counts: BTreeMap<String, u32>,
}

impl WordUsage {
    /// Track every word of `words` starting at zero.
    pub fn new<'a>(words: impl IntoIterator<Item = &'a String>) -> Self {
        WordUsage {
            counts: words.into_iter().map(|w| (w.clone(), 0)).collect(),
        }
    }

    /// Number of tracked words.
    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }

    /// `(word, count)` pairs in word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

impl UsageTracker for WordUsage {
    type Key = String;

    fn keys(&self) -> Vec<String> {
        self.counts.keys().cloned().collect()
    }

    fn get(&self, key: &String) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &String, count: u32) {
        self.counts.insert(key.clone(), count);
    }

    fn min_usage(&self, ceiling: u32) -> u32 {
        self.counts.values().copied().fold(ceiling, u32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_counters_live_on_the_question() {
        let mut pool = vec![Question::default(), Question::default()];
        UsageTracker::set(pool.as_mut_slice(), &1, 3);
        assert_eq!(pool[1].used, 3);
        assert_eq!(UsageTracker::get(pool.as_slice(), &1), 3);
        assert_eq!(pool.as_slice().min_usage(10), 0);
    }

    #[test]
    fn min_usage_is_capped_by_ceiling() {
        let mut pool = vec![Question::default()];
        pool[0].used = 9;
        assert_eq!(pool.as_slice().min_usage(2), 2);
        assert_eq!(WordUsage::default().min_usage(5), 5);
    }

    #[test]
    fn word_usage_is_ordered_by_word() {
        let words = ["pear".to_string(), "apple".to_string(), "fig".to_string()];
        let mut usage = WordUsage::new(words.iter());
        usage.set(&"fig".to_string(), 2);
        assert_eq!(usage.keys(), vec!["apple", "fig", "pear"]);
        assert_eq!(usage.get(&"fig".to_string()), 2);
        assert_eq!(usage.min_usage(u32::MAX), 0);
    }
}
