//! Balanced selection of pool items for one variant.
//!
//! Every draw takes an item from the least-used group of the pool, breaking
//! ties at random, so that after a full run the usage counts of non-required
//! items differ by at most one. Required items are always included and do
//! not take part in balancing.

use rand::Rng;
use tracing::debug;

use crate::variant_engine::{
    error::EngineError,
    models::Question,
    shuffle::shuffle_in_place,
    usage::{UsageTracker, WordUsage},
};

/// Fill `seed` up to `count` keys with least-used items and return the
/// result in random order.
///
/// `ceiling` caps the minimum-usage search; callers pass the number of
/// variants in the run. Each winner's counter is bumped as it is drawn.
/// When every least-used item is already in this variant the search narrows
/// to the items not yet chosen; if nothing is left, the pool is exhausted.
pub fn balanced_fill<T, R>(
    tracker: &mut T,
    seed: Vec<T::Key>,
    count: usize,
    ceiling: u32,
    rng: &mut R,
) -> Result<Vec<T::Key>, EngineError>
where
    T: UsageTracker + ?Sized,
    R: Rng,
{
    let keys = tracker.keys();
    let mut chosen = seed;

    while chosen.len() < count {
        let min_use = tracker.min_usage(ceiling);
        let mut ties: Vec<T::Key> = keys
            .iter()
            .filter(|k| tracker.get(k) == min_use && !chosen.contains(k))
            .cloned()
            .collect();

        if ties.is_empty() {
            let open: Vec<T::Key> = keys
                .iter()
                .filter(|k| !chosen.contains(k))
                .cloned()
                .collect();
            let open_min = open
                .iter()
                .map(|k| tracker.get(k))
                .min()
                .ok_or(EngineError::PoolExhausted {
                    requested: count,
                    available: keys.len(),
                })?;
            debug!(min_use, open_min, "least-used items already chosen, narrowing tie group");
            ties = open
                .into_iter()
                .filter(|k| tracker.get(k) == open_min)
                .collect();
        }

        shuffle_in_place(&mut ties, rng);
        let winner = ties.swap_remove(0);
        let used = tracker.get(&winner);
        tracker.set(&winner, used + 1);
        chosen.push(winner);
    }

    shuffle_in_place(&mut chosen, rng);
    Ok(chosen)
}

/// Pick `count` question indices for one variant.
///
/// With `keep_order` the first `count` indices come back unchanged and no
/// counters move. Otherwise every required question is included, the rest is
/// balanced against the shared counters, and the result is shuffled.
pub fn select_questions<R: Rng>(
    pool: &mut [Question],
    count: usize,
    ceiling: u32,
    keep_order: bool,
    rng: &mut R,
) -> Result<Vec<usize>, EngineError> {
    if keep_order {
        return Ok((0..count.min(pool.len())).collect());
    }

    let required: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, q)| q.required)
        .map(|(i, _)| i)
        .collect();

    balanced_fill(pool, required, count, ceiling, rng)
}

/// Pick `count` words for one variant, balanced against `usage`.
pub fn select_words<R: Rng>(
    usage: &mut WordUsage,
    count: usize,
    ceiling: u32,
    rng: &mut R,
) -> Result<Vec<String>, EngineError> {
    balanced_fill(usage, Vec::new(), count, ceiling, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::with_choices(format!("q{i}"), &["a", "b"], 1))
            .collect()
    }

    fn spread(pool: &[Question], skip_required: bool) -> u32 {
        let counts: Vec<u32> = pool
            .iter()
            .filter(|q| !(skip_required && q.required))
            .map(|q| q.used)
            .collect();
        counts.iter().max().unwrap() - counts.iter().min().unwrap()
    }

    #[test]
    fn returns_exactly_count_distinct_items() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = pool(6);
        let picked = select_questions(&mut p, 4, 10, false, &mut rng).unwrap();
        assert_eq!(picked.len(), 4);
        let mut dedup = picked.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 4);
        assert_eq!(p.iter().map(|q| q.used).sum::<u32>(), 4);
    }

    #[test]
    fn keep_order_returns_the_same_prefix_every_time() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = pool(5);
        for _ in 0..4 {
            let picked = select_questions(&mut p, 3, 4, true, &mut rng).unwrap();
            assert_eq!(picked, vec![0, 1, 2]);
        }
        assert!(p.iter().all(|q| q.used == 0), "keep-order must not touch usage");
    }

    #[test]
    fn required_questions_are_always_present() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut p = pool(7);
        p[2].required = true;
        p[5].required = true;
        for _ in 0..10 {
            let picked = select_questions(&mut p, 4, 10, false, &mut rng).unwrap();
            assert!(picked.contains(&2) && picked.contains(&5));
            assert_eq!(picked.len(), 4);
        }
        assert!(spread(&p, true) <= 1);
    }

    #[test]
    fn usage_stays_within_one_across_a_run() {
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut p = pool(7);
            for _ in 0..5 {
                select_questions(&mut p, 3, 5, false, &mut rng).unwrap();
            }
            assert!(spread(&p, false) <= 1, "seed {seed}: spread too wide");
        }
    }

    #[test]
    fn narrows_when_least_used_items_are_already_chosen() {
        // After the two unused items are drawn they sit at usage 1 with no
        // other item at that level, so the third draw must come from usage 2.
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = pool(4);
        p[0].used = 2;
        p[1].used = 2;
        let picked = select_questions(&mut p, 3, 10, false, &mut rng).unwrap();
        assert_eq!(picked.len(), 3);
        assert!(picked.contains(&2) && picked.contains(&3));
    }

    #[test]
    fn asking_for_more_than_the_pool_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = pool(2);
        let err = select_questions(&mut p, 3, 1, false, &mut rng).unwrap_err();
        assert_eq!(err, EngineError::PoolExhausted { requested: 3, available: 2 });
    }

    #[test]
    fn word_draws_increment_usage() {
        let words: Vec<String> = ["ant", "bee", "cat", "dog"].iter().map(|s| s.to_string()).collect();
        let mut usage = WordUsage::new(words.iter());
        let mut rng = StdRng::seed_from_u64(2);
        let first = select_words(&mut usage, 2, 2, &mut rng).unwrap();
        let second = select_words(&mut usage, 2, 2, &mut rng).unwrap();
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|w| !second.contains(w)), "second draw should take the unused pair");
        assert!(usage.iter().all(|(_, c)| c == 1));
    }

    #[test]
    fn word_usage_stays_within_one_when_draws_do_not_divide_evenly() {
        let words: Vec<String> = ["ant", "bee", "cat", "dog", "eel"].iter().map(|s| s.to_string()).collect();
        for seed in 0..20u64 {
            let mut usage = WordUsage::new(words.iter());
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..3 {
                let picked = select_words(&mut usage, 2, 3, &mut rng).unwrap();
                assert_eq!(picked.len(), 2);
                assert_ne!(picked[0], picked[1]);
            }
            let counts: Vec<u32> = usage.iter().map(|(_, c)| c).collect();
            assert_eq!(counts.iter().sum::<u32>(), 6);
            let spread = counts.iter().max().unwrap() - counts.iter().min().unwrap();
            assert!(spread <= 1, "seed {seed}: word counts {counts:?}");
        }
    }

    #[test]
    fn asking_for_more_words_than_the_bank_is_an_error() {
        let words: Vec<String> = ["ant", "bee"].iter().map(|s| s.to_string()).collect();
        let mut usage = WordUsage::new(words.iter());
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_words(&mut usage, 3, 1, &mut rng).unwrap_err();
        assert_eq!(err, EngineError::PoolExhausted { requested: 3, available: 2 });
    }
}
