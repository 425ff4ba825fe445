use rand::Rng;

use crate::variant_engine::{error::EngineError, models::ChoiceAnswer};

/// Fisher-Yates shuffle driven by the caller's generator.
pub fn shuffle_in_place<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A random permutation of `0..n`.
pub fn permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    shuffle_in_place(&mut order, rng);
    order
}

/// Answer label for a 0-based position: 0 → "A", 1 → "B", …
pub fn answer_letter(position: usize) -> String {
    let code = ('A' as u32).saturating_add(position as u32);
    char::from_u32(code).unwrap_or('?').to_string()
}

/// Choices of one question after shuffling, with the correct answer
/// re-expressed against the new order when one was marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledChoices {
    pub choices: Vec<String>,
    pub correct: Option<ChoiceAnswer>,
}

/// Shuffle `choices` and locate the entry that was at the 1-based
/// `correct_index` before the shuffle. Index 0 marks no entry; the choices
/// are still shuffled and `correct` is `None`.
///
/// Positions are tracked by index, so duplicate choice texts still map the
/// answer to the entry that was actually marked correct.
pub fn shuffle_choices<R: Rng>(
    question: &str,
    choices: &[String],
    correct_index: u32,
    rng: &mut R,
) -> Result<ShuffledChoices, EngineError> {
    let correct = match (correct_index as usize).checked_sub(1) {
        None => None,
        Some(i) if i < choices.len() => Some(i),
        Some(_) => {
            return Err(EngineError::InvalidAnswerIndex {
                question: question.to_string(),
                index: correct_index,
                choices: choices.len(),
            })
        }
    };

    let order = permutation(choices.len(), rng);
    let correct = correct.map(|correct| {
        let new_position = order
            .iter()
            .position(|&original| original == correct)
            .unwrap_or(0);
        ChoiceAnswer {
            letter: answer_letter(new_position),
            text: choices[correct].clone(),
        }
    });

    Ok(ShuffledChoices {
        choices: order.iter().map(|&i| choices[i].clone()).collect(),
        correct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn letters_follow_the_alphabet() {
        assert_eq!(answer_letter(0), "A");
        assert_eq!(answer_letter(3), "D");
        assert_eq!(answer_letter(25), "Z");
    }

    #[test]
    fn shuffled_choices_keep_the_correct_text() {
        let choices = strings(&["red", "green", "blue", "yellow"]);
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = shuffle_choices("colour?", &choices, 3, &mut rng).unwrap();
            let correct = out.correct.unwrap();
            assert_eq!(correct.text, "blue");
            let pos = (correct.letter.as_bytes()[0] - b'A') as usize;
            assert_eq!(out.choices[pos], "blue");

            let mut sorted = out.choices.clone();
            sorted.sort();
            let mut expected = choices.clone();
            expected.sort();
            assert_eq!(sorted, expected, "seed {seed} lost or duplicated a choice");
        }
    }

    #[test]
    fn duplicate_texts_track_the_marked_entry() {
        let choices = strings(&["same", "same", "other"]);
        let mut rng = StdRng::seed_from_u64(11);
        let out = shuffle_choices("dup", &choices, 2, &mut rng).unwrap();
        let pos = (out.correct.unwrap().letter.as_bytes()[0] - b'A') as usize;
        assert_eq!(out.choices[pos], "same");
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let choices = strings(&["a", "b"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            shuffle_choices("q", &choices, 3, &mut rng),
            Err(EngineError::InvalidAnswerIndex { index: 3, choices: 2, .. })
        ));
    }

    #[test]
    fn unmarked_choices_are_shuffled_without_an_answer() {
        let choices = strings(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(1);
        let out = shuffle_choices("q", &choices, 0, &mut rng).unwrap();
        assert!(out.correct.is_none());
        let mut sorted = out.choices.clone();
        sorted.sort();
        assert_eq!(sorted, choices);
    }

    #[test]
    fn permutation_is_deterministic_with_seed() {
        let make = |seed: u64| permutation(10, &mut StdRng::seed_from_u64(seed));
        assert_eq!(make(99), make(99));
        let mut p = make(99);
        p.sort();
        assert_eq!(p, (0..10).collect::<Vec<_>>());
    }
}
