//! Variant assembly for question-based sections.
//!
//! Each variant is an independent balanced draw against the shared pool, so
//! balance is measured across the whole run rather than inside one variant.

use rand::Rng;
use tracing::{debug, warn};

use crate::variant_engine::{
    error::EngineError,
    models::{AssembledQuestion, Question, QuestionVariant},
    selector::select_questions,
    shuffle::shuffle_choices,
};

/// Presentation copy of one bank question for a single variant.
///
/// Column count falls back to `default_columns` when the question does not
/// override it. Choice questions are shuffled and their answer re-derived;
/// open questions keep their literal answers. A choice question without an
/// answer index is matched by its first literal answer, and keeps its
/// literal answers when no choice matches.
pub fn present_question<R: Rng>(
    question: &Question,
    default_columns: u32,
    rng: &mut R,
) -> Result<AssembledQuestion, EngineError> {
    let num_col = if question.num_col != 0 { question.num_col } else { default_columns };

    let (choices, correct, answers) = if question.choices.is_empty() {
        (Vec::new(), None, question.answers.clone())
    } else {
        let shuffled = shuffle_choices(
            &question.question,
            &question.choices,
            answer_index(question),
            rng,
        )?;
        let answers = match &shuffled.correct {
            Some(correct) => vec![correct.letter.clone(), correct.text.clone()],
            None => question.answers.clone(),
        };
        (shuffled.choices, shuffled.correct, answers)
    };

    Ok(AssembledQuestion {
        question: question.question.clone(),
        choices,
        correct,
        answers,
        parts: question.parts.clone(),
        num_col,
        required: question.required,
    })
}

/// 1-based index of the correct choice: the declared one, else the choice
/// whose text equals the first literal answer, else 0.
fn answer_index(question: &Question) -> u32 {
    if question.answer != 0 {
        return question.answer;
    }
    question
        .answers
        .first()
        .and_then(|answer| question.choices.iter().position(|c| c == answer))
        .map_or(0, |i| i as u32 + 1)
}

/// Build `variant_count` variants of `per_variant` questions each.
///
/// A request larger than the pool is clamped to the pool size. An empty pool
/// or a zero count yields empty variants.
pub fn assemble<R: Rng>(
    pool: &mut [Question],
    variant_count: usize,
    per_variant: usize,
    default_columns: u32,
    keep_order: bool,
    rng: &mut R,
) -> Result<Vec<QuestionVariant>, EngineError> {
    let per_variant = if per_variant > pool.len() {
        warn!(requested = per_variant, available = pool.len(), "clamping question count to pool size");
        pool.len()
    } else {
        per_variant
    };
    let ceiling = u32::try_from(variant_count).unwrap_or(u32::MAX);

    let mut variants = Vec::with_capacity(variant_count);
    while variants.len() < variant_count {
        let picked = if per_variant == 0 {
            Vec::new()
        } else {
            select_questions(pool, per_variant, ceiling, keep_order, rng)?
        };

        let questions = picked
            .iter()
            .map(|&i| present_question(&pool[i], default_columns, rng))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(variant = variants.len(), questions = questions.len(), "assembled variant");
        variants.push(QuestionVariant { questions });
    }

    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> Vec<Question> {
        vec![
            Question::with_choices("2+2?", &["3", "4", "5"], 2),
            Question::with_choices("Capital of France?", &["Rome", "Paris", "Oslo", "Bern"], 2),
            Question {
                question: "Explain photosynthesis.".to_string(),
                answers: vec!["Light to sugar".to_string()],
                parts: vec!["a) inputs".to_string(), "b) outputs".to_string()],
                num_col: 2,
                ..Question::default()
            },
        ]
    }

    #[test]
    fn presentation_resolves_columns_and_answers() {
        let mut rng = StdRng::seed_from_u64(4);
        let b = bank();

        let mc = present_question(&b[1], 4, &mut rng).unwrap();
        assert_eq!(mc.num_col, 4);
        let correct = mc.correct.clone().unwrap();
        assert_eq!(correct.text, "Paris");
        assert_eq!(mc.answers, vec![correct.letter.clone(), "Paris".to_string()]);

        let open = present_question(&b[2], 4, &mut rng).unwrap();
        assert_eq!(open.num_col, 2);
        assert!(open.choices.is_empty());
        assert!(open.correct.is_none());
        assert_eq!(open.answers, vec!["Light to sugar".to_string()]);
        assert_eq!(open.parts.len(), 2);
    }

    #[test]
    fn oversized_requests_are_clamped() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut b = bank();
        let variants = assemble(&mut b, 2, 10, 4, false, &mut rng).unwrap();
        assert_eq!(variants.len(), 2);
        assert!(variants.iter().all(|v| v.questions.len() == 3));
    }

    #[test]
    fn empty_pool_and_zero_count_yield_empty_variants() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut empty: Vec<Question> = Vec::new();
        let v = assemble(&mut empty, 3, 2, 4, false, &mut rng).unwrap();
        assert_eq!(v.len(), 3);
        assert!(v.iter().all(|v| v.questions.is_empty()));

        let mut b = bank();
        let v = assemble(&mut b, 2, 0, 4, false, &mut rng).unwrap();
        assert!(v.iter().all(|v| v.questions.is_empty()));
        assert!(b.iter().all(|q| q.used == 0));
    }

    #[test]
    fn keep_order_presents_the_bank_prefix() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut b = bank();
        let variants = assemble(&mut b, 3, 2, 4, true, &mut rng).unwrap();
        for v in &variants {
            let texts: Vec<&str> = v.questions.iter().map(|q| q.question.as_str()).collect();
            assert_eq!(texts, vec!["2+2?", "Capital of France?"]);
        }
    }

    #[test]
    fn unindexed_choices_match_the_literal_answer() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut q = Question::with_choices("Sky?", &["red", "blue", "green"], 0);
        q.answers = vec!["blue".to_string()];
        let shown = present_question(&q, 4, &mut rng).unwrap();
        let correct = shown.correct.clone().unwrap();
        assert_eq!(correct.text, "blue");
        assert_eq!(shown.answers, vec![correct.letter, "blue".to_string()]);

        q.answers = vec!["violet".to_string()];
        let shown = present_question(&q, 4, &mut rng).unwrap();
        assert!(shown.correct.is_none());
        assert_eq!(shown.choices.len(), 3);
        assert_eq!(shown.answers, vec!["violet".to_string()]);
    }

    #[test]
    fn bad_answer_index_surfaces_as_an_error() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut b = vec![Question::with_choices("broken", &["x", "y"], 7)];
        let err = assemble(&mut b, 1, 1, 4, false, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAnswerIndex { index: 7, .. }));
    }
}
