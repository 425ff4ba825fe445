use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, warn};

use crate::variant_engine::{
    answer_key::AnswerKey,
    error::EngineError,
    models::{SectionDefinition, SectionHeader, WordMatchRow, WordMatchVariant},
    numbering::QuestionNumbering,
    selector::select_words,
    shuffle::{answer_letter, permutation, shuffle_in_place},
    usage::WordUsage,
};

/// Options in a row's form-style choice set, the word itself included.
pub const DISTRACTOR_SET_SIZE: usize = 4;

/// Word-match section: a word column and a shuffled definition column.
#[derive(Debug, Clone)]
pub struct WordMatchSection {
    pub header: SectionHeader,
    pub variants: Vec<WordMatchVariant>,
    pub words: BTreeMap<String, String>,
    pub usage: WordUsage,
}

impl WordMatchSection {
    pub fn init<R: Rng>(
        definition: SectionDefinition,
        variant_count: usize,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let mut header = SectionHeader::from(&definition);
        if header.column_head.is_empty() {
            header.column_head = vec!["Word".to_string(), "Definition".to_string()];
        }

        let words = definition.words;
        let bank: Vec<String> = words.keys().cloned().collect();
        let mut usage = WordUsage::new(words.keys());

        let mut per_variant = header.num_quest as usize;
        if per_variant > usage.len() {
            warn!(requested = per_variant, available = usage.len(), "clamping word count to word bank size");
            per_variant = usage.len();
        }
        let ceiling = u32::try_from(variant_count).unwrap_or(u32::MAX);

        let mut variants = Vec::with_capacity(variant_count);
        while variants.len() < variant_count {
            let picked = if per_variant == 0 {
                Vec::new()
            } else {
                select_words(&mut usage, per_variant, ceiling, rng)?
            };
            let rows = match_rows(&picked, &words, &bank, rng);
            debug!(variant = variants.len(), rows = rows.len(), "assembled word-match variant");
            variants.push(WordMatchVariant { rows });
        }

        Ok(WordMatchSection { header, variants, words, usage })
    }

    pub fn variant(&self, student: usize) -> Option<&WordMatchVariant> {
        self.variants.get(student)
    }

    pub fn item_count(&self, student: usize) -> usize {
        self.variant(student).map_or(0, |v| v.rows.len())
    }

    pub fn answer_key(&self, student: usize, numbering: &mut QuestionNumbering) -> AnswerKey {
        let rows = self.variant(student).map_or(&[][..], |v| &v.rows[..]);
        let letters = rows.iter().map(|r| r.answer.as_str()).collect();
        AnswerKey::letters(rows.len(), letters, numbering)
    }
}

/// Pair each picked word with a row of the shuffled definition column.
///
/// Row `i` prints the definition at column position `i`; its answer is the
/// letter of the position where the word's own definition landed.
fn match_rows<R: Rng>(
    picked: &[String],
    words: &BTreeMap<String, String>,
    bank: &[String],
    rng: &mut R,
) -> Vec<WordMatchRow> {
    let definitions: Vec<String> = picked
        .iter()
        .map(|w| words.get(w).cloned().unwrap_or_default())
        .collect();
    let column = permutation(picked.len(), rng);

    picked
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let landed = column.iter().position(|&j| j == i).unwrap_or(i);
            let (choices, choice_answer) = distractor_set(word, bank, DISTRACTOR_SET_SIZE, rng);
            WordMatchRow {
                word: word.clone(),
                definition: definitions[column[i]].clone(),
                answer: answer_letter(landed),
                choices,
                choice_answer,
            }
        })
        .collect()
}

/// `word` plus distinct random distractors from `bank`, shuffled, and the
/// letter of `word` within the set. The set shrinks when the bank is smaller
/// than `size`.
pub fn distractor_set<R: Rng>(
    word: &str,
    bank: &[String],
    size: usize,
    rng: &mut R,
) -> (Vec<String>, String) {
    let mut others: Vec<&String> = bank.iter().filter(|w| w.as_str() != word).collect();
    shuffle_in_place(&mut others, rng);

    let mut set: Vec<String> = std::iter::once(word.to_string())
        .chain(others.into_iter().take(size.saturating_sub(1)).cloned())
        .collect();
    shuffle_in_place(&mut set, rng);

    let position = set.iter().position(|w| w == word).unwrap_or(0);
    (set, answer_letter(position))
}
