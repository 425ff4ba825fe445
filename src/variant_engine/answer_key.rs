//! Renderer-facing answer keys and usage distribution.

use serde::{Deserialize, Serialize};

use crate::variant_engine::models::AssembledQuestion;
use crate::variant_engine::numbering::QuestionNumbering;

/// Answer key for one section of one student's test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerKey {
    /// Bubble-sheet style: question numbers `start..=end` answered by one
    /// letter each.
    Letters { start: u32, end: u32, letters: String },
    /// Free-form answers, one entry per question (or per literal line).
    Lines(Vec<String>),
}

impl AnswerKey {
    /// Claim `count` question numbers and build a letter key.
    pub fn letters(count: usize, letters: String, numbering: &mut QuestionNumbering) -> Self {
        let range = numbering.reserve(count as u32);
        AnswerKey::Letters {
            start: *range.start(),
            end: *range.end(),
            letters,
        }
    }

    /// Letters prefixed with one `x` per earlier question number, the layout
    /// answer boxes expect when numbering does not start at 1.
    pub fn padded_letters(&self) -> Option<String> {
        match self {
            AnswerKey::Letters { start, letters, .. } => Some(format!(
                "{}{}",
                "x".repeat(start.saturating_sub(1) as usize),
                letters
            )),
            AnswerKey::Lines(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    pub section_title: String,
    pub points: u32,
    pub key: AnswerKey,
}

/// How often one bank question was drawn during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBar {
    /// 1-based position in the bank.
    pub question: usize,
    pub used: u32,
}

/// Concatenate the first answer entry (the letter for choice questions) of
/// each question.
pub fn letter_string(questions: &[AssembledQuestion]) -> String {
    questions
        .iter()
        .filter_map(|q| q.answers.first())
        .map(String::as_str)
        .collect()
}

/// One line per question, joining its answer entries with `sep`.
pub fn answer_lines(questions: &[AssembledQuestion], sep: &str) -> Vec<String> {
    questions.iter().map(|q| q.answers.join(sep)).collect()
}
