use rand::Rng;

use crate::variant_engine::{
    answer_key::{answer_lines, letter_string, AnswerKey, UsageBar},
    assembler::assemble,
    error::EngineError,
    models::{Question, QuestionVariant, SectionDefinition, SectionHeader},
    numbering::QuestionNumbering,
};

/// Section backed by a question pool: multiple-choice, reading-comprehension,
/// word-problem, quiz, comprehension-questions, and the question half of
/// custom sections.
#[derive(Debug, Clone)]
pub struct QuestionSection {
    pub header: SectionHeader,
    pub variants: Vec<QuestionVariant>,
    /// The bank after the run, with final usage counts.
    pub pool: Vec<Question>,
}

impl QuestionSection {
    pub fn init<R: Rng>(
        mut definition: SectionDefinition,
        variant_count: usize,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let header = SectionHeader::from(&definition);
        let mut pool = std::mem::take(&mut definition.questions);
        let variants = assemble(
            &mut pool,
            variant_count,
            header.num_quest as usize,
            header.num_col,
            header.keep_order,
            rng,
        )?;
        Ok(QuestionSection { header, variants, pool })
    }

    pub fn variant(&self, student: usize) -> Option<&QuestionVariant> {
        self.variants.get(student)
    }

    pub fn item_count(&self, student: usize) -> usize {
        self.variant(student).map_or(0, |v| v.questions.len())
    }

    pub fn distribution(&self) -> Vec<UsageBar> {
        self.pool
            .iter()
            .enumerate()
            .map(|(i, q)| UsageBar { question: i + 1, used: q.used })
            .collect()
    }

    /// One letter per question over a claimed range of question numbers.
    pub fn letter_key(&self, student: usize, numbering: &mut QuestionNumbering) -> AnswerKey {
        let questions = self.variant(student).map_or(&[][..], |v| &v.questions[..]);
        AnswerKey::letters(questions.len(), letter_string(questions), numbering)
    }

    /// Written answers, one line per question.
    pub fn line_key(&self, student: usize, sep: &str) -> AnswerKey {
        let questions = self.variant(student).map_or(&[][..], |v| &v.questions[..]);
        AnswerKey::Lines(answer_lines(questions, sep))
    }

    /// True when the student's first question has answer choices.
    pub fn has_choices(&self, student: usize) -> bool {
        self.variant(student)
            .and_then(|v| v.questions.first())
            .is_some_and(|q| !q.choices.is_empty())
    }
}

/// Free-form section: questions are drawn like any other, but the answer key
/// and answer sheet are literal lines from the definition.
#[derive(Debug, Clone)]
pub struct CustomSection {
    pub questions: QuestionSection,
    pub answers: Vec<String>,
    pub answer_text: Vec<String>,
}

impl CustomSection {
    pub fn init<R: Rng>(
        mut definition: SectionDefinition,
        variant_count: usize,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let answers = std::mem::take(&mut definition.answers);
        let answer_text = std::mem::take(&mut definition.answer_text);
        let questions = QuestionSection::init(definition, variant_count, rng)?;
        Ok(CustomSection { questions, answers, answer_text })
    }
}
