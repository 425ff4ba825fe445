//! Section builders, one per section kind.
//!
//! Six kinds draw from a question pool and share [`QuestionSection`]; they
//! differ only in how their answer keys are laid out. Word-match and
//! passage-completion draw from word lists and have their own builders.
//!
//! [`Section::init`] is the single dispatch point; everything downstream
//! (answer keys, numbering, distribution) goes through [`Section`].

pub mod passage;
pub mod questions;
pub mod word_match;

use rand::Rng;
use tracing::info;

use crate::variant_engine::{
    answer_key::{AnswerKey, AnswerKeyEntry, UsageBar},
    error::EngineError,
    models::{
        QuestionVariant, SectionDefinition, SectionHeader, SectionKind, DEFAULT_COLUMNS,
    },
    numbering::QuestionNumbering,
};

pub use passage::PassageSection;
pub use questions::{CustomSection, QuestionSection};
pub use word_match::{distractor_set, WordMatchSection, DISTRACTOR_SET_SIZE};

#[derive(Debug, Clone)]
pub enum Section {
    MultipleChoice(QuestionSection),
    ReadingComprehension(QuestionSection),
    WordProblem(QuestionSection),
    Quiz(QuestionSection),
    ComprehensionQuestions(QuestionSection),
    Custom(CustomSection),
    WordMatch(WordMatchSection),
    PassageCompletion(PassageSection),
}

/// Fill in the per-section defaults: a zero question count means the whole
/// pool, and a zero column count means [`DEFAULT_COLUMNS`].
pub fn normalize(mut definition: SectionDefinition) -> SectionDefinition {
    if definition.num_quest == 0 {
        definition.num_quest = u32::try_from(definition.pool_size()).unwrap_or(u32::MAX);
    }
    if definition.num_col == 0 {
        definition.num_col = DEFAULT_COLUMNS;
    }
    definition
}

impl Section {
    /// Build `variant_count` variants of one section.
    pub fn init<R: Rng>(
        definition: SectionDefinition,
        variant_count: usize,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let definition = normalize(definition);
        let kind = definition.kind;
        let title = definition.section_title.clone();

        let section = match kind {
            SectionKind::MultipleChoice =>
                Section::MultipleChoice(QuestionSection::init(definition, variant_count, rng)?),

            SectionKind::ReadingComprehension =>
                Section::ReadingComprehension(QuestionSection::init(definition, variant_count, rng)?),

            SectionKind::WordProblem =>
                Section::WordProblem(QuestionSection::init(definition, variant_count, rng)?),

            SectionKind::Quiz =>
                Section::Quiz(QuestionSection::init(definition, variant_count, rng)?),

            SectionKind::ComprehensionQuestions =>
                Section::ComprehensionQuestions(QuestionSection::init(definition, variant_count, rng)?),

            SectionKind::Custom =>
                Section::Custom(CustomSection::init(definition, variant_count, rng)?),

            SectionKind::WordMatch =>
                Section::WordMatch(WordMatchSection::init(definition, variant_count, rng)?),

            SectionKind::PassageCompletion =>
                Section::PassageCompletion(PassageSection::init(definition, variant_count, rng)),
        };

        info!(%kind, title = %title, variants = variant_count, "built section");
        Ok(section)
    }

    pub fn kind(&self) -> SectionKind {
        self.header().kind
    }

    pub fn header(&self) -> &SectionHeader {
        match self {
            Section::MultipleChoice(s)
            | Section::ReadingComprehension(s)
            | Section::WordProblem(s)
            | Section::Quiz(s)
            | Section::ComprehensionQuestions(s) => &s.header,
            Section::Custom(c) => &c.questions.header,
            Section::WordMatch(w) => &w.header,
            Section::PassageCompletion(p) => &p.header,
        }
    }

    /// The question-based part of this section, if it has one.
    pub fn question_section(&self) -> Option<&QuestionSection> {
        match self {
            Section::MultipleChoice(s)
            | Section::ReadingComprehension(s)
            | Section::WordProblem(s)
            | Section::Quiz(s)
            | Section::ComprehensionQuestions(s) => Some(s),
            Section::Custom(c) => Some(&c.questions),
            Section::WordMatch(_) | Section::PassageCompletion(_) => None,
        }
    }

    /// A student's assembled questions, for question-based kinds.
    pub fn questions(&self, student: usize) -> Option<&QuestionVariant> {
        self.question_section().and_then(|s| s.variant(student))
    }

    pub fn variant_count(&self) -> usize {
        match self {
            Section::WordMatch(w) => w.variants.len(),
            Section::PassageCompletion(p) => p.variants.len(),
            _ => self.question_section().map_or(0, |s| s.variants.len()),
        }
    }

    /// Questions, rows, or blanks in one student's variant.
    pub fn item_count(&self, student: usize) -> usize {
        match self {
            Section::WordMatch(w) => w.item_count(student),
            Section::PassageCompletion(p) => p.item_count(student),
            _ => self.question_section().map_or(0, |s| s.item_count(student)),
        }
    }

    /// Answer key for one student. Letter-keyed sections claim their
    /// question numbers from `numbering`; written-answer sections leave it
    /// untouched.
    pub fn answer_key(&self, student: usize, numbering: &mut QuestionNumbering) -> AnswerKeyEntry {
        let key = match self {
            Section::MultipleChoice(s) => s.letter_key(student, numbering),
            Section::ReadingComprehension(s) => {
                if s.has_choices(student) {
                    s.letter_key(student, numbering)
                } else {
                    s.line_key(student, "\n")
                }
            }
            Section::WordProblem(s) | Section::Quiz(s) => s.line_key(student, ", "),
            Section::ComprehensionQuestions(s) => s.line_key(student, "\n"),
            Section::Custom(c) => AnswerKey::Lines(c.answers.clone()),
            Section::WordMatch(w) => w.answer_key(student, numbering),
            Section::PassageCompletion(p) => p.answer_key(student, numbering),
        };

        let header = self.header();
        AnswerKeyEntry {
            section_title: header.section_title.clone(),
            points: header.points,
            key,
        }
    }

    /// Per-question usage counts after the run; empty for word-match,
    /// passage-completion, and custom sections.
    pub fn distribution(&self) -> Vec<UsageBar> {
        match self {
            Section::MultipleChoice(s)
            | Section::ReadingComprehension(s)
            | Section::WordProblem(s)
            | Section::Quiz(s)
            | Section::ComprehensionQuestions(s) => s.distribution(),
            Section::Custom(_) | Section::WordMatch(_) | Section::PassageCompletion(_) => Vec::new(),
        }
    }
}
