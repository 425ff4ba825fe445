use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::variant_engine::{error::EngineError, text};

/// Column count used when neither the section nor the question sets one.
pub const DEFAULT_COLUMNS: u32 = 4;

// ---------------------------------------------------------------------------
// Pool items
// ---------------------------------------------------------------------------

/// One question from the bank.
///
/// `answer` is the 1-based index of the correct entry in `choices`; it is
/// ignored when `choices` is empty (open questions, word problems). Imported
/// questions may leave it at 0 and name the correct choice in `answers`. `used` is
/// the usage counter the balanced selector mutates in place while a run is in
/// progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "text::lines")]
    pub question: String,
    #[serde(default, deserialize_with = "text::list")]
    pub choices: Vec<String>,
    #[serde(default)]
    pub answer: u32,
    /// Literal answer or feedback lines, shown in answer keys.
    #[serde(default, deserialize_with = "text::list")]
    pub answers: Vec<String>,
    #[serde(default, deserialize_with = "text::parts")]
    pub parts: Vec<String>,
    #[serde(default)]
    pub num_col: u32,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub used: u32,
}

impl Question {
    /// Convenience constructor for a multiple-choice question with no overrides.
    pub fn with_choices(
        question: impl Into<String>,
        choices: &[&str],
        answer: u32,
    ) -> Self {
        Question {
            question: question.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            answer,
            ..Question::default()
        }
    }

    /// Same question, flagged as required in every variant.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Section / test definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    MultipleChoice,
    ReadingComprehension,
    WordProblem,
    Quiz,
    ComprehensionQuestions,
    Custom,
    WordMatch,
    PassageCompletion,
}

impl SectionKind {
    /// Kinds whose pool is a list of [`Question`]s.
    pub fn uses_questions(self) -> bool {
        !matches!(self, SectionKind::WordMatch | SectionKind::PassageCompletion)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SectionKind::MultipleChoice         => "multiple-choice",
            SectionKind::ReadingComprehension   => "reading-comprehension",
            SectionKind::WordProblem            => "word-problem",
            SectionKind::Quiz                   => "quiz",
            SectionKind::ComprehensionQuestions => "comprehension-questions",
            SectionKind::Custom                 => "custom",
            SectionKind::WordMatch              => "word-match",
            SectionKind::PassageCompletion      => "passage-completion",
        };
        write!(f, "{}", s)
    }
}

/// One section exactly as it appears in the test definition, after any
/// upstream include merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDefinition {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default)]
    pub section_title: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub num_lines: String,
    #[serde(default)]
    pub points: u32,
    /// Questions (or words) per variant; 0 means "the whole pool".
    #[serde(default, rename = "questionsOntest")]
    pub num_quest: u32,
    #[serde(default)]
    pub num_col: u32,
    #[serde(default)]
    pub answer_lines: bool,
    #[serde(default)]
    pub quiz_box: bool,
    #[serde(default)]
    pub keep_order: bool,
    #[serde(default, deserialize_with = "text::lines")]
    pub instructions: String,
    #[serde(default, deserialize_with = "text::lines")]
    pub form_instructions: String,
    #[serde(default, deserialize_with = "text::lines")]
    pub text: String,
    #[serde(default, deserialize_with = "text::list")]
    pub column_head: Vec<String>,
    #[serde(default, deserialize_with = "text::list")]
    pub answer_text: Vec<String>,
    #[serde(default, deserialize_with = "text::list")]
    pub answers: Vec<String>,
    #[serde(default, rename = "word-list", deserialize_with = "text::list")]
    pub word_list: Vec<String>,
    #[serde(default, deserialize_with = "text::word_bank")]
    pub words: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "text::list")]
    pub questions: Vec<Question>,
}

impl SectionDefinition {
    /// Empty definition of the given kind; every collection starts empty.
    pub fn new(kind: SectionKind) -> Self {
        SectionDefinition {
            kind,
            section_title: String::new(),
            title: String::new(),
            num_lines: String::new(),
            points: 0,
            num_quest: 0,
            num_col: 0,
            answer_lines: false,
            quiz_box: false,
            keep_order: false,
            instructions: String::new(),
            form_instructions: String::new(),
            text: String::new(),
            column_head: Vec::new(),
            answer_text: Vec::new(),
            answers: Vec::new(),
            word_list: Vec::new(),
            words: BTreeMap::new(),
            questions: Vec::new(),
        }
    }

    /// Size of the pool this section draws from.
    pub fn pool_size(&self) -> usize {
        match self.kind {
            SectionKind::WordMatch         => self.words.len(),
            SectionKind::PassageCompletion => self.word_list.len(),
            _                              => self.questions.len(),
        }
    }
}

/// Whole test: header fields, the students who each get a variant, and the
/// sections in presentation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDefinition {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rtf_title: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub date: String,
    /// Minutes allowed.
    #[serde(default)]
    pub time: u32,
    #[serde(default)]
    pub no_key: bool,
    #[serde(default, deserialize_with = "text::list")]
    pub students: Vec<String>,
    #[serde(default, deserialize_with = "text::list")]
    pub sections: Vec<SectionDefinition>,
}

impl TestDefinition {
    /// Parse a test definition from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------------
// Section header
// ---------------------------------------------------------------------------

/// Metadata shared by every section kind, copied out of the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeader {
    pub kind: SectionKind,
    pub section_title: String,
    pub title: String,
    pub num_lines: String,
    pub points: u32,
    pub num_col: u32,
    pub num_quest: u32,
    pub answer_lines: bool,
    pub quiz_box: bool,
    pub quiz: bool,
    pub keep_order: bool,
    pub instructions: String,
    pub form_instructions: String,
    pub text: String,
    pub column_head: Vec<String>,
}

impl From<&SectionDefinition> for SectionHeader {
    fn from(def: &SectionDefinition) -> Self {
        SectionHeader {
            kind: def.kind,
            section_title: def.section_title.clone(),
            title: def.title.clone(),
            num_lines: def.num_lines.clone(),
            points: def.points,
            num_col: def.num_col,
            num_quest: def.num_quest,
            answer_lines: def.answer_lines,
            quiz_box: def.quiz_box,
            quiz: def.kind == SectionKind::Quiz,
            keep_order: def.keep_order,
            instructions: def.instructions.clone(),
            form_instructions: def.form_instructions.clone(),
            text: def.text.clone(),
            column_head: def.column_head.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Assembled variants
// ---------------------------------------------------------------------------

/// Correct answer of a shuffled question, relative to the variant's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceAnswer {
    pub letter: String,
    pub text: String,
}

/// A question as presented in one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledQuestion {
    pub question: String,
    /// Choices in presentation order (a permutation of the bank's list).
    pub choices: Vec<String>,
    /// `Some` whenever `choices` is non-empty.
    pub correct: Option<ChoiceAnswer>,
    /// Answer-key lines: `[letter, text]` for choice questions, otherwise the
    /// bank's literal answers.
    pub answers: Vec<String>,
    pub parts: Vec<String>,
    pub num_col: u32,
    pub required: bool,
}

/// One test-taker's questions for a question-based section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionVariant {
    pub questions: Vec<AssembledQuestion>,
}

/// One row of a word-match variant.
///
/// `definition` is the entry printed in the definition column on this row;
/// `answer` is the letter of the row whose definition matches `word`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatchRow {
    pub word: String,
    pub definition: String,
    pub answer: String,
    /// Form-style option set: `word` plus distractor words, shuffled.
    pub choices: Vec<String>,
    /// Letter of `word` within `choices`.
    pub choice_answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatchVariant {
    pub rows: Vec<WordMatchRow>,
}

/// One test-taker's word bank for a passage-completion section.
///
/// `answers[i]` is the letter under which the i-th blank's word appears in
/// `words`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageVariant {
    pub words: Vec<String>,
    pub answers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Whole-test output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestHeader {
    pub subject: String,
    pub grade: String,
    pub school: String,
    pub title: String,
    pub rtf_title: String,
    pub logo: String,
    pub date: String,
    pub time: u32,
    /// Sum of all section points.
    pub points: u32,
    /// True when any section is a quiz.
    pub quiz: bool,
    pub no_key: bool,
}

/// Binds one student to their variant index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestBundle {
    pub student: String,
    pub student_num: usize,
}
