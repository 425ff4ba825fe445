//! Core variant engine — balanced selection, choice shuffling, and section
//! assembly.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Questions, word banks, section/test definitions, assembled variants |
//! | `text`       | Serde helpers that normalize definition text and collections |
//! | `error`      | `EngineError` |
//! | `usage`      | Usage counters for question and word pools |
//! | `selector`   | Balanced least-used selection with random tie-breaks |
//! | `shuffle`    | Fisher-Yates helpers, answer letters, choice shuffling |
//! | `numbering`  | Running question numbers with per-section reset |
//! | `assembler`  | Builds question variants from a shared pool |
//! | `sections`   | Eight section kinds behind one `Section` enum |
//! | `answer_key` | Answer-key entries and usage distribution |
//! | `generator`  | Single entry point `generate_test()` |

pub mod answer_key;
pub mod assembler;
pub mod error;
pub mod generator;
pub mod models;
pub mod numbering;
pub mod sections;
pub mod selector;
pub mod shuffle;
pub mod text;
pub mod usage;

// Re-export the public API surface so callers can use
// `variant_engine::generate_test` without reaching into sub-modules.
pub use answer_key::{AnswerKey, AnswerKeyEntry, UsageBar};
pub use error::EngineError;
pub use generator::{generate_test, GeneratedTest, GenerationRequest};
pub use models::{
    AssembledQuestion, ChoiceAnswer, PassageVariant, Question, QuestionVariant,
    SectionDefinition, SectionHeader, SectionKind, TestBundle, TestDefinition, TestHeader,
    WordMatchRow, WordMatchVariant,
};
pub use numbering::QuestionNumbering;
pub use sections::Section;
