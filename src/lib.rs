//! # exam_variant_gen
//!
//! A deterministic engine that turns one shared bank of questions and
//! vocabulary words into a distinct, fairly balanced test for every student.
//!
//! The engine does not read files or typeset documents. It takes an in-memory
//! [`TestDefinition`] and hands back assembled variants that renderers (LaTeX,
//! RTF, forms, database importers) consume.
//!
//! ## How it works
//!
//! 1. Build a [`GenerationRequest`] from a [`TestDefinition`], optionally with
//!    an RNG seed.
//! 2. Call [`generate_test`] — for every section the engine draws each
//!    student's items from the least-used part of the pool, always includes
//!    required items, shuffles multiple-choice options, and re-derives the
//!    correct letter against the new order.
//! 3. The returned [`GeneratedTest`] holds every section's variants, one
//!    bundle per student, and produces answer keys with consistent question
//!    numbering.
//!
//! ## Key features
//!
//! - **Balanced**: across a run, usage counts of non-required items differ by
//!   at most one.
//! - **Deterministic**: `rng_seed: Some(u64)` reproduces the exact same
//!   variants every time; the generator is threaded explicitly through every
//!   call, never shared process-wide.
//! - **Eight section kinds**: multiple-choice, reading-comprehension,
//!   word-problem, quiz, comprehension-questions, custom, word-match, and
//!   passage-completion.
//!
//! ## Quick start
//!
//! ```rust
//! use exam_variant_gen::{generate_test, GenerationRequest, TestDefinition};
//!
//! let definition = TestDefinition::from_json_str(r#"{
//!     "title": "Unit 3",
//!     "students": ["Ada", "Grace"],
//!     "sections": [{
//!         "type": "multiple-choice",
//!         "sectionTitle": "Arithmetic",
//!         "points": 10,
//!         "questionsOntest": 2,
//!         "questions": [
//!             {"question": "2+2?", "choices": ["3", "4", "5"], "answer": 2},
//!             {"question": "3+3?", "choices": ["6", "7"], "answer": 1},
//!             {"question": "4+4?", "choices": ["9", "8"], "answer": 2}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let test = generate_test(GenerationRequest::new(definition).with_seed(42)).unwrap();
//! for bundle in &test.bundles {
//!     for entry in test.answer_keys(bundle.student_num) {
//!         println!("{}: {} {:?}", bundle.student, entry.section_title, entry.key);
//!     }
//! }
//! ```

pub mod variant_engine;

// Convenience re-exports so callers can use `exam_variant_gen::generate_test`
// directly without reaching into `variant_engine::`.
pub use variant_engine::{
    generate_test, AnswerKey, AnswerKeyEntry, AssembledQuestion, ChoiceAnswer, EngineError,
    GeneratedTest, GenerationRequest, PassageVariant, Question, QuestionNumbering,
    QuestionVariant, Section, SectionDefinition, SectionHeader, SectionKind, TestBundle,
    TestDefinition, TestHeader, UsageBar, WordMatchRow, WordMatchVariant,
};
