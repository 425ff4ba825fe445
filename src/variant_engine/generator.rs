use rand::{rngs::StdRng, RngCore, SeedableRng};
use tracing::info;

use crate::variant_engine::{
    answer_key::AnswerKeyEntry,
    error::EngineError,
    models::{SectionDefinition, SectionKind, TestBundle, TestDefinition, TestHeader},
    numbering::QuestionNumbering,
    sections::Section,
};

/// One generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub definition: TestDefinition,
    /// `Some(seed)` reproduces the exact same variants every time.
    pub rng_seed: Option<u64>,
    /// Produce a single variant containing every question and word.
    pub show_all: bool,
    /// Keep question numbers running across sections in answer keys.
    pub continuous_numbering: bool,
}

impl GenerationRequest {
    /// Request with entropy seeding, per-student variants, and per-section
    /// numbering.
    pub fn new(definition: TestDefinition) -> Self {
        GenerationRequest {
            definition,
            rng_seed: None,
            show_all: false,
            continuous_numbering: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Every section's variants plus the per-student bundles that index them.
#[derive(Debug, Clone)]
pub struct GeneratedTest {
    pub run_id: String,
    pub header: TestHeader,
    pub sections: Vec<Section>,
    pub bundles: Vec<TestBundle>,
    pub continuous_numbering: bool,
}

impl GeneratedTest {
    /// A fresh sequencer configured for this test.
    pub fn numbering(&self) -> QuestionNumbering {
        QuestionNumbering::new(self.continuous_numbering)
    }

    /// Answer key for every section of one student's test, numbered the way
    /// the printed test is.
    pub fn answer_keys(&self, student: usize) -> Vec<AnswerKeyEntry> {
        let mut numbering = self.numbering();
        self.sections
            .iter()
            .map(|s| {
                numbering.new_section();
                s.answer_key(student, &mut numbering)
            })
            .collect()
    }
}

fn make_run_id(rng: &mut impl RngCore) -> String {
    format!("EX-{:08X}", rng.next_u32())
}

/// Apply run-level settings to one section before it is built.
///
/// Required questions start above any reachable usage count so they never
/// compete in a least-used tie group. In show-all mode the whole pool is
/// used.
fn prepare_section(
    mut definition: SectionDefinition,
    variant_count: usize,
    show_all: bool,
) -> SectionDefinition {
    if definition.kind.uses_questions() {
        let above_reach = u32::try_from(variant_count).unwrap_or(u32::MAX).saturating_add(1);
        for q in definition.questions.iter_mut().filter(|q| q.required) {
            q.used = above_reach;
        }
    }

    if show_all {
        definition.num_quest = match definition.kind {
            SectionKind::WordMatch => definition.words.len(),
            _ => definition.questions.len(),
        } as u32;
    }
    definition
}

/// Single entry point: build every section of a test for every student.
pub fn generate_test(request: GenerationRequest) -> Result<GeneratedTest, EngineError> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    let run_id = make_run_id(&mut rng);

    let definition = request.definition;
    let variant_count = if request.show_all { 1 } else { definition.students.len() };
    info!(%run_id, title = %definition.title, variants = variant_count, sections = definition.sections.len(), "generating test");

    let sections = definition
        .sections
        .into_iter()
        .map(|def| {
            let def = prepare_section(def, variant_count, request.show_all);
            Section::init(def, variant_count, &mut rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let header = TestHeader {
        subject: definition.subject,
        grade: definition.grade,
        school: definition.school,
        title: definition.title,
        rtf_title: definition.rtf_title,
        logo: definition.logo,
        date: definition.date,
        time: definition.time,
        points: sections.iter().map(|s| s.header().points).sum(),
        quiz: sections.iter().any(|s| s.header().quiz),
        no_key: definition.no_key,
    };

    // Show-all builds a single master copy, so it gets a single bundle.
    let bundles = if request.show_all {
        let student = definition.students.into_iter().next().unwrap_or_default();
        vec![TestBundle { student, student_num: 0 }]
    } else {
        definition
            .students
            .into_iter()
            .enumerate()
            .map(|(student_num, student)| TestBundle { student, student_num })
            .collect()
    };

    Ok(GeneratedTest {
        run_id,
        header,
        sections,
        bundles,
        continuous_numbering: request.continuous_numbering,
    })
}
