use rand::Rng;
use tracing::debug;

use crate::variant_engine::{
    answer_key::AnswerKey,
    models::{PassageVariant, SectionDefinition, SectionHeader},
    numbering::QuestionNumbering,
    shuffle::{answer_letter, permutation},
};

/// Passage-completion section: every variant prints the whole word list in
/// its own order, one blank per word.
#[derive(Debug, Clone)]
pub struct PassageSection {
    pub header: SectionHeader,
    /// The word list in blank order.
    pub word_list: Vec<String>,
    pub variants: Vec<PassageVariant>,
}

impl PassageSection {
    pub fn init<R: Rng>(definition: SectionDefinition, variant_count: usize, rng: &mut R) -> Self {
        let header = SectionHeader::from(&definition);
        let word_list = definition.word_list;

        let variants = (0..variant_count)
            .map(|v| {
                let variant = permute(&word_list, rng);
                debug!(variant = v, words = variant.words.len(), "assembled passage variant");
                variant
            })
            .collect();

        PassageSection { header, word_list, variants }
    }

    pub fn variant(&self, student: usize) -> Option<&PassageVariant> {
        self.variants.get(student)
    }

    pub fn item_count(&self, student: usize) -> usize {
        self.variant(student).map_or(0, |v| v.words.len())
    }

    pub fn answer_key(&self, student: usize, numbering: &mut QuestionNumbering) -> AnswerKey {
        let answers = self.variant(student).map_or(&[][..], |v| &v.answers[..]);
        AnswerKey::letters(answers.len(), answers.concat(), numbering)
    }
}

/// Shuffle the word list; blank `i`'s answer is the letter of the position
/// where word `i` ended up.
fn permute<R: Rng>(word_list: &[String], rng: &mut R) -> PassageVariant {
    let order = permutation(word_list.len(), rng);
    let words = order.iter().map(|&i| word_list[i].clone()).collect();
    let answers = (0..word_list.len())
        .map(|blank| {
            let landed = order.iter().position(|&i| i == blank).unwrap_or(blank);
            answer_letter(landed)
        })
        .collect();
    PassageVariant { words, answers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant_engine::models::SectionKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn definition(words: &[&str]) -> SectionDefinition {
        let mut def = SectionDefinition::new(SectionKind::PassageCompletion);
        def.word_list = words.iter().map(|w| w.to_string()).collect();
        def
    }

    #[test]
    fn each_blank_letter_finds_its_word() {
        let def = definition(&["river", "stone", "bridge", "mill", "ford"]);
        let mut rng = StdRng::seed_from_u64(17);
        let section = PassageSection::init(def, 4, &mut rng);
        assert_eq!(section.variants.len(), 4);
        for v in &section.variants {
            assert_eq!(v.words.len(), 5);
            for (blank, letter) in v.answers.iter().enumerate() {
                let pos = (letter.as_bytes()[0] - b'A') as usize;
                assert_eq!(v.words[pos], section.word_list[blank]);
            }
        }
    }

    #[test]
    fn empty_word_list_gives_empty_variants() {
        let mut rng = StdRng::seed_from_u64(17);
        let section = PassageSection::init(definition(&[]), 2, &mut rng);
        assert!(section.variants.iter().all(|v| v.words.is_empty() && v.answers.is_empty()));
        let mut n = QuestionNumbering::new(true);
        assert_eq!(
            section.answer_key(0, &mut n),
            AnswerKey::Letters { start: 1, end: 0, letters: String::new() }
        );
    }
}
