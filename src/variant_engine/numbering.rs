use std::ops::RangeInclusive;

/// Running question number shared by every section of one rendered test.
///
/// With continuous numbering the count carries across sections; otherwise
/// `new_section()` starts each section back at zero. Renderers read and
/// advance the number only through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionNumbering {
    number: u32,
    reset_each_section: bool,
}

impl QuestionNumbering {
    pub fn new(continuous_numbering: bool) -> Self {
        QuestionNumbering {
            number: 0,
            reset_each_section: !continuous_numbering,
        }
    }

    pub fn advance(&mut self, by: u32) {
        self.number += by;
    }

    /// Step to and return the next question number.
    pub fn next(&mut self) -> u32 {
        self.number += 1;
        self.number
    }

    pub fn current(&self) -> u32 {
        self.number
    }

    /// Section boundary; resets to 0 only when numbering is per-section.
    pub fn new_section(&mut self) {
        if self.reset_each_section {
            self.number = 0;
        }
    }

    /// Claim the numbers for `count` questions and advance past them.
    pub fn reserve(&mut self, count: u32) -> RangeInclusive<u32> {
        let range = (self.number + 1)..=(self.number + count);
        self.advance(count);
        range
    }
}
