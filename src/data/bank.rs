use std::fmt;

use crate::models::QuestionRecord;

/// Read-only, ordered question list. Built once at startup, never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

/// Index outside `[0, len)`. A caller bug, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "question index {} out of range (bank holds {})",
            self.index, self.len
        )
    }
}

impl std::error::Error for OutOfRange {}

impl QuestionBank {
    /// Wrap an already-validated question list (see `data::loader`).
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    pub fn get(&self, index: usize) -> Result<&QuestionRecord, OutOfRange> {
        self.questions.get(index).ok_or(OutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Choice;

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![QuestionRecord {
            text: "q".to_string(),
            code: None,
            choices: Choice::binary(),
            correct_value: "alive".to_string(),
            explain_good: String::new(),
            explain_bad: String::new(),
        }])
    }

    #[test]
    fn get_within_range() {
        assert!(bank().get(0).is_ok());
    }

    #[test]
    fn get_out_of_range() {
        let err = bank().get(1).unwrap_err();
        assert_eq!(err, OutOfRange { index: 1, len: 1 });
    }
}
