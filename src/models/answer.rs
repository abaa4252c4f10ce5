use serde::Serialize;

use super::QuestionRecord;

/// Graded outcome of one question, appended to the session log.
///
/// Both explanation strings are kept so the results screen and the
/// exporter can pick the right one later without the question bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question_text: String,
    /// `None` means the timer expired before any choice was made.
    pub chosen_value: Option<String>,
    pub correct_value: String,
    pub explain_good: String,
    pub explain_bad: String,
}

impl AnswerRecord {
    /// Grade `chosen` against `question` and snapshot everything needed
    /// for later display.
    pub fn grade(question: &QuestionRecord, chosen: Option<&str>) -> Self {
        Self {
            question_text: question.text.clone(),
            chosen_value: chosen.map(str::to_string),
            correct_value: question.correct_value.clone(),
            explain_good: question.explain_good.clone(),
            explain_bad: question.explain_bad.clone(),
        }
    }

    /// A timeout (`chosen_value == None`) never matches the correct value.
    pub fn is_correct(&self) -> bool {
        self.chosen_value.as_deref() == Some(self.correct_value.as_str())
    }

    /// The explanation matching the outcome.
    pub fn explanation(&self) -> &str {
        if self.is_correct() {
            &self.explain_good
        } else {
            &self.explain_bad
        }
    }
}

/// Final results of a finished session.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub score: usize,
    pub total_questions: usize,
    pub answers: Vec<AnswerRecord>,
    pub seconds_per_question: u64,
}
