use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::models::QuestionRecord;

const DEFAULT_QUESTIONS_JSON: &str = include_str!("default_questions.json");

/// Error loading or validating a question file.
#[derive(Debug)]
pub enum LoadError {
    /// Could not read the file.
    Io(io::Error),
    /// File is not valid question JSON.
    Parse(serde_json::Error),
    /// File parsed but contains no questions.
    Empty,
    /// A question offers fewer than two choices.
    NotEnoughChoices { question: usize },
    /// A question's correct value is not among its choices.
    CorrectValueMissing { question: usize, value: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read question file: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse question file: {}", e),
            LoadError::Empty => write!(f, "question file contains no questions"),
            LoadError::NotEnoughChoices { question } => {
                write!(f, "question {} has fewer than two choices", question + 1)
            }
            LoadError::CorrectValueMissing { question, value } => write!(
                f,
                "question {}: correct value {:?} is not one of its choices",
                question + 1,
                value
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load and validate questions from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionRecord>, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_questions(&content)
}

/// The embedded default bank: five C++ object-lifetime questions.
pub fn default_questions() -> Vec<QuestionRecord> {
    parse_questions(DEFAULT_QUESTIONS_JSON).expect("embedded question bank is valid")
}

fn parse_questions(json: &str) -> Result<Vec<QuestionRecord>, LoadError> {
    let questions: Vec<QuestionRecord> = serde_json::from_str(json)?;
    validate_questions(&questions)?;
    Ok(questions)
}

pub(crate) fn validate_questions(questions: &[QuestionRecord]) -> Result<(), LoadError> {
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }

    for (i, q) in questions.iter().enumerate() {
        if q.choices.len() < 2 {
            return Err(LoadError::NotEnoughChoices { question: i });
        }
        if !q.choices.iter().any(|c| c.value == q.correct_value) {
            return Err(LoadError::CorrectValueMissing {
                question: i,
                value: q.correct_value.clone(),
            });
        }
    }

    Ok(())
}
