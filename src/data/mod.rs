mod bank;
mod loader;

pub use bank::{OutOfRange, QuestionBank};
pub use loader::{default_questions, load_questions_from_json, LoadError};
pub(crate) use loader::validate_questions;
