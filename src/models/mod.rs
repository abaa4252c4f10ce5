mod answer;
mod question;

pub use answer::{AnswerRecord, Summary};
pub use question::{Choice, QuestionRecord};
