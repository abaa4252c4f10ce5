//! Results export.
//!
//! Serializes a finished session to a pretty-printed JSON file, the
//! way the web version offered its results download.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Summary;

/// File name used inside the export directory.
pub const EXPORT_FILE_NAME: &str = "lifetime_quiz_results.json";

#[derive(Debug, Serialize)]
struct ExportedResults<'a> {
    session_id: Uuid,
    score: usize,
    total_questions: usize,
    answers: Vec<ExportedAnswer<'a>>,
    seconds_per_question: u64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ExportedAnswer<'a> {
    question_text: &'a str,
    chosen_value: Option<&'a str>,
    correct_value: &'a str,
    /// The outcome-matching explanation only; the full record keeps both.
    explanation: &'a str,
}

fn exported<'a>(summary: &'a Summary, timestamp: DateTime<Utc>) -> ExportedResults<'a> {
    ExportedResults {
        session_id: Uuid::new_v4(),
        score: summary.score,
        total_questions: summary.total_questions,
        answers: summary
            .answers
            .iter()
            .map(|a| ExportedAnswer {
                question_text: &a.question_text,
                chosen_value: a.chosen_value.as_deref(),
                correct_value: &a.correct_value,
                explanation: a.explanation(),
            })
            .collect(),
        seconds_per_question: summary.seconds_per_question,
        timestamp,
    }
}

/// Write `summary` as JSON into `dir`, returning the file path.
pub fn write_results(summary: &Summary, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    let results = exported(summary, Utc::now());
    let json = serde_json::to_string_pretty(&results).map_err(io::Error::other)?;
    fs::write(&path, json)?;
    Ok(path)
}
