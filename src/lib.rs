//! # lifetime-quiz
//!
//! A terminal quiz on C++ object lifetimes: for each snippet, decide
//! whether the object is still alive ("vivant") or already destroyed
//! ("mort") before the clock runs out.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lifetime_quiz::{Quiz, QuizError, QuizOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // The embedded bank, 60 seconds per question.
//!     let quiz = Quiz::with_default_questions(QuizOptions::default());
//!
//!     // Take over the terminal until the player quits.
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod engine;
mod export;
mod models;
pub mod terminal;
mod timer;
mod ui;

use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;

pub use app::{App, Screen};
pub use data::{
    default_questions, load_questions_from_json, LoadError, OutOfRange, QuestionBank,
};
pub use engine::{EngineError, Phase, QuizEngine};
pub use models::{AnswerRecord, Choice, QuestionRecord, Summary};
pub use timer::{CountdownControl, QuestionTimer, TimerEvent, TimerSignal, TICK_INTERVAL};

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading questions from file.
    Load(LoadError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load questions: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct QuizOptions {
    /// Countdown length for each question.
    pub seconds_per_question: u64,
    /// Directory the results file is written into.
    pub export_dir: PathBuf,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            seconds_per_question: 60,
            export_dir: PathBuf::from("."),
        }
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    timer_rx: mpsc::UnboundedReceiver<TimerSignal>,
}

impl Quiz {
    /// Create a quiz from a validated set of questions.
    pub fn new(questions: Vec<QuestionRecord>, options: QuizOptions) -> Result<Self, QuizError> {
        data::validate_questions(&questions)?;
        let (app, timer_rx) = App::new(
            QuestionBank::new(questions),
            options.seconds_per_question,
            options.export_dir,
        );
        Ok(Self { app, timer_rx })
    }

    /// Create a quiz over the embedded default bank.
    pub fn with_default_questions(options: QuizOptions) -> Self {
        Self::new(default_questions(), options).expect("embedded question bank is valid")
    }

    /// Load a quiz from a JSON question file.
    pub fn from_json<P: AsRef<Path>>(path: P, options: QuizOptions) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Self::new(questions, options)
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal, drives the UI and the countdown, and
    /// returns when the player quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &mut self.timer_rx).await;
        terminal::restore()?;
        result
    }

    /// The underlying app, for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// Single control thread: key events and timer signals are multiplexed
/// here, so engine commands are never issued concurrently and the
/// answered-guard settles any submit/expiry race deterministically.
async fn run_event_loop(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
    timer_rx: &mut mpsc::UnboundedReceiver<TimerSignal>,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_input(app, key.code) {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(QuizError::Io(e)),
                    None => break,
                }
            }
            Some(signal) = timer_rx.recv() => {
                app.handle_timer_signal(signal);
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Start => handle_start_input(app, key),
        Screen::Rules => handle_rules_input(app, key),
        Screen::Countdown => handle_countdown_input(key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Results => handle_results_input(app, key),
    }
}

fn handle_start_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_countdown();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.show_rules();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_rules_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
            app.close_rules();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_countdown_input(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_choice();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_choice();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.confirm();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_results_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.export_results();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
