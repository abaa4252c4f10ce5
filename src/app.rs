use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::data::QuestionBank;
use crate::engine::{Phase, QuizEngine};
use crate::export;
use crate::models::{QuestionRecord, Summary};
use crate::timer::{CountdownControl, QuestionTimer, TimerEvent, TimerSignal};

/// Length of the 3..2..1 countdown shown before the first question.
const COUNTDOWN_SECONDS: u64 = 3;

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Rules,
    Countdown,
    Quiz,
    Results,
}

/// Outcome of the question just graded, shown until the player moves on.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub is_correct: bool,
    pub timed_out: bool,
    pub explanation: String,
}

/// Presentation state. Holds the engine and translates key presses and
/// timer signals into engine commands; the `ui` modules only read from
/// here.
pub struct App {
    pub screen: Screen,
    engine: QuizEngine<QuestionTimer>,
    countdown_step: u64,
    time_fraction: f64,
    time_seconds: u64,
    selected_choice: usize,
    feedback: Option<Feedback>,
    results: Option<Summary>,
    results_scroll: usize,
    export_dir: PathBuf,
    export_notice: Option<String>,
}

impl App {
    /// Build the app and hand back the timer signal receiver for the
    /// event loop to poll.
    pub fn new(
        bank: QuestionBank,
        seconds_per_question: u64,
        export_dir: PathBuf,
    ) -> (Self, mpsc::UnboundedReceiver<TimerSignal>) {
        let (timer, timer_rx) = QuestionTimer::new();
        let time_seconds = seconds_per_question;
        let app = Self {
            screen: Screen::Start,
            engine: QuizEngine::new(bank, seconds_per_question, timer),
            countdown_step: COUNTDOWN_SECONDS,
            time_fraction: 1.0,
            time_seconds,
            selected_choice: 0,
            feedback: None,
            results: None,
            results_scroll: 0,
            export_dir,
            export_notice: None,
        };
        (app, timer_rx)
    }

    // --- commands -------------------------------------------------------

    /// Leave the start screen and run the pre-quiz countdown.
    pub fn start_countdown(&mut self) {
        self.screen = Screen::Countdown;
        self.countdown_step = COUNTDOWN_SECONDS;
        self.engine.timer_mut().start(COUNTDOWN_SECONDS);
    }

    pub fn show_rules(&mut self) {
        self.screen = Screen::Rules;
    }

    pub fn close_rules(&mut self) {
        self.screen = Screen::Start;
    }

    fn begin_quiz(&mut self) {
        if self.engine.begin().is_err() {
            // Countdown only runs from Start or Results, where the
            // engine is NotStarted or Finished.
            return;
        }
        self.screen = Screen::Quiz;
        self.selected_choice = 0;
        self.feedback = None;
        self.results = None;
        self.results_scroll = 0;
        self.export_notice = None;
        self.time_fraction = 1.0;
        self.time_seconds = self.engine.seconds_per_question();
    }

    /// ENTER on the quiz screen: submit while a question is open,
    /// advance once feedback is showing.
    pub fn confirm(&mut self) {
        if self.feedback.is_none() {
            self.submit_selected_choice();
        } else {
            self.advance();
        }
    }

    fn submit_selected_choice(&mut self) {
        let Ok(question) = self.engine.current_question() else {
            return;
        };
        let Some(choice) = question.choices.get(self.selected_choice) else {
            return;
        };
        let chosen = choice.value.clone();
        self.submit(Some(&chosen));
    }

    /// Funnel for both answer paths. A second submission for the same
    /// question (the manual-answer/expiry race) is silently dropped.
    fn submit(&mut self, chosen: Option<&str>) {
        match self.engine.submit_answer(chosen) {
            Ok(record) => {
                self.feedback = Some(Feedback {
                    is_correct: record.is_correct(),
                    timed_out: record.chosen_value.is_none(),
                    explanation: record.explanation().to_string(),
                });
            }
            // AlreadyAnswered: the other submission path won the race.
            Err(_) => {}
        }
    }

    fn advance(&mut self) {
        match self.engine.advance() {
            Ok(Phase::Finished) => {
                self.results = self.engine.summary().ok();
                self.screen = Screen::Results;
            }
            Ok(_) => {
                self.selected_choice = 0;
                self.feedback = None;
                self.time_fraction = 1.0;
                self.time_seconds = self.engine.seconds_per_question();
            }
            Err(_) => {}
        }
    }

    /// Route a timer signal, discarding anything from a superseded
    /// countdown.
    pub fn handle_timer_signal(&mut self, signal: TimerSignal) {
        if !self.engine.timer().is_current(signal.generation) {
            return;
        }

        match (self.screen, signal.event) {
            (
                Screen::Countdown,
                TimerEvent::Tick {
                    seconds_remaining, ..
                },
            ) => {
                self.countdown_step = seconds_remaining;
            }
            (Screen::Countdown, TimerEvent::Expired) => {
                self.begin_quiz();
            }
            (
                Screen::Quiz,
                TimerEvent::Tick {
                    fraction_remaining,
                    seconds_remaining,
                },
            ) => {
                self.time_fraction = fraction_remaining;
                self.time_seconds = seconds_remaining;
            }
            (Screen::Quiz, TimerEvent::Expired) => {
                self.time_fraction = 0.0;
                self.time_seconds = 0;
                self.submit(None);
            }
            _ => {}
        }
    }

    pub fn select_next_choice(&mut self) {
        if self.feedback.is_some() {
            return;
        }
        if let Ok(question) = self.engine.current_question() {
            self.selected_choice = (self.selected_choice + 1) % question.choices.len();
        }
    }

    pub fn select_previous_choice(&mut self) {
        if self.feedback.is_some() {
            return;
        }
        if let Ok(question) = self.engine.current_question() {
            let n = question.choices.len();
            self.selected_choice = (self.selected_choice + n - 1) % n;
        }
    }

    /// Back to the start screen; the next countdown restarts the engine.
    pub fn restart(&mut self) {
        self.screen = Screen::Start;
        self.results = None;
        self.results_scroll = 0;
        self.export_notice = None;
    }

    pub fn scroll_results_down(&mut self) {
        if let Some(results) = &self.results {
            let max_scroll = results.answers.len().saturating_sub(1);
            self.results_scroll = (self.results_scroll + 1).min(max_scroll);
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    /// Write the results file and keep a notice for the results screen.
    pub fn export_results(&mut self) {
        let Some(results) = &self.results else {
            return;
        };
        self.export_notice = Some(match export::write_results(results, &self.export_dir) {
            Ok(path) => format!("Résultats enregistrés : {}", path.display()),
            Err(e) => format!("Échec de l'export : {}", e),
        });
    }

    // --- snapshots for rendering ---------------------------------------

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.engine.current_question().ok()
    }

    /// 1-based number of the question on screen.
    pub fn question_number(&self) -> usize {
        self.engine.current_index() + 1
    }

    pub fn total_questions(&self) -> usize {
        self.engine.total_questions()
    }

    pub fn seconds_per_question(&self) -> u64 {
        self.engine.seconds_per_question()
    }

    pub fn score(&self) -> usize {
        self.engine.score()
    }

    pub fn selected_choice(&self) -> usize {
        self.selected_choice
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn on_last_question(&self) -> bool {
        self.engine.on_last_question()
    }

    pub fn countdown_step(&self) -> u64 {
        self.countdown_step
    }

    pub fn time_fraction(&self) -> f64 {
        self.time_fraction
    }

    pub fn time_seconds(&self) -> u64 {
        self.time_seconds
    }

    pub fn results(&self) -> Option<&Summary> {
        self.results.as_ref()
    }

    pub fn results_scroll(&self) -> usize {
        self.results_scroll
    }

    pub fn export_notice(&self) -> Option<&str> {
        self.export_notice.as_deref()
    }
}
