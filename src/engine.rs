//! Quiz session state machine.
//!
//! The engine owns the question bank, the mutable session state and
//! the countdown timer. It is passive: the presentation layer issues
//! `begin` / `submit_answer` / `advance` commands and reads snapshots
//! back. Every error here is a caller-contract breach, not a runtime
//! condition.

use std::fmt;

use crate::data::QuestionBank;
use crate::models::{AnswerRecord, QuestionRecord, Summary};
use crate::timer::CountdownControl;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `begin()` has not been called yet.
    NotStarted,
    /// A question is on screen, waiting for a choice or a timeout.
    AwaitingAnswer,
    /// The current question has been graded; waiting for `advance()`.
    Answered,
    /// The last question has been graded and advanced past.
    Finished,
}

/// Invalid command for the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `current_question()` outside an in-progress session.
    NoCurrentQuestion,
    /// Second `submit_answer` for the same question. Callers treat
    /// this as a no-op: it is how the manual-answer/expiry race loses.
    AlreadyAnswered,
    /// `advance()` before the current question was graded.
    NotYetAnswered,
    /// `summary()` before the session finished.
    QuizNotFinished,
    /// `begin()` while a session is in progress.
    QuizAlreadyRunning,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoCurrentQuestion => write!(f, "no question is currently active"),
            EngineError::AlreadyAnswered => write!(f, "current question was already answered"),
            EngineError::NotYetAnswered => write!(f, "current question has not been answered"),
            EngineError::QuizNotFinished => write!(f, "quiz has not finished"),
            EngineError::QuizAlreadyRunning => write!(f, "quiz is already running"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Mutable progress of one quiz attempt. Owned exclusively by the
/// engine; the answered-guard lives in [`Phase`].
#[derive(Debug)]
struct SessionState {
    current_index: usize,
    score: usize,
    answers: Vec<AnswerRecord>,
    seconds_per_question: u64,
}

impl SessionState {
    fn new(seconds_per_question: u64) -> Self {
        Self {
            current_index: 0,
            score: 0,
            answers: Vec::new(),
            seconds_per_question,
        }
    }

    fn reset(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.answers.clear();
    }
}

/// The quiz state machine.
pub struct QuizEngine<T: CountdownControl> {
    bank: QuestionBank,
    session: SessionState,
    phase: Phase,
    timer: T,
}

impl<T: CountdownControl> QuizEngine<T> {
    /// Build an engine over a non-empty bank. The timer is started and
    /// cancelled by the engine as questions come and go.
    pub fn new(bank: QuestionBank, seconds_per_question: u64, timer: T) -> Self {
        debug_assert!(!bank.is_empty());
        Self {
            bank,
            session: SessionState::new(seconds_per_question),
            phase: Phase::NotStarted,
            timer,
        }
    }

    /// Start a fresh session. Valid from `NotStarted` or, for a
    /// restart, `Finished`; prior score and log are discarded.
    pub fn begin(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::NotStarted | Phase::Finished => {
                self.session.reset();
                self.phase = Phase::AwaitingAnswer;
                self.timer.start(self.session.seconds_per_question);
                Ok(())
            }
            Phase::AwaitingAnswer | Phase::Answered => Err(EngineError::QuizAlreadyRunning),
        }
    }

    /// Grade the current question. `None` means the timer expired
    /// without a choice and always grades as incorrect.
    ///
    /// Only the first submission per question counts: a manual choice
    /// and a timer expiry may both reach this method, and whichever
    /// arrives second gets `AlreadyAnswered`.
    pub fn submit_answer(&mut self, chosen: Option<&str>) -> Result<&AnswerRecord, EngineError> {
        match self.phase {
            Phase::AwaitingAnswer => {}
            Phase::Answered => return Err(EngineError::AlreadyAnswered),
            Phase::NotStarted | Phase::Finished => return Err(EngineError::NoCurrentQuestion),
        }

        self.timer.cancel();

        let question = self.current_question()?;
        let record = AnswerRecord::grade(question, chosen);
        if record.is_correct() {
            self.session.score += 1;
        }

        let index = self.session.answers.len();
        self.session.answers.push(record);
        self.phase = Phase::Answered;

        Ok(&self.session.answers[index])
    }

    /// Move past a graded question: to the next one, or to `Finished`
    /// after the last.
    pub fn advance(&mut self) -> Result<Phase, EngineError> {
        match self.phase {
            Phase::Answered => {}
            Phase::AwaitingAnswer => return Err(EngineError::NotYetAnswered),
            Phase::NotStarted | Phase::Finished => return Err(EngineError::NoCurrentQuestion),
        }

        if self.session.current_index + 1 >= self.bank.len() {
            self.phase = Phase::Finished;
        } else {
            self.session.current_index += 1;
            self.phase = Phase::AwaitingAnswer;
            self.timer.start(self.session.seconds_per_question);
        }

        Ok(self.phase)
    }

    /// The question currently on screen.
    pub fn current_question(&self) -> Result<&QuestionRecord, EngineError> {
        match self.phase {
            Phase::AwaitingAnswer | Phase::Answered => self
                .bank
                .get(self.session.current_index)
                .map_err(|_| EngineError::NoCurrentQuestion),
            Phase::NotStarted | Phase::Finished => Err(EngineError::NoCurrentQuestion),
        }
    }

    /// Latest graded answer, if any.
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.session.answers.last()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.session.score
    }

    /// 0-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    pub fn seconds_per_question(&self) -> u64 {
        self.session.seconds_per_question
    }

    /// Whether the current question is the last one.
    pub fn on_last_question(&self) -> bool {
        self.session.current_index + 1 == self.bank.len()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Final results. Only available once the session is `Finished`.
    pub fn summary(&self) -> Result<Summary, EngineError> {
        if self.phase != Phase::Finished {
            return Err(EngineError::QuizNotFinished);
        }

        Ok(Summary {
            score: self.session.score,
            total_questions: self.bank.len(),
            answers: self.session.answers.clone(),
            seconds_per_question: self.session.seconds_per_question,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Choice, QuestionRecord};

    /// Records timer commands instead of scheduling anything.
    #[derive(Default)]
    struct RecordingTimer {
        starts: Vec<u64>,
        cancels: usize,
    }

    impl CountdownControl for RecordingTimer {
        fn start(&mut self, seconds: u64) {
            self.starts.push(seconds);
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }
    }

    fn question(text: &str, correct: &str) -> QuestionRecord {
        QuestionRecord {
            text: text.to_string(),
            code: None,
            choices: Choice::binary(),
            correct_value: correct.to_string(),
            explain_good: format!("{} good", text),
            explain_bad: format!("{} bad", text),
        }
    }

    fn two_question_engine() -> QuizEngine<RecordingTimer> {
        let bank = QuestionBank::new(vec![question("q1", "alive"), question("q2", "dead")]);
        QuizEngine::new(bank, 60, RecordingTimer::default())
    }

    #[test]
    fn begin_enters_first_question_with_empty_log() {
        let mut engine = two_question_engine();
        assert_eq!(engine.phase(), Phase::NotStarted);
        assert!(engine.current_question().is_err());

        engine.begin().unwrap();

        assert_eq!(engine.phase(), Phase::AwaitingAnswer);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.score(), 0);
        assert!(engine.last_answer().is_none());
        assert_eq!(engine.timer().starts, vec![60]);
    }

    #[test]
    fn begin_while_running_is_rejected() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();
        assert_eq!(engine.begin(), Err(EngineError::QuizAlreadyRunning));

        engine.submit_answer(Some("alive")).unwrap();
        assert_eq!(engine.begin(), Err(EngineError::QuizAlreadyRunning));
    }

    #[test]
    fn correct_answer_scores_and_cancels_timer() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();

        let record = engine.submit_answer(Some("alive")).unwrap();
        assert!(record.is_correct());
        assert_eq!(record.explanation(), "q1 good");
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.phase(), Phase::Answered);
        assert_eq!(engine.timer().cancels, 1);
    }

    #[test]
    fn wrong_answer_keeps_both_explanations() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();

        let record = engine.submit_answer(Some("dead")).unwrap();
        assert!(!record.is_correct());
        assert_eq!(record.explanation(), "q1 bad");
        assert_eq!(record.explain_good, "q1 good");
        assert_eq!(record.explain_bad, "q1 bad");
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn timeout_grades_incorrect_with_null_choice() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();

        let record = engine.submit_answer(None).unwrap();
        assert!(record.chosen_value.is_none());
        assert!(!record.is_correct());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn second_submission_loses_the_race() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();

        engine.submit_answer(Some("alive")).unwrap();
        // A late expiry lands after the manual answer.
        assert_eq!(engine.submit_answer(None), Err(EngineError::AlreadyAnswered));

        assert_eq!(engine.score(), 1);
        assert_eq!(engine.current_index(), 0);
        // Log unchanged: still one record, the manual one.
        let last = engine.last_answer().unwrap();
        assert_eq!(last.chosen_value.as_deref(), Some("alive"));
    }

    #[test]
    fn advance_requires_a_graded_answer() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();
        assert_eq!(engine.advance(), Err(EngineError::NotYetAnswered));
    }

    #[test]
    fn advance_restarts_timer_for_next_question() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();
        engine.submit_answer(Some("alive")).unwrap();

        assert_eq!(engine.advance(), Ok(Phase::AwaitingAnswer));
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.timer().starts, vec![60, 60]);
        assert!(engine.on_last_question());
    }

    #[test]
    fn advancing_past_last_question_finishes() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();
        engine.submit_answer(Some("alive")).unwrap();
        engine.advance().unwrap();
        engine.submit_answer(Some("dead")).unwrap();

        assert_eq!(engine.advance(), Ok(Phase::Finished));
        assert!(engine.current_question().is_err());
        // No timer start for a question that does not exist.
        assert_eq!(engine.timer().starts, vec![60, 60]);
    }

    #[test]
    fn full_run_scenario_with_one_timeout() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();

        engine.submit_answer(Some("alive")).unwrap();
        assert_eq!(engine.score(), 1);
        engine.advance().unwrap();

        engine.submit_answer(None).unwrap();
        assert_eq!(engine.score(), 1);
        engine.advance().unwrap();

        let summary = engine.summary().unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.total_questions, 2);
        assert_eq!(summary.answers.len(), 2);
        assert_eq!(summary.answers[0].chosen_value.as_deref(), Some("alive"));
        assert_eq!(summary.answers[0].correct_value, "alive");
        assert!(summary.answers[1].chosen_value.is_none());
        assert_eq!(summary.answers[1].correct_value, "dead");
        assert_eq!(summary.seconds_per_question, 60);
    }

    #[test]
    fn summary_before_finish_is_rejected() {
        let mut engine = two_question_engine();
        assert_eq!(engine.summary().unwrap_err(), EngineError::QuizNotFinished);
        engine.begin().unwrap();
        assert_eq!(engine.summary().unwrap_err(), EngineError::QuizNotFinished);
    }

    #[test]
    fn restart_after_finish_resets_everything() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();
        engine.submit_answer(Some("alive")).unwrap();
        engine.advance().unwrap();
        engine.submit_answer(Some("dead")).unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.score(), 2);

        engine.begin().unwrap();
        assert_eq!(engine.phase(), Phase::AwaitingAnswer);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.score(), 0);
        assert!(engine.last_answer().is_none());
    }

    #[test]
    fn score_never_exceeds_question_count() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();

        loop {
            assert!(engine.score() <= engine.total_questions());
            engine.submit_answer(Some("alive")).unwrap();
            assert!(engine.score() <= engine.total_questions());
            if engine.advance().unwrap() == Phase::Finished {
                break;
            }
        }

        let summary = engine.summary().unwrap();
        assert!(summary.score <= summary.total_questions);
    }

    #[test]
    fn log_length_tracks_graded_questions() {
        let mut engine = two_question_engine();
        engine.begin().unwrap();

        engine.submit_answer(Some("alive")).unwrap();
        assert_eq!(engine.current_index() + 1, 1);
        engine.advance().unwrap();
        engine.submit_answer(None).unwrap();

        let summary_len = {
            engine.advance().unwrap();
            engine.summary().unwrap().answers.len()
        };
        assert_eq!(summary_len, 2);
    }
}
