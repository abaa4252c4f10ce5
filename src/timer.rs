//! Per-question countdown.
//!
//! The timer runs on a spawned tokio task and reports back over a
//! channel, so ticks and expiry are consumed by the same event loop
//! that handles keyboard input. Every `start` or `cancel` bumps a
//! generation counter; consumers drop any signal whose generation is
//! no longer current, so a superseded countdown can never leak a late
//! tick or expiry into the next question.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Fixed tick cadence, independent of the countdown duration.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// The seam the engine drives the timer through. Tests substitute a
/// recording implementation.
pub trait CountdownControl {
    /// Begin a new countdown, superseding any running one.
    fn start(&mut self, seconds: u64);
    /// Stop the current countdown. Idempotent.
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    /// Periodic progress update. `fraction_remaining` is clamped to
    /// [0, 1]; `seconds_remaining` rounds up so the display reads "1s"
    /// until the countdown actually reaches zero.
    Tick {
        fraction_remaining: f64,
        seconds_remaining: u64,
    },
    /// Fired exactly once per countdown, after which the task stops.
    Expired,
}

/// A timer event tagged with the countdown it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSignal {
    pub generation: u64,
    pub event: TimerEvent,
}

/// Cancellable countdown producing [`TimerSignal`]s on its channel.
pub struct QuestionTimer {
    generation: u64,
    task: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<TimerSignal>,
}

impl QuestionTimer {
    /// Create a timer and the receiving end of its signal channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                generation: 0,
                task: None,
                tx,
            },
            rx,
        )
    }

    /// Whether a signal from `generation` belongs to the countdown
    /// that is currently running.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl CountdownControl for QuestionTimer {
    fn start(&mut self, seconds: u64) {
        self.stop_task();
        self.generation += 1;

        let generation = self.generation;
        let duration = Duration::from_secs(seconds);
        let tx = self.tx.clone();

        self.task = Some(tokio::spawn(async move {
            let started = Instant::now();
            let mut interval = time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let event = match countdown(started.elapsed(), duration) {
                    Countdown::Running {
                        fraction_remaining,
                        seconds_remaining,
                    } => TimerEvent::Tick {
                        fraction_remaining,
                        seconds_remaining,
                    },
                    Countdown::Expired => TimerEvent::Expired,
                };

                let expired = event == TimerEvent::Expired;
                if tx.send(TimerSignal { generation, event }).is_err() || expired {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        self.stop_task();
        self.generation += 1;
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.stop_task();
    }
}

/// Progress of a countdown at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Countdown {
    Running {
        fraction_remaining: f64,
        seconds_remaining: u64,
    },
    Expired,
}

/// Tick math, kept pure so it can be tested without a runtime. A zero
/// duration expires on the first tick rather than erroring.
fn countdown(elapsed: Duration, total: Duration) -> Countdown {
    if elapsed >= total {
        return Countdown::Expired;
    }

    let remaining = total - elapsed;
    Countdown::Running {
        fraction_remaining: (remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0),
        seconds_remaining: remaining.as_secs_f64().ceil() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn fresh_countdown_is_full() {
        let state = countdown(millis(0), millis(60_000));
        assert_eq!(
            state,
            Countdown::Running {
                fraction_remaining: 1.0,
                seconds_remaining: 60,
            }
        );
    }

    #[test]
    fn seconds_remaining_round_up() {
        // 400ms left out of 60s still reads as "1s".
        let state = countdown(millis(59_600), millis(60_000));
        match state {
            Countdown::Running {
                seconds_remaining, ..
            } => assert_eq!(seconds_remaining, 1),
            Countdown::Expired => panic!("should still be running"),
        }
    }

    #[test]
    fn expires_at_and_past_the_duration() {
        assert_eq!(countdown(millis(60_000), millis(60_000)), Countdown::Expired);
        assert_eq!(countdown(millis(61_000), millis(60_000)), Countdown::Expired);
    }

    #[test]
    fn zero_duration_expires_immediately() {
        assert_eq!(countdown(millis(0), millis(0)), Countdown::Expired);
    }

    async fn drain_one_countdown(
        rx: &mut mpsc::UnboundedReceiver<TimerSignal>,
        generation: u64,
    ) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Some(signal) = rx.recv().await {
            if signal.generation != generation {
                continue;
            }
            let expired = signal.event == TimerEvent::Expired;
            events.push(signal.event);
            if expired {
                break;
            }
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn one_second_countdown_ticks_five_times() {
        let (mut timer, mut rx) = QuestionTimer::new();
        timer.start(1);

        let events = drain_one_countdown(&mut rx, 1).await;
        let ticks = events
            .iter()
            .filter(|e| matches!(e, TimerEvent::Tick { .. }))
            .count();

        // 1s at 200ms cadence: ticks at 0.0..=0.8, expiry at 1.0.
        assert_eq!(ticks, 5);
        assert_eq!(events.last(), Some(&TimerEvent::Expired));
    }

    #[tokio::test(start_paused = true)]
    async fn fraction_is_monotonically_non_increasing() {
        let (mut timer, mut rx) = QuestionTimer::new();
        timer.start(2);

        let events = drain_one_countdown(&mut rx, 1).await;
        let fractions: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Tick {
                    fraction_remaining, ..
                } => Some(*fraction_remaining),
                TimerEvent::Expired => None,
            })
            .collect();

        assert!(!fractions.is_empty());
        assert!(fractions.windows(2).all(|w| w[1] <= w[0]));
        assert!(fractions.iter().all(|f| (0.0..=1.0).contains(f)));
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_fires_exactly_once() {
        let (mut timer, mut rx) = QuestionTimer::new();
        timer.start(0);

        let events = drain_one_countdown(&mut rx, 1).await;
        assert_eq!(events, vec![TimerEvent::Expired]);

        // Task has stopped; nothing further arrives.
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_supersedes_previous_countdown() {
        let (mut timer, mut rx) = QuestionTimer::new();
        timer.start(30);

        // Let the first countdown produce at least one tick.
        let first = rx.recv().await.unwrap();
        assert!(timer.is_current(first.generation));

        timer.start(1);
        assert!(!timer.is_current(first.generation));

        // Everything still flowing for generation 2 is valid up to its
        // expiry; generation 1 signals are stale.
        let events = drain_one_countdown(&mut rx, 2).await;
        assert_eq!(events.last(), Some(&TimerEvent::Expired));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_invalidates_pending_signals() {
        let (mut timer, mut rx) = QuestionTimer::new();
        timer.start(10);

        let signal = rx.recv().await.unwrap();
        assert!(timer.is_current(signal.generation));

        timer.cancel();
        timer.cancel(); // idempotent

        while let Ok(stale) = rx.try_recv() {
            assert!(!timer.is_current(stale.generation));
        }
    }
}
