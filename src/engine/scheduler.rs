use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);
/// How long feedback stays on screen before the next question.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);
/// Debounce after a new question appears, against double submission.
pub const INPUT_UNLOCK_DELAY: Duration = Duration::from_millis(300);
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Countdown,
    Advance,
    Unlock,
    ClearStatus,
}

/// Deadline table for the quiz's delayed transitions. Each kind holds at most
/// one deadline, so scheduling a kind always cancels its previous instance.
/// Time is passed in explicitly; nothing here reads the clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    deadlines: HashMap<TimerKind, Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) {
        self.deadlines.insert(kind, now + delay);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.deadlines.remove(&kind);
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.deadlines.get(&kind).copied()
    }

    pub fn has_pending(&self) -> bool {
        !self.deadlines.is_empty()
    }

    /// Remove and return every kind whose deadline has passed, earliest first,
    /// together with the deadline it was due at.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerKind, Instant)> {
        let mut due: Vec<(Instant, TimerKind)> = self
            .deadlines
            .iter()
            .filter(|&(_, at)| *at <= now)
            .map(|(&kind, &at)| (at, kind))
            .collect();
        due.sort_by_key(|&(at, kind)| (at, kind_rank(kind)));

        for (_, kind) in &due {
            self.deadlines.remove(kind);
        }
        due.into_iter().map(|(at, kind)| (kind, at)).collect()
    }
}

// Tie-break for equal deadlines: resolve the running question before
// moving to the next one.
fn kind_rank(kind: TimerKind) -> u8 {
    match kind {
        TimerKind::Countdown => 0,
        TimerKind::Advance => 1,
        TimerKind::Unlock => 2,
        TimerKind::ClearStatus => 3,
    }
}
