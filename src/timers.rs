//! Deterministic timer scheduling.
//!
//! The countdown and the shrink effect are both periodic. Instead of two
//! independent runtime intervals, one clock tick advances this scheduler and
//! the reducer applies the resulting firings in order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TimerKind {
    Countdown,
    Shrink,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Timer {
    pub kind: TimerKind,
    pub period_ms: u64,
    pub next_due_ms: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scheduler {
    now_ms: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm `kind` to fire every `period_ms`, first at `now + period_ms`.
    ///
    /// Restarting a running timer keeps its registration slot.
    pub fn start(&mut self, kind: TimerKind, period_ms: u64) {
        let period_ms = period_ms.max(1);
        let next_due_ms = self.now_ms + period_ms;
        match self.timers.iter_mut().find(|timer| timer.kind == kind) {
            Some(timer) => {
                timer.period_ms = period_ms;
                timer.next_due_ms = next_due_ms;
            }
            None => self.timers.push(Timer {
                kind,
                period_ms,
                next_due_ms,
            }),
        }
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|timer| timer.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_running(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|timer| timer.kind == kind)
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Move the clock forward and return every firing in `(now, now + elapsed]`.
    ///
    /// Firings are sorted by due time; equal due times keep registration order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerKind> {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired: Vec<(u64, usize, TimerKind)> = Vec::new();
        for (slot, timer) in self.timers.iter_mut().enumerate() {
            while timer.next_due_ms <= target {
                fired.push((timer.next_due_ms, slot, timer.kind));
                timer.next_due_ms += timer.period_ms;
            }
        }
        self.now_ms = target;
        fired.sort_by_key(|(due, slot, _)| (*due, *slot));
        fired.into_iter().map(|(_, _, kind)| kind).collect()
    }
}
