//! One play-through: from difficulty selection until the countdown expires.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::growth::SizeMultiplier;
use crate::round;
use crate::state::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SessionPhase {
    Active,
    Ended,
}

/// Result of feeding an input edit to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Input is disabled; nothing changed.
    Ignored,
    /// Buffer changed but does not match yet.
    Pending,
    /// Buffer matched the current word; score and size were bumped.
    Matched,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownOutcome {
    Ignored,
    Running(u32),
    Expired,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub current_word: String,
    pub input: String,
    pub score: u32,
    pub size: SizeMultiplier,
    pub time_left_secs: u32,
    pub difficulty: Difficulty,
    pub phase: SessionPhase,
}

impl Session {
    pub fn new(difficulty: Difficulty, duration_secs: u32, first_word: String) -> Self {
        Self {
            current_word: first_word,
            input: String::new(),
            score: 0,
            size: SizeMultiplier::BASE,
            time_left_secs: duration_secs,
            difficulty,
            phase: SessionPhase::Active,
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn is_ended(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    pub fn push_char(&mut self, ch: char) -> InputOutcome {
        if !self.input_enabled() {
            return InputOutcome::Ignored;
        }
        self.input.push(ch);
        self.evaluate_input()
    }

    pub fn backspace(&mut self) -> InputOutcome {
        if !self.input_enabled() || self.input.pop().is_none() {
            return InputOutcome::Ignored;
        }
        self.evaluate_input()
    }

    /// Replace the current word and clear the input buffer.
    pub fn advance_word(&mut self, word: String) {
        self.current_word = word;
        self.input.clear();
    }

    /// Apply one shrink tick. Returns whether the size changed.
    pub fn shrink_tick(&mut self) -> bool {
        if !self.input_enabled() || !self.size.is_above_base() {
            return false;
        }
        self.size = self.size.shrink(self.difficulty.shrink_step());
        true
    }

    pub fn countdown_tick(&mut self) -> CountdownOutcome {
        if !self.input_enabled() {
            return CountdownOutcome::Ignored;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs == 0 {
            self.phase = SessionPhase::Ended;
            return CountdownOutcome::Expired;
        }
        CountdownOutcome::Running(self.time_left_secs)
    }

    pub fn summary(&self) -> String {
        format!(
            "Time's up! Your final score is {}. Final size is {}",
            self.score, self.size
        )
    }

    fn evaluate_input(&mut self) -> InputOutcome {
        if round::check_input(&self.input, &self.current_word) {
            self.score += 1;
            self.size = self.size.grow();
            InputOutcome::Matched
        } else {
            InputOutcome::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_word(session: &mut Session, text: &str) -> InputOutcome {
        let mut outcome = InputOutcome::Ignored;
        for ch in text.chars() {
            outcome = session.push_char(ch);
        }
        outcome
    }

    #[test]
    fn test_matches_grow_linearly_without_shrink() {
        let mut session = Session::new(Difficulty::Medium, 60, "tackle".into());
        for n in 1..=12 {
            assert_eq!(type_word(&mut session, "tackle"), InputOutcome::Matched);
            session.advance_word("tackle".into());
            assert_eq!(session.score, n);
            assert_eq!(session.size.hundredths(), 100 + 10 * n);
        }
    }

    #[test]
    fn test_partial_input_is_pending() {
        let mut session = Session::new(Difficulty::Easy, 60, "ice beam".into());
        assert_eq!(type_word(&mut session, "iceb"), InputOutcome::Pending);
        assert_eq!(session.backspace(), InputOutcome::Pending);
        assert_eq!(session.input, "ice");
        assert_eq!(type_word(&mut session, "beam"), InputOutcome::Matched);
    }

    #[test]
    fn test_backspace_on_empty_input_is_ignored() {
        let mut session = Session::new(Difficulty::Easy, 60, "surf".into());
        assert_eq!(session.backspace(), InputOutcome::Ignored);
    }

    #[test]
    fn test_countdown_expires_after_exact_tick_count() {
        let mut session = Session::new(Difficulty::Hard, 60, "surf".into());
        for remaining in (1..60).rev() {
            assert_eq!(session.countdown_tick(), CountdownOutcome::Running(remaining));
        }
        assert_eq!(session.countdown_tick(), CountdownOutcome::Expired);
        assert_eq!(session.time_left_secs, 0);
        assert!(!session.input_enabled());
        assert_eq!(session.countdown_tick(), CountdownOutcome::Ignored);
        assert_eq!(session.time_left_secs, 0);
    }

    #[test]
    fn test_ended_session_ignores_input_and_shrink() {
        let mut session = Session::new(Difficulty::Hard, 1, "surf".into());
        type_word(&mut session, "surf");
        assert_eq!(session.countdown_tick(), CountdownOutcome::Expired);
        let frozen = session.clone();
        assert_eq!(session.push_char('s'), InputOutcome::Ignored);
        assert!(!session.shrink_tick());
        assert_eq!(session, frozen);
    }

    #[test]
    fn test_shrink_uses_difficulty_step_and_floor() {
        let mut session = Session::new(Difficulty::Hard, 60, "surf".into());
        assert!(!session.shrink_tick());
        type_word(&mut session, "surf");
        assert_eq!(session.size.hundredths(), 110);
        assert!(session.shrink_tick());
        assert_eq!(session.size.hundredths(), 105);
        assert!(session.shrink_tick());
        assert_eq!(session.size, SizeMultiplier::BASE);
        assert!(!session.shrink_tick());
    }

    #[test]
    fn test_size_floor_holds_over_mixed_sequences() {
        for difficulty in Difficulty::ALL {
            let mut session = Session::new(difficulty, 60, "surf".into());
            let mut seed = 0x5eed_u64 + difficulty.shrink_step().hundredths() as u64;
            let mut expected = SizeMultiplier::BASE.hundredths();
            for _ in 0..5000 {
                if round::next_rand(&mut seed) % 3 == 0 {
                    type_word(&mut session, "surf");
                    session.advance_word("surf".into());
                    expected += 10;
                } else {
                    session.shrink_tick();
                    let step = difficulty.shrink_step().hundredths();
                    expected = expected.saturating_sub(step).max(100);
                }
                assert!(session.size >= SizeMultiplier::BASE);
                assert_eq!(session.size.hundredths(), expected);
            }
        }
    }

    #[test]
    fn test_summary_text() {
        let mut session = Session::new(Difficulty::Medium, 60, "surf".into());
        type_word(&mut session, "surf");
        assert_eq!(
            session.summary(),
            "Time's up! Your final score is 1. Final size is 1.10"
        );
    }
}
