//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::round::{self, EmptyPoolError};
use crate::session::{CountdownOutcome, InputOutcome, Session};
use crate::state::{
    AppState, Difficulty, CLOCK_TICK_MS, COUNTDOWN_PERIOD_MS, MUSIC_URL, MUSIC_VOLUME,
    SHRINK_PERIOD_MS, SPRITE_ID_MAX,
};
use crate::timers::TimerKind;
use crate::words::WordPool;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.pool = DataResource::Loading;
            state.session = None;
            state.scheduler.cancel_all();
            state.message = None;
            let mut effects = vec![Effect::LoadWords {
                use_cache: state.config.use_cache,
            }];
            effects.extend(pick_sprite(state));
            DispatchResult::changed_with_many(effects)
        }

        Action::WordsDidLoad(pool) => {
            state.message = pool.problem();
            state.pool = DataResource::Loaded(pool);
            let preset = state.config.difficulty;
            match preset {
                Some(difficulty) if state.session.is_none() => {
                    DispatchResult::changed_with_many(start_session(state, difficulty))
                }
                _ => DispatchResult::changed(),
            }
        }

        Action::SpriteDidLoad { id, sprite } => {
            if state.sprite_id != Some(id) {
                return DispatchResult::unchanged();
            }
            state.sprite = DataResource::Loaded(sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { id, error } => {
            if state.sprite_id != Some(id) {
                return DispatchResult::unchanged();
            }
            tracing::warn!(id, %error, "sprite failed to load");
            state.sprite = DataResource::Failed(error.clone());
            state.message = Some(format!("Sprite #{id} error: {error}"));
            DispatchResult::changed()
        }

        Action::MusicDidStart => {
            tracing::info!("background music started");
            DispatchResult::unchanged()
        }

        Action::MusicDidError(error) => {
            tracing::warn!(%error, "background music unavailable");
            state.message = Some(format!("Music error: {error}"));
            DispatchResult::changed()
        }

        Action::DifficultySelect(difficulty) => {
            if state.session.is_some() {
                return DispatchResult::unchanged();
            }
            if !state.pool_ready() {
                state.message = Some("Still loading words...".to_string());
                return DispatchResult::changed();
            }
            DispatchResult::changed_with_many(start_session(state, difficulty))
        }

        Action::InputChar(ch) => {
            let Some(session) = state.session.as_mut() else {
                return DispatchResult::unchanged();
            };
            let outcome = session.push_char(ch);
            apply_input(state, outcome)
        }

        Action::InputBackspace => {
            let Some(session) = state.session.as_mut() else {
                return DispatchResult::unchanged();
            };
            let outcome = session.backspace();
            apply_input(state, outcome)
        }

        Action::SessionRestart => {
            if !state.session.as_ref().is_some_and(Session::is_ended) {
                return DispatchResult::unchanged();
            }
            state.session = None;
            state.scheduler.cancel_all();
            state.message = state.pool.data().and_then(WordPool::problem);
            DispatchResult::changed_with_many(pick_sprite(state).into_iter().collect())
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.scheduler.is_idle() {
                return DispatchResult::unchanged();
            }
            let fired = state.scheduler.advance(CLOCK_TICK_MS);
            if fired.is_empty() {
                return DispatchResult::unchanged();
            }
            let mut changed = false;
            for kind in fired {
                let Some(session) = state.session.as_mut() else {
                    break;
                };
                match kind {
                    TimerKind::Countdown => match session.countdown_tick() {
                        CountdownOutcome::Running(_) => changed = true,
                        CountdownOutcome::Expired => {
                            tracing::info!(
                                score = session.score,
                                size = %session.size,
                                "session ended"
                            );
                            state.scheduler.cancel_all();
                            changed = true;
                            break;
                        }
                        CountdownOutcome::Ignored => {}
                    },
                    TimerKind::Shrink => changed |= session.shrink_tick(),
                }
            }
            if changed {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn start_session(state: &mut AppState, difficulty: Difficulty) -> Vec<Effect> {
    let word = match draw_next_word(state) {
        Ok(word) => word,
        Err(error) => {
            tracing::warn!(%error, "cannot start session");
            state.message = Some(format!("Cannot start: {error}"));
            return Vec::new();
        }
    };
    tracing::info!(difficulty = difficulty.label(), "session started");
    state.session = Some(Session::new(
        difficulty,
        state.config.duration_secs,
        word,
    ));
    state.scheduler.cancel_all();
    state.scheduler.start(TimerKind::Countdown, COUNTDOWN_PERIOD_MS);
    state.scheduler.start(TimerKind::Shrink, SHRINK_PERIOD_MS);
    if state.pool.data().is_some_and(|pool| pool.problem().is_none()) {
        state.message = None;
    }

    if state.music_started || state.config.mute {
        return Vec::new();
    }
    state.music_started = true;
    vec![Effect::PlayMusic {
        url: MUSIC_URL.to_string(),
        volume: MUSIC_VOLUME,
        use_cache: state.config.use_cache,
    }]
}

fn apply_input(state: &mut AppState, outcome: InputOutcome) -> DispatchResult<Effect> {
    match outcome {
        InputOutcome::Ignored => DispatchResult::unchanged(),
        InputOutcome::Pending => DispatchResult::changed(),
        InputOutcome::Matched => {
            match draw_next_word(state) {
                Ok(word) => {
                    if let Some(session) = state.session.as_mut() {
                        tracing::debug!(score = session.score, next = %word, "word matched");
                        session.advance_word(word);
                    }
                }
                Err(error) => {
                    if let Some(session) = state.session.as_mut() {
                        session.input.clear();
                    }
                    state.message = Some(error.to_string());
                }
            }
            DispatchResult::changed()
        }
    }
}

fn draw_next_word(state: &mut AppState) -> Result<String, EmptyPoolError> {
    let words = state
        .pool
        .data()
        .map(|pool| pool.words())
        .unwrap_or_default();
    round::draw_word(words, &mut state.rng_seed)
}

fn pick_sprite(state: &mut AppState) -> Option<Effect> {
    if !state.config.show_sprite {
        state.sprite_id = None;
        state.sprite = DataResource::Empty;
        return None;
    }
    let id = (round::next_rand(&mut state.rng_seed) % SPRITE_ID_MAX as u32) as u16 + 1;
    state.sprite_id = Some(id);
    state.sprite = DataResource::Loading;
    Some(Effect::LoadSprite {
        id,
        use_cache: state.config.use_cache,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::growth::SizeMultiplier;
    use crate::api::FetchError;
    use crate::state::GamePhase;
    use crate::words::WordSource;

    fn quiet_config() -> GameConfig {
        GameConfig {
            mute: true,
            show_sprite: false,
            ..GameConfig::default()
        }
    }

    fn ready_state(words: &[&str]) -> AppState {
        let mut state = AppState::new(quiet_config(), 99);
        reducer(&mut state, Action::Init);
        let pool = WordPool::from_words(words.iter().map(|w| w.to_string()).collect());
        reducer(&mut state, Action::WordsDidLoad(pool));
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            reducer(state, Action::InputChar(ch));
        }
    }

    fn tick_ms(state: &mut AppState, ms: u64) {
        for _ in 0..ms / CLOCK_TICK_MS {
            reducer(state, Action::Tick);
        }
    }

    #[test]
    fn test_init_requests_words_and_sprite() {
        let mut state = AppState::new(GameConfig::default(), 5);
        let result = reducer(&mut state, Action::Init);
        assert!(result.changed);
        assert!(state.pool.is_loading());
        assert_eq!(result.effects.len(), 2);
        assert!(matches!(result.effects[0], Effect::LoadWords { use_cache: true }));
        let Effect::LoadSprite { id, .. } = result.effects[1] else {
            panic!("expected sprite effect");
        };
        assert!((1..=SPRITE_ID_MAX).contains(&id));
        assert_eq!(state.sprite_id, Some(id));
    }

    #[test]
    fn test_difficulty_waits_for_pool() {
        let mut state = AppState::new(quiet_config(), 1);
        reducer(&mut state, Action::Init);
        let result = reducer(&mut state, Action::DifficultySelect(Difficulty::Easy));
        assert!(result.changed);
        assert_eq!(state.phase(), GamePhase::Init);
        assert!(state.message.is_some());
    }

    #[test]
    fn test_select_difficulty_starts_session_and_timers() {
        let mut state = ready_state(&["pikachu"]);
        reducer(&mut state, Action::DifficultySelect(Difficulty::Hard));
        assert_eq!(state.phase(), GamePhase::Active);
        assert!(state.input_enabled());
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.current_word, "pikachu");
        assert_eq!(session.time_left_secs, 60);
        assert!(state.scheduler.is_running(TimerKind::Countdown));
        assert!(state.scheduler.is_running(TimerKind::Shrink));
    }

    #[test]
    fn test_empty_pool_refuses_session() {
        let mut state = ready_state(&[]);
        let result = reducer(&mut state, Action::DifficultySelect(Difficulty::Medium));
        assert!(result.effects.is_empty());
        assert_eq!(state.phase(), GamePhase::Init);
        assert!(state.scheduler.is_idle());
        assert_eq!(
            state.message.as_deref(),
            Some("Cannot start: no words available to draw from")
        );
    }

    #[test]
    fn test_music_starts_once_unless_muted() {
        let mut state = ready_state(&["surf"]);
        state.config.mute = false;
        let result = reducer(&mut state, Action::DifficultySelect(Difficulty::Easy));
        assert!(matches!(result.effects[..], [Effect::PlayMusic { .. }]));
        assert!(state.music_started);

        state.session.as_mut().unwrap().phase = crate::session::SessionPhase::Ended;
        reducer(&mut state, Action::SessionRestart);
        let result = reducer(&mut state, Action::DifficultySelect(Difficulty::Easy));
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_correct_word_scores_and_grows() {
        let mut state = ready_state(&["ice beam"]);
        reducer(&mut state, Action::DifficultySelect(Difficulty::Easy));
        type_text(&mut state, "IceBeam");
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.score, 1);
        assert_eq!(session.size, SizeMultiplier::from_hundredths(110));
        assert_eq!(session.current_word, "ice beam");
        assert!(session.input.is_empty());
    }

    #[test]
    fn test_shrink_tick_every_two_seconds() {
        let mut state = ready_state(&["surf"]);
        reducer(&mut state, Action::DifficultySelect(Difficulty::Medium));
        type_text(&mut state, "surfsurf");
        assert_eq!(state.size().hundredths(), 120);
        tick_ms(&mut state, 1900);
        assert_eq!(state.size().hundredths(), 120);
        tick_ms(&mut state, 100);
        assert_eq!(state.size().hundredths(), 117);
        tick_ms(&mut state, 2000);
        assert_eq!(state.size().hundredths(), 114);
        assert_eq!(state.session.as_ref().unwrap().time_left_secs, 56);
    }

    #[test]
    fn test_countdown_ends_session_and_cancels_timers() {
        let mut state = ready_state(&["surf"]);
        reducer(&mut state, Action::DifficultySelect(Difficulty::Hard));
        tick_ms(&mut state, 59_900);
        assert_eq!(state.phase(), GamePhase::Active);
        assert_eq!(state.session.as_ref().unwrap().time_left_secs, 1);

        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.phase(), GamePhase::Ended);
        assert!(!state.input_enabled());
        assert!(state.scheduler.is_idle());

        let frozen = state.session.clone();
        assert!(!reducer(&mut state, Action::Tick).changed);
        assert!(!reducer(&mut state, Action::InputChar('s')).changed);
        assert_eq!(state.session, frozen);
    }

    #[test]
    fn test_restart_returns_to_menu_with_new_sprite() {
        let mut state = ready_state(&["surf"]);
        state.config.show_sprite = true;
        state.config.duration_secs = 1;
        reducer(&mut state, Action::DifficultySelect(Difficulty::Easy));
        assert!(!reducer(&mut state, Action::SessionRestart).changed);

        tick_ms(&mut state, 1000);
        assert_eq!(state.phase(), GamePhase::Ended);
        let result = reducer(&mut state, Action::SessionRestart);
        assert_eq!(state.phase(), GamePhase::Init);
        assert!(matches!(result.effects[..], [Effect::LoadSprite { .. }]));
        assert!(state.pool_ready());
    }

    #[test]
    fn test_restart_keeps_degraded_pool_notice() {
        let mut state = AppState::new(
            GameConfig {
                duration_secs: 1,
                ..quiet_config()
            },
            4,
        );
        reducer(&mut state, Action::Init);
        let pool = WordPool::from_results([
            (WordSource::Species, Ok(vec!["pikachu".to_string()])),
            (WordSource::Moves, Err(FetchError::Status(500))),
            (WordSource::Abilities, Ok(vec!["static".to_string()])),
        ]);
        reducer(&mut state, Action::WordsDidLoad(pool));
        let notice = Some("Could not load moves; playing with 2 words".to_string());
        assert_eq!(state.message, notice);

        reducer(&mut state, Action::DifficultySelect(Difficulty::Easy));
        reducer(&mut state, Action::MusicDidError("no device".into()));
        tick_ms(&mut state, 1000);
        assert_eq!(state.phase(), GamePhase::Ended);

        reducer(&mut state, Action::SessionRestart);
        assert_eq!(state.phase(), GamePhase::Init);
        assert_eq!(state.message, notice);
    }

    #[test]
    fn test_restart_clears_message_for_complete_pool() {
        let mut state = ready_state(&["surf"]);
        state.config.duration_secs = 1;
        reducer(&mut state, Action::DifficultySelect(Difficulty::Easy));
        reducer(&mut state, Action::MusicDidError("no device".into()));
        tick_ms(&mut state, 1000);
        reducer(&mut state, Action::SessionRestart);
        assert_eq!(state.message, None);
    }

    #[test]
    fn test_preset_difficulty_starts_when_words_arrive() {
        let mut state = AppState::new(
            GameConfig {
                difficulty: Some(Difficulty::Hard),
                ..quiet_config()
            },
            3,
        );
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::WordsDidLoad(WordPool::from_words(vec!["tackle".into()])),
        );
        assert_eq!(state.phase(), GamePhase::Active);
        assert_eq!(state.session.as_ref().unwrap().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_stale_sprite_is_ignored() {
        let mut state = AppState::new(GameConfig::default(), 8);
        reducer(&mut state, Action::Init);
        let current = state.sprite_id.unwrap();
        let stale = current % SPRITE_ID_MAX + 1;
        let result = reducer(
            &mut state,
            Action::SpriteDidError {
                id: stale,
                error: "404".into(),
            },
        );
        assert!(!result.changed);
        assert!(state.sprite.is_loading());
    }
}
