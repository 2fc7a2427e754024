//! Full game flows driven through EffectStoreTestHarness

use pokegrow::{
    action::Action,
    components::{Component, DifficultyMenu, DifficultyMenuProps, GameView, GameViewProps},
    config::GameConfig,
    effect::Effect,
    reducer::reducer,
    state::{AppState, Difficulty, GamePhase, CLOCK_TICK_MS},
    words::WordPool,
};
use tui_dispatch::testing::*;
use tui_dispatch::NumericComponentId;

fn config() -> GameConfig {
    GameConfig {
        mute: true,
        show_sprite: false,
        ..GameConfig::default()
    }
}

fn pool(words: &[&str]) -> WordPool {
    WordPool::from_words(words.iter().map(|word| word.to_string()).collect())
}

/// State after `Init` with the word list already delivered.
fn loaded_state(words: &[&str]) -> AppState {
    let mut state = AppState::new(config(), 7);
    reducer(&mut state, Action::Init);
    reducer(&mut state, Action::WordsDidLoad(pool(words)));
    state
}

fn ticks(ms: u64) -> u64 {
    ms / CLOCK_TICK_MS
}

#[test]
fn test_init_loads_words() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(config(), 1), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.pool.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadWords { use_cache: true }));

    harness.complete_action(Action::WordsDidLoad(pool(&["pikachu", "surf"])));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));
    harness.assert_state(|s| s.words().len() == 2);
    harness.assert_state(|s| s.phase() == GamePhase::Init);
}

#[test]
fn test_menu_key_starts_session() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(&["psychic"]), reducer);
    let mut menu = DifficultyMenu;

    let actions = harness.send_keys::<NumericComponentId, _, _>("2", |state, event| {
        let props = DifficultyMenuProps {
            state,
            is_focused: true,
        };
        menu.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_count(1);
    actions.assert_first(Action::DifficultySelect(Difficulty::Medium));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.phase() == GamePhase::Active);
    harness.assert_state(|s| s.session.as_ref().unwrap().current_word == "psychic");
}

#[test]
fn test_typing_through_component_scores() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(&["surf"]), reducer);
    harness.dispatch_collect(Action::DifficultySelect(Difficulty::Easy));
    let mut view = GameView::default();

    for ch in ["S", "u", "r", "f"] {
        let actions = harness.send_keys::<NumericComponentId, _, _>(ch, |state, event| {
            let props = GameViewProps {
                state,
                is_focused: true,
            };
            view.handle_event(&event.kind, props)
                .into_iter()
                .collect::<Vec<_>>()
        });
        for action in actions {
            harness.dispatch_collect(action);
        }
    }

    harness.assert_state(|s| s.session.as_ref().unwrap().score == 1);
    harness.assert_state(|s| s.size().label() == "1.1x");
    harness.assert_state(|s| s.session.as_ref().unwrap().input.is_empty());
}

#[test]
fn test_full_session_until_time_runs_out() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(&["surf"]), reducer);
    harness.dispatch_collect(Action::DifficultySelect(Difficulty::Hard));

    for ch in "surfsurfsurf".chars() {
        harness.dispatch_collect(Action::InputChar(ch));
    }
    harness.assert_state(|s| s.size().hundredths() == 130);

    for _ in 0..ticks(10_000) {
        harness.dispatch_collect(Action::Tick);
    }
    // five shrink ticks of 0.05 each
    harness.assert_state(|s| s.size().hundredths() == 105);
    harness.assert_state(|s| s.session.as_ref().unwrap().time_left_secs == 50);

    for _ in 0..ticks(50_000) {
        harness.dispatch_collect(Action::Tick);
    }
    harness.assert_state(|s| s.phase() == GamePhase::Ended);
    harness.assert_state(|s| s.size().hundredths() == 100);
    harness.assert_state(|s| {
        s.session.as_ref().unwrap().summary()
            == "Time's up! Your final score is 3. Final size is 1.00"
    });

    harness.dispatch_collect(Action::SessionRestart);
    harness.assert_state(|s| s.phase() == GamePhase::Init);
    harness.assert_state(|s| s.pool_ready());
}

#[test]
fn test_preset_difficulty_plays_music_once() {
    let state = AppState::new(
        GameConfig {
            difficulty: Some(Difficulty::Easy),
            mute: false,
            show_sprite: false,
            ..GameConfig::default()
        },
        11,
    );
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.complete_action(Action::WordsDidLoad(pool(&["tackle"])));
    harness.process_emitted();
    harness.assert_state(|s| s.phase() == GamePhase::Active);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::PlayMusic { .. }));

    harness.complete_action(Action::MusicDidError("no audio device".into()));
    harness.process_emitted();
    harness.assert_state(|s| s.message.as_deref() == Some("Music error: no audio device"));
    harness.assert_state(|s| s.phase() == GamePhase::Active);
}
