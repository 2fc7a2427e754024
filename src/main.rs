//! Pokegrow - type Pokemon words to grow the sprite before time runs out

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokegrow::action::Action;
use pokegrow::components::{
    Component, DifficultyMenu, DifficultyMenuProps, GameOverOverlay, GameOverProps, GameView,
    GameViewProps, StatusLine, StatusLineProps, BG_BASE,
};
use pokegrow::config::{self, GameConfig};
use pokegrow::effect::Effect;
use pokegrow::reducer::reducer;
use pokegrow::sprite_backend::{self, SpriteBackend};
use pokegrow::state::{self, AppState, Difficulty, GamePhase, CLOCK_TICK_MS};
use pokegrow::{api, audio, logging, sprite};

/// Grow a Pokemon by typing Pokemon words before the clock runs out
#[derive(Parser, Debug)]
#[command(name = "pokegrow")]
#[command(about = "A Pokemon typing game for the terminal")]
struct Args {
    /// Session length in seconds (minimum 1)
    #[arg(long, short, default_value = "60", value_parser = clap::value_parser!(u32).range(1..))]
    duration: u32,

    /// Skip the menu for the first session
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Seed for word and sprite selection
    #[arg(long)]
    seed: Option<u64>,

    /// Disable background music
    #[arg(long)]
    mute: bool,

    /// Do not download or draw the Pokemon sprite
    #[arg(long)]
    no_sprite: bool,

    /// Always fetch from the network instead of the disk cache
    #[arg(long)]
    no_cache: bool,

    /// Where to write the log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GameComponentId {
    Menu,
    Game,
    GameOver,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GameContext {
    Menu,
    Typing,
    GameOver,
}

impl EventRoutingState<GameComponentId, GameContext> for AppState {
    fn focused(&self) -> Option<GameComponentId> {
        Some(match self.phase() {
            GamePhase::Init => GameComponentId::Menu,
            GamePhase::Active => GameComponentId::Game,
            GamePhase::Ended => GameComponentId::GameOver,
        })
    }

    fn modal(&self) -> Option<GameComponentId> {
        match self.phase() {
            GamePhase::Ended => Some(GameComponentId::GameOver),
            _ => None,
        }
    }

    fn binding_context(&self, id: GameComponentId) -> GameContext {
        match id {
            GameComponentId::Menu => GameContext::Menu,
            GameComponentId::Game => GameContext::Typing,
            GameComponentId::GameOver => GameContext::GameOver,
        }
    }

    fn default_context(&self) -> GameContext {
        GameContext::Menu
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        duration,
        difficulty,
        seed,
        mute,
        no_sprite,
        no_cache,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let log_path = log_file.unwrap_or_else(config::default_log_path);
    if let Err(error) = logging::init(&log_path) {
        eprintln!("Warning: logging disabled ({}): {error}", log_path.display());
    }

    let game_config = GameConfig {
        duration_secs: duration,
        difficulty,
        mute,
        show_sprite: !no_sprite,
        use_cache: !no_cache,
    };
    let seed = seed.unwrap_or_else(state::seed_from_time);
    tracing::info!(?game_config, seed, "starting pokegrow");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(game_config, seed))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = SpriteBackend::new(stdout, sprite_backend::sprite_slot());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    audio::stop_music();
    sprite_backend::clear_sprite();
    if use_alt_screen {
        terminal.clear()?;
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("pokegrow exited");
    Ok(())
}

struct GameUi {
    menu: DifficultyMenu,
    game: GameView,
    game_over: GameOverOverlay,
    status: StatusLine,
}

impl GameUi {
    fn new() -> Self {
        Self {
            menu: DifficultyMenu,
            game: GameView::default(),
            game_over: GameOverOverlay,
            status: StatusLine::default(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<GameComponentId>,
    ) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);
        let main = chunks[0];

        match state.phase() {
            GamePhase::Init => {
                sprite_backend::clear_sprite();
                let menu_area = centered_rect(60, 20, main);
                event_ctx.set_component_area(GameComponentId::Menu, menu_area);
                event_ctx.component_areas.remove(&GameComponentId::Game);
                event_ctx.component_areas.remove(&GameComponentId::GameOver);
                let props = DifficultyMenuProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                self.menu.render(frame, menu_area, props);
            }
            GamePhase::Active | GamePhase::Ended => {
                event_ctx.set_component_area(GameComponentId::Game, main);
                event_ctx.component_areas.remove(&GameComponentId::Menu);
                let ended = state.phase() == GamePhase::Ended;
                let props = GameViewProps {
                    state,
                    is_focused: render_ctx.is_focused() && !ended,
                };
                self.game.render(frame, main, props);

                if let Some(session) = state.session.as_ref().filter(|_| ended) {
                    event_ctx.set_component_area(GameComponentId::GameOver, main);
                    let summary = session.summary();
                    let props = GameOverProps {
                        summary: &summary,
                        is_focused: render_ctx.is_focused(),
                    };
                    self.game_over.render(frame, main, props);
                } else {
                    event_ctx.component_areas.remove(&GameComponentId::GameOver);
                }
            }
        }

        self.status
            .render(frame, chunks[1], StatusLineProps { state });
    }

    fn handle_menu_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = DifficultyMenuProps {
            state,
            is_focused: true,
        };
        respond(self.menu.handle_event(event, props).into_iter().collect())
    }

    fn handle_game_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = GameViewProps {
            state,
            is_focused: true,
        };
        respond(self.game.handle_event(event, props).into_iter().collect())
    }

    fn handle_game_over_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let summary = state
            .session
            .as_ref()
            .map(|session| session.summary())
            .unwrap_or_default();
        let props = GameOverProps {
            summary: &summary,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .game_over
            .handle_event(event, props)
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GameUi::new()));
    let mut bus: EventBus<AppState, Action, GameComponentId, GameContext> = EventBus::new();
    let keybindings: Keybindings<GameContext> = Keybindings::new();

    let ui_menu = Rc::clone(&ui);
    bus.register(GameComponentId::Menu, move |event, state| {
        ui_menu.borrow_mut().handle_menu_event(&event.kind, state)
    });

    let ui_game = Rc::clone(&ui);
    bus.register(GameComponentId::Game, move |event, state| {
        ui_game.borrow_mut().handle_game_event(&event.kind, state)
    });

    let ui_game_over = Rc::clone(&ui);
    bus.register(GameComponentId::GameOver, move |event, state| {
        ui_game_over
            .borrow_mut()
            .handle_game_over_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            KeyCode::Esc => HandlerResponse::action(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                HandlerResponse::action(Action::Quit)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "clock",
                    Duration::from_millis(CLOCK_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadWords { use_cache } => {
            ctx.tasks().spawn(TaskKey::new("words"), async move {
                Action::WordsDidLoad(api::fetch_words(use_cache).await)
            });
        }
        Effect::LoadSprite { id, use_cache } => {
            let key = format!("sprite_{id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let bytes = match api::fetch_bytes(&api::sprite_url(id), use_cache).await {
                    Ok(bytes) => bytes,
                    Err(error) => {
                        return Action::SpriteDidError {
                            id,
                            error: error.to_string(),
                        };
                    }
                };
                match sprite::decode_sprite(&bytes) {
                    Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                    Err(error) => Action::SpriteDidError { id, error },
                }
            });
        }
        Effect::PlayMusic {
            url,
            volume,
            use_cache,
        } => {
            ctx.tasks().spawn(TaskKey::new("music"), async move {
                let bytes = match api::fetch_bytes(&url, use_cache).await {
                    Ok(bytes) => bytes,
                    Err(error) => return Action::MusicDidError(error.to_string()),
                };
                match audio::spawn_loop(bytes, volume).await {
                    Ok(Ok(())) => Action::MusicDidStart,
                    Ok(Err(error)) => Action::MusicDidError(error),
                    Err(error) => Action::MusicDidError(error.to_string()),
                }
            });
        }
    }
}
