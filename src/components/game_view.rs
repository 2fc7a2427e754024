use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_dispatch::EventKind;

use super::{
    Component, SpriteView, SpriteViewProps, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_PANEL,
    TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::round;
use crate::session::Session;
use crate::state::AppState;

pub struct GameViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Score line, sprite, current word and the typing field.
#[derive(Default)]
pub struct GameView {
    sprite: SpriteView,
}

impl Component<Action> for GameView {
    type Props<'a> = GameViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.state.input_enabled() {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(ch) => Some(Action::InputChar(ch)),
            KeyCode::Backspace => Some(Action::InputBackspace),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(session) = props.state.session.as_ref() else {
            return;
        };
        let chunks = Layout::vertical([
            Constraint::Length(3), // Score, size, time
            Constraint::Min(4),    // Sprite
            Constraint::Length(3), // Word
            Constraint::Length(3), // Input
        ])
        .split(area);

        render_stats(frame, chunks[0], session);
        self.sprite.render(
            frame,
            chunks[1],
            SpriteViewProps {
                sprite: &props.state.sprite,
                scale: session.size.as_f32(),
                visible: !session.is_ended(),
            },
        );
        render_word(frame, chunks[2], session);
        render_input(frame, chunks[3], session);
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
}

fn render_stats(frame: &mut Frame, area: Rect, session: &Session) {
    let time_style = if session.time_left_secs <= 10 {
        Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN)
    };
    let label = Style::default().fg(TEXT_DIM);
    let line = Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(
            session.score.to_string(),
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Size: ", label),
        Span::styled(session.size.label(), Style::default().fg(ACCENT_TEAL)),
        Span::styled("   Time Left: ", label),
        Span::styled(format!("{}s", session.time_left_secs), time_style),
        Span::styled(format!("   [{}]", session.difficulty.label()), label),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(panel(""));
    frame.render_widget(paragraph, area);
}

fn render_word(frame: &mut Frame, area: Rect, session: &Session) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        session.current_word.as_str(),
        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(panel(" WORD "));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, area: Rect, session: &Session) {
    let target = round::comparison_target(&session.current_word);
    let on_track = target.starts_with(&session.input.to_lowercase());
    let input_style = if on_track {
        Style::default().fg(ACCENT_TEAL)
    } else {
        Style::default().fg(ACCENT_RED)
    };
    let mut spans = vec![
        Span::styled("> ", Style::default().fg(TEXT_DIM)),
        Span::styled(session.input.as_str(), input_style),
    ];
    if session.input_enabled() {
        spans.push(Span::styled("_", Style::default().fg(TEXT_DIM)));
    } else {
        spans.push(Span::styled("  (input disabled)", Style::default().fg(TEXT_DIM)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(panel(" TYPE "));
    frame.render_widget(paragraph, area);
}
