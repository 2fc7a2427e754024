use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_dispatch::{DataResource, EventKind};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{AppState, Difficulty, SHRINK_PERIOD_MS};

pub struct DifficultyMenuProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Difficulty picker shown before each session.
#[derive(Default)]
pub struct DifficultyMenu;

impl Component<Action> for DifficultyMenu {
    type Props<'a> = DifficultyMenuProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                match key.code {
                    KeyCode::Char(ch) => Difficulty::from_key(ch).map(Action::DifficultySelect),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" POKEGROW ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_TEAL));

        let mut lines = vec![
            Line::from(""),
            Line::from("Type the words to make the Pokemon grow."),
            Line::from(Span::styled(
                "It shrinks over time, so keep typing!",
                Style::default().fg(TEXT_DIM),
            )),
            Line::from(""),
            pool_line(props.state),
            Line::from(""),
            Line::from(Span::styled(
                "Choose a difficulty",
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        let seconds = SHRINK_PERIOD_MS / 1000;
        for difficulty in Difficulty::ALL {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", difficulty.hotkey()),
                    Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<8}", difficulty.label()),
                    Style::default().fg(TEXT_MAIN),
                ),
                Span::styled(
                    format!("-{} every {seconds}s", difficulty.shrink_step()),
                    Style::default().fg(TEXT_DIM),
                ),
            ]));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

fn pool_line(state: &AppState) -> Line<'static> {
    match &state.pool {
        DataResource::Empty | DataResource::Loading => Line::from(Span::styled(
            "Loading words from PokeAPI...",
            Style::default().fg(TEXT_DIM),
        )),
        DataResource::Loaded(pool) if pool.is_empty() => Line::from(Span::styled(
            "No words available",
            Style::default().fg(ACCENT_GOLD),
        )),
        DataResource::Loaded(pool) => Line::from(Span::styled(
            format!("{} words ready", pool.len()),
            Style::default().fg(ACCENT_TEAL),
        )),
        DataResource::Failed(error) => Line::from(Span::styled(
            format!("Word list error: {error}"),
            Style::default().fg(ACCENT_GOLD),
        )),
    }
}
