use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tui_dispatch::EventKind;
use tui_dispatch_components::centered_rect;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

pub struct GameOverProps<'a> {
    pub summary: &'a str,
    pub is_focused: bool,
}

/// Final score overlay; Enter starts a new game.
#[derive(Default)]
pub struct GameOverOverlay;

impl Component<Action> for GameOverOverlay {
    type Props<'a> = GameOverProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) if key.code == KeyCode::Enter => Some(Action::SessionRestart),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(64, 9, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_GOLD));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                props.summary,
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "Enter",
                    Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
                ),
                Span::styled(": new game  ", Style::default().fg(TEXT_DIM)),
                Span::styled(
                    "Esc",
                    Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
                ),
                Span::styled(": quit", Style::default().fg(TEXT_DIM)),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, modal_area);
    }
}
