use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM};
use crate::action::Action;
use crate::state::{AppState, GamePhase};

pub struct StatusLineProps<'a> {
    pub state: &'a AppState,
}

/// One-line footer with key hints for the current phase and the latest message.
pub struct StatusLine {
    bar: StatusBar,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            bar: StatusBar::new(),
        }
    }
}

impl Component<Action> for StatusLine {
    type Props<'a> = StatusLineProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let hints = phase_hints(props.state.phase());
        let message = props.state.message.as_deref().unwrap_or("");
        let items = [StatusBarItem::span(Span::styled(
            message,
            Style::default().fg(ACCENT_GOLD),
        ))];
        let style = StatusBarStyle {
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            ..StatusBarStyle::default()
        };

        Component::<Action>::render(
            &mut self.bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::hints(&hints).with_separator("  "),
                center: StatusBarSection::empty(),
                right: StatusBarSection::items(&items),
                style,
                is_focused: false,
            },
        );
    }
}

fn phase_hints(phase: GamePhase) -> Vec<StatusBarHint<'static>> {
    match phase {
        GamePhase::Init => vec![
            StatusBarHint::new("1-3", "Difficulty"),
            StatusBarHint::new("Esc", "Quit"),
        ],
        GamePhase::Active => vec![
            StatusBarHint::new("Type", "Word"),
            StatusBarHint::new("Bksp", "Delete"),
            StatusBarHint::new("Esc", "Quit"),
        ],
        GamePhase::Ended => vec![
            StatusBarHint::new("Enter", "New game"),
            StatusBarHint::new("Esc", "Quit"),
        ],
    }
}
