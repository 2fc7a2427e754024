use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};
use tui_dispatch::{DataResource, EventKind};

use super::{Component, TEXT_DIM};
use crate::action::Action;
use crate::sprite::{self, SpriteData};
use crate::sprite_backend;

/// Size multiplier at which the sprite fills its whole area.
pub const MAX_SPRITE_SCALE: f32 = 3.0;

pub struct SpriteViewProps<'a> {
    pub sprite: &'a DataResource<SpriteData>,
    /// Current size multiplier, 1.0 at session start.
    pub scale: f32,
    pub visible: bool,
}

#[derive(Default)]
pub struct SpriteView;

impl Component<Action> for SpriteView {
    type Props<'a> = SpriteViewProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if !props.visible || area.width == 0 || area.height == 0 {
            sprite_backend::clear_sprite();
            return;
        }
        if let DataResource::Loaded(sprite) = props.sprite {
            let (cols, rows) = sprite::sprite_fit_scaled(
                sprite,
                area.width,
                area.height,
                props.scale,
                MAX_SPRITE_SCALE,
            );
            match sprite::kitty_sequence(sprite, cols, rows) {
                Ok(sequence) => {
                    let x = area.x.saturating_add(area.width.saturating_sub(cols) / 2);
                    let y = area.y.saturating_add(area.height.saturating_sub(rows) / 2);
                    sprite_backend::place_sprite(x, y, sequence);
                }
                Err(error) => {
                    tracing::debug!(%error, "sprite sequence failed");
                    sprite_backend::clear_sprite();
                }
            }
            return;
        }

        sprite_backend::clear_sprite();
        let content = match props.sprite {
            DataResource::Empty => "[no sprite]",
            DataResource::Loading => "[loading sprite]",
            DataResource::Failed(_) => "[sprite unavailable]",
            DataResource::Loaded(_) => return,
        };
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y, area.width, 1);
        let paragraph = Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(TEXT_DIM));
        frame.render_widget(paragraph, line_area);
    }
}
