//! Ratatui backend that overlays one kitty-protocol image on top of the cell grid.
//!
//! Rendering code publishes the sprite placement through [`place_sprite`]; the
//! backend emits the escape sequence after each draw, and only re-sends it when
//! the placement changed since the last frame.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crossterm::{cursor::MoveTo, queue, style::Print};
use ratatui::backend::{Backend, ClearType, CrosstermBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};

/// Kitty command that deletes every visible image.
const DELETE_ALL_IMAGES: &str = "\x1b_Ga=d,d=a\x1b\\";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpritePlacement {
    pub x: u16,
    pub y: u16,
    pub sequence: String,
}

#[derive(Default, Debug)]
pub struct SpriteSlot {
    placement: Option<SpritePlacement>,
}

impl SpriteSlot {
    pub fn set(&mut self, placement: SpritePlacement) {
        self.placement = Some(placement);
    }

    pub fn clear(&mut self) {
        self.placement = None;
    }

    pub fn placement(&self) -> Option<&SpritePlacement> {
        self.placement.as_ref()
    }
}

static SLOT: OnceLock<Arc<Mutex<SpriteSlot>>> = OnceLock::new();

pub fn sprite_slot() -> Arc<Mutex<SpriteSlot>> {
    SLOT.get_or_init(|| Arc::new(Mutex::new(SpriteSlot::default())))
        .clone()
}

pub fn place_sprite(x: u16, y: u16, sequence: String) {
    let slot = sprite_slot();
    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
    slot.set(SpritePlacement { x, y, sequence });
}

pub fn clear_sprite() {
    let slot = sprite_slot();
    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
    slot.clear();
}

#[derive(Debug, Clone)]
pub struct SpriteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    slot: Arc<Mutex<SpriteSlot>>,
    drawn: Option<SpritePlacement>,
}

impl<W: Write> SpriteBackend<W> {
    pub fn new(writer: W, slot: Arc<Mutex<SpriteSlot>>) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            slot,
            drawn: None,
        }
    }
}

impl<W: Write> Backend for SpriteBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.inner.draw(content)?;
        let wanted = {
            let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.placement().cloned()
        };
        if wanted == self.drawn {
            return Ok(());
        }
        if self.drawn.is_some() {
            queue!(self.inner, Print(DELETE_ALL_IMAGES))?;
        }
        if let Some(placement) = &wanted {
            queue!(
                self.inner,
                MoveTo(placement.x, placement.y),
                Print(&placement.sequence)
            )?;
        }
        self.drawn = wanted;
        Ok(())
    }

    fn append_lines(&mut self, n: u16) -> io::Result<()> {
        self.inner.append_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.drawn = None;
        queue!(self.inner, Print(DELETE_ALL_IMAGES))?;
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

impl<W: Write> Write for SpriteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}
