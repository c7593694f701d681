use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::core::screen::{Direction, Screen};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Resize,

    // Touch stand-ins (left mouse button), as (column, row)
    TouchStart(u16, u16),
    TouchMove(u16, u16),
    TouchEnd(u16, u16),

    // Keyboard shortcuts for the same operations
    AdjacentScreen(Direction),
    AdjacentItem(Direction),
    Menu(Screen),
    /// Zero-based item index on the current screen.
    ItemTap(usize),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(map_event(event::read()?))
}

/// Translates a raw crossterm event. Unmapped input is `None`.
pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Kitty protocol reports releases too; act on presses only
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
                (_, KeyCode::Left) => Some(TuiEvent::AdjacentScreen(Direction::Previous)),
                (_, KeyCode::Right) => Some(TuiEvent::AdjacentScreen(Direction::Next)),
                (_, KeyCode::Up) => Some(TuiEvent::AdjacentItem(Direction::Previous)),
                (_, KeyCode::Down) => Some(TuiEvent::AdjacentItem(Direction::Next)),
                (_, KeyCode::Char('h')) => Some(TuiEvent::Menu(Screen::Home)),
                (_, KeyCode::Char('d')) => Some(TuiEvent::Menu(Screen::Destination)),
                (_, KeyCode::Char('c')) => Some(TuiEvent::Menu(Screen::Crew)),
                (_, KeyCode::Char('t')) => Some(TuiEvent::Menu(Screen::Technology)),
                (_, KeyCode::Char(c @ '1'..='9')) => {
                    c.to_digit(10).map(|digit| TuiEvent::ItemTap(digit as usize - 1))
                }
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => {
            let (col, row) = (mouse_event.column, mouse_event.row);
            match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::TouchStart(col, row)),
                MouseEventKind::Drag(MouseButton::Left) => Some(TuiEvent::TouchMove(col, row)),
                MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::TouchEnd(col, row)),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
