//! # Screens
//!
//! The fixed, ordered sequence of top-level views:
//!
//! ```text
//! home (0) ←→ destination (1) ←→ crew (2) ←→ technology (3)
//! ```
//!
//! Order is part of the contract: adjacent navigation walks this sequence
//! and never wraps around.

use std::fmt;
use std::str::FromStr;

/// One of the fixed top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Screen {
    Home,
    Destination,
    Crew,
    Technology,
}

impl Screen {
    /// Every screen, in navigation order.
    pub const ALL: [Screen; 4] = [
        Screen::Home,
        Screen::Destination,
        Screen::Crew,
        Screen::Technology,
    ];

    /// Unique key, also used as the persisted `lastScreen` value.
    pub fn name(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Destination => "destination",
            Screen::Crew => "crew",
            Screen::Technology => "technology",
        }
    }

    /// Index in [`Screen::ALL`].
    pub fn position(self) -> usize {
        match self {
            Screen::Home => 0,
            Screen::Destination => 1,
            Screen::Crew => 2,
            Screen::Technology => 3,
        }
    }

    /// Whether this screen carries a pageable item list.
    pub fn has_selectable_content(self) -> bool {
        !matches!(self, Screen::Home)
    }

    /// Numbered heading used by the menu ("00 HOME", "02 CREW", ...).
    pub fn title(self) -> String {
        format!("{:02} {}", self.position(), self.name().to_uppercase())
    }

    /// Screen one step away in `direction`, or `None` at either end.
    pub fn adjacent(self, direction: Direction) -> Option<Screen> {
        let position = match direction {
            Direction::Previous => self.position().checked_sub(1)?,
            Direction::Next => self.position() + 1,
        };
        Screen::ALL.get(position).copied()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a name does not match any screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScreen(pub String);

impl fmt::Display for UnknownScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown screen: {:?}", self.0)
    }
}

impl std::error::Error for UnknownScreen {}

impl FromStr for Screen {
    type Err = UnknownScreen;

    /// Case-insensitive, so older records written as `"Destination"` still resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Screen::ALL
            .into_iter()
            .find(|screen| screen.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

/// Step direction, shared by screen navigation and item paging.
///
/// A positive swipe delta (finger moving right) means `Previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Maps a signed swipe delta to a direction. Zero has no direction.
    pub fn from_delta(delta: f32) -> Option<Direction> {
        if delta > 0.0 {
            Some(Direction::Previous)
        } else if delta < 0.0 {
            Some(Direction::Next)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Previous => "previous",
            Direction::Next => "next",
        }
    }
}
