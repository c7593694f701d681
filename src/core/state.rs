//! # Navigation State
//!
//! The single source of truth renderers read from.
//!
//! ```text
//! NavigationState
//! ├── current_screen: Screen                 // always one of Screen::ALL
//! ├── selections: HashMap<Screen, String>    // selectable screens only
//! ├── phases: HashMap<Screen, ScreenPhase>   // per-screen lifecycle
//! ├── pending: HashMap<Screen, RestoreTicket>// latest outstanding restore
//! └── next_ticket: RestoreTicket
//! ```
//!
//! Per-screen lifecycle:
//!
//! ```text
//! Unmounted ──activate──▶ Restoring{ticket} ──resolved──▶ Ready
//!     ▲                          │                          │
//!     └──────────── leave ───────┴──────────────────────────┘
//! ```
//!
//! State changes only happen through `update(state, catalog, action)` in
//! action.rs. Fields are crate-visible for that reason; everything outside
//! the crate reads through the accessors here.

use std::collections::HashMap;

use crate::core::catalog::Catalog;
use crate::core::screen::{Direction, Screen};

/// Identifies one restore request. Only the latest ticket per screen applies.
pub type RestoreTicket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Unmounted,
    Restoring { ticket: RestoreTicket },
    Ready,
}

/// What a renderer should show for a screen's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionView<'a> {
    /// The screen has no selectable content.
    NotApplicable,
    /// Not resolved yet. Render a neutral loading indicator.
    Loading,
    Selected(&'a str),
}

#[derive(Debug, Clone)]
pub struct NavigationState {
    pub(crate) current_screen: Screen,
    pub(crate) selections: HashMap<Screen, String>,
    pub(crate) phases: HashMap<Screen, ScreenPhase>,
    pub(crate) pending: HashMap<Screen, RestoreTicket>,
    pub(crate) next_ticket: RestoreTicket,
}

impl NavigationState {
    /// Fresh state with `initial` as the current screen, not yet activated.
    pub fn new(initial: Screen) -> Self {
        Self {
            current_screen: initial,
            selections: HashMap::new(),
            phases: HashMap::new(),
            pending: HashMap::new(),
            next_ticket: 1,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.current_screen
    }

    pub fn phase(&self, screen: Screen) -> ScreenPhase {
        self.phases
            .get(&screen)
            .copied()
            .unwrap_or(ScreenPhase::Unmounted)
    }

    pub fn selection(&self, screen: Screen) -> SelectionView<'_> {
        if !screen.has_selectable_content() {
            return SelectionView::NotApplicable;
        }
        match self.selections.get(&screen) {
            Some(id) => SelectionView::Selected(id),
            None => SelectionView::Loading,
        }
    }

    pub fn selected_id(&self, screen: Screen) -> Option<&str> {
        self.selections.get(&screen).map(String::as_str)
    }

    /// Ticket of the restore still outstanding for `screen`, if any.
    pub fn pending_restore(&self, screen: Screen) -> Option<RestoreTicket> {
        self.pending.get(&screen).copied()
    }

    /// Boundary flag: whether adjacent navigation in `direction` would move.
    pub fn can_navigate(&self, direction: Direction) -> bool {
        self.current_screen.adjacent(direction).is_some()
    }

    /// Boundary flag: whether paging `screen` in `direction` would move.
    pub fn can_page(&self, catalog: &Catalog, screen: Screen, direction: Direction) -> bool {
        self.selected_id(screen)
            .and_then(|id| catalog.adjacent(screen, id, direction))
            .is_some()
    }

    pub(crate) fn issue_ticket(&mut self) -> RestoreTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    pub(crate) fn set_phase(&mut self, screen: Screen, phase: ScreenPhase) {
        self.phases.insert(screen, phase);
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = NavigationState::default();
        assert_eq!(state.current_screen(), Screen::Home);
        assert_eq!(state.phase(Screen::Home), ScreenPhase::Unmounted);
        assert_eq!(state.selection(Screen::Home), SelectionView::NotApplicable);
        assert_eq!(state.selection(Screen::Crew), SelectionView::Loading);
    }

    #[test]
    fn test_boundary_flags() {
        let state = NavigationState::new(Screen::Home);
        assert!(!state.can_navigate(Direction::Previous));
        assert!(state.can_navigate(Direction::Next));

        let state = NavigationState::new(Screen::Technology);
        assert!(state.can_navigate(Direction::Previous));
        assert!(!state.can_navigate(Direction::Next));
    }

    #[test]
    fn test_can_page_needs_resolved_selection() {
        let catalog = Catalog::bundled();
        let mut state = NavigationState::new(Screen::Crew);
        assert!(!state.can_page(&catalog, Screen::Crew, Direction::Next));

        state
            .selections
            .insert(Screen::Crew, "Douglas Hurley".to_string());
        assert!(state.can_page(&catalog, Screen::Crew, Direction::Next));
        assert!(!state.can_page(&catalog, Screen::Crew, Direction::Previous));
    }

    #[test]
    fn test_tickets_increase() {
        let mut state = NavigationState::default();
        let first = state.issue_ticket();
        let second = state.issue_ticket();
        assert!(second > first);
    }
}
