//! # Actions
//!
//! Everything that can happen to navigation becomes an `Action`.
//! Finger lifts after a quick flick? That's `Action::Gesture(ContentSwipe(Next))`.
//! Storage answers a restore? That's `Action::RestoreResolved { .. }`.
//!
//! The `update()` function mutates the state and returns the `Effect`s the
//! caller must carry out. No I/O here; the navigator runs the effects.
//!
//! ```text
//! State + Action  →  update()  →  New State + [Effect]
//! ```
//!
//! Boundary requests (past the first/last screen or item), unknown item ids
//! and stale restore results are silent no-ops.

use log::debug;

use crate::core::catalog::Catalog;
use crate::core::gesture::Classification;
use crate::core::screen::{Direction, Screen};
use crate::core::state::{NavigationState, RestoreTicket, ScreenPhase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// First activation at startup. `last_screen` is the raw persisted value.
    Launch { last_screen: Option<String> },
    /// Output of the gesture classifier for the current screen.
    Gesture(Classification),
    AdjacentScreen(Direction),
    /// Menu jump.
    GoToScreen(Screen),
    AdjacentItem { screen: Screen, direction: Direction },
    /// Direct tap on an item.
    SelectItem { screen: Screen, id: String },
    RestoreResolved {
        screen: Screen,
        ticket: RestoreTicket,
        persisted: Option<String>,
    },
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write `lastScreen`.
    PersistScreen(Screen),
    /// Write `lastSelectedItemId:<screen>`.
    PersistSelection { screen: Screen, id: String },
    /// Read the persisted selection for `screen` and answer with
    /// `Action::RestoreResolved` carrying the same ticket.
    Restore { screen: Screen, ticket: RestoreTicket },
}

pub fn update(state: &mut NavigationState, catalog: &Catalog, action: Action) -> Vec<Effect> {
    debug!("update: {:?}", action);
    match action {
        Action::Launch { last_screen } => {
            let screen = last_screen
                .as_deref()
                .and_then(|name| name.parse::<Screen>().ok())
                .unwrap_or(Screen::Home);
            state.current_screen = screen;
            activate(state, screen).into_iter().collect()
        }
        Action::Gesture(Classification::NoOp) => Vec::new(),
        Action::Gesture(Classification::Navigate(direction)) => adjacent_screen(state, direction),
        Action::Gesture(Classification::ContentSwipe(direction)) => {
            let screen = state.current_screen;
            adjacent_item(state, catalog, screen, direction)
        }
        Action::AdjacentScreen(direction) => adjacent_screen(state, direction),
        Action::GoToScreen(screen) => enter(state, screen),
        Action::AdjacentItem { screen, direction } => {
            adjacent_item(state, catalog, screen, direction)
        }
        Action::SelectItem { screen, id } => select_item(state, catalog, screen, id),
        Action::RestoreResolved {
            screen,
            ticket,
            persisted,
        } => {
            resolve_restore(state, catalog, screen, ticket, persisted);
            Vec::new()
        }
    }
}

fn adjacent_screen(state: &mut NavigationState, direction: Direction) -> Vec<Effect> {
    match state.current_screen.adjacent(direction) {
        Some(screen) => enter(state, screen),
        None => {
            debug!(
                "Already at {} screen {}, ignoring",
                if direction == Direction::Next { "last" } else { "first" },
                state.current_screen
            );
            Vec::new()
        }
    }
}

/// Leaves the current screen and activates `screen`.
fn enter(state: &mut NavigationState, screen: Screen) -> Vec<Effect> {
    if screen == state.current_screen {
        return Vec::new();
    }
    let previous = state.current_screen;
    // A pending restore for the screen being left stays outstanding; its
    // result still lands if nothing newer was issued.
    state.set_phase(previous, ScreenPhase::Unmounted);
    state.current_screen = screen;

    let mut effects = vec![Effect::PersistScreen(screen)];
    effects.extend(activate(state, screen));
    effects
}

/// Moves `screen` out of `Unmounted`, requesting a restore when its
/// selection has never been resolved.
fn activate(state: &mut NavigationState, screen: Screen) -> Option<Effect> {
    if !screen.has_selectable_content() || state.selections.contains_key(&screen) {
        state.set_phase(screen, ScreenPhase::Ready);
        return None;
    }
    let ticket = state.issue_ticket();
    state.pending.insert(screen, ticket);
    state.set_phase(screen, ScreenPhase::Restoring { ticket });
    Some(Effect::Restore { screen, ticket })
}

fn adjacent_item(
    state: &mut NavigationState,
    catalog: &Catalog,
    screen: Screen,
    direction: Direction,
) -> Vec<Effect> {
    let Some(current) = state.selected_id(screen) else {
        debug!("No resolved selection on {screen}, ignoring {} swipe", direction.label());
        return Vec::new();
    };
    let Some(target) = catalog.adjacent(screen, current, direction) else {
        return Vec::new();
    };
    let id = target.to_string();
    state.selections.insert(screen, id.clone());
    vec![Effect::PersistSelection { screen, id }]
}

fn select_item(
    state: &mut NavigationState,
    catalog: &Catalog,
    screen: Screen,
    id: String,
) -> Vec<Effect> {
    if !catalog.contains(screen, &id) {
        debug!("Item {id:?} is not on {screen}, ignoring");
        return Vec::new();
    }
    // An explicit choice beats whatever a pending restore would bring back.
    state.pending.remove(&screen);
    if matches!(state.phase(screen), ScreenPhase::Restoring { .. }) {
        state.set_phase(screen, ScreenPhase::Ready);
    }
    if state.selected_id(screen) == Some(id.as_str()) {
        return Vec::new();
    }
    state.selections.insert(screen, id.clone());
    vec![Effect::PersistSelection { screen, id }]
}

fn resolve_restore(
    state: &mut NavigationState,
    catalog: &Catalog,
    screen: Screen,
    ticket: RestoreTicket,
    persisted: Option<String>,
) {
    if state.pending.get(&screen) != Some(&ticket) {
        debug!("Discarding superseded restore #{ticket} for {screen}");
        return;
    }
    state.pending.remove(&screen);

    let selection = match persisted {
        Some(id) if catalog.contains(screen, &id) => Some(id),
        Some(id) => {
            debug!("Persisted item {id:?} no longer on {screen}, falling back to first");
            catalog.first(screen).map(str::to_string)
        }
        None => catalog.first(screen).map(str::to_string),
    };
    if let Some(id) = selection {
        state.selections.insert(screen, id);
    }
    if matches!(state.phase(screen), ScreenPhase::Restoring { .. }) {
        state.set_phase(screen, ScreenPhase::Ready);
    }
}
