//! # Navigator
//!
//! The navigation coordinator. Owns the state, the catalog, the gesture
//! classifier and the storage handles, and is the only thing that mutates
//! navigation state.
//!
//! ```text
//! touch events ─▶ GestureClassifier ─▶ Action ─▶ update() ─▶ NavigationState
//!                                                   │
//!                                                Effects
//!                                   ┌───────────────┴───────────────┐
//!                              PersistWriter                 spawned restore read
//!                            (fire-and-forget)          (answers via channel, ticketed)
//! ```
//!
//! All methods that touch storage spawn tokio tasks, so a `Navigator` must
//! live inside a tokio runtime.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;

use crate::core::action::{Action, Effect, update};
use crate::core::catalog::Catalog;
use crate::core::gesture::{Classification, GestureClassifier, GestureSettings, TouchEvent};
use crate::core::screen::{Direction, Screen, UnknownScreen};
use crate::core::state::{NavigationState, RestoreTicket, ScreenPhase, SelectionView};
use crate::persistence::{PersistWriter, PersistedRecord, StateStore, StoreKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// A menu asked for a screen that does not exist.
    UnknownScreen(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::UnknownScreen(name) => write!(f, "unknown screen: {name:?}"),
        }
    }
}

impl std::error::Error for NavError {}

impl From<UnknownScreen> for NavError {
    fn from(e: UnknownScreen) -> Self {
        NavError::UnknownScreen(e.0)
    }
}

/// Answer to a spawned restore read.
#[derive(Debug)]
struct RestoreOutcome {
    screen: Screen,
    ticket: RestoreTicket,
    persisted: Option<String>,
}

pub struct Navigator {
    state: NavigationState,
    catalog: Arc<Catalog>,
    classifier: GestureClassifier,
    record: PersistedRecord,
    writer: PersistWriter,
    restores_tx: mpsc::UnboundedSender<RestoreOutcome>,
    restores_rx: mpsc::UnboundedReceiver<RestoreOutcome>,
    in_flight: usize,
}

impl Navigator {
    /// Navigator on `home`, with nothing read from storage yet.
    pub fn new(catalog: Catalog, settings: GestureSettings, store: Arc<dyn StateStore>) -> Self {
        let (restores_tx, restores_rx) = mpsc::unbounded_channel();
        Self {
            state: NavigationState::default(),
            catalog: Arc::new(catalog),
            classifier: GestureClassifier::new(settings),
            record: PersistedRecord::new(store.clone()),
            writer: PersistWriter::spawn(store),
            restores_tx,
            restores_rx,
            in_flight: 0,
        }
    }

    /// Opens the last visited screen (or `home`) and starts restoring its
    /// selection. The selection may still be loading when this returns;
    /// call [`Navigator::restore`] to wait for it.
    pub async fn bootstrap(
        catalog: Catalog,
        settings: GestureSettings,
        store: Arc<dyn StateStore>,
    ) -> Self {
        let mut navigator = Self::new(catalog, settings, store);
        let last_screen = navigator.record.last_screen().await;
        navigator.dispatch(Action::Launch { last_screen });
        info!("Launched on {}", navigator.current_screen());
        navigator
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_screen(&self) -> Screen {
        self.state.current_screen()
    }

    pub fn selection(&self, screen: Screen) -> SelectionView<'_> {
        self.state.selection(screen)
    }

    pub fn can_navigate(&self, direction: Direction) -> bool {
        self.state.can_navigate(direction)
    }

    pub fn can_page(&self, direction: Direction) -> bool {
        self.state
            .can_page(&self.catalog, self.current_screen(), direction)
    }

    pub fn gesture_settings(&self) -> GestureSettings {
        self.classifier.settings()
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Feeds a touch event for the current screen. Returns the
    /// classification once the touch ends.
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Classification> {
        let selectable = self.current_screen().has_selectable_content();
        let classification = self.classifier.handle(event, selectable)?;
        self.dispatch(Action::Gesture(classification));
        Some(classification)
    }

    pub fn go_to_adjacent_screen(&mut self, direction: Direction) {
        self.dispatch(Action::AdjacentScreen(direction));
    }

    pub fn go_to_screen(&mut self, screen: Screen) {
        self.dispatch(Action::GoToScreen(screen));
    }

    /// Menu jump by name. Unknown names are a caller bug and are reported.
    pub fn go_to_screen_named(&mut self, name: &str) -> Result<(), NavError> {
        let screen = name.parse::<Screen>()?;
        self.go_to_screen(screen);
        Ok(())
    }

    pub fn select_adjacent_item(&mut self, screen: Screen, direction: Direction) {
        self.dispatch(Action::AdjacentItem { screen, direction });
    }

    pub fn select_item(&mut self, screen: Screen, id: &str) {
        self.dispatch(Action::SelectItem {
            screen,
            id: id.to_string(),
        });
    }

    /// Waits until the current screen's selection is resolved.
    pub async fn restore(&mut self) {
        while matches!(
            self.state.phase(self.current_screen()),
            ScreenPhase::Restoring { .. }
        ) && self.in_flight > 0
        {
            let Some(outcome) = self.restores_rx.recv().await else {
                break;
            };
            self.apply_restore(outcome);
        }
    }

    /// Applies restore answers that have already arrived, without waiting.
    /// Returns true if anything was applied.
    pub fn poll_restores(&mut self) -> bool {
        let mut applied = false;
        while let Ok(outcome) = self.restores_rx.try_recv() {
            self.apply_restore(outcome);
            applied = true;
        }
        applied
    }

    /// Waits for every restore read still in flight, stale ones included.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(outcome) = self.restores_rx.recv().await else {
                break;
            };
            self.apply_restore(outcome);
        }
    }

    /// Waits until every write issued so far has been attempted.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Drains pending writes and stops the writer.
    pub async fn shutdown(self) {
        self.writer.shutdown().await;
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    fn dispatch(&mut self, action: Action) {
        let before = self.current_screen();
        let effects = update(&mut self.state, &self.catalog, action);
        if self.current_screen() != before {
            info!("Screen {} → {}", before, self.current_screen());
            self.classifier.reset();
        }
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::PersistScreen(screen) => self.writer.write(StoreKey::LastScreen, screen.name()),
            Effect::PersistSelection { screen, id } => {
                self.writer.write(StoreKey::LastSelectedItem(screen), id)
            }
            Effect::Restore { screen, ticket } => {
                debug!("Restoring {screen} (#{ticket})");
                let record = self.record.clone();
                let tx = self.restores_tx.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let persisted = record.last_selected_item(screen).await;
                    // Receiver only drops with the navigator itself.
                    let _ = tx.send(RestoreOutcome {
                        screen,
                        ticket,
                        persisted,
                    });
                });
            }
        }
    }

    fn apply_restore(&mut self, outcome: RestoreOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let RestoreOutcome {
            screen,
            ticket,
            persisted,
        } = outcome;
        self.dispatch(Action::RestoreResolved {
            screen,
            ticket,
            persisted,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::test_support::{FailingStore, three_crew_catalog};

    fn touch_swipe(navigator: &mut Navigator, delta: f32, elapsed: u64) -> Option<Classification> {
        navigator.handle_touch(TouchEvent::Start {
            position: 300.0,
            at_ms: 0,
        });
        let at_ms = elapsed / 2;
        navigator.handle_touch(TouchEvent::Move { at_ms });
        navigator.handle_touch(TouchEvent::End {
            position: 300.0 + delta,
            at_ms: elapsed,
        })
    }

    #[tokio::test]
    async fn test_bootstrap_cold_start_opens_home() {
        let store = Arc::new(MemoryStore::new());
        let mut navigator =
            Navigator::bootstrap(Catalog::bundled(), GestureSettings::default(), store).await;
        navigator.restore().await;
        assert_eq!(navigator.current_screen(), Screen::Home);
        assert_eq!(navigator.selection(Screen::Home), SelectionView::NotApplicable);
    }

    #[tokio::test]
    async fn test_bootstrap_restores_screen_and_selection() {
        let store = Arc::new(MemoryStore::with_entries([
            ("lastScreen", "technology"),
            ("lastSelectedItemId:technology", "Spaceport"),
        ]));
        let mut navigator =
            Navigator::bootstrap(Catalog::bundled(), GestureSettings::default(), store).await;
        assert_eq!(navigator.current_screen(), Screen::Technology);
        navigator.restore().await;
        assert_eq!(
            navigator.selection(Screen::Technology),
            SelectionView::Selected("Spaceport")
        );
    }

    #[tokio::test]
    async fn test_failing_store_degrades_to_defaults() {
        let mut navigator = Navigator::bootstrap(
            Catalog::bundled(),
            GestureSettings::default(),
            Arc::new(FailingStore),
        )
        .await;
        assert_eq!(navigator.current_screen(), Screen::Home);

        navigator.go_to_screen(Screen::Crew);
        navigator.restore().await;
        assert_eq!(
            navigator.selection(Screen::Crew),
            SelectionView::Selected("Douglas Hurley")
        );
        navigator.flush().await;
    }

    #[tokio::test]
    async fn test_go_to_screen_named_rejects_unknown() {
        let mut navigator = Navigator::new(
            Catalog::bundled(),
            GestureSettings::default(),
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(
            navigator.go_to_screen_named("bridge"),
            Err(NavError::UnknownScreen("bridge".to_string()))
        );
        assert_eq!(navigator.current_screen(), Screen::Home);
        assert_eq!(navigator.go_to_screen_named("Crew"), Ok(()));
        assert_eq!(navigator.current_screen(), Screen::Crew);
    }

    #[tokio::test]
    async fn test_touch_flow_pages_crew() {
        let store = Arc::new(MemoryStore::with_entries([
            ("lastScreen", "crew"),
            ("lastSelectedItemId:crew", "B"),
        ]));
        let mut navigator =
            Navigator::bootstrap(three_crew_catalog(), GestureSettings::default(), store.clone())
                .await;
        navigator.restore().await;

        let result = touch_swipe(&mut navigator, -60.0, 150);
        assert_eq!(result, Some(Classification::ContentSwipe(Direction::Next)));
        assert_eq!(navigator.selection(Screen::Crew), SelectionView::Selected("C"));
        assert!(!navigator.can_page(Direction::Next));

        navigator.flush().await;
        assert_eq!(
            store.snapshot().get("lastSelectedItemId:crew").map(String::as_str),
            Some("C")
        );
    }

    #[tokio::test]
    async fn test_screen_change_resets_touch_in_progress() {
        let mut navigator = Navigator::new(
            Catalog::bundled(),
            GestureSettings::default(),
            Arc::new(MemoryStore::new()),
        );
        navigator.handle_touch(TouchEvent::Start {
            position: 0.0,
            at_ms: 0,
        });
        navigator.go_to_screen(Screen::Technology);
        // The end belongs to a touch started on another screen.
        let result = navigator.handle_touch(TouchEvent::End {
            position: 400.0,
            at_ms: 900,
        });
        assert_eq!(result, Some(Classification::NoOp));
        assert_eq!(navigator.current_screen(), Screen::Technology);
    }

    #[tokio::test]
    async fn test_poll_restores_applies_arrived_answers() {
        let mut navigator = Navigator::new(
            three_crew_catalog(),
            GestureSettings::default(),
            Arc::new(MemoryStore::with_entries([("lastSelectedItemId:crew", "C")])),
        );
        navigator.go_to_screen(Screen::Crew);
        assert_eq!(navigator.selection(Screen::Crew), SelectionView::Loading);

        while !navigator.poll_restores() {
            tokio::task::yield_now().await;
        }
        assert_eq!(navigator.selection(Screen::Crew), SelectionView::Selected("C"));
    }
}
