//! # TUI Adapter
//!
//! The ratatui-specific layer. Stands in for a touch screen: the left mouse
//! button is the finger, so press/drag/release become touch start/move/end
//! along the horizontal axis. Keys and clicks act as menu and item taps.
//!
//! This is the only module that knows about ratatui and crossterm. It never
//! mutates navigation state itself; every input goes through the
//! [`Navigator`], and rendering reads back whatever it exposes.
//!
//! ## Redraw Strategy
//!
//! The loop redraws only after input, a terminal resize, or a restore
//! answer arriving from storage. Between events it sleeps up to 100ms.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;

use crate::core::config::{ResolvedConfig, StorageTarget};
use crate::core::gesture::{Classification, TouchEvent};
use crate::core::screen::Direction;
use crate::core::state::SelectionView;
use crate::navigator::Navigator;
use crate::persistence::{FileStore, MemoryStore, StateStore};
use crate::tui::components::{NavBar, ScreenView};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of navigation state)
pub struct TuiState {
    /// Terminal columns → touch units.
    pub units_per_column: f32,
    /// Where the current press started, for telling taps from swipes.
    pub press_origin: Option<(u16, u16)>,
    /// Area of the last drawn frame, used for hit testing.
    pub frame_area: Rect,
    clock: Instant,
}

impl TuiState {
    pub fn new(units_per_column: f32) -> Self {
        Self {
            units_per_column,
            press_origin: None,
            frame_area: Rect::default(),
            clock: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    fn position(&self, col: u16) -> f32 {
        col as f32 * self.units_per_column
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build a store from the resolved storage target.
pub fn build_store(config: &ResolvedConfig) -> Arc<dyn StateStore> {
    match &config.storage {
        StorageTarget::File(path) => {
            info!("Persisting navigation state to {}", path.display());
            Arc::new(FileStore::new(path))
        }
        StorageTarget::Memory => {
            info!("Keeping navigation state in memory only");
            Arc::new(MemoryStore::new())
        }
    }
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let store = build_store(&config);
    let mut navigator =
        Navigator::bootstrap(config.catalog.clone(), config.gesture, store).await;
    let mut tui = TuiState::new(config.units_per_column);

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(&mut terminal, &mut navigator, &mut tui),
        Err(e) => Err(e),
    };
    ratatui::restore();

    navigator.shutdown().await;
    info!("Voyage shut down");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    navigator: &mut Navigator,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if navigator.poll_restores() {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| {
                tui.frame_area = f.area();
                ui::draw_ui(f, navigator);
            })?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(100))?;
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut pending = first_event;
        while let Some(event) = pending {
            if handle_event(navigator, tui, event) == Flow::Quit {
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_event(navigator: &mut Navigator, tui: &mut TuiState, event: TuiEvent) -> Flow {
    let screen = navigator.current_screen();
    match event {
        TuiEvent::Quit => return Flow::Quit,
        TuiEvent::Resize => {}
        TuiEvent::TouchStart(col, row) => {
            tui.press_origin = Some((col, row));
            navigator.handle_touch(TouchEvent::Start {
                position: tui.position(col),
                at_ms: tui.now_ms(),
            });
        }
        TuiEvent::TouchMove(_, _) => {
            let at_ms = tui.now_ms();
            navigator.handle_touch(TouchEvent::Move { at_ms });
        }
        TuiEvent::TouchEnd(col, row) => {
            let origin = tui.press_origin.take();
            let classification = navigator.handle_touch(TouchEvent::End {
                position: tui.position(col),
                at_ms: tui.now_ms(),
            });
            if classification == Some(Classification::NoOp) && origin == Some((col, row)) {
                tap(navigator, tui.frame_area, col, row);
            }
        }
        TuiEvent::AdjacentScreen(direction) => navigator.go_to_adjacent_screen(direction),
        TuiEvent::AdjacentItem(direction) => navigator.select_adjacent_item(screen, direction),
        TuiEvent::Menu(target) => navigator.go_to_screen(target),
        TuiEvent::ItemTap(index) => {
            if let Some(id) = navigator.catalog().items(screen).get(index).cloned() {
                navigator.select_item(screen, &id);
            }
        }
    }
    Flow::Continue
}

/// Routes a stationary press to the menu entry or item under it.
fn tap(navigator: &mut Navigator, frame_area: Rect, col: u16, row: u16) {
    let [nav_area, body_area, _] = ui::layout_areas(frame_area);
    if let Some(target) = NavBar::hit_test(nav_area, col, row) {
        debug!("Menu tap on {target}");
        navigator.go_to_screen(target);
        return;
    }
    let screen = navigator.current_screen();
    // Nothing listed yet, only the loading line.
    if !matches!(navigator.selection(screen), SelectionView::Selected(_)) {
        return;
    }
    let items = navigator.catalog().items(screen);
    if let Some(id) = ScreenView::hit_test(body_area, items.len(), row)
        .and_then(|index| items.get(index))
        .cloned()
    {
        debug!("Item tap on {id:?}");
        navigator.select_item(screen, &id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::gesture::GestureSettings;
    use crate::core::screen::Screen;

    async fn crew_navigator() -> Navigator {
        let store = Arc::new(MemoryStore::with_entries([("lastScreen", "crew")]));
        let mut navigator =
            Navigator::bootstrap(Catalog::bundled(), GestureSettings::default(), store).await;
        navigator.restore().await;
        navigator
    }

    fn tui_state() -> TuiState {
        let mut tui = TuiState::new(8.0);
        tui.frame_area = Rect::new(0, 0, 100, 20);
        tui
    }

    #[tokio::test]
    async fn test_click_on_item_selects_it() {
        let mut navigator = crew_navigator().await;
        let mut tui = tui_state();
        // body starts at row 1: border, heading, blank, then items from row 4
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchStart(5, 6));
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchEnd(5, 6));
        assert_eq!(
            navigator.selection(Screen::Crew),
            SelectionView::Selected("Victor Glover")
        );
    }

    #[tokio::test]
    async fn test_click_on_loading_line_keeps_restore() {
        let store = Arc::new(MemoryStore::with_entries([(
            "lastSelectedItemId:crew",
            "Victor Glover",
        )]));
        let mut navigator =
            Navigator::new(Catalog::bundled(), GestureSettings::default(), store.clone());
        navigator.go_to_screen(Screen::Crew);
        assert_eq!(navigator.selection(Screen::Crew), SelectionView::Loading);

        let mut tui = tui_state();
        // Row 4 holds the loading line, where the first item will be drawn.
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchStart(1, 4));
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchEnd(1, 4));
        navigator.settle().await;

        assert_eq!(
            navigator.selection(Screen::Crew),
            SelectionView::Selected("Victor Glover")
        );
        navigator.flush().await;
        assert_eq!(
            store.snapshot().get("lastSelectedItemId:crew").map(String::as_str),
            Some("Victor Glover")
        );
    }

    #[tokio::test]
    async fn test_click_on_menu_jumps() {
        let mut navigator = crew_navigator().await;
        let mut tui = tui_state();
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchStart(2, 0));
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchEnd(2, 0));
        assert_eq!(navigator.current_screen(), Screen::Home);
    }

    #[tokio::test]
    async fn test_quick_horizontal_drag_pages_items() {
        let mut navigator = crew_navigator().await;
        let mut tui = tui_state();
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchStart(40, 8));
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchMove(35, 8));
        // 10 columns × 8 units = 80 units to the left
        handle_event(&mut navigator, &mut tui, TuiEvent::TouchEnd(30, 8));
        assert_eq!(
            navigator.selection(Screen::Crew),
            SelectionView::Selected("Mark Shuttleworth")
        );
        assert_eq!(navigator.current_screen(), Screen::Crew);
    }

    #[tokio::test]
    async fn test_keys_drive_navigator() {
        let mut navigator = crew_navigator().await;
        let mut tui = tui_state();
        handle_event(&mut navigator, &mut tui, TuiEvent::ItemTap(3));
        assert_eq!(
            navigator.selection(Screen::Crew),
            SelectionView::Selected("Anousheh Ansari")
        );
        handle_event(&mut navigator, &mut tui, TuiEvent::AdjacentItem(Direction::Previous));
        assert_eq!(
            navigator.selection(Screen::Crew),
            SelectionView::Selected("Victor Glover")
        );
        handle_event(&mut navigator, &mut tui, TuiEvent::AdjacentScreen(Direction::Next));
        assert_eq!(navigator.current_screen(), Screen::Technology);
        assert_eq!(
            handle_event(&mut navigator, &mut tui, TuiEvent::Quit),
            Flow::Quit
        );
    }
}
