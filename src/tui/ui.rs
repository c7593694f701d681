use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::screen::Direction;
use crate::navigator::Navigator;
use crate::tui::component::Component;
use crate::tui::components::{NavBar, ScreenView};

/// Splits the frame into nav bar, screen body and footer.
pub fn layout_areas(frame_area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame_area)
}

pub fn draw_ui(frame: &mut Frame, navigator: &Navigator) {
    let [nav_area, body_area, footer_area] = layout_areas(frame.area());
    let screen = navigator.current_screen();

    NavBar::new(screen).render(frame, nav_area);
    ScreenView::new(
        screen,
        navigator.selection(screen),
        navigator.catalog().items(screen),
    )
    .render(frame, body_area);

    frame.render_widget(Paragraph::new(footer_line(navigator)), footer_area);
}

fn footer_line(navigator: &Navigator) -> Line<'static> {
    let hint = |enabled: bool, text: &'static str| {
        let style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };
        Span::styled(text, style)
    };
    let muted = Style::default().fg(Color::DarkGray);

    Line::from(vec![
        Span::raw(" "),
        hint(navigator.can_navigate(Direction::Previous), "‹ prev screen"),
        Span::styled(" | ", muted),
        hint(navigator.can_navigate(Direction::Next), "next screen ›"),
        Span::styled("   ", muted),
        hint(navigator.can_page(Direction::Previous), "▲"),
        hint(navigator.can_page(Direction::Next), "▼"),
        Span::styled(
            "   hold+drag: screens · flick: items · 1-9 pick · q quit",
            muted,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::core::catalog::Catalog;
    use crate::core::gesture::GestureSettings;
    use crate::core::screen::Screen;
    use crate::persistence::MemoryStore;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_draw_ui_shows_selection() {
        let store = Arc::new(MemoryStore::with_entries([
            ("lastScreen", "crew"),
            ("lastSelectedItemId:crew", "Victor Glover"),
        ]));
        let mut navigator =
            Navigator::bootstrap(Catalog::bundled(), GestureSettings::default(), store).await;
        navigator.restore().await;

        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|f| draw_ui(f, &navigator)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("MEET YOUR CREW"));
        assert!(text.contains("● 3 Victor Glover"));
        assert!(text.contains("○ 1 Douglas Hurley"));
    }

    #[tokio::test]
    async fn test_draw_ui_while_loading() {
        let mut navigator = Navigator::new(
            Catalog::bundled(),
            GestureSettings::default(),
            Arc::new(MemoryStore::new()),
        );
        navigator.go_to_screen(Screen::Technology);

        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|f| draw_ui(f, &navigator)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("SPACE LAUNCH 101"));
        assert!(!text.contains("Launch vehicle"));
    }

    #[test]
    fn test_layout_reserves_bar_and_footer() {
        let [nav, body, footer] = layout_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(nav.height, 1);
        assert_eq!(footer.height, 1);
        assert_eq!(body.height, 22);
        assert_eq!(body.y, 1);
    }
}
