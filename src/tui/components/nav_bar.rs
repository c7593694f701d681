//! # Nav Bar Component
//!
//! Single-row menu: ` 00 HOME  01 DESTINATION  02 CREW  03 TECHNOLOGY`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::screen::Screen;
use crate::tui::component::Component;

const LEFT_PAD: u16 = 1;
const GAP: u16 = 2;

pub struct NavBar {
    pub current: Screen,
}

impl NavBar {
    pub fn new(current: Screen) -> Self {
        Self { current }
    }

    /// Column span `[start, end)` of each menu entry, relative to the bar.
    fn entry_spans() -> Vec<(Screen, u16, u16)> {
        let mut x = LEFT_PAD;
        Screen::ALL
            .into_iter()
            .map(|screen| {
                let width = screen.title().len() as u16;
                let span = (screen, x, x + width);
                x += width + GAP;
                span
            })
            .collect()
    }

    /// Menu entry under `(col, row)`, if any.
    pub fn hit_test(area: Rect, col: u16, row: u16) -> Option<Screen> {
        if row != area.y || col < area.x {
            return None;
        }
        let rel = col - area.x;
        Self::entry_spans()
            .into_iter()
            .find(|(_, start, end)| (*start..*end).contains(&rel))
            .map(|(screen, _, _)| screen)
    }
}

impl Component for NavBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ".repeat(LEFT_PAD as usize))];
        for (index, screen) in Screen::ALL.into_iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" ".repeat(GAP as usize)));
            }
            let style = if screen == self.current {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(screen.title(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_finds_entries() {
        let area = Rect::new(0, 0, 80, 1);
        // " 00 HOME  01 DESTINATION  02 CREW"
        assert_eq!(NavBar::hit_test(area, 1, 0), Some(Screen::Home));
        assert_eq!(NavBar::hit_test(area, 7, 0), Some(Screen::Home));
        assert_eq!(NavBar::hit_test(area, 8, 0), None);
        assert_eq!(NavBar::hit_test(area, 10, 0), Some(Screen::Destination));
        assert_eq!(NavBar::hit_test(area, 27, 0), Some(Screen::Crew));
    }

    #[test]
    fn test_hit_test_ignores_other_rows() {
        let area = Rect::new(0, 0, 80, 1);
        assert_eq!(NavBar::hit_test(area, 2, 1), None);
    }
}
