//! # Screen View Component
//!
//! Renders the active screen: a bordered block titled with the screen's
//! number, a heading, then either the item list (selection marked) or a
//! neutral loading line while the selection is being restored.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::screen::Screen;
use crate::core::state::SelectionView;
use crate::tui::component::Component;

/// Rows between the top of the inner area and the first item.
const ITEMS_OFFSET: u16 = 2;

pub struct ScreenView<'a> {
    pub screen: Screen,
    pub selection: SelectionView<'a>,
    pub items: &'a [String],
}

impl<'a> ScreenView<'a> {
    pub fn new(screen: Screen, selection: SelectionView<'a>, items: &'a [String]) -> Self {
        Self {
            screen,
            selection,
            items,
        }
    }

    fn heading(screen: Screen) -> &'static str {
        match screen {
            Screen::Home => "SO, YOU WANT TO TRAVEL TO SPACE",
            Screen::Destination => "PICK YOUR DESTINATION",
            Screen::Crew => "MEET YOUR CREW",
            Screen::Technology => "SPACE LAUNCH 101",
        }
    }

    /// Index of the item drawn at `row`, if any. `area` is the same rect
    /// passed to `render`.
    pub fn hit_test(area: Rect, item_count: usize, row: u16) -> Option<usize> {
        let first_row = area.y.saturating_add(1 + ITEMS_OFFSET);
        let last_row = area.y.saturating_add(area.height.saturating_sub(1));
        if row < first_row || row >= last_row {
            return None;
        }
        let index = (row - first_row) as usize;
        (index < item_count).then_some(index)
    }
}

impl Component for ScreenView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                Self::heading(self.screen),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        match self.selection {
            SelectionView::NotApplicable => {
                lines.push(Line::from(Span::styled(
                    "Let's face it; if you want to go to space, you might as well genuinely go",
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::from(Span::styled(
                    "to outer space and not hover kind of on the edge of it.",
                    Style::default().fg(Color::Gray),
                )));
            }
            SelectionView::Loading => {
                lines.push(Line::from(Span::styled(
                    "…",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            SelectionView::Selected(selected) => {
                for (index, item) in self.items.iter().enumerate() {
                    let is_selected = item == selected;
                    let marker = if is_selected { "●" } else { "○" };
                    let style = if is_selected {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    lines.push(Line::from(Span::styled(
                        format!("{marker} {} {}", index + 1, item),
                        style,
                    )));
                }
            }
        }

        let block = Block::bordered()
            .title(self.screen.title())
            .border_style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_maps_rows_to_items() {
        let area = Rect::new(0, 1, 60, 12);
        // border at row 1, heading row 2, blank row 3, first item row 4
        assert_eq!(ScreenView::hit_test(area, 3, 3), None);
        assert_eq!(ScreenView::hit_test(area, 3, 4), Some(0));
        assert_eq!(ScreenView::hit_test(area, 3, 6), Some(2));
        assert_eq!(ScreenView::hit_test(area, 3, 7), None);
    }

    #[test]
    fn test_hit_test_excludes_bottom_border() {
        let area = Rect::new(0, 0, 60, 5);
        // rows: 0 border, 1 heading, 2 blank, 3 item 0, 4 border
        assert_eq!(ScreenView::hit_test(area, 10, 3), Some(0));
        assert_eq!(ScreenView::hit_test(area, 10, 4), None);
    }
}
