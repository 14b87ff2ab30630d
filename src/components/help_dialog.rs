//! Scrollable list of every key binding, grouped by panel

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

/// Shortcut sections in display order
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / S-Tab", "Next / previous tab"),
            ("1-4", "Jump to Campaigns/Contacts/Users/Voice"),
            ("j k / ↓ ↑", "Move through the list"),
            ("g / G", "First / last item"),
            ("r", "Reload the current tab"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Filter the list by name"),
            ("Enter", "Keep the filter"),
            ("Esc", "Clear the filter"),
        ],
    ),
    (
        "Campaigns",
        &[
            ("n", "New campaign"),
            ("s", "Start campaign (asks first)"),
            ("p", "Pause / resume"),
            ("c", "Duplicate"),
            ("d", "Delete"),
            ("v / Enter", "Calls, analytics and history"),
        ],
    ),
    (
        "Campaign Detail",
        &[
            ("Tab / S-Tab", "Next / previous section"),
            ("Enter", "Recording of the focused call"),
            ("r", "Reload every section"),
            ("Esc", "Close"),
        ],
    ),
    (
        "Campaign Form",
        &[
            ("Tab / ↓", "Next field"),
            ("Ctrl+o", "Select contacts"),
            ("Space", "Toggle contact (selector)"),
            ("Enter", "Submit / Done"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "Contacts & Users",
        &[
            ("n", "New record"),
            ("e / Enter", "Edit record"),
            ("d", "Delete record"),
            ("i", "Import contacts from CSV"),
        ],
    ),
    (
        "Voice Test",
        &[
            ("Enter/Space", "Choose voice"),
            ("p", "Edit phone number"),
            ("w", "Edit text to synthesize"),
            ("t", "Place a test call"),
            ("a", "Generate audio"),
            ("o", "Play the last audio clip"),
            ("R", "Recording of the last test call"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Show this help"),
            ("q", "Quit / Close dialog"),
            ("Ctrl+c", "Quit immediately"),
        ],
    ),
];

impl HelpDialog {
    fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                return Ok(Some(Action::CloseModal))
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 64, area.height.saturating_sub(4));
        frame.render_widget(Clear, popup_area);

        let content = help_lines();
        let overflow = content
            .len()
            .saturating_sub(popup_area.height.saturating_sub(2) as usize);
        self.scroll_offset = self.scroll_offset.min(overflow);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(
            Paragraph::new(content)
                .block(block)
                .scroll((self.scroll_offset as u16, 0)),
            popup_area,
        );

        if overflow > 0 {
            let mut state = ScrollbarState::new(overflow).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                popup_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }

        Ok(())
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, shortcuts) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:13}", key),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(description.to_string()),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  q, Esc or ? closes this dialog",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
