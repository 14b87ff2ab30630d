//! Contact selector dialog
//!
//! Checklist of contacts opened from the campaign form. Checked state lives in
//! the shared `SelectionSet`; this component only tracks the cursor.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::list_cursor::ListCursor;
use crate::model::{Cache, Contact, LoadState, SelectionSet};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct ContactSelector {
    pub cursor: ListCursor,
}

impl ContactSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused<'a>(&self, contacts: &'a [Contact]) -> Option<&'a Contact> {
        self.cursor.selected().and_then(|i| contacts.get(i))
    }
}

impl Component for ContactSelector {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Char(' ') => Some(Action::ToggleContactSelection),
            KeyCode::Enter => Some(Action::ConfirmContactSelection),
            KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

/// Render the checklist over `area`
pub fn draw_contact_selector(
    frame: &mut Frame,
    area: Rect,
    selector: &mut ContactSelector,
    contacts: &Cache<Contact>,
    selection: &SelectionSet,
) {
    let popup_area = centered_popup(area, 60, 20);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Contacts ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let status = match contacts.state {
        LoadState::Failed(ref message) => Some((format!("Failed to load contacts: {}", message), Color::Red)),
        LoadState::Loading if contacts.items.is_empty() => {
            Some(("Loading contacts...".to_string(), Color::Yellow))
        }
        _ if contacts.items.is_empty() => Some(("No contacts yet.".to_string(), Color::DarkGray)),
        _ => None,
    };

    match status {
        Some((text, color)) => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(text, Style::default().fg(color))),
                ]),
                chunks[0],
            );
        }
        None => {
            selector.cursor.clamp(contacts.items.len());
            let items: Vec<ListItem> = contacts
                .items
                .iter()
                .map(|contact| {
                    let checked = selection.contains(&contact.id);
                    let (mark, style) = if checked {
                        ("[x] ", Style::default().fg(Color::Green))
                    } else {
                        ("[ ] ", Style::default().fg(Color::White))
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(mark, style),
                        Span::styled(contact.name.clone(), style),
                        Span::styled(
                            format!("  {}", contact.phone_number),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, chunks[0], &mut selector.cursor.state);
        }
    }

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", selection.summary()),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            " Space  Toggle   Enter  Done   Esc  Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(footer, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: RecordId::new(id),
            name: name.to_string(),
            phone_number: "+14155550123".to_string(),
            company_name: None,
            email: None,
            tags: None,
            created_at: None,
        }
    }

    #[test]
    fn test_space_toggles_enter_confirms() {
        let mut selector = ContactSelector::new();
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            selector.handle_key_event(space).unwrap(),
            Some(Action::ToggleContactSelection)
        );
        assert_eq!(
            selector.handle_key_event(enter).unwrap(),
            Some(Action::ConfirmContactSelection)
        );
    }

    #[test]
    fn test_checked_rows_are_marked() {
        let mut contacts = Cache::default();
        contacts.replace(vec![contact("1", "Ada"), contact("2", "Grace")]);
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::new("2"));
        let mut selector = ContactSelector::new();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_contact_selector(frame, area, &mut selector, &contacts, &selection)
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("[ ] Ada"));
        assert!(text.contains("[x] Grace"));
        assert!(text.contains("1 contacts selected."));
    }
}
