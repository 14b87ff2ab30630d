//! Create/edit form dialog
//!
//! Edits its own `Form` buffer; submission and dismissal go through the app.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{Form, FormKind, Ticket};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Fields whose value is masked on screen
const MASKED_FIELDS: [&str; 1] = ["password"];

pub struct FormDialog {
    pub kind: FormKind,
    pub form: Form,
    /// Set while the submit request is in flight
    pub submitting: bool,
    /// Request this form is waiting on; cleared when the form is dismissed
    pub pending: Option<Ticket>,
    /// Contact selection summary shown under the campaign form
    pub summary: Option<String>,
    /// Inline validation message
    pub error: Option<String>,
}

impl Default for FormDialog {
    fn default() -> Self {
        Self::open(FormKind::NewCampaign, Form::campaign())
    }
}

impl FormDialog {
    pub fn open(kind: FormKind, form: Form) -> Self {
        Self {
            kind,
            form,
            submitting: false,
            pending: None,
            summary: None,
            error: None,
        }
    }

    /// Empty the fields and the selection summary, keeping the form kind
    pub fn reset(&mut self) {
        self.form.clear();
        self.summary = None;
        self.error = None;
        self.submitting = false;
        self.pending = None;
    }

    fn is_campaign(&self) -> bool {
        self.kind == FormKind::NewCampaign
    }
}

impl Component for FormDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.submitting {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseModal),
                _ => None,
            });
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('o') if self.is_campaign() => Some(Action::OpenContactSelector),
                KeyCode::Char('s') => Some(Action::SubmitForm),
                _ => None,
            });
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitForm),
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_field();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.prev_field();
                None
            }
            KeyCode::Backspace => {
                self.form.backspace();
                self.error = None;
                None
            }
            KeyCode::Char(c) => {
                self.form.input(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let extra = if self.is_campaign() { 3 } else { 0 };
        let height = (self.form.fields.len() as u16) * 2 + 6 + extra;
        let popup_area = centered_popup(area, 64, height);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for (i, field) in self.form.fields.iter().enumerate() {
            let focused = i == self.form.focus;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let marker = if field.required { " *" } else { "" };
            lines.push(Line::from(Span::styled(
                format!(" {}{}", field.label, marker),
                label_style,
            )));

            let shown = if MASKED_FIELDS.contains(&field.key) {
                "•".repeat(field.value.chars().count())
            } else {
                field.value.clone()
            };
            let cursor = if focused { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(" > ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{}{}", shown, cursor),
                    Style::default().fg(Color::White),
                ),
            ]));
        }

        if self.is_campaign() {
            lines.push(Line::from(""));
            let summary = self
                .summary
                .clone()
                .unwrap_or_else(|| "No contacts selected.".to_string());
            lines.push(Line::from(vec![
                Span::styled(" Contacts: ", Style::default().fg(Color::DarkGray)),
                Span::styled(summary, Style::default().fg(Color::White)),
            ]));
            lines.push(Line::from(Span::styled(
                " Ctrl+O  Select contacts",
                Style::default().fg(Color::Cyan),
            )));
        }

        lines.push(Line::from(""));
        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(Color::Red),
            )));
        } else if self.submitting {
            lines.push(Line::from(Span::styled(
                " Submitting...",
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                " Enter  Submit   Tab  Next field   Esc  Cancel",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(self.kind.title())
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut dialog = FormDialog::open(FormKind::NewCampaign, Form::campaign());
        dialog.handle_key_event(key(KeyCode::Char('Q'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('x'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Backspace)).unwrap();

        assert_eq!(dialog.form.value("campaign_name"), "Q");
        assert_eq!(dialog.form.value("agent_name"), "");
    }

    #[test]
    fn test_contact_selector_only_from_campaign_form() {
        let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        let mut campaign = FormDialog::open(FormKind::NewCampaign, Form::campaign());
        assert_eq!(
            campaign.handle_key_event(ctrl_o).unwrap(),
            Some(Action::OpenContactSelector)
        );

        let mut contact = FormDialog::open(FormKind::NewContact, Form::contact());
        assert_eq!(contact.handle_key_event(ctrl_o).unwrap(), None);
    }

    #[test]
    fn test_reset_clears_fields_and_summary() {
        let mut dialog = FormDialog::open(FormKind::NewCampaign, Form::campaign());
        dialog.form.input('Q');
        dialog.summary = Some("2 contacts selected.".to_string());
        dialog.submitting = true;
        dialog.pending = Some(Ticket {
            channel: crate::model::Channel::Mutation,
            seq: 1,
        });

        dialog.reset();
        assert_eq!(dialog.form.value("campaign_name"), "");
        assert!(dialog.summary.is_none());
        assert!(!dialog.submitting);
        assert!(dialog.pending.is_none());
    }

    #[test]
    fn test_keys_ignored_while_submitting() {
        let mut dialog = FormDialog::open(FormKind::NewUser, Form::user());
        dialog.submitting = true;
        assert_eq!(dialog.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }
}
