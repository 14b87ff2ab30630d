//! Yes/no confirmation dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::ConfirmPurpose;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Key handling for any confirmation; what is confirmed lives on the modal
#[derive(Default)]
pub struct ConfirmDialog;

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

pub fn draw_confirm_dialog(frame: &mut Frame, area: Rect, purpose: &ConfirmPurpose) {
    let popup_area = centered_popup(area, 56, 8);
    frame.render_widget(Clear, popup_area);

    let (accept, color) = match purpose {
        ConfirmPurpose::Quit => ("Yes, quit  ", Color::Yellow),
        ConfirmPurpose::StartCampaign { .. } => ("Yes, start  ", Color::Green),
        _ => ("Yes, delete  ", Color::Red),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            purpose.question(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " y ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(accept),
            Span::styled(
                " n/Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("No, cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(purpose.title())
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_only_y_confirms() {
        let mut dialog = ConfirmDialog;
        let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(
            dialog.handle_key_event(press('y')).unwrap(),
            Some(Action::ConfirmModal)
        );
        assert_eq!(
            dialog.handle_key_event(press('n')).unwrap(),
            Some(Action::CloseModal)
        );
        assert_eq!(dialog.handle_key_event(press('s')).unwrap(), None);
    }
}
