//! Blocking message dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct AlertDialog;

impl Component for AlertDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

pub fn draw_alert_dialog(frame: &mut Frame, area: Rect, title: &str, message: &str, is_error: bool) {
    let color = if is_error { Color::Red } else { Color::Green };
    let body_lines = message.lines().count().max(1) as u16;
    let popup_area = centered_popup(area, 60, body_lines + 6);
    frame.render_widget(Clear, popup_area);

    let mut content = vec![Line::from("")];
    content.extend(
        message
            .lines()
            .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(Color::White)))),
    );
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        " Enter/Esc  Close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}
