//! User panel

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_list_detail;
use crate::components::list_cursor::ListCursor;
use crate::components::panel::{detail_line, load_notice, panel_block, PanelContext};
use crate::components::table::{column_widths, header_line, row_line};
use crate::model::{SearchState, User};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const HEADERS: [&str; 4] = ["Name", "Email", "Phone", "Business"];

pub fn user_row(user: &User) -> Vec<String> {
    vec![
        user.name.clone(),
        user.email.clone(),
        user.phone_number.clone(),
        user.business_name.clone().unwrap_or_default(),
    ]
}

#[derive(Default)]
pub struct UsersPanel {
    pub cursor: ListCursor,
}

impl UsersPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible<'a>(&self, users: &'a [User], search: &SearchState) -> Vec<&'a User> {
        users.iter().filter(|u| search.matches(&u.name)).collect()
    }

    pub fn focused<'a>(&self, users: &'a [User], search: &SearchState) -> Option<&'a User> {
        let visible = self.visible(users, search);
        self.cursor.selected().and_then(|i| visible.get(i).copied())
    }
}

impl Component for UsersPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('n') => Some(Action::OpenCreateForm),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenEditForm),
            KeyCode::Char('d') => Some(Action::RequestDelete),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

pub fn draw_users_panel(frame: &mut Frame, area: Rect, panel: &mut UsersPanel, ctx: &PanelContext) {
    let cache = &ctx.domain.users;
    let visible = panel.visible(&cache.items, ctx.search);
    let block = panel_block("Users", visible.len(), ctx.search);

    if let Some(notice) = load_notice(cache, "users", visible.len()) {
        frame.render_widget(notice.block(block), area);
        return;
    }

    let (list_area, detail_area) = split_list_detail(area);
    let inner = block.inner(list_area);
    frame.render_widget(block, list_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let rows: Vec<Vec<String>> = visible.iter().map(|u| user_row(u)).collect();
    let widths = column_widths(&HEADERS, &rows);
    frame.render_widget(
        Paragraph::new(Line::from(
            [vec![Span::raw("  ")], header_line(&HEADERS, &widths).spans].concat(),
        )),
        chunks[0],
    );

    panel.cursor.clamp(visible.len());
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(row_line(row, &widths)))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[1], &mut panel.cursor.state);

    let focused = panel.cursor.selected().and_then(|i| visible.get(i).copied());

    let mut lines = Vec::new();
    if let Some(user) = focused {
        lines.push(Line::from(Span::styled(
            user.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        detail_line(&mut lines, "Email", Some(user.email.as_str()));
        detail_line(&mut lines, "Phone", Some(user.phone_number.as_str()));
        detail_line(&mut lines, "Business", user.business_name.as_deref());
        if let Some(details) = user.business_details.as_deref().filter(|d| !d.is_empty()) {
            lines.push(Line::from(""));
            lines.push(Line::from(details.to_string()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[e] Edit  [d] Delete",
            Style::default().fg(Color::Cyan),
        )));
    }
    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" User ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, detail_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    fn user(name: &str) -> User {
        User {
            id: RecordId::new("1"),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone_number: "+14155550123".to_string(),
            business_name: None,
            business_details: None,
        }
    }

    #[test]
    fn test_row_cells() {
        assert_eq!(
            user_row(&user("Ada")),
            vec!["Ada", "ada@example.com", "+14155550123", ""]
        );
    }

    #[test]
    fn test_focused_follows_cursor_and_filter() {
        let users = vec![user("Ada"), user("Grace")];
        let mut panel = UsersPanel::new();
        assert!(panel.focused(&users, &SearchState::default()).is_none());

        panel.cursor.last(2);
        assert_eq!(panel.focused(&users, &SearchState::default()).unwrap().name, "Grace");

        let search = SearchState {
            active: true,
            query: "ada".to_string(),
        };
        assert!(panel.focused(&users, &search).is_none());
    }
}
