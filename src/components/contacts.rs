//! Contact panel

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_list_detail;
use crate::components::list_cursor::ListCursor;
use crate::components::panel::{detail_line, load_notice, panel_block, PanelContext};
use crate::components::table::{column_widths, header_line, row_line};
use crate::model::records::format_date;
use crate::model::{Contact, SearchState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const HEADERS: [&str; 3] = ["Name", "Phone", "Company"];

/// Cells of one contact row
pub fn contact_row(contact: &Contact) -> Vec<String> {
    vec![
        contact.name.clone(),
        contact.phone_number.clone(),
        contact.company_name.clone().unwrap_or_default(),
    ]
}

#[derive(Default)]
pub struct ContactsPanel {
    pub cursor: ListCursor,
}

impl ContactsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible<'a>(&self, contacts: &'a [Contact], search: &SearchState) -> Vec<&'a Contact> {
        contacts.iter().filter(|c| search.matches(&c.name)).collect()
    }

    pub fn focused<'a>(&self, contacts: &'a [Contact], search: &SearchState) -> Option<&'a Contact> {
        let visible = self.visible(contacts, search);
        self.cursor.selected().and_then(|i| visible.get(i).copied())
    }
}

impl Component for ContactsPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('n') => Some(Action::OpenCreateForm),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenEditForm),
            KeyCode::Char('d') => Some(Action::RequestDelete),
            KeyCode::Char('i') => Some(Action::OpenImportPrompt),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

pub fn draw_contacts_panel(
    frame: &mut Frame,
    area: Rect,
    panel: &mut ContactsPanel,
    ctx: &PanelContext,
) {
    let cache = &ctx.domain.contacts;
    let visible = panel.visible(&cache.items, ctx.search);
    let block = panel_block("Contacts", visible.len(), ctx.search);

    if let Some(notice) = load_notice(cache, "contacts", visible.len()) {
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

    let rows: Vec<Vec<String>> = visible.iter().map(|c| contact_row(c)).collect();
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
    draw_contact_detail(frame, detail_area, focused);
}

fn draw_contact_detail(frame: &mut Frame, area: Rect, contact: Option<&Contact>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Contact ")
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines = Vec::new();
    if let Some(contact) = contact {
        lines.push(Line::from(Span::styled(
            contact.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        detail_line(&mut lines, "Phone", Some(contact.phone_number.as_str()));
        detail_line(&mut lines, "Company", contact.company_name.as_deref());
        detail_line(&mut lines, "Email", contact.email.as_deref());
        detail_line(&mut lines, "Tags", contact.tags.as_deref());
        detail_line(
            &mut lines,
            "Added",
            contact.created_at.as_deref().map(format_date).as_deref(),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[e] Edit  [d] Delete",
            Style::default().fg(Color::Cyan),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
