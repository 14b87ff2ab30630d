//! Campaign detail dialog
//!
//! Read-only views of one campaign: the calls placed for it, its analytics and
//! every saved version. The data lives in `CampaignDetail`; this component
//! tracks the open section and the cursor.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::list_cursor::ListCursor;
use crate::model::records::format_date;
use crate::model::{CallRecord, Cache, CampaignDetail, LoadState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailSection {
    #[default]
    Calls,
    Analytics,
    History,
}

impl DetailSection {
    pub fn all() -> [DetailSection; 3] {
        [
            DetailSection::Calls,
            DetailSection::Analytics,
            DetailSection::History,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DetailSection::Calls => "Calls",
            DetailSection::Analytics => "Analytics",
            DetailSection::History => "History",
        }
    }

    pub fn next(&self) -> DetailSection {
        match self {
            DetailSection::Calls => DetailSection::Analytics,
            DetailSection::Analytics => DetailSection::History,
            DetailSection::History => DetailSection::Calls,
        }
    }

    pub fn previous(&self) -> DetailSection {
        match self {
            DetailSection::Calls => DetailSection::History,
            DetailSection::Analytics => DetailSection::Calls,
            DetailSection::History => DetailSection::Analytics,
        }
    }
}

#[derive(Default)]
pub struct CampaignDetailDialog {
    pub section: DetailSection,
    pub cursor: ListCursor,
}

impl CampaignDetailDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_section(&mut self, section: DetailSection) {
        self.section = section;
        self.cursor = ListCursor::default();
    }

    /// Rows in the open section
    pub fn row_count(&self, detail: &CampaignDetail) -> usize {
        match self.section {
            DetailSection::Calls => detail.calls.items.len(),
            DetailSection::Analytics => detail.metrics.items.len(),
            DetailSection::History => detail.history.items.len(),
        }
    }

    /// Call under the cursor, only while the calls section is open
    pub fn focused_call<'a>(&self, detail: &'a CampaignDetail) -> Option<&'a CallRecord> {
        if self.section != DetailSection::Calls {
            return None;
        }
        self.cursor.selected().and_then(|i| detail.calls.items.get(i))
    }
}

impl Component for CampaignDetailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => Some(Action::NextDetailSection),
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
                Some(Action::PrevDetailSection)
            }
            KeyCode::Enter if self.section == DetailSection::Calls => Some(Action::FetchRecording),
            KeyCode::Char('r') => Some(Action::ReloadCampaignDetail),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextDetailSection => self.show_section(self.section.next()),
            Action::PrevDetailSection => self.show_section(self.section.previous()),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawn through draw_campaign_detail, which has the detail data
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Loading, failure or empty message for a section, if any
fn section_notice<T>(cache: &Cache<T>, what: &str) -> Option<(String, Color)> {
    match cache.state {
        LoadState::Failed(ref message) => Some((message.clone(), Color::Red)),
        LoadState::Loading | LoadState::Idle if cache.items.is_empty() => {
            Some((format!("Loading {}...", what), Color::Yellow))
        }
        _ if cache.items.is_empty() => Some((format!("No {} yet.", what), Color::DarkGray)),
        _ => None,
    }
}

fn call_item(call: &CallRecord) -> ListItem<'static> {
    let outcome_color = match call.completed {
        Some(true) => Color::Green,
        Some(false) => Color::Red,
        None => Color::Yellow,
    };
    let date = call.created_at.as_deref().map(format_date).unwrap_or_default();
    ListItem::new(Line::from(vec![
        Span::styled(format!("{:<14}", call.call_id), Style::default().fg(Color::White)),
        Span::styled(
            format!(" {:<16}", call.to_phone.as_deref().unwrap_or("-")),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!(" {:<14}", call.outcome()), Style::default().fg(outcome_color)),
        Span::styled(format!(" {}", date), Style::default().fg(Color::DarkGray)),
    ]))
}

fn draw_calls(frame: &mut Frame, area: Rect, dialog: &mut CampaignDetailDialog, detail: &CampaignDetail) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(area);

    dialog.cursor.clamp(detail.calls.items.len());
    let items: Vec<ListItem> = detail.calls.items.iter().map(call_item).collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[0], &mut dialog.cursor.state);

    let summary = dialog
        .focused_call(detail)
        .map(|call| {
            let mut text = call.summary.clone().unwrap_or_else(|| "No summary.".to_string());
            if let Some(ref emotion) = call.emotion {
                text = format!("[{}] {}", emotion, text);
            }
            text
        })
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(summary)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn draw_metrics(frame: &mut Frame, area: Rect, dialog: &mut CampaignDetailDialog, detail: &CampaignDetail) {
    dialog.cursor.clamp(detail.metrics.items.len());
    let width = detail
        .metrics
        .items
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);
    let items: Vec<ListItem> = detail
        .metrics
        .items
        .iter()
        .map(|m| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", m.name, width = width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(m.value.clone(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();
    let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, area, &mut dialog.cursor.state);
}

fn draw_history(frame: &mut Frame, area: Rect, dialog: &mut CampaignDetailDialog, detail: &CampaignDetail) {
    dialog.cursor.clamp(detail.history.items.len());
    let current = detail.campaign.as_ref().map(|c| &c.campaign_id);
    let items: Vec<ListItem> = detail
        .history
        .items
        .iter()
        .map(|version| {
            let is_current = current == Some(&version.campaign_id);
            let name_style = if is_current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("v{:<4}", version.version), name_style),
                Span::styled(
                    format!(" {:<10}", version.status.label()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!(" {:<11}", version.created_date().unwrap_or_default()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(version.campaign_name.clone(), name_style),
            ]))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Blue))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, &mut dialog.cursor.state);
}

/// Render the detail dialog over `area`
pub fn draw_campaign_detail(
    frame: &mut Frame,
    area: Rect,
    dialog: &mut CampaignDetailDialog,
    detail: &CampaignDetail,
) {
    let popup_area = centered_popup(area, 90, area.height.saturating_sub(4).max(12));
    frame.render_widget(Clear, popup_area);

    let title = match detail.campaign {
        Some(ref c) => format!(" {} · Version {} ", c.campaign_name, c.version),
        None => " Campaign ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let sections = DetailSection::all();
    let selected = sections.iter().position(|s| *s == dialog.section).unwrap_or(0);
    let tabs = Tabs::new(sections.iter().map(|s| s.name()).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[0]);

    let notice = match dialog.section {
        DetailSection::Calls => section_notice(&detail.calls, "calls"),
        DetailSection::Analytics => section_notice(&detail.metrics, "analytics"),
        DetailSection::History => section_notice(&detail.history, "versions"),
    };
    match notice {
        Some((text, color)) => frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(format!(" {}", text), Style::default().fg(color))),
            ])
            .wrap(Wrap { trim: true }),
            chunks[1],
        ),
        None => match dialog.section {
            DetailSection::Calls => draw_calls(frame, chunks[1], dialog, detail),
            DetailSection::Analytics => draw_metrics(frame, chunks[1], dialog, detail),
            DetailSection::History => draw_history(frame, chunks[1], dialog, detail),
        },
    }

    let hint = if dialog.section == DetailSection::Calls {
        " Tab  Section   Enter  Recording   r  Reload   Esc  Close"
    } else {
        " Tab  Section   r  Reload   Esc  Close"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))),
        chunks[2],
    );
}
