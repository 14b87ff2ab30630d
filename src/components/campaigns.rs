//! Campaign panel
//!
//! Lists campaigns as two-line cards with a detail pane for the focused one.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_list_detail;
use crate::components::list_cursor::ListCursor;
use crate::components::panel::{detail_line, load_notice, panel_block, PanelContext};
use crate::model::{Campaign, CampaignStatus, RecordId, SearchState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Card View Model
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything a campaign card shows, derived from one record
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignCard {
    pub id: RecordId,
    pub name: String,
    pub version: String,
    pub agent: String,
    pub status: CampaignStatus,
    pub contact_count: usize,
    pub created: Option<String>,
    pub batch_id: Option<String>,
    /// The start affordance is disabled while the campaign is active
    pub start_enabled: bool,
}

impl CampaignCard {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            id: campaign.campaign_id.clone(),
            name: campaign.campaign_name.clone(),
            version: format!("Version {}", campaign.version),
            agent: campaign
                .agent_name
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            status: campaign.status,
            contact_count: campaign.contact_list.len(),
            created: campaign.created_date(),
            batch_id: campaign.batch_id.clone(),
            start_enabled: !campaign.is_active(),
        }
    }

    pub fn start_label(&self) -> &'static str {
        if self.start_enabled {
            "[s] Start"
        } else {
            "Running"
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut meta = vec![
            Span::raw("   "),
            Span::styled(format!("{} ", self.agent), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("· {} contacts ", self.contact_count),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if let Some(ref created) = self.created {
            meta.push(Span::styled(
                format!("· {} ", created),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(ref batch) = self.batch_id {
            meta.push(Span::styled(
                format!("· batch {} ", batch),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let start_style = if self.start_enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        meta.push(Span::styled(self.start_label(), start_style));

        vec![
            Line::from(vec![
                Span::styled(
                    self.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} ", self.version),
                    Style::default().fg(Color::DarkGray),
                ),
                status_badge(self.status),
            ]),
            Line::from(meta),
        ]
    }
}

/// One card per campaign, in list order
pub fn campaign_cards(campaigns: &[Campaign]) -> Vec<CampaignCard> {
    campaigns.iter().map(CampaignCard::from_campaign).collect()
}

pub fn status_badge(status: CampaignStatus) -> Span<'static> {
    let color = match status {
        CampaignStatus::Active => Color::Green,
        CampaignStatus::Paused => Color::Yellow,
        CampaignStatus::Completed => Color::Blue,
        CampaignStatus::Draft => Color::Gray,
        CampaignStatus::Unknown => Color::DarkGray,
    };
    Span::styled(
        format!(" {} ", status.label()),
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// Campaigns Panel
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct CampaignsPanel {
    pub cursor: ListCursor,
}

impl CampaignsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Campaigns passing the name filter
    pub fn visible<'a>(&self, campaigns: &'a [Campaign], search: &SearchState) -> Vec<&'a Campaign> {
        campaigns
            .iter()
            .filter(|c| search.matches(&c.campaign_name))
            .collect()
    }

    pub fn focused<'a>(&self, campaigns: &'a [Campaign], search: &SearchState) -> Option<&'a Campaign> {
        let visible = self.visible(campaigns, search);
        self.cursor.selected().and_then(|i| visible.get(i).copied())
    }
}

impl Component for CampaignsPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('n') => Some(Action::OpenCreateForm),
            KeyCode::Char('s') => Some(Action::RequestStartCampaign),
            KeyCode::Char('p') => Some(Action::ToggleCampaignPause),
            KeyCode::Char('c') => Some(Action::DuplicateCampaign),
            KeyCode::Char('d') => Some(Action::RequestDelete),
            KeyCode::Char('v') | KeyCode::Enter => Some(Action::OpenCampaignDetail),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawn through draw_campaigns_panel, which has the campaign list
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

pub fn draw_campaigns_panel(
    frame: &mut Frame,
    area: Rect,
    panel: &mut CampaignsPanel,
    ctx: &PanelContext,
) {
    let cache = &ctx.domain.campaigns;
    let visible = panel.visible(&cache.items, ctx.search);
    let (list_area, detail_area) = split_list_detail(area);
    let block = panel_block("Campaigns", visible.len(), ctx.search);

    if let Some(notice) = load_notice(cache, "campaigns", visible.len()) {
        frame.render_widget(notice.block(block), area);
        return;
    }

    panel.cursor.clamp(visible.len());
    let cards: Vec<CampaignCard> = visible.iter().map(|c| CampaignCard::from_campaign(c)).collect();
    let items: Vec<ListItem> = cards.iter().map(|card| ListItem::new(card.lines())).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, list_area, &mut panel.cursor.state);

    let focused = panel.cursor.selected().and_then(|i| visible.get(i).copied());
    draw_campaign_detail(frame, detail_area, focused);
}

fn draw_campaign_detail(frame: &mut Frame, area: Rect, campaign: Option<&Campaign>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Details ")
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(campaign) = campaign else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let card = CampaignCard::from_campaign(campaign);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                card.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            status_badge(card.status),
        ]),
        Line::from(Span::styled(card.version.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ];
    detail_line(&mut lines, "Agent", Some(card.agent.as_str()));
    detail_line(&mut lines, "Voice", campaign.voice.as_deref());
    detail_line(&mut lines, "Contacts", Some(card.contact_count.to_string().as_str()));
    detail_line(&mut lines, "Created", card.created.as_deref());
    detail_line(&mut lines, "Batch", card.batch_id.as_deref());
    detail_line(&mut lines, "Id", Some(card.id.as_str()));

    if let Some(task) = campaign.task.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Task",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(task.to_string()));
    }

    lines.push(Line::from(""));
    let toggle_hint = match card.status.toggled() {
        Some(CampaignStatus::Paused) => "[p] Pause  ",
        Some(_) => "[p] Resume  ",
        None => "",
    };
    lines.push(Line::from(vec![
        Span::styled(
            card.start_label(),
            if card.start_enabled {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
        Span::raw("  "),
        Span::styled(toggle_hint, Style::default().fg(Color::Yellow)),
        Span::styled("[c] Duplicate  [d] Delete", Style::default().fg(Color::Cyan)),
    ]));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
