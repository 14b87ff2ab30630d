//! Voice test panel
//!
//! A list of voice tiles with a single active voice, plus the phone and text
//! inputs that drive the test call and audio generation actions.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_list_detail;
use crate::components::list_cursor::ListCursor;
use crate::components::panel::{load_notice, panel_block, PanelContext};
use crate::model::{NoticeKind, SearchState, VoiceField, VoiceOption, VoiceTestState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Display data of one voice tile
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceTile {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub description: String,
    pub active: bool,
}

/// One tile per voice; only the voice matching `active` is marked
pub fn voice_tiles(voices: &[VoiceOption], active: Option<&str>) -> Vec<VoiceTile> {
    voices
        .iter()
        .map(|v| VoiceTile {
            id: v.id.clone(),
            name: v.name.clone(),
            gender: v.gender.clone(),
            description: v.description.clone(),
            active: active == Some(v.id.as_str()),
        })
        .collect()
}

impl VoiceTile {
    fn lines(&self) -> Vec<Line<'static>> {
        let (marker, name_style) = if self.active {
            (
                Span::styled("● ", Style::default().fg(Color::Green)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Span::styled("○ ", Style::default().fg(Color::DarkGray)),
                Style::default().fg(Color::White),
            )
        };
        vec![
            Line::from(vec![
                marker,
                Span::styled(self.name.clone(), name_style),
                Span::styled(
                    format!("  {}", self.gender),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                format!("  {}", self.description),
                Style::default().fg(Color::Gray),
            )),
        ]
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Voice Panel
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct VoicePanel {
    pub cursor: ListCursor,
    /// Input currently receiving typed characters
    pub editing: Option<VoiceField>,
}

impl VoicePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn visible<'a>(&self, voices: &'a [VoiceOption], search: &SearchState) -> Vec<&'a VoiceOption> {
        voices.iter().filter(|v| search.matches(&v.name)).collect()
    }

    pub fn focused<'a>(&self, voices: &'a [VoiceOption], search: &SearchState) -> Option<&'a VoiceOption> {
        let visible = self.visible(voices, search);
        self.cursor.selected().and_then(|i| visible.get(i).copied())
    }
}

impl Component for VoicePanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing.is_some() {
            let action = match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::StopVoiceEdit),
                KeyCode::Backspace => Some(Action::VoiceBackspace),
                KeyCode::Char(c) => Some(Action::VoiceInput(c)),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectVoice),
            KeyCode::Char('p') => Some(Action::EditVoiceField(VoiceField::Phone)),
            KeyCode::Char('w') => Some(Action::EditVoiceField(VoiceField::Text)),
            KeyCode::Char('t') => Some(Action::TestVoice),
            KeyCode::Char('a') => Some(Action::GenerateAudio),
            KeyCode::Char('o') => Some(Action::PlayAudio),
            KeyCode::Char('R') => Some(Action::FetchRecording),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EditVoiceField(field) => self.editing = Some(field),
            Action::StopVoiceEdit => self.editing = None,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

pub fn draw_voice_panel(frame: &mut Frame, area: Rect, panel: &mut VoicePanel, ctx: &PanelContext) {
    let cache = &ctx.domain.voices;
    let voice = &ctx.domain.voice;
    let visible = panel.visible(&cache.items, ctx.search);
    let (list_area, form_area) = split_list_detail(area);
    let block = panel_block("Voices", visible.len(), ctx.search);

    match load_notice(cache, "voices", visible.len()) {
        Some(notice) => frame.render_widget(notice.block(block), list_area),
        None => {
            panel.cursor.clamp(visible.len());
            let owned: Vec<VoiceOption> = visible.iter().map(|v| (*v).clone()).collect();
            let items: Vec<ListItem> = voice_tiles(&owned, voice.active_voice.as_deref())
                .iter()
                .map(|tile| ListItem::new(tile.lines()))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, list_area, &mut panel.cursor.state);
        }
    }

    draw_voice_form(frame, form_area, panel.editing, voice);
}

fn input_line(label: &str, value: &str, editing: bool) -> Vec<Line<'static>> {
    let (border, text) = if editing {
        (
            Style::default().fg(Color::Cyan),
            format!("{}_", value),
        )
    } else {
        (Style::default().fg(Color::DarkGray), value.to_string())
    };
    vec![
        Line::from(Span::styled(label.to_string(), border)),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(
                text,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ]
}

fn button(key: char, label: &str, enabled: bool) -> Vec<Span<'static>> {
    let style = if enabled {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    vec![
        Span::styled(format!(" [{}] ", key), style),
        Span::styled(label.to_string(), style),
        Span::raw("  "),
    ]
}

fn draw_voice_form(frame: &mut Frame, area: Rect, editing: Option<VoiceField>, voice: &VoiceTestState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Voice Test ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Phone
            Constraint::Length(3), // Text
            Constraint::Length(2), // Buttons
            Constraint::Min(0),    // Notice
        ])
        .split(inner);

    let phone_label = "Your phone number (p to edit)";
    frame.render_widget(
        Paragraph::new(input_line(
            phone_label,
            &voice.phone,
            editing == Some(VoiceField::Phone),
        )),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(input_line(
            "Text to synthesize (w to edit)",
            &voice.text,
            editing == Some(VoiceField::Text),
        )),
        chunks[1],
    );

    let mut buttons = button('t', voice.test_label(), voice.can_test());
    buttons.extend(button('a', voice.generate_label(), voice.can_generate()));
    buttons.extend(button('o', "Play", voice.last_audio.is_some()));
    buttons.extend(button('R', "Recording", voice.last_call_id.is_some()));
    frame.render_widget(Paragraph::new(Line::from(buttons)), chunks[2]);

    let mut lines = Vec::new();
    if let Some(ref notice) = voice.notice {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
            NoticeKind::Info => Color::Yellow,
        };
        lines.push(Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(color),
        )));
    }
    if let Some(ref path) = voice.last_audio {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Saved ", Style::default().fg(Color::DarkGray)),
            Span::styled(path.display().to_string(), Style::default().fg(Color::White)),
        ]));
    }
    if voice.active_voice.is_none() {
        lines.push(Line::from(Span::styled(
            "Select a voice with Enter to enable the test call.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[3]);
}
