//! Pieces shared by the tab panels

use crate::model::{Cache, DomainState, LoadState, SearchState};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Context needed for rendering a tab panel
pub struct PanelContext<'a> {
    pub domain: &'a DomainState,
    pub search: &'a SearchState,
}

/// Bordered block titled with the list name, item count and active filter
pub fn panel_block(name: &str, count: usize, search: &SearchState) -> Block<'static> {
    let mut title = format!(" {} ({}) ", name, count);
    if !search.query.is_empty() {
        title = format!("{} [/{}] ", title.trim_end(), search.query);
    }
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Placeholder shown instead of the list while loading, after a failed load,
/// or when there is nothing to show
pub fn load_notice<T>(cache: &Cache<T>, what: &str, visible: usize) -> Option<Paragraph<'static>> {
    if let Some(message) = cache.error() {
        let line = Line::from(vec![
            Span::styled(
                format!("Failed to load {}: ", what),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.to_string(), Style::default().fg(Color::Red)),
        ]);
        return Some(Paragraph::new(vec![Line::from(""), line]).wrap(Wrap { trim: true }));
    }

    let line = match cache.state {
        LoadState::Loading if cache.items.is_empty() => Line::from(Span::styled(
            format!("Loading {}...", what),
            Style::default().fg(Color::Yellow),
        )),
        _ if visible == 0 && !cache.items.is_empty() => Line::from(Span::styled(
            format!("No {} match the filter.", what),
            Style::default().fg(Color::DarkGray),
        )),
        _ if cache.items.is_empty() => Line::from(Span::styled(
            format!("No {} yet. Press n to create one.", what),
            Style::default().fg(Color::DarkGray),
        )),
        _ => return None,
    };
    Some(Paragraph::new(vec![Line::from(""), line]).wrap(Wrap { trim: true }))
}

/// `label: value` detail line, skipped when the value is empty
pub fn detail_line(lines: &mut Vec<Line<'static>>, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value.to_string(), Style::default().fg(Color::White)),
        ]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_for_each_state() {
        let mut cache: Cache<u32> = Cache::default();
        cache.begin();
        assert!(load_notice(&cache, "users", 0).is_some());

        cache.replace(vec![1]);
        assert!(load_notice(&cache, "users", 1).is_none());
        assert!(load_notice(&cache, "users", 0).is_some());

        cache.fail("boom".to_string());
        assert!(load_notice(&cache, "users", 1).is_some());
    }
}
