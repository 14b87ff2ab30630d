//! Column-aligned rows for the contact and user lists

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow; longer cells are truncated
const MAX_COLUMN_WIDTH: usize = 32;

/// Column widths fitting the headers and every row, capped at the maximum
pub fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
    }
    for width in &mut widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }
    widths
}

/// Pad or truncate `text` to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

pub fn header_line(headers: &[&str], widths: &[usize]) -> Line<'static> {
    let spans: Vec<Span> = headers
        .iter()
        .zip(widths)
        .flat_map(|(h, w)| {
            vec![
                Span::styled(
                    fit(h, *w),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" │ "),
            ]
        })
        .collect();
    Line::from(spans)
}

pub fn row_line(cells: &[String], widths: &[usize]) -> Line<'static> {
    let spans: Vec<Span> = cells
        .iter()
        .zip(widths)
        .flat_map(|(cell, w)| {
            vec![
                Span::styled(fit(cell, *w), Style::default().fg(Color::White)),
                Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_cover_headers_and_cells() {
        let rows = vec![vec!["Ada Lovelace".to_string(), "+1".to_string()]];
        assert_eq!(column_widths(&["Name", "Phone"], &rows), vec![12, 5]);
    }

    #[test]
    fn test_widths_are_capped() {
        let rows = vec![vec!["x".repeat(100)]];
        assert_eq!(column_widths(&["Name"], &rows), vec![MAX_COLUMN_WIDTH]);
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("日本語", 4), "日… ");
    }
}
