//! Detail overlay for a single record.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::models::BookDoc;
use crate::ui::{cover_label, year_label};
use crate::utils::{CoverSize, Links};

/// Subjects beyond this many are summarised as "+N more"
const MAX_SUBJECTS: usize = 10;

/// Labelled rows shown in the detail panel
pub fn detail_lines(doc: &BookDoc, links: &Links) -> Vec<(&'static str, String)> {
    let subjects = if doc.subjects.is_empty() {
        "—".to_string()
    } else {
        let mut shown = doc
            .subjects
            .iter()
            .take(MAX_SUBJECTS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if doc.subjects.len() > MAX_SUBJECTS {
            shown.push_str(&format!(" (+{} more)", doc.subjects.len() - MAX_SUBJECTS));
        }
        shown
    };

    vec![
        ("Title", doc.title.clone()),
        ("Authors", doc.authors_display()),
        ("First published", year_label(doc)),
        (
            "Editions",
            doc.edition_count
                .map(|n| crate::ui::format_number(n as usize))
                .unwrap_or_else(|| "—".to_string()),
        ),
        ("Subjects", subjects),
        ("Cover", cover_label(doc, links, CoverSize::Large)),
        ("Link", doc.work_url(links)),
    ]
}

/// Helper to create a centered popup area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

pub fn draw_detail(frame: &mut Frame, doc: &BookDoc, links: &Links, area: Rect) {
    let width = area.width.saturating_sub(4).min(90);
    let height = area.height.saturating_sub(4).min(20);
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Details ")
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (label, value) in detail_lines(doc, links) {
        let value_style = match label {
            "Title" => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            "Cover" if doc.cover_id.is_none() => Style::default().fg(Color::DarkGray),
            "Link" => Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            _ => Style::default().fg(Color::White),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", label), label_style),
            Span::styled(value, value_style),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Esc close · o open in browser",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}
