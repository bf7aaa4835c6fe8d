use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::models::{BookDoc, SearchField};
use crate::tui::app::App;
use crate::tui::detail;
use crate::ui::{cover_label, truncate_with_ellipsis, year_label};
use crate::utils::{CoverSize, Links};

/// Card height including borders
const CARD_HEIGHT: u16 = 6;

const HEADER_BG: Color = Color::Rgb(0, 95, 135);

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Status line
            Constraint::Min(CARD_HEIGHT), // Card grid
            Constraint::Length(1), // Pager
            Constraint::Length(1), // Help
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);
    draw_status_line(frame, app, chunks[1]);
    draw_grid(frame, app, chunks[2]);
    draw_pager(frame, app, chunks[3]);
    draw_help(frame, app, chunks[4]);

    let session = app.controller().session();
    if let Some(doc) = session.ui().selected.as_ref() {
        detail::draw_detail(frame, doc, app.links(), area);
    } else {
        // Account for border (1) + space (1) + search icon (2 display cols) + space (1)
        let text_width = UnicodeWidthStr::width(session.query().text.as_str()) as u16;
        let cursor_x = (chunks[0].x + 5 + text_width).min(chunks[0].right().saturating_sub(2));
        frame.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }
}

/// Columns that fit in `width`
pub fn grid_columns(width: u16) -> usize {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

/// Text lines of a result card
pub fn card_lines(doc: &BookDoc, links: &Links, width: usize) -> Vec<String> {
    vec![
        truncate_with_ellipsis(&doc.title, width),
        truncate_with_ellipsis(&doc.authors_display(), width),
        format!("First published: {}", year_label(doc)),
        truncate_with_ellipsis(&cover_label(doc, links, CoverSize::Medium), width),
    ]
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.controller().session().query().field;

    let mut title = vec![Span::raw(" Search ")];
    for field in SearchField::ALL {
        let style = if field == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        title.push(Span::styled(format!(" {} ", field.label()), style));
        title.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(title));

    let search_text = format!(" \u{1F50D} {}", app.controller().session().query().text);
    let paragraph = Paragraph::new(search_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Status text and whether it reports an error
pub fn status_text(app: &App) -> (String, bool) {
    let session = app.controller().session();
    let ui = session.ui();

    if ui.loading {
        return ("Loading…".to_string(), false);
    }
    if let Some(error) = &ui.error {
        return (format!("Error: {}", error), true);
    }
    if session.query().is_empty() {
        return ("Type to search Open Library".to_string(), false);
    }

    let result = session.result();
    if result.total_found == 0 {
        return ("No results".to_string(), false);
    }
    (
        format!(
            "{} results · page {}/{}",
            crate::ui::format_number(result.total_found as usize),
            session.query().page,
            session.total_pages()
        ),
        false,
    )
}

fn draw_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let (text, is_error) = status_text(app);
    let style = if is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if app.controller().session().ui().loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(Paragraph::new(format!(" {}", text)).style(style), area);
}

fn draw_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = grid_columns(area.width);
    app.grid_columns = columns;

    let session = app.controller().session();

    // An error replaces the grid
    if let Some(error) = &session.ui().error {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Search failed ");
        let paragraph = Paragraph::new(error.as_str())
            .block(block)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let docs = &session.result().documents;
    if docs.is_empty() {
        return;
    }

    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = app.cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);
    let card_width = area.width / columns as u16;

    for (index, doc) in docs.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = index % columns;
        let card_area = Rect::new(
            area.x + col as u16 * card_width,
            area.y + row as u16 * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT,
        )
        .intersection(area);

        draw_card(frame, doc, app.links(), index == app.cursor, card_area);
    }
}

fn draw_card(frame: &mut Frame, doc: &BookDoc, links: &Links, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);

    let width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = card_lines(doc, links, width)
        .into_iter()
        .enumerate()
        .map(|(i, text)| match i {
            0 => Line::styled(text, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            1 => Line::styled(text, Style::default().fg(Color::LightBlue)),
            3 if doc.cover_id.is_none() => Line::styled(text, Style::default().fg(Color::DarkGray)),
            3 => Line::styled(text, Style::default().fg(Color::Cyan)),
            _ => Line::styled(text, Style::default().fg(Color::Gray)),
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_pager(frame: &mut Frame, app: &App, area: Rect) {
    let pager = app.controller().session().pager();
    if pager.total_pages == 0 {
        return;
    }

    let enabled = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled("◀ Prev", if pager.has_prev() { enabled } else { disabled }),
        Span::raw(format!("   page {}/{}   ", pager.page, pager.total_pages)),
        Span::styled("Next ▶", if pager.has_next() { enabled } else { disabled }),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.controller().session().ui().selected.is_some() {
        " Esc close · o open in browser"
    } else {
        " Tab field · ←/→ page · ↑/↓ select · Enter details · Esc quit"
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::White).bg(HEADER_BG)),
        area,
    );
}
