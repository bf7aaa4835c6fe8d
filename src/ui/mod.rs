//! Styled terminal output for the one-shot CLI.
//!
//! This module provides colored status lines, book cards, truncation
//! helpers and a spinner. The interactive interface lives in [`crate::tui`].

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::models::{BookDoc, SearchQuery, SearchResult};
use crate::session::Pager;
use crate::utils::{CoverSize, Links};

/// Shown in place of a cover image when a record has no cover identifier
pub const COVER_PLACEHOLDER: &str = "[ no cover ]";

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Print a styled status message to stderr.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => eprintln!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => eprintln!("{} {}", icon.cyan().bold(), msg),
        Status::Search => eprintln!("{} {}", icon.yellow(), msg),
    }
}

/// Cover URL for a record, or the placeholder when it has none.
pub fn cover_label(doc: &BookDoc, links: &Links, size: CoverSize) -> String {
    doc.cover_url(links, size)
        .unwrap_or_else(|| COVER_PLACEHOLDER.to_string())
}

/// "1965" or "—" when the year is unknown.
pub fn year_label(doc: &BookDoc) -> String {
    doc.first_publish_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Print a book in a formatted card.
pub fn print_book_box(doc: &BookDoc, links: &Links) {
    let width = terminal_width().clamp(40, 100);
    let inner = width - 4;
    let rule = "─".repeat(width - 2);

    println!();
    println!("┌{}┐", rule);
    println!("│ {}", truncate_with_ellipsis(&doc.title, inner).blue().bold());
    println!("├{}┤", rule);
    println!(
        "│  Authors:   {}",
        truncate_with_ellipsis(&doc.authors_display(), inner.saturating_sub(12))
    );
    println!("│  Published: {}", year_label(doc).yellow());
    if let Some(editions) = doc.edition_count {
        println!("│  Editions:  {}", format_number(editions as usize));
    }
    let cover = cover_label(doc, links, CoverSize::Medium);
    if doc.cover_id.is_some() {
        println!("│  Cover:     {}", cover.cyan());
    } else {
        println!("│  Cover:     {}", cover.dimmed());
    }
    println!("│  Link:      {}", doc.work_url(links).underline());
    println!("└{}┘", rule);
}

/// Print search results header.
pub fn print_search_header(query: &SearchQuery, result: &SearchResult, duration: Duration) {
    println!();
    println!(
        "{} {} search for: \"{}\"",
        status_icon(Status::Search).yellow().bold(),
        query.field.label(),
        query.text.cyan().bold()
    );
    println!(
        "{} Found {} books in {:.2}s",
        "─".repeat(30).dimmed(),
        format_number(result.total_found as usize).green().bold(),
        duration.as_secs_f64().white()
    );
    println!();
}

/// "◀ Prev  page 2/3  Next ▶" with unavailable directions dimmed.
pub fn pager_line(pager: &Pager) -> String {
    if pager.total_pages == 0 {
        return "No results".to_string();
    }
    format!(
        "{}  page {}/{}  {}",
        if pager.has_prev() { "◀ Prev" } else { "      " },
        pager.page,
        pager.total_pages,
        if pager.has_next() { "Next ▶" } else { "" }
    )
    .trim_end()
    .to_string()
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(80).dimmed());
}

/// Format a number with commas.
pub fn format_number(n: usize) -> String {
    n.to_string()
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect()
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();

    if total_width <= max_width {
        return text.to_string();
    }

    // Longest prefix that still leaves room for the ellipsis
    let mut current_width = 0;
    let mut end_idx = 0;

    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width.saturating_sub(3) {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Print a loading spinner with message.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Hidden spinner for quiet or non-terminal output.
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Finish with error message.
    pub fn finish_with_error(&self, msg: &str) {
        if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.red} {msg}") {
            self.pb.set_style(style.tick_chars("✗ "));
        }
        self.pb.finish_with_message(msg.to_string());
    }

    /// Remove the spinner line.
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Error), "✗");
        assert_eq!(status_icon(Status::Search), "🔍");
    }

    #[test]
    fn test_cover_label_placeholder() {
        let links = Links::default();
        let doc = BookDoc::new("/works/OL1W", "No Cover Here");
        assert_eq!(cover_label(&doc, &links, CoverSize::Medium), COVER_PLACEHOLDER);

        let doc = doc.cover_id(42);
        assert_eq!(
            cover_label(&doc, &links, CoverSize::Small),
            "https://covers.openlibrary.org/b/id/42-S.jpg"
        );
    }

    #[test]
    fn test_year_label() {
        assert_eq!(year_label(&BookDoc::default().first_publish_year(1969)), "1969");
        assert_eq!(year_label(&BookDoc::default()), "—");
    }

    #[test]
    fn test_pager_line() {
        assert_eq!(pager_line(&Pager::new(1, 0)), "No results");
        assert_eq!(pager_line(&Pager::new(1, 45)), "        page 1/3  Next ▶");
        assert_eq!(pager_line(&Pager::new(2, 45)), "◀ Prev  page 2/3  Next ▶");
        assert_eq!(pager_line(&Pager::new(3, 45)), "◀ Prev  page 3/3");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Hello", 10), "Hello");
        assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
        assert_eq!(truncate_with_ellipsis("", 10), "");
        assert_eq!(truncate_with_ellipsis("Hello", 3), "...");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1000000), "1,000,000");
        assert_eq!(format_number(123), "123");
    }
}
