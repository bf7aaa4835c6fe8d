//! Interactive terminal interface.
//!
//! A search bar with a field selector, a grid of result cards, a pager and a
//! detail overlay, redrawn on every tick while searches run in the background.

mod app;
mod detail;
mod ui;

pub use app::App;
pub use detail::detail_lines;
pub use ui::{card_lines, grid_columns};

/// Take over the terminal and run `app` until the user quits
pub fn run(mut app: App) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
