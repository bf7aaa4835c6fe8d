use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

use crate::session::SearchController;
use crate::tui::ui;
use crate::utils::Links;

pub struct App {
    controller: SearchController,
    links: Links,

    // Grid navigation
    pub cursor: usize,
    pub grid_columns: usize,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: SearchController, links: Links) -> Self {
        Self {
            controller,
            links,
            cursor: 0,
            grid_columns: 1,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SearchController {
        &mut self.controller
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_results();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply finished fetches; a new page of results puts the cursor back on the first card
    pub fn process_results(&mut self) {
        if self.controller.poll() {
            self.cursor = 0;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.controller.session().ui().selected.is_some() {
            self.handle_detail_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.controller.cycle_field(),
            KeyCode::Left | KeyCode::PageUp => self.controller.prev_page(),
            KeyCode::Right | KeyCode::PageDown => self.controller.next_page(),
            KeyCode::Up => self.move_cursor(-(self.grid_columns as isize)),
            KeyCode::Down => self.move_cursor(self.grid_columns as isize),
            KeyCode::Enter => {
                self.controller.select(self.cursor);
            }
            KeyCode::Backspace => {
                let mut text = self.controller.session().query().text.clone();
                if text.pop().is_some() {
                    self.controller.set_text(text);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = self.controller.session().query().text.clone();
                text.push(c);
                self.controller.set_text(text);
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.controller.close_detail(),
            KeyCode::Char('o') => self.open_selected(),
            _ => {}
        }
    }

    fn open_selected(&self) {
        let Some(doc) = self.controller.session().ui().selected.as_ref() else {
            return;
        };
        let url = doc.work_url(&self.links);
        if let Err(e) = open::that(&url) {
            tracing::warn!("failed to open {}: {}", url, e);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.controller.session().result().documents.len();
        if len == 0 {
            return;
        }
        let target = self.cursor as isize + delta;
        if (0..len as isize).contains(&target) {
            self.cursor = target as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchField, SearchResult};
    use crate::sources::mock::make_books;
    use crate::sources::MockSource;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_with(mock: Arc<MockSource>) -> App {
        let controller = SearchController::new(mock, SearchField::Title, Duration::ZERO);
        App::new(controller, Links::default())
    }

    #[tokio::test]
    async fn test_typing_searches() {
        let mock = Arc::new(MockSource::new());
        mock.set_response("dune", SearchResult::new(make_books("Dune", 20), 45));
        let mut app = app_with(mock);

        type_text(&mut app, "dune");
        app.controller_mut().settle().await;

        let session = app.controller().session();
        assert_eq!(session.query().text, "dune");
        assert_eq!(session.result().documents.len(), 20);
    }

    #[tokio::test]
    async fn test_tab_cycles_field_and_resets_page() {
        let mock = Arc::new(MockSource::new());
        mock.set_response("dune", SearchResult::new(make_books("Dune", 20), 45));
        let mut app = app_with(mock.clone());

        type_text(&mut app, "dune");
        app.controller_mut().settle().await;
        app.handle_key(key(KeyCode::Right));
        app.controller_mut().settle().await;
        assert_eq!(app.controller().session().query().page, 2);

        app.handle_key(key(KeyCode::Tab));
        let query = app.controller().session().query();
        assert_eq!(query.field, SearchField::Author);
        assert_eq!(query.page, 1);
    }

    #[tokio::test]
    async fn test_backspace_to_empty_clears_results() {
        let mock = Arc::new(MockSource::new());
        mock.set_response("a", SearchResult::new(make_books("A", 3), 3));
        let mut app = app_with(mock.clone());

        type_text(&mut app, "a");
        app.controller_mut().settle().await;
        assert_eq!(app.controller().session().result().documents.len(), 3);

        app.handle_key(key(KeyCode::Backspace));
        assert!(app.controller().session().result().is_empty());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_enter_opens_and_esc_closes_detail() {
        let mock = Arc::new(MockSource::new());
        mock.set_response("dune", SearchResult::new(make_books("Dune", 6), 6));
        let mut app = app_with(mock);
        app.grid_columns = 3;

        type_text(&mut app, "dune");
        app.controller_mut().settle().await;
        let before = app.controller().session().result().clone();

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        let selected = app.controller().session().ui().selected.clone();
        assert_eq!(selected.map(|doc| doc.title), Some("Dune 4".to_string()));

        // Keys go to the panel while it is open
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.controller().session().query().text, "dune");

        app.handle_key(key(KeyCode::Esc));
        assert!(app.controller().session().ui().selected.is_none());
        assert!(!app.should_quit);
        assert_eq!(app.controller().session().result(), &before);
    }

    #[tokio::test]
    async fn test_cursor_stays_in_bounds() {
        let mock = Arc::new(MockSource::new());
        mock.set_response("dune", SearchResult::new(make_books("Dune", 4), 4));
        let mut app = app_with(mock);
        app.grid_columns = 3;

        type_text(&mut app, "dune");
        app.controller_mut().settle().await;

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor, 0);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.cursor, 3);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.cursor, 3);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app_with(Arc::new(MockSource::new()));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = app_with(Arc::new(MockSource::new()));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
