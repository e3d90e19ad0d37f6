//! Main TUI application.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::column::Column;
use crate::store::WidthStore;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::{AppState, CellAlign, default_columns, load_columns};

/// Main TUI application.
pub struct App {
    state: AppState,
    store: WidthStore,
    /// Column file to re-read on reload. Built-in columns when `None`.
    columns_path: Option<PathBuf>,
    should_quit: bool,
}

impl App {
    /// Creates a new App around an already built table state.
    pub fn new(state: AppState, store: WidthStore, columns_path: Option<PathBuf>) -> Self {
        Self {
            state,
            store,
            columns_path,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        let result = self.event_loop(&mut terminal, &events);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) | Ok(Event::Resize) => {}
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::ReloadColumns => self.reload_columns(),
                    KeyAction::ResetWidths => self.reset_widths(),
                    KeyAction::None => {}
                },
                Ok(Event::Mouse(mouse)) => handle_mouse(&mut self.state, mouse),
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Reads the column spec again and hands it to the table.
    fn reload_columns(&mut self) {
        match self.read_columns() {
            Ok(spec) => {
                info!(columns = spec.len(), "column spec reloaded");
                self.state.apply_spec(spec);
                self.state.status_message = Some("Columns reloaded".to_string());
            }
            Err(e) => {
                warn!(error = %e, "failed to reload columns");
                self.state.status_message = Some(format!("Reload failed: {}", e));
            }
        }
    }

    fn read_columns(&self) -> io::Result<Vec<Column<CellAlign>>> {
        match &self.columns_path {
            Some(path) => load_columns(path),
            None => Ok(default_columns()),
        }
    }

    /// Forgets saved widths and falls back to the spec's widths.
    fn reset_widths(&mut self) {
        let Some(table_id) = self.state.table.table_id().map(str::to_string) else {
            self.state.status_message = Some("Table has no identity".to_string());
            return;
        };
        if let Err(e) = self.store.clear(&table_id) {
            warn!(table = %table_id, error = %e, "failed to clear saved widths");
            self.state.status_message = Some(format!("Reset failed: {}", e));
            return;
        }
        info!(table = %table_id, "saved widths cleared");
        let spec = self.state.spec.clone();
        self.state.apply_spec(spec);
        self.state.status_message = Some(format!("Widths reset for '{}'", table_id));
    }
}
