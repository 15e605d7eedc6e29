//! Application state and event handling

pub mod command;
pub mod input;
pub mod sheet;
pub mod state;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::catalog::{LinkKind, SourceLinks};
use crate::config::Config;
use crate::progress::FileBackend;
use crate::theme::Theme;
use crate::ui;
use command::{Command, ParseResult, parse_command};
use input::{Action, key_to_action};
pub use sheet::{Sheet, ToggleResult};
use state::{AppState, CommandMode, ListRow, Screen};

/// Owned copy of whatever row is selected
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selected {
    Topic(String),
    Problem { id: String, title: String, links: SourceLinks },
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Theme resolved from the configuration
    theme: Theme,

    /// Current application state
    state: AppState,

    /// Catalog, completion store and filter
    sheet: Sheet<FileBackend>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance, loading the catalog and progress
    pub async fn new(config: Config) -> Result<Self> {
        let sheet =
            Sheet::open(config.load_catalog()?, config.backend()?, config.storage_key.clone()).await;
        tracing::info!(
            problems = sheet.catalog().problem_count(),
            completed = sheet.record().len(),
            "Starting dsa-sheet"
        );

        let terminal = Self::setup_terminal()?;
        let theme = config.active_theme();

        Ok(Self { config, theme, state: AppState::default(), sheet, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
            original_hook(panic_info);
        }));

        loop {
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &self.sheet, &self.theme);
            })?;

            if !event::poll(std::time::Duration::from_millis(250))? {
                continue;
            }

            let exit = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
                // Returning to the terminal may follow changes made elsewhere
                Event::FocusGained => {
                    self.reload().await;
                    Ok(false)
                }
                _ => Ok(false),
            };

            match exit {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Error handling event: {}", e);
                    self.state.command_line.set_error(e.to_string());
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.state.command_line.is_input_mode() {
            return self.handle_input_key(key.code).await;
        }

        let Some(action) = key_to_action(key.code, key.modifiers, self.config.vim_mode) else {
            return Ok(false);
        };

        if self.state.screen == Screen::Help {
            match action {
                Action::Quit => return Ok(true),
                _ => self.state.close_help(),
            }
            return Ok(false);
        }

        match action {
            Action::Quit => return Ok(true),
            Action::Help => self.state.show(Screen::Help),
            Action::Command => self.state.command_line.enter_command_mode(),
            Action::Search => {
                let current = self.sheet.filter().company.clone();
                self.state.command_line.enter_search_mode(&current);
            }
            Action::SwitchScreen => self.show(self.state.screen.next_tab()).await,
            Action::Reload => self.reload().await,
            Action::Back => {
                self.state.list.open_problem = None;
                self.state.command_line.message = None;
            }
            _ if self.state.screen == Screen::Progress => self.handle_progress_action(action),
            _ => self.handle_list_action(action).await,
        }

        Ok(false)
    }

    fn handle_progress_action(&mut self, action: Action) {
        let scroll = &mut self.state.topic_scroll;
        match action {
            Action::NextChart | Action::Right | Action::Select => {
                self.state.chart = self.state.chart.next();
            }
            Action::Left => self.state.chart = self.state.chart.prev(),
            Action::Up => *scroll = scroll.saturating_sub(1),
            Action::Down => *scroll = scroll.saturating_add(1),
            Action::PageUp => *scroll = scroll.saturating_sub(10),
            Action::PageDown => *scroll = scroll.saturating_add(10),
            Action::Top => *scroll = 0,
            Action::Bottom => *scroll = usize::MAX,
            _ => {}
        }
    }

    async fn handle_list_action(&mut self, action: Action) {
        let row_count = self.row_count();
        let page = self.state.list.visible_height.max(1);
        let list = &mut self.state.list;

        match action {
            Action::Up => list.selected_index = list.selected_index.saturating_sub(1),
            Action::Down => list.selected_index += 1,
            Action::Top => list.selected_index = 0,
            Action::Bottom => list.selected_index = row_count.saturating_sub(1),
            Action::PageUp => list.selected_index = list.selected_index.saturating_sub(page),
            Action::PageDown => list.selected_index += page,
            Action::Select => match self.selected() {
                Some(Selected::Topic(name)) => self.state.list.toggle_topic(&name),
                Some(Selected::Problem { id, .. }) => self.state.list.toggle_details(&id),
                None => {}
            },
            Action::Right | Action::Left => {
                if let Some(Selected::Topic(name)) = self.selected() {
                    let expanded = self.state.list.expanded_topics.contains(&name);
                    if expanded == (action == Action::Left) {
                        self.state.list.toggle_topic(&name);
                    }
                }
            }
            Action::ToggleComplete => {
                if let Some(Selected::Problem { id, .. }) = self.selected() {
                    self.toggle(&id).await;
                }
            }
            Action::YankLink => self.yank_link(None),
            Action::YankKind(kind) => self.yank_link(Some(kind)),
            _ => {}
        }

        let row_count = self.row_count();
        self.state.list.clamp_selection(row_count);
    }

    /// Handle keys while the command line is taking input
    async fn handle_input_key(&mut self, code: KeyCode) -> Result<bool> {
        let searching = self.state.command_line.mode == CommandMode::Search;

        match code {
            KeyCode::Esc => {
                if searching {
                    self.sheet.filter_mut().company = self.state.command_line.search_origin.clone();
                }
                self.state.command_line.exit_input_mode();
            }
            KeyCode::Enter => {
                let input = self.state.command_line.input.clone();
                self.state.command_line.exit_input_mode();
                if searching {
                    self.set_filter_message();
                } else {
                    self.state.command_line.add_to_history(input.clone());
                    return self.run_command(&input).await;
                }
            }
            KeyCode::Backspace => self.state.command_line.delete_char(),
            KeyCode::Left => self.state.command_line.move_left(),
            KeyCode::Right => self.state.command_line.move_right(),
            KeyCode::Up if !searching => self.state.command_line.history_up(),
            KeyCode::Down if !searching => self.state.command_line.history_down(),
            KeyCode::Char(c) => self.state.command_line.insert_char(c),
            _ => {}
        }

        // Company search filters as you type
        if searching && self.state.command_line.mode == CommandMode::Search {
            self.sheet.filter_mut().company = self.state.command_line.input.clone();
        }
        let row_count = self.row_count();
        self.state.list.clamp_selection(row_count);

        Ok(false)
    }

    /// Parse and execute a `:` command, returns true if should exit
    async fn run_command(&mut self, input: &str) -> Result<bool> {
        let command = match parse_command(input) {
            ParseResult::Ok(command) => command,
            ParseResult::UnknownCommand(cmd) => {
                self.state.command_line.set_error(format!("Unknown command: {}", cmd));
                return Ok(false);
            }
            ParseResult::MissingArgument(cmd) => {
                self.state.command_line.set_error(format!("{} needs an argument", cmd));
                return Ok(false);
            }
            ParseResult::InvalidArgument(msg) => {
                self.state.command_line.set_error(msg);
                return Ok(false);
            }
        };

        match command {
            Command::Quit => return Ok(true),
            Command::Help => self.state.show(Screen::Help),
            Command::Company(query) => {
                self.sheet.filter_mut().company = query;
                self.set_filter_message();
            }
            Command::Source(source) => {
                self.sheet.filter_mut().source = source;
                self.set_filter_message();
            }
            Command::Difficulty(difficulty) => {
                self.sheet.filter_mut().difficulty = difficulty;
                self.set_filter_message();
            }
            Command::ClearFilters => {
                self.sheet.filter_mut().reset();
                self.set_filter_message();
            }
            Command::Toggle(id) => self.toggle(&id).await,
            Command::Yank(kind) => self.yank_link(kind),
            Command::Reload => self.reload().await,
            Command::Reset => match self.sheet.reset().await {
                Ok(()) => self.state.command_line.set_message("Progress cleared"),
                Err(e) => self
                    .state
                    .command_line
                    .set_error(format!("Progress cleared here but not on disk: {}", e)),
            },
            Command::ShowProblems => self.show(Screen::Problems).await,
            Command::ShowProgress => self.show(Screen::Progress).await,
            Command::Nop => self.state.command_line.message = None,
        }

        let row_count = self.row_count();
        self.state.list.clamp_selection(row_count);
        Ok(false)
    }

    /// Switch screens; the progress screen always shows fresh data
    async fn show(&mut self, screen: Screen) {
        let entering_progress = screen == Screen::Progress && self.state.screen != screen;
        self.state.show(screen);
        if entering_progress {
            if let Err(e) = self.sheet.reload().await {
                self.state.command_line.set_error(format!("Could not read progress: {}", e));
            }
        }
    }

    async fn reload(&mut self) {
        match self.sheet.reload().await {
            Ok(()) => self.state.command_line.set_message("Progress reloaded"),
            Err(e) => self.state.command_line.set_error(format!("Could not read progress: {}", e)),
        }
        let row_count = self.row_count();
        self.state.list.clamp_selection(row_count);
    }

    async fn toggle(&mut self, id: &str) {
        let result = self.sheet.toggle(id).await;
        let title = self
            .sheet
            .catalog()
            .find_problem(id)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| id.to_string());

        match (&result.error, result.completed) {
            (Some(e), _) => {
                self.state.command_line.set_error(format!("Not saved, kept in memory: {}", e));
            }
            (None, true) if result.orphan => self
                .state
                .command_line
                .set_message(format!("Marked unknown id '{}' complete", result.id)),
            (None, true) => self.state.command_line.set_message(format!("Completed: {}", title)),
            (None, false) => self.state.command_line.set_message(format!("Reopened: {}", title)),
        }
    }

    /// Copy a link of the selected problem, the primary one when `kind` is None
    fn yank_link(&mut self, kind: Option<LinkKind>) {
        let Some(Selected::Problem { title, links, .. }) = self.selected() else {
            self.state.command_line.set_error("Select a problem to copy its link");
            return;
        };
        let Some((kind, url)) = links.pick(kind).map(|(k, url)| (k, url.to_string())) else {
            let missing = match kind {
                Some(kind) => format!("{} has no {} link", title, kind),
                None => format!("{} has no links", title),
            };
            self.state.command_line.set_error(missing);
            return;
        };

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url.clone())) {
            Ok(()) => self.state.command_line.set_message(format!("Copied {} link: {}", kind, url)),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.state.command_line.set_error(format!("{} link: {}", kind, url));
            }
        }
    }

    fn set_filter_message(&mut self) {
        let filtered = self.sheet.filtered().problem_count();
        let filter = self.sheet.filter().to_string();
        self.state.command_line.set_message(format!("Showing {} ({} problems)", filter, filtered));
    }

    fn row_count(&self) -> usize {
        let filtered = self.sheet.filtered();
        self.state.list.rows(&filtered, self.sheet.record()).len()
    }

    fn selected(&self) -> Option<Selected> {
        let filtered = self.sheet.filtered();
        let rows = self.state.list.rows(&filtered, self.sheet.record());

        rows.get(self.state.list.selected_index).map(|row| match row {
            ListRow::Topic { name, .. } => Selected::Topic(name.to_string()),
            ListRow::Problem { problem, .. } => Selected::Problem {
                id: problem.id.clone(),
                title: problem.title.clone(),
                links: problem.links.clone(),
            },
        })
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
