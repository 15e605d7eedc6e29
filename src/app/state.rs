//! Application state definitions

use std::collections::HashSet;

use crate::catalog::Problem;
use crate::progress::CompletionRecord;
use crate::stats::{FilteredCatalog, Tally};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Problems,
    Progress,
    Help,
}

impl Screen {
    /// Tab order between the two main screens
    pub fn next_tab(self) -> Self {
        match self {
            Screen::Problems => Screen::Progress,
            Screen::Progress | Screen::Help => Screen::Problems,
        }
    }
}

/// Which chart the progress screen shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartView {
    #[default]
    Overview,
    ByTopic,
    ByDifficulty,
}

impl ChartView {
    pub const ALL: [ChartView; 3] = [ChartView::Overview, ChartView::ByTopic, ChartView::ByDifficulty];

    pub fn next(self) -> Self {
        match self {
            ChartView::Overview => ChartView::ByTopic,
            ChartView::ByTopic => ChartView::ByDifficulty,
            ChartView::ByDifficulty => ChartView::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ChartView::Overview => ChartView::ByDifficulty,
            ChartView::ByTopic => ChartView::Overview,
            ChartView::ByDifficulty => ChartView::ByTopic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartView::Overview => "Overview",
            ChartView::ByTopic => "By Topic",
            ChartView::ByDifficulty => "By Difficulty",
        }
    }
}

/// A row in the problem list
#[derive(Debug, Clone, PartialEq)]
pub enum ListRow<'a> {
    Topic { name: &'a str, tally: Tally, expanded: bool },
    Problem { topic: &'a str, problem: &'a Problem, completed: bool },
}

/// State for the topic/problem tree
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected row (flat index)
    pub selected_index: usize,
    /// Topic names that are expanded
    pub expanded_topics: HashSet<String>,
    /// Problem whose details are open
    pub open_problem: Option<String>,
    /// Scroll offset for long lists
    pub scroll_offset: usize,
    /// Visible height in rows (updated on render)
    pub visible_height: usize,
}

impl ListState {
    /// Ensure the selected item is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        let visible = self.visible_height.saturating_sub(2);
        if visible > 0 && self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index.saturating_sub(visible) + 1;
        }
    }

    /// Keep the selection inside `row_count` rows
    pub fn clamp_selection(&mut self, row_count: usize) {
        if row_count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= row_count {
            self.selected_index = row_count - 1;
        }
        self.ensure_selection_visible();
    }

    /// Expand a collapsed topic or collapse an expanded one
    pub fn toggle_topic(&mut self, name: &str) {
        if !self.expanded_topics.remove(name) {
            self.expanded_topics.insert(name.to_string());
        }
    }

    /// Open details for a problem, or close them if already open
    pub fn toggle_details(&mut self, id: &str) {
        if self.open_problem.as_deref() == Some(id) {
            self.open_problem = None;
        } else {
            self.open_problem = Some(id.to_string());
        }
    }

    /// Flatten the filtered catalog into visible rows
    pub fn rows<'a>(
        &self,
        filtered: &FilteredCatalog<'a>,
        record: &CompletionRecord,
    ) -> Vec<ListRow<'a>> {
        let mut rows = Vec::new();

        for topic in &filtered.topics {
            let completed =
                topic.problems.iter().filter(|p| record.is_completed(&p.id)).count();
            let expanded = self.expanded_topics.contains(topic.name);
            rows.push(ListRow::Topic {
                name: topic.name,
                tally: Tally::new(completed, topic.problems.len()),
                expanded,
            });

            if expanded {
                for &problem in &topic.problems {
                    rows.push(ListRow::Problem {
                        topic: topic.name,
                        problem,
                        completed: record.is_completed(&problem.id),
                    });
                }
            }
        }

        rows
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Normal mode - command line hidden or showing status
    #[default]
    Normal,
    /// Command mode - accepting : commands
    Command,
    /// Search mode - accepting / company queries
    Search,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
    /// Query to restore if a search is cancelled
    pub search_origin: String,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 200;

    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Start search mode, prefilled with the current query
    pub fn enter_search_mode(&mut self, current: &str) {
        self.mode = CommandMode::Search;
        self.search_origin = current.to_string();
        self.input = current.to_string();
        self.cursor = self.char_count();
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    /// Get the number of characters in input
    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor (cursor is character index)
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Check if we're in input mode
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, CommandMode::Command | CommandMode::Search)
    }

    /// Add to history
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self.history_index {
            None => self.history_index = Some(self.history.len() - 1),
            Some(i) if i > 0 => self.history_index = Some(i - 1),
            _ => {}
        }
        if let Some(i) = self.history_index {
            self.input = self.history[i].clone();
            self.cursor = self.char_count();
        }
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
                self.cursor = self.char_count();
            } else {
                self.history_index = None;
                self.input.clear();
                self.cursor = 0;
            }
        }
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Screen to return to when help closes
    pub previous_screen: Screen,

    /// Problem tree state
    pub list: ListState,

    /// Selected progress chart
    pub chart: ChartView,

    /// First topic row shown in the by-topic chart (clamped on render)
    pub topic_scroll: usize,

    /// Command line state
    pub command_line: CommandLineState,
}

impl AppState {
    /// Switch screens, remembering where help was opened from
    pub fn show(&mut self, screen: Screen) {
        if screen == Screen::Help && self.screen != Screen::Help {
            self.previous_screen = self.screen;
        }
        self.screen = screen;
    }

    pub fn close_help(&mut self) {
        if self.screen == Screen::Help {
            self.screen = self.previous_screen;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Difficulty, SourceLinks, TopicSection};
    use crate::stats::{ProblemFilter, filter_problems};

    fn catalog() -> Catalog {
        let problem = |id: &str| Problem {
            id: id.into(),
            title: id.into(),
            difficulty: Difficulty::Easy,
            links: SourceLinks::default(),
            company_tags: Default::default(),
        };
        Catalog::new(vec![
            TopicSection { name: "A".into(), problems: vec![problem("a1"), problem("a2")] },
            TopicSection { name: "B".into(), problems: vec![problem("b1")] },
        ])
    }

    #[test]
    fn collapsed_topics_show_one_row_each() {
        let catalog = catalog();
        let filtered = filter_problems(&catalog, &ProblemFilter::default());
        let rows = ListState::default().rows(&filtered, &CompletionRecord::new());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn expanded_topic_lists_problems_with_status() {
        let catalog = catalog();
        let filtered = filter_problems(&catalog, &ProblemFilter::default());
        let record: CompletionRecord = ["a2"].into_iter().collect();
        let mut list = ListState::default();
        list.toggle_topic("A");

        let rows = list.rows(&filtered, &record);
        assert_eq!(rows.len(), 4);
        assert!(matches!(rows[0], ListRow::Topic { tally: Tally { completed: 1, total: 2 }, .. }));
        assert!(matches!(rows[1], ListRow::Problem { completed: false, .. }));
        assert!(matches!(rows[2], ListRow::Problem { completed: true, .. }));
    }

    #[test]
    fn toggle_topic_collapses_again() {
        let mut list = ListState::default();
        list.toggle_topic("A");
        list.toggle_topic("A");
        assert!(list.expanded_topics.is_empty());
    }

    #[test]
    fn clamp_selection_stays_in_bounds() {
        let mut list = ListState { selected_index: 10, ..Default::default() };
        list.clamp_selection(3);
        assert_eq!(list.selected_index, 2);
        list.clamp_selection(0);
        assert_eq!(list.selected_index, 0);
    }

    #[test]
    fn ensure_selection_visible_scrolls_down() {
        let mut list = ListState { selected_index: 20, visible_height: 10, ..Default::default() };
        list.ensure_selection_visible();
        assert!(list.scroll_offset > 0);
        assert!(list.selected_index < list.scroll_offset + list.visible_height);
    }

    #[test]
    fn chart_view_cycles() {
        assert_eq!(ChartView::Overview.next().next().next(), ChartView::Overview);
        assert_eq!(ChartView::Overview.prev(), ChartView::ByDifficulty);
    }

    #[test]
    fn help_returns_to_previous_screen() {
        let mut state = AppState::default();
        state.show(Screen::Progress);
        state.show(Screen::Help);
        state.close_help();
        assert_eq!(state.screen, Screen::Progress);
    }

    #[test]
    fn search_mode_prefills_query() {
        let mut cmd = CommandLineState::default();
        cmd.enter_search_mode("amaz");
        assert_eq!(cmd.input, "amaz");
        assert_eq!(cmd.search_origin, "amaz");
        assert_eq!(cmd.cursor, 4);
        cmd.delete_char();
        assert_eq!(cmd.input, "ama");
    }

    #[test]
    fn history_navigation() {
        let mut cmd = CommandLineState::default();
        cmd.add_to_history("source gfg".into());
        cmd.add_to_history("difficulty hard".into());
        cmd.history_up();
        assert_eq!(cmd.input, "difficulty hard");
        cmd.history_up();
        assert_eq!(cmd.input, "source gfg");
        cmd.history_down();
        assert_eq!(cmd.input, "difficulty hard");
        cmd.history_down();
        assert!(cmd.input.is_empty());
    }
}
