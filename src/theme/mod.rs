//! Theming system for dsa-sheet

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::catalog::Difficulty;

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Difficulty badges
    pub difficulty_easy: Color,
    pub difficulty_medium: Color,
    pub difficulty_hard: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
}

impl Theme {
    /// Built-in theme by name, ignoring case and `-`/`_`/space differences
    pub fn named(name: &str) -> Option<Theme> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "tokyonight" => Some(Theme::tokyo_night()),
            _ => None,
        }
    }

    /// Badge color for a difficulty
    pub fn difficulty(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Easy => self.difficulty_easy,
            Difficulty::Medium => self.difficulty_medium,
            Difficulty::Hard => self.difficulty_hard,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_tokyo_night() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Tokyo Night");
    }

    #[test]
    fn named_lookup_is_forgiving() {
        assert_eq!(Theme::named("Tokyo Night").map(|t| t.name), Some("Tokyo Night".to_string()));
        assert!(Theme::named("tokyo-night").is_some());
        assert!(Theme::named("Solarized").is_none());
    }

    #[test]
    fn difficulties_have_distinct_colors() {
        let theme = Theme::default();
        assert_ne!(theme.difficulty(Difficulty::Easy), theme.difficulty(Difficulty::Hard));
        assert_ne!(theme.difficulty(Difficulty::Medium), theme.difficulty(Difficulty::Hard));
    }
}
