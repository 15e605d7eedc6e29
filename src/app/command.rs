//! Command parsing for the command line

use crate::catalog::{Difficulty, LinkKind};

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Filter by company tag: :company <query> (no argument clears it)
    Company(String),
    /// Filter by source link: :source <kind|all>
    Source(Option<LinkKind>),
    /// Filter by difficulty: :difficulty <easy|medium|hard|all>
    Difficulty(Option<Difficulty>),
    /// Drop every filter: :nofilter
    ClearFilters,
    /// Copy a link of the selected problem: :yank [kind]
    Yank(Option<LinkKind>),
    /// Toggle a problem by id: :done <id>
    Toggle(String),
    /// Re-read progress from disk: :reload
    Reload,
    /// Forget all progress: :reset
    Reset,
    /// Switch to the problem list: :list
    ShowProblems,
    /// Switch to the progress view: :stats
    ShowProgress,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument was not understood
    InvalidArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "company" | "c" => ParseResult::Ok(Command::Company(args.to_string())),
        "source" | "src" => {
            parse_optional("source", args, |s| s.parse::<LinkKind>(), Command::Source)
        }
        "difficulty" | "diff" | "d" => {
            parse_optional("difficulty", args, |s| s.parse::<Difficulty>(), Command::Difficulty)
        }
        "nofilter" | "nof" | "clear-filters" => ParseResult::Ok(Command::ClearFilters),
        "done" | "toggle" | "t" => {
            if args.is_empty() {
                ParseResult::MissingArgument("done".to_string())
            } else {
                ParseResult::Ok(Command::Toggle(args.to_string()))
            }
        }
        "yank" | "y" if args.is_empty() => ParseResult::Ok(Command::Yank(None)),
        "yank" | "y" => match args.parse::<LinkKind>() {
            Ok(kind) => ParseResult::Ok(Command::Yank(Some(kind))),
            Err(e) => ParseResult::InvalidArgument(e),
        },
        "reload" | "r" => ParseResult::Ok(Command::Reload),
        "reset" => ParseResult::Ok(Command::Reset),
        "list" | "ls" | "problems" => ParseResult::Ok(Command::ShowProblems),
        "stats" | "progress" => ParseResult::Ok(Command::ShowProgress),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

/// Parse an argument where "all" means no restriction
fn parse_optional<T>(
    name: &str,
    args: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
    wrap: impl FnOnce(Option<T>) -> Command,
) -> ParseResult {
    if args.is_empty() {
        return ParseResult::MissingArgument(name.to_string());
    }
    if args.eq_ignore_ascii_case("all") {
        return ParseResult::Ok(wrap(None));
    }
    match parse(args) {
        Ok(value) => ParseResult::Ok(wrap(Some(value))),
        Err(e) => ParseResult::InvalidArgument(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert!(matches!(parse_command("q"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("quit"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("Q"), ParseResult::Ok(Command::Quit)));
    }

    #[test]
    fn parse_source_command() {
        assert!(matches!(
            parse_command("source leetcode"),
            ParseResult::Ok(Command::Source(Some(LinkKind::LeetCode)))
        ));
        assert!(matches!(parse_command("source ALL"), ParseResult::Ok(Command::Source(None))));
        assert!(matches!(parse_command("source"), ParseResult::MissingArgument(_)));
        assert!(matches!(parse_command("source myspace"), ParseResult::InvalidArgument(_)));
    }

    #[test]
    fn parse_difficulty_command() {
        assert!(matches!(
            parse_command("d hard"),
            ParseResult::Ok(Command::Difficulty(Some(Difficulty::Hard)))
        ));
        assert!(matches!(parse_command("difficulty all"), ParseResult::Ok(Command::Difficulty(None))));
    }

    #[test]
    fn parse_company_keeps_spaces() {
        match parse_command("company goldman sachs") {
            ParseResult::Ok(Command::Company(q)) => assert_eq!(q, "goldman sachs"),
            other => panic!("Expected Company command, got {:?}", other),
        }
        assert!(matches!(parse_command("company"), ParseResult::Ok(Command::Company(q)) if q.is_empty()));
    }

    #[test]
    fn parse_toggle_command() {
        assert!(matches!(parse_command("done s1p2"), ParseResult::Ok(Command::Toggle(id)) if id == "s1p2"));
        assert!(matches!(parse_command("done"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_yank_command() {
        assert!(matches!(parse_command("yank"), ParseResult::Ok(Command::Yank(None))));
        assert!(matches!(
            parse_command("y yt"),
            ParseResult::Ok(Command::Yank(Some(LinkKind::YouTube)))
        ));
        assert!(matches!(parse_command("yank myspace"), ParseResult::InvalidArgument(_)));
    }

    #[test]
    fn parse_screen_commands() {
        assert!(matches!(parse_command("stats"), ParseResult::Ok(Command::ShowProgress)));
        assert!(matches!(parse_command("list"), ParseResult::Ok(Command::ShowProblems)));
        assert!(matches!(parse_command("reset"), ParseResult::Ok(Command::Reset)));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_command("unknown"), ParseResult::UnknownCommand(_)));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert!(matches!(parse_command(""), ParseResult::Ok(Command::Nop)));
        assert!(matches!(parse_command("   "), ParseResult::Ok(Command::Nop)));
    }
}
