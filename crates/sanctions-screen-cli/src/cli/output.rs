//! Shared CLI output formatting with colors, symbols, and structured display.

use sanctions_screen::{SearchResult, SearchStatus};
use std::io::IsTerminal;

/// How the user asked output to be presented. Built once from the global flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputMode {
    pub quiet: bool,
    pub json: bool,
    pub color: bool,
}

impl OutputMode {
    pub fn new(quiet: bool, json: bool, no_color: bool) -> Self {
        Self {
            quiet,
            json,
            color: !no_color && color_enabled(),
        }
    }

    /// Whether progress bars and decorative lines should be drawn.
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    std::io::stderr().is_terminal()
}

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            use_color: mode.color,
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    /// Yellow warning symbol.
    pub fn warn_sym(&self) -> &str {
        if self.use_color {
            "\x1b[33m\u{26a0}\x1b[0m"
        } else {
            "??"
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }

    /// Status label colored by outcome: red for hits, green for clean.
    pub fn status(&self, status: SearchStatus) -> String {
        let label = status.as_str();
        match status {
            SearchStatus::Match => self.red(&self.bold(label)),
            SearchStatus::NoMatch => self.green(label),
            SearchStatus::Unknown => self.yellow(label),
            SearchStatus::Error => self.red(label),
        }
    }
}

/// Render one search result as the human-readable lookup block.
pub fn format_result(s: &Styled, result: &SearchResult, max_links: usize) -> String {
    let mut lines = vec![format!("{} {}", s.bold("Name:"), result.query_name)];

    if result.status == SearchStatus::Error {
        lines.push(format!("Status: {}", s.status(result.status)));
        lines.push(format!(
            "Error:  {}",
            result.error.as_deref().unwrap_or("request failed")
        ));
        return lines.join("\n");
    }

    lines.push(format!("Search: {}", s.dim(&result.search_url)));
    lines.push(format!("Status: {}", s.status(result.status)));

    match result.status {
        SearchStatus::NoMatch => lines.push("Matches: 0".to_string()),
        SearchStatus::Unknown => {
            if let Some(note) = &result.note {
                lines.push(format!("Note:   {note}"));
            }
        }
        _ => {
            lines.push(format!(
                "Matches (max {max_links}): {}",
                result.match_count
            ));
            for (i, entity) in result.entities.iter().enumerate() {
                let label = if entity.title.is_empty() {
                    "(untitled)"
                } else {
                    entity.title.as_str()
                };
                lines.push(format!("{}. {label}", i + 1));
                lines.push(format!("   {}", s.cyan(&entity.url)));
            }
        }
    }

    lines.join("\n")
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanctions_screen::{Classification, EntityLink};

    fn plain() -> Styled {
        Styled::new(OutputMode::default())
    }

    #[test]
    fn test_format_match_block() {
        let result = SearchResult::new(
            "Vladimir Putin",
            "https://www.opensanctions.org/search/?q=Vladimir+Putin",
            Classification::Match(vec![
                EntityLink::new("Vladimir Putin", "https://www.opensanctions.org/entities/Q7747/"),
                EntityLink::new("", "https://www.opensanctions.org/entities/NK-1/"),
            ]),
        );
        let block = format_result(&plain(), &result, 5);
        assert_eq!(
            block,
            "Name: Vladimir Putin\n\
             Search: https://www.opensanctions.org/search/?q=Vladimir+Putin\n\
             Status: match\n\
             Matches (max 5): 2\n\
             1. Vladimir Putin\n   https://www.opensanctions.org/entities/Q7747/\n\
             2. (untitled)\n   https://www.opensanctions.org/entities/NK-1/"
        );
    }

    #[test]
    fn test_format_error_block_omits_url() {
        let result = SearchResult::new("X", "https://u", Classification::Error("boom".into()));
        let block = format_result(&plain(), &result, 5);
        assert_eq!(block, "Name: X\nStatus: error\nError:  boom");
    }

    #[test]
    fn test_no_color_is_plain() {
        let s = plain();
        assert_eq!(s.status(SearchStatus::Match), "match");
        assert_eq!(s.ok_sym(), "OK");
    }
}
