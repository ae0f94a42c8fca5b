//! Terminal presentation for the citation form.
//!
//! This module provides colored output, themed surfaces, word wrapping and
//! the lookup spinner. [`form::FormView`] is the event loop that drives a
//! [`crate::app::CitationForm`] from user input.

pub mod form;

pub use form::{Action, FormView};

use owo_colors::{OwoColorize, Style};
use std::io::IsTerminal;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

use crate::models::Theme;

/// Title shown at the top of the form
pub const WINDOW_TITLE: &str = "Tareas U. MX";

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

/// Status types for notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Status icons for different notices.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Render a status notice line: icon, bold title, message.
pub fn status_line(status: Status, title: &str, message: &str, colored: bool) -> String {
    let icon = status_icon(status);
    if !colored {
        return format!("{} {}: {}", icon, title, message);
    }

    let icon = match status {
        Status::Success => icon.green().bold().to_string(),
        Status::Error => icon.red().bold().to_string(),
        Status::Warning => icon.yellow().bold().to_string(),
        Status::Info => icon.cyan().bold().to_string(),
        Status::Search => icon.yellow().to_string(),
    };
    format!("{} {}: {}", icon, title.bold(), message)
}

/// Paint one line of the form surface with the theme's background,
/// padded to `width` columns so the colour fills the row.
pub fn paint_surface(text: &str, theme: Theme, width: usize, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }

    let padding = width.saturating_sub(text.width());
    let (fr, fg, fb) = theme.foreground();
    let (br, bg, bb) = theme.background();
    let style = Style::new()
        .truecolor(fr, fg, fb)
        .on_truecolor(br, bg, bb);
    format!("{}", format!("{}{}", text, " ".repeat(padding)).style(style))
}

/// Word-wrap `text` to at most `width` display columns per line.
///
/// Words wider than a line are put on a line of their own rather than split,
/// so URLs stay intact.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Loading spinner shown while a lookup is in flight.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    ///
    /// A hidden spinner draws nothing, for non-interactive output.
    pub fn new(msg: &str, visible: bool) -> Self {
        if !visible {
            return Self {
                pb: indicatif::ProgressBar::hidden(),
            };
        }

        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Remove the spinner from the terminal.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
