//! Terminal rendering of the transcript.

use owo_colors::OwoColorize;
use ragchat_core::conversation::{Message, Role};

/// The bar drawn in front of every message line.
pub const BAR_CHAR: &str = "▎";

/// Shown in front of the input line.
pub const PROMPT: &str = "> ";

/// Returns the header printed when the client starts.
pub fn banner() -> String {
    format!(
        "{}\n{}\n{}",
        "Agentic RAG".bold(),
        "Your AI-powered research assistant".bright_black(),
        "Ask a question... (Ctrl-D to quit)".bright_black()
    )
}

/// Formats a message as a bubble styled by its role.
///
/// Line breaks in the text are kept, each line gets its own bar.
pub fn format_message(msg: &Message) -> String {
    let (bar, icon) = match msg.role() {
        Role::User => (BAR_CHAR.bright_blue().to_string(), "🧑"),
        Role::Bot => (BAR_CHAR.bright_cyan().to_string(), "🤖"),
    };

    let mut lines = msg.text().split('\n');
    let first = lines.next().unwrap_or_default();
    let mut out = format!("{bar}{icon} {}", first.bright_white());
    for line in lines {
        out.push('\n');
        out.push_str(&format!("{bar}   {}", line.bright_white()));
    }
    out
}

/// Remembers how much of a transcript has already been rendered.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranscriptCursor {
    rendered: usize,
}

impl TranscriptCursor {
    /// Returns the messages appended since the last call, and marks them
    /// as rendered.
    pub fn take_new<'a>(&mut self, messages: &'a [Message]) -> &'a [Message] {
        let start = self.rendered.min(messages.len());
        self.rendered = messages.len();
        &messages[start..]
    }
}
