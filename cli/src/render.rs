//! Plain-text rendering of conversation messages.
//!
//! Markdown is printed as-is; terminals show it readably enough.

use std::fmt::Write;

use chat::{Author, Message};

/// Render one message as a block of lines ending with a newline. Timestamps
/// are shown in UTC and labeled as such.
pub fn message(msg: &Message) -> String {
    let who = match msg.author {
        Author::User => "you",
        Author::Assistant => "chatbw",
    };
    let time = msg.timestamp.time();
    let mut out = format!("[{:02}:{:02} UTC] {who}>\n", time.hour(), time.minute());
    for line in msg.content.lines() {
        let _ = writeln!(out, "  {line}");
    }
    if msg.author == Author::Assistant && !msg.sources.is_empty() {
        out.push_str("\n  Source References\n");
        for source in &msg.sources {
            let _ = writeln!(out, "  - {} ({})", source.title, source.path);
            let _ = writeln!(out, "    {}", source.excerpt);
        }
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
