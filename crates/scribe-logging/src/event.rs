//! Raw log events

use scribe_core::Severity;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// File and line of the call that produced an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self {
            file: Cow::Borrowed(file),
            line,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single log event as handed to every output
///
/// The format string and the rendered arguments are kept apart so the binary
/// output can store them raw; human-readable outputs substitute them with
/// [`Event::message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub severity: Severity,
    pub category: Cow<'static, str>,
    pub logger: Arc<str>,
    pub timestamp: SystemTime,
    pub location: Option<SourceLocation>,
    pub format: Cow<'static, str>,
    pub args: Vec<String>,
}

impl Event {
    /// Message with the arguments substituted into the format
    pub fn message(&self) -> String {
        render_template(&self.format, &self.args)
    }

    /// `<timestamp> <SEVERITY> [<logger>] <message>[ (<category>)][ (<file>:<line>)]`
    pub fn render_line(&self) -> String {
        let mut line = format!(
            "{} {} [{}] {}",
            format_timestamp(self.timestamp),
            self.severity.label(),
            self.logger,
            self.message()
        );
        if !self.category.is_empty() {
            line.push_str(" (");
            line.push_str(&self.category);
            line.push(')');
        }
        if let Some(location) = &self.location {
            let _ = write!(line, " ({location})");
        }
        line
    }
}

/// Substitute `{}` placeholders in order; `{{` and `}}` escape braces
///
/// Placeholders without a matching argument are kept verbatim.
pub fn render_template(format: &str, args: &[String]) -> String {
    let capacity = format.len() + args.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut args = args.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                out.push(c);
            }
            ('{', Some('}')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str("{}"),
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// RFC 3339 UTC rendering, falling back to seconds since the epoch
pub fn format_timestamp(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| {
            let secs = time
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or_default();
            format!("{secs:.6}")
        })
}
