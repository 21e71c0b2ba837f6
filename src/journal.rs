//! Append-only event journals for compile runs.
//!
//! The compiler never owns a global logger: it is handed a [`LogSink`]
//! and appends one line per event. Every event is also forwarded to the
//! [`log`] facade so host applications see it through their own logger.
//!
//! Sinks must not fail the caller. [`FileLog`] reports its own I/O
//! errors through the facade and otherwise ignores them.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Severity of a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    fn forward(self, message: &str) {
        match self {
            Level::Info => log::info!("{}", message),
            Level::Warn => log::warn!("{}", message),
            Level::Error => log::error!("{}", message),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for compile events.
pub trait LogSink {
    /// Records one event. Implementations must not panic on I/O failure.
    fn append(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.append(Level::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.append(Level::Warn, message);
    }

    fn error(&mut self, message: &str) {
        self.append(Level::Error, message);
    }
}

/// Formats a log line: `<RFC 3339 local timestamp> <LEVEL> <message>`.
pub fn format_line(level: Level, message: &str) -> String {
    format!(
        "{} {} {}",
        chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
        level,
        message
    )
}

/// Appends timestamped lines to a file, creating it on first write.
#[derive(Debug, Clone)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl LogSink for FileLog {
    fn append(&mut self, level: Level, message: &str) {
        level.forward(message);
        if let Err(e) = self.write_line(&format_line(level, message)) {
            log::error!("could not append to {}: {}", self.path.display(), e);
        }
    }
}

/// Keeps lines in memory. Useful for inspecting a compile run.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    entries: Vec<(Level, String)>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Level, String)] {
        &self.entries
    }

    /// Messages logged at exactly `level`.
    pub fn messages(&self, level: Level) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
    }
}

impl LogSink for MemoryLog {
    fn append(&mut self, level: Level, message: &str) {
        level.forward(message);
        self.entries.push((level, message.to_string()));
    }
}

/// Forwards events to the [`log`] facade only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn append(&mut self, level: Level, message: &str) {
        level.forward(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_has_timestamp_and_level() {
        let line = format_line(Level::Warn, "something odd");
        let mut parts = line.splitn(3, ' ');
        let stamp = parts.next().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert_eq!(parts.next(), Some("WARN"));
        assert_eq!(parts.next(), Some("something odd"));
    }

    #[test]
    fn test_file_log_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs/compile.log");
        let mut log = FileLog::new(&path);
        log.info("first");
        log.warn("second");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO first"));
        assert!(lines[1].ends_with("WARN second"));

        let mut again = FileLog::new(&path);
        again.error("third");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_file_log_unwritable_does_not_panic() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory where the log file should be.
        let mut log = FileLog::new(tmp.path());
        log.info("lost");
    }

    #[test]
    fn test_memory_log_filters_by_level() {
        let mut log = MemoryLog::new();
        log.info("a");
        log.warn("b");
        log.warn("c");
        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.messages(Level::Warn).collect::<Vec<_>>(), ["b", "c"]);
    }
}
