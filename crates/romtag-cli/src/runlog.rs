//! Run log: a `log::Log` sink appending `timestamp\tLEVEL\tmessage` lines

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Appends one tab-separated line per log record to a file
pub struct RunLog {
    file: Mutex<File>,
    level: LevelFilter,
}

impl RunLog {
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open run log {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

/// One log line, without the trailing newline
fn format_line(timestamp: &str, record: &Record) -> String {
    // Keep one record per line and exactly three fields
    let message = record.args().to_string().replace(['\t', '\n', '\r'], " ");
    format!("{}\t{}\t{}", timestamp, record.level(), message)
}

impl Log for RunLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let line = format_line(&timestamp, record);
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        // A failed log write must not abort the run
        let _ = writeln!(file, "{}", line);
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        let _ = file.flush();
    }
}

/// Install the run log as the global logger
pub fn install(path: &Path, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let sink = RunLog::open(path, level)?;
    log::set_boxed_logger(Box::new(sink)).context("A logger is already installed")?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use tempfile::tempdir;

    fn emit(sink: &RunLog, level: Level, message: &str) {
        sink.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", message))
                .build(),
        );
        sink.flush();
    }

    #[test]
    fn test_lines_have_three_tab_separated_fields() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("logs").join("romtag.log");
        let sink = RunLog::open(&path, LevelFilter::Info).unwrap();

        emit(&sink, Level::Warn, "game1: missing disk\tdiskA");
        emit(&sink, Level::Info, "game1.zip: Device");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let fields: Vec<&str> = lines[0].split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert!(chrono::DateTime::parse_from_rfc3339(fields[0]).is_ok());
        assert_eq!(fields[1], "WARN");
        assert_eq!(fields[2], "game1: missing disk diskA");
    }

    #[test]
    fn test_level_filter() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("romtag.log");
        let sink = RunLog::open(&path, LevelFilter::Info).unwrap();

        emit(&sink, Level::Debug, "cache hit");
        emit(&sink, Level::Error, "query failed");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("ERROR\tquery failed"));
    }

    #[test]
    fn test_appends_across_opens() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("romtag.log");

        emit(&RunLog::open(&path, LevelFilter::Info).unwrap(), Level::Info, "first");
        emit(&RunLog::open(&path, LevelFilter::Info).unwrap(), Level::Info, "second");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
