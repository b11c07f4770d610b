//! Durable append-only SMS log
//!
//! One JSON object per line, appended synchronously on every ingestion.
//! Failures are logged and swallowed; durability is best-effort.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::types::SmsEvent;

/// Append-only JSONL writer
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    /// Held for the whole append so concurrent writers never interleave
    append_lock: Mutex<()>,
}

impl EventLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event, logging instead of returning any failure
    pub fn persist(&self, event: &SmsEvent) {
        match self.try_append(event.payload()) {
            Ok(()) => debug!("Persisted SMS to {}", self.path.display()),
            Err(e) => warn!("Failed to persist SMS to {}: {}", self.path.display(), e),
        }
    }

    fn try_append(&self, line: &str) -> io::Result<()> {
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        let _guard = self.append_lock.lock();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.as_bytes())
    }

    /// Read back every line of the log, skipping blank lines
    pub fn read_lines(&self) -> io::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn event(sender: &str) -> SmsEvent {
        let body = format!(r#"{{"sender":"{}","message":"hello"}}"#, sender);
        SmsEvent::parse(body.as_bytes(), "2024-01-01T00:00:00Z".to_string()).unwrap()
    }

    #[test]
    fn test_persist_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("nested/sms_log.jsonl"));

        log.persist(&event("a"));
        log.persist(&event("b"));

        let lines = log.read_lines().unwrap();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["sender"], "a");
        assert_eq!(first["received_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_concurrent_persists_keep_one_event_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(EventLog::new(dir.path().join("sms_log.jsonl")));
        let message = "x".repeat(2048);

        let writers: Vec<_> = (0..16)
            .map(|w| {
                let log = Arc::clone(&log);
                let message = message.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let body = format!(
                            r#"{{"sender":"w{}","message":"{}","seq":{}}}"#,
                            w, message, i
                        );
                        let event =
                            SmsEvent::parse(body.as_bytes(), "2024-01-01T00:00:00Z".to_string())
                                .unwrap();
                        log.persist(&event);
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let lines = log.read_lines().unwrap();
        assert_eq!(lines.len(), 1600);
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["message"].as_str().unwrap().len(), 2048);
        }
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("absent.jsonl"));
        assert!(log.read_lines().unwrap().is_empty());
    }

    #[test]
    fn test_persist_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let log = EventLog::new(dir.path());
        log.persist(&event("a"));
    }
}
