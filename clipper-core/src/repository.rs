use async_trait::async_trait;
use clipper_shared::LogEntry;
use std::fmt;
use std::sync::Mutex;

use crate::BoxError;

/// Append-only logs the site writes submissions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordLog {
    /// Appointment requests.
    Customers,
    /// Appointment requests sent through the validation demo form.
    CustomersSvf,
    /// Contact messages.
    Messages,
}

impl RecordLog {
    pub fn file_name(&self) -> &'static str {
        match self {
            RecordLog::Customers => "customers.jsonl",
            RecordLog::CustomersSvf => "customers_svf.jsonl",
            RecordLog::Messages => "messages.jsonl",
        }
    }
}

impl fmt::Display for RecordLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Sink for log entries. Entries are only ever appended, never read back or rewritten.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn append(&self, log: RecordLog, entry: &LogEntry) -> Result<(), BoxError>;
}

/// Keeps serialized lines in memory, one vector per process.
#[derive(Default)]
pub struct InMemorySink {
    lines: Mutex<Vec<(RecordLog, String)>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written to `log`, oldest first.
    pub fn lines(&self, log: RecordLog) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| {
                lines
                    .iter()
                    .filter(|(l, _)| *l == log)
                    .map(|(_, line)| line.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecordSink for InMemorySink {
    async fn append(&self, log: RecordLog, entry: &LogEntry) -> Result<(), BoxError> {
        let line = entry.to_line()?;
        self.lines
            .lock()
            .map_err(|_| "in-memory sink poisoned")?
            .push((log, line));
        Ok(())
    }
}
