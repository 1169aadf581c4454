use chrono::Local;
use clipper_shared::{LogEntry, SubmissionRecord};
use std::sync::Arc;
use tracing::{error, info};

use crate::repository::{RecordLog, RecordSink};
use crate::{CoreError, CoreResult};

/// Stamps submissions with the current local time and appends them to a sink.
#[derive(Clone)]
pub struct EventLogger {
    sink: Arc<dyn RecordSink>,
}

impl EventLogger {
    pub fn new(sink: Arc<dyn RecordSink>) -> Self {
        Self { sink }
    }

    /// Appends exactly one entry for `record` to `log`.
    pub async fn append(&self, record: SubmissionRecord, log: RecordLog) -> CoreResult<LogEntry> {
        let entry = LogEntry::stamped(record, Local::now());

        self.sink.append(log, &entry).await.map_err(|e| {
            error!("Failed to append to {}: {}", log, e);
            CoreError::StorageError(e.to_string())
        })?;

        info!("Logged submission {} to {} ({} fields)", entry.timestamp, log, entry.record.len());
        Ok(entry)
    }
}
