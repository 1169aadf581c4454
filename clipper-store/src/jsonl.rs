use async_trait::async_trait;
use clipper_core::{BoxError, RecordLog, RecordSink};
use clipper_shared::LogEntry;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Writes each log as a newline-delimited JSON file inside one directory.
///
/// The file is opened in append mode for every entry and closed right after,
/// so no handle outlives a request. Appends are not locked; each entry goes
/// out as a single write call.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    dir: PathBuf,
}

impl JsonlSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, log: RecordLog) -> PathBuf {
        self.dir.join(log.file_name())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl RecordSink for JsonlSink {
    async fn append(&self, log: RecordLog, entry: &LogEntry) -> Result<(), BoxError> {
        let mut line = entry.to_line()?;
        line.push('\n');

        let path = self.path(log);
        let mut file = OpenOptions::new().create(true).append(true).open(&path).await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended {} bytes to {}", line.len(), path.display());
        Ok(())
    }
}
