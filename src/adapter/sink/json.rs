//! JSON file persistence sink.
//!
//! Writes timestamped, pretty-printed documents:
//! `<prefix>_<tags>_<YYYYmmdd_HHMMSS>.json` for snapshots and
//! `arbitrage_analysis_<YYYYmmdd_HHMMSS>.json` for analyses.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::error::SinkError;
use crate::port::{AnalysisDocument, ResultSink, SnapshotDocument};

/// Sink writing each document to its own JSON file.
pub struct JsonFileSink {
    markets_dir: PathBuf,
    analysis_dir: PathBuf,
    snapshot_prefix: String,
}

impl JsonFileSink {
    /// Create a new sink. Directories are created on first write.
    pub fn new(
        markets_dir: impl Into<PathBuf>,
        analysis_dir: impl Into<PathBuf>,
        snapshot_prefix: impl Into<String>,
    ) -> Self {
        Self {
            markets_dir: markets_dir.into(),
            analysis_dir: analysis_dir.into(),
            snapshot_prefix: snapshot_prefix.into(),
        }
    }

    /// Filename for a snapshot document.
    fn snapshot_path(&self, document: &SnapshotDocument) -> PathBuf {
        let tags = document.required_tags.join("_").to_lowercase();
        self.markets_dir.join(format!(
            "{}_{}_{}.json",
            self.snapshot_prefix, tags, document.timestamp
        ))
    }

    async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), SinkError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(value)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl ResultSink for JsonFileSink {
    async fn save_snapshot(&self, document: &SnapshotDocument) -> Result<(), SinkError> {
        let path = self.snapshot_path(document);
        Self::write_json(&path, document).await?;

        info!(
            path = %path.display(),
            markets = document.market_count,
            "saved market snapshot"
        );
        Ok(())
    }

    async fn save_analysis(&self, document: &AnalysisDocument) -> Result<(), SinkError> {
        let filename = format!(
            "arbitrage_analysis_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.analysis_dir.join(filename);
        Self::write_json(&path, document).await?;

        info!(
            path = %path.display(),
            relationships = document.relationships.len(),
            "saved analysis"
        );
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "json-file"
    }
}
