//! Sequential batch runner.
//!
//! Each URL is downloaded to completion before the next starts. A failing URL
//! is recorded in the [`BatchReport`] and the batch moves on; nothing that goes
//! wrong for one item escapes as an `Err`.

use crate::downloader::{AudioDownloader, DownloadOutcome};
use crate::error::{DownloadError, ErrorKind};
use crate::progress::ProgressStats;
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// Result for one URL of a batch.
#[derive(Debug)]
pub struct ItemResult {
    pub index: usize,
    pub url: String,
    pub result: Result<DownloadOutcome, DownloadError>,
}

/// Ordered results of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<ItemResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Failure counts per error kind, for the summary line.
    pub fn failures_by_kind(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            if let Err(e) = &item.result {
                *counts.entry(kind_label(e.kind()).to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}

pub fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidInput => "invalid input",
        ErrorKind::Network => "network",
        ErrorKind::Encoder => "encoder",
        ErrorKind::Unsupported => "unsupported",
        ErrorKind::Tool => "tool",
        ErrorKind::Io => "io",
    }
}

/// Downloads `urls` one after another, calling `on_item` as each finishes.
pub async fn run_batch<F>(
    downloader: &AudioDownloader,
    urls: &[String],
    progress: Option<&mpsc::Sender<ProgressStats>>,
    mut on_item: F,
) -> BatchReport
where
    F: FnMut(&ItemResult),
{
    let mut report = BatchReport::default();
    for (index, url) in urls.iter().enumerate() {
        tracing::debug!(index, total = urls.len(), url = %url, "batch item");
        let result = downloader.download_audio(url, index, progress).await;
        let item = ItemResult {
            index,
            url: url.clone(),
            result,
        };
        on_item(&item);
        report.items.push(item);
    }
    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ok(index: usize) -> ItemResult {
        ItemResult {
            index,
            url: format!("https://example.com/{index}"),
            result: Ok(DownloadOutcome {
                url: format!("https://example.com/{index}"),
                path: PathBuf::from(format!("songs/{index}.mp3")),
                size_bytes: 10,
            }),
        }
    }

    fn failed(index: usize, err: DownloadError) -> ItemResult {
        ItemResult {
            index,
            url: format!("https://example.com/{index}"),
            result: Err(err),
        }
    }

    #[test]
    fn report_counts() {
        let report = BatchReport {
            items: vec![
                ok(0),
                failed(1, DownloadError::Network("dns".into())),
                failed(2, DownloadError::Network("reset".into())),
                failed(3, DownloadError::MissingEncoder("ffmpeg".into())),
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 3);
        assert!(!report.all_succeeded());
        let by_kind = report.failures_by_kind();
        assert_eq!(by_kind.get("network"), Some(&2));
        assert_eq!(by_kind.get("encoder"), Some(&1));
    }

    #[test]
    fn empty_report_succeeds() {
        assert!(BatchReport::default().all_succeeded());
    }
}
