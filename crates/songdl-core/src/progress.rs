//! Progress reporting for downloads (bytes done, ETA, rate).
//!
//! yt-dlp reports progress through a progress template (see
//! [`crate::ytdlp::PROGRESS_MARKER`]); each report is turned into a
//! [`ProgressStats`] snapshot and sent to the CLI's progress printer.

/// Snapshot of download progress for one URL (CLI-friendly).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStats {
    /// Position of the URL in the current batch (0-based).
    pub index: usize,
    /// Bytes fetched so far.
    pub bytes_done: u64,
    /// Total size in bytes, exact or estimated; None when yt-dlp doesn't know.
    pub total_bytes: Option<u64>,
    /// Elapsed time since the stream download started (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if total unknown or rate is 0).
    pub fn eta_secs(&self) -> Option<f64> {
        let total = self.total_bytes?;
        let remaining = total.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    /// Fraction complete in [0.0, 1.0], if the total is known.
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_done as f64 / total as f64).min(1.0)),
            None => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.total_bytes, Some(total) if self.bytes_done >= total)
    }
}
