//! Console progress printer fed by the downloader's progress channel.

use songdl_core::progress::ProgressStats;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const PROGRESS_INTERVAL_MS: u128 = 500;

/// Spawns the printer task; it ends once every sender is dropped.
pub fn spawn_progress_printer(total_items: usize) -> (mpsc::Sender<ProgressStats>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<ProgressStats>(16);
    let handle = tokio::spawn(async move {
        let mut last_print: Option<Instant> = None;
        while let Some(stats) = rx.recv().await {
            let now = Instant::now();
            let due = last_print
                .map(|t| now.duration_since(t).as_millis() >= PROGRESS_INTERVAL_MS)
                .unwrap_or(true);
            if due || stats.is_finished() {
                println!("{}", format_progress(&stats, total_items));
                last_print = Some(now);
            }
        }
    });
    (tx, handle)
}

pub fn format_progress(stats: &ProgressStats, total_items: usize) -> String {
    let done_mib = stats.bytes_done as f64 / 1_048_576.0;
    let rate_mib = stats.bytes_per_sec() / 1_048_576.0;
    let eta = stats
        .eta_secs()
        .map(|s| format!("{:.0}s", s))
        .unwrap_or_else(|| "?".to_string());
    let size = match (stats.total_bytes, stats.fraction()) {
        (Some(total), Some(fraction)) => format!(
            "{:.1} / {:.1} MiB ({:.1}%)",
            done_mib,
            total as f64 / 1_048_576.0,
            fraction * 100.0
        ),
        _ => format!("{:.1} MiB", done_mib),
    };
    format!(
        "  [{}/{}] {}  {:.2} MiB/s  ETA {}",
        stats.index + 1,
        total_items,
        size,
        rate_mib,
        eta
    )
}
