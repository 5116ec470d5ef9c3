//! Waiting for the host to finish writing an exported table.

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

/// Size and modification time of a file at one poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Snapshot {
    len: u64,
    modified: SystemTime,
}

fn snapshot(path: &Path) -> Option<Snapshot> {
    let meta = fs::metadata(path).ok()?;
    Some(Snapshot {
        len: meta.len(),
        modified: meta.modified().ok()?,
    })
}

/// Waits until `path` has been written at or after `since` and then left
/// alone, and returns its content.
///
/// The file counts as finished once two consecutive polls, `poll_interval`
/// apart, see the same size and modification time.
pub fn wait_for_export(
    path: &Path,
    since: SystemTime,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<String> {
    let start = Instant::now();
    let mut previous: Option<Snapshot> = None;

    loop {
        let current = snapshot(path).filter(|s| s.modified >= since);
        match (previous, current) {
            (Some(before), Some(now)) if before == now => {
                debug!("{} settled at {} bytes", path.display(), now.len);
                return fs::read_to_string(path)
                    .with_context(|| format!("Failed to read export: {}", path.display()));
            }
            _ => previous = current,
        }

        if start.elapsed() > timeout {
            return Err(anyhow!(
                "Export timeout after {}ms waiting for {}",
                timeout.as_millis(),
                path.display()
            ));
        }

        std::thread::sleep(poll_interval);
    }
}
