//! Live tailing of the append-only message feed
//!
//! The feed is a JSON-lines file that an external producer keeps appending
//! to. The reader tracks a byte offset across poll iterations instead of
//! re-reading the whole file, starts at the current end of the file (only
//! messages that arrive after startup are processed), and withholds a
//! trailing partial line until the producer finishes writing it.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::models::IncomingMessage;

/// Upper bound for the backoff sleep while the source file is missing.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Continuous reader over a growing message feed.
pub struct StreamReader {
    path: PathBuf,
    poll_interval: Duration,
    max_retries: u32,
}

impl StreamReader {
    #[must_use]
    pub fn new(path: PathBuf, poll_interval: Duration, max_retries: u32) -> Self {
        Self {
            path,
            poll_interval,
            max_retries,
        }
    }

    /// Tail the feed until shutdown, invoking `on_message` for every complete
    /// message unit in arrival order.
    ///
    /// Does not return under normal operation. Terminates with an error when
    /// the source cannot be opened at startup, stays missing past the retry
    /// budget, or `on_message` fails (a storage failure must halt ingestion
    /// rather than silently drop data).
    pub async fn run<F>(&self, mut shutdown: watch::Receiver<bool>, mut on_message: F) -> Result<()>
    where
        F: FnMut(IncomingMessage) -> Result<()>,
    {
        // Live-tail semantics: seek to the current end so that only units
        // appended after startup are processed.
        let mut offset = fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| {
                PipelineError::SourceUnavailable(format!("{}: {e}", self.path.display()))
            })?;
        info!(path = %self.path.display(), offset, "Tailing message feed");

        let mut carry: Vec<u8> = Vec::new();
        let mut misses: u32 = 0;

        loop {
            if *shutdown.borrow() {
                info!("Shutdown requested, reader stopping");
                return Ok(());
            }

            match self.poll_once(&mut offset, &mut carry, &mut on_message) {
                Ok(true) => {
                    // Got new data; look again right away.
                    misses = 0;
                }
                Ok(false) => {
                    misses = 0;
                    Self::sleep_or_shutdown(self.poll_interval, &mut shutdown).await;
                }
                Err(PipelineError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    misses += 1;
                    if misses >= self.max_retries {
                        return Err(PipelineError::SourceUnavailable(format!(
                            "{} still missing after {} attempts",
                            self.path.display(),
                            misses
                        )));
                    }
                    // A recreated file is all new content; start it from the top.
                    offset = 0;
                    carry.clear();
                    let backoff = backoff_delay(self.poll_interval, misses);
                    warn!(
                        path = %self.path.display(),
                        attempt = misses,
                        backoff_secs = backoff.as_secs(),
                        "Message feed missing, retrying"
                    );
                    Self::sleep_or_shutdown(backoff, &mut shutdown).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read everything appended since the last poll and dispatch complete lines.
    ///
    /// Returns whether any new bytes were observed.
    fn poll_once<F>(&self, offset: &mut u64, carry: &mut Vec<u8>, on_message: &mut F) -> Result<bool>
    where
        F: FnMut(IncomingMessage) -> Result<()>,
    {
        let mut file = File::open(&self.path)?;
        let len = file.metadata()?.len();

        if len < *offset {
            // The file shrank: it was truncated or swapped out underneath us.
            warn!(path = %self.path.display(), "Message feed shrank, restarting from the top");
            *offset = 0;
            carry.clear();
        }

        if len == *offset {
            return Ok(false);
        }

        file.seek(SeekFrom::Start(*offset))?;
        let mut new_bytes = Vec::new();
        file.read_to_end(&mut new_bytes)?;
        *offset += new_bytes.len() as u64;

        carry.extend_from_slice(&new_bytes);

        // Dispatch every complete line; anything after the last newline is a
        // unit still being written and stays in the carry buffer.
        while let Some(pos) = carry.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = carry.drain(..=pos).collect();
            let line = trim_line(&line[..pos]);
            if line.is_empty() {
                continue;
            }

            match serde_json::from_slice::<IncomingMessage>(line) {
                Ok(message) => on_message(message)?,
                Err(e) => {
                    // Malformed units are skipped, not fatal.
                    warn!(error = %e, "Skipping malformed message unit");
                }
            }
        }

        debug!(offset = *offset, pending = carry.len(), "Poll complete");
        Ok(true)
    }

    async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) {
        tokio::select! {
            () = tokio::time::sleep(duration) => {}
            _ = shutdown.changed() => {}
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Exponential backoff doubling from the poll interval, capped at [`MAX_BACKOFF`].
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32 << attempt.min(5);
    (base * factor).min(MAX_BACKOFF)
}

fn trim_line(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((b'\r', rest)) => rest,
        _ => line,
    }
}
