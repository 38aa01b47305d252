//! Background ingestion of the log stream.
//!
//! A dedicated thread reads the input line by line, decodes and formats each
//! line, and hands finished blocks to the event loop over a rendezvous
//! channel. Because the channel has no capacity, the thread does not read the
//! next line until the previous block has been accepted, which keeps blocks in
//! input order with at most one in flight.

use crate::model::record::decode_bytes;
use crate::view::format::{format_record, FormattedBlock, READ_ERROR_NOTICE};
use anyhow::{Context, Result};
use std::io::{BufRead, Read};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::JoinHandle;

/// Longest accepted line, not counting the newline. A longer line is treated
/// like a read error.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Counters reported when ingestion ends. Only used for the diagnostics log.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub emitted: usize,
    pub skipped: usize,
}

/// Read `reader` to the end, sending one block per decodable line.
///
/// Undecodable lines are dropped. A read error, or a line longer than
/// [`MAX_LINE_LEN`], sends a single notice block and stops. Ingestion also
/// stops once the receiver has been dropped.
pub fn ingest<R: BufRead>(mut reader: R, sender: &SyncSender<FormattedBlock>) -> IngestSummary {
    let mut summary = IngestSummary::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        match (&mut reader)
            .take(MAX_LINE_LEN as u64 + 1)
            .read_until(b'\n', &mut line)
        {
            Ok(0) => {
                tracing::info!(
                    "Input stream ended: {} blocks, {} lines skipped",
                    summary.emitted,
                    summary.skipped
                );
                return summary;
            }
            Ok(n) if n > MAX_LINE_LEN && !line.ends_with(b"\n") => {
                tracing::warn!("Input line exceeds {} bytes, stopping", MAX_LINE_LEN);
                let _ = sender.send(FormattedBlock::diagnostic(READ_ERROR_NOTICE));
                return summary;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to read input stream: {}", e);
                let _ = sender.send(FormattedBlock::diagnostic(READ_ERROR_NOTICE));
                return summary;
            }
        }

        let content = line.strip_suffix(b"\n").unwrap_or(&line);
        let record = match decode_bytes(content) {
            Ok(record) => record,
            Err(e) => {
                tracing::trace!("Skipping undecodable line: {}", e);
                summary.skipped += 1;
                continue;
            }
        };

        if sender.send(format_record(&record)).is_err() {
            tracing::debug!("Viewer closed, stopping ingestion");
            return summary;
        }
        summary.emitted += 1;
    }
}

/// Start ingesting `input` on a background thread.
///
/// The returned receiver disconnects when ingestion finishes.
pub fn spawn_ingest<R>(
    input: R,
) -> Result<(Receiver<FormattedBlock>, JoinHandle<IngestSummary>)>
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = sync_channel(0);
    let handle = std::thread::Builder::new()
        .name("logpeek-ingest".to_string())
        .spawn(move || ingest(std::io::BufReader::new(input), &sender))
        .context("Failed to spawn ingestion thread")?;
    Ok((receiver, handle))
}
