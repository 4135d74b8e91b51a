//! Stream pump: raw pipe bytes to sanitized output events.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc::Sender;

use crate::output::{AnsiStripper, DecodedChunk, StreamDecoder};
use crate::supervisor::{CompilerEvent, OutputEvent, StreamSource};

/// Read buffer size for pipe chunks.
const READ_BUFFER_SIZE: usize = 4096;

/// Pump one output stream until EOF.
///
/// Each chunk is decoded incrementally (multi-byte characters split
/// across reads carry over), sanitized, and delivered immediately —
/// never buffered until process exit. Chunks that sanitize to the empty
/// string produce no event. Malformed byte runs become `DecodeError`
/// events; the pump keeps going.
///
/// Generic over the reader so tests can drive it with an in-memory pipe.
pub async fn pump_stream<R>(mut reader: R, source: StreamSource, tx: Sender<CompilerEvent>)
where
    R: AsyncRead + Unpin,
{
    let stripper = AnsiStripper::new();
    let mut decoder = StreamDecoder::new();
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                for piece in decoder.feed(&buf[..n]) {
                    if !deliver(&stripper, source, piece, &tx).await {
                        return;
                    }
                }
            }
            Err(err) => {
                tracing::warn!(%source, error = %err, "Stream read failed");
                break;
            }
        }
    }

    // An incomplete multi-byte tail at EOF is malformed by definition.
    if let Some(len) = decoder.finish() {
        let _ = tx
            .send(
                OutputEvent::DecodeError {
                    source,
                    invalid_bytes: len,
                }
                .into(),
            )
            .await;
    }

    tracing::debug!(%source, "Stream pump finished");
}

/// Send one decoded piece; returns false when the receiver is gone.
async fn deliver(
    stripper: &AnsiStripper,
    source: StreamSource,
    piece: DecodedChunk,
    tx: &Sender<CompilerEvent>,
) -> bool {
    let event = match piece {
        DecodedChunk::Text(text) => {
            let clean = stripper.strip(&text);
            if clean.is_empty() {
                return true;
            }
            match source {
                StreamSource::Stdout => OutputEvent::Stdout { text: clean },
                StreamSource::Stderr => OutputEvent::Stderr { text: clean },
            }
        }
        DecodedChunk::Invalid { len } => {
            tracing::warn!(%source, invalid_bytes = len, "Skipped malformed UTF-8");
            OutputEvent::DecodeError {
                source,
                invalid_bytes: len,
            }
        }
    };
    tx.send(event.into()).await.is_ok()
}
