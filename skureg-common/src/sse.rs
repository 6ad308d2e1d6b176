//! Server-Sent Events (SSE) utilities
//!
//! Drains a one-way progress channel into an HTTP event stream. Producers
//! write into an unbounded sender and never wait on the reader; the stream
//! ends when every sender has been dropped.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

/// Build an SSE response that forwards every item of `rx` as an unnamed
/// `data:` event carrying the item's JSON form
///
/// Unnamed events reach a browser `EventSource.onmessage` handler directly.
///
/// # Example
/// ```rust,ignore
/// let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
/// tokio::spawn(async move { orchestrator.run(batch, tx).await });
/// skureg_common::sse::channel_sse_stream("skureg-bulk", rx)
/// ```
pub fn channel_sse_stream<T>(
    stream_name: &'static str,
    mut rx: UnboundedReceiver<T>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    T: Serialize + Send + 'static,
{
    info!("New SSE client connected to {} stream", stream_name);

    let stream = async_stream::stream! {
        while let Some(item) = rx.recv().await {
            match serde_json::to_string(&item) {
                Ok(json) => {
                    debug!("SSE: {} event: {}", stream_name, json);
                    yield Ok(Event::default().data(json));
                }
                Err(e) => {
                    warn!("SSE: Failed to serialize {} event: {}", stream_name, e);
                }
            }
        }
        debug!("SSE: {} stream closed by producer", stream_name);
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}

/// Extract the JSON payloads from an SSE body
///
/// Comment lines (keep-alives) and blank separators are ignored. Helpful for
/// clients and tests that read a finished stream as one buffer.
pub fn parse_data_events(body: &str) -> Vec<serde_json::Value> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .filter_map(|data| serde_json::from_str(data.trim_start()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_events_skips_comments() {
        let body = ": heartbeat\n\ndata: {\"progress\":1}\n\ndata:{\"done\":true}\n\n";
        let events = parse_data_events(body);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["progress"], 1);
        assert_eq!(events[1]["done"], true);
    }
}
