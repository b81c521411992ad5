// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{Stream, StreamExt};
use recast_core::StreamItem;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

/// Read the next item from the stream, failing the test if none arrives
/// within `timeout_ms`.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    timeout(Duration::from_millis(timeout_ms), stream.next())
        .await
        .expect("timed out waiting for a stream item")
        .expect("stream ended while an item was expected")
}

/// Extract the value from a stream item, failing the test on an error item.
pub fn unwrap_value<T>(item: StreamItem<T>) -> T {
    match item {
        StreamItem::Value(value) => value,
        StreamItem::Error(error) => panic!("expected a value, got error: {error:?}"),
    }
}

/// Assert that the stream ends (yields `None`) within `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    let next = timeout(Duration::from_millis(timeout_ms), stream.next())
        .await
        .expect("timed out waiting for the stream to end");
    assert!(next.is_none(), "expected end of stream, got an item");
}

/// Assert that the stream stays silent for the whole window.
pub async fn assert_no_element_emitted<S>(stream: &mut S, timeout_ms: u64)
where
    S: Stream + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("unexpected element emitted, expected no output");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Poll `condition` until it holds, failing the test after `timeout_ms`.
///
/// For effects that happen on a spawned task (connection teardown, pump
/// shutdown) and are therefore not observable synchronously.
pub async fn assert_eventually(mut condition: impl FnMut() -> bool, timeout_ms: u64, what: &str) {
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    while !condition() {
        assert!(
            Instant::now() < deadline,
            "condition not met within {timeout_ms}ms: {what}"
        );
        sleep(Duration::from_millis(1)).await;
    }
}
