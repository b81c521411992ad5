// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A [`ConnectSource`] under test control.
//!
//! `ProbeSource` lets a test body play the upstream producer: push values,
//! fail, or complete the current connection run, while counting how many
//! times the operator connected and disconnected.

use futures::Stream;
use parking_lot::Mutex;
use recast_core::{RecastError, StreamItem};
use recast_stream::{ConnectSource, SourceBoxStream};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// A connect-counting upstream producer driven from the test body.
///
/// Cloning yields another handle to the same producer, so a test can hand one
/// clone to the operator under test and keep another for driving emissions
/// and asserting on connection accounting.
pub struct ProbeSource<T> {
    inner: Arc<ProbeInner<T>>,
}

struct ProbeInner<T> {
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    feed: Mutex<Option<mpsc::UnboundedSender<StreamItem<T>>>>,
}

impl<T> ProbeSource<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ProbeInner {
                connects: AtomicUsize::new(0),
                disconnects: AtomicUsize::new(0),
                feed: Mutex::new(None),
            }),
        }
    }

    /// How many times `connect()` has been called.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.inner.connects.load(Ordering::SeqCst)
    }

    /// How many connection runs have been released (stream dropped).
    #[must_use]
    pub fn disconnect_count(&self) -> usize {
        self.inner.disconnects.load(Ordering::SeqCst)
    }

    /// Whether a connection run is currently attached to a live consumer.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner
            .feed
            .lock()
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Push a value into the current connection run. Returns `false` when no
    /// consumer is attached (the value is lost, as with a real producer
    /// nobody is listening to).
    pub fn emit(&self, value: T) -> bool {
        match self.inner.feed.lock().as_ref() {
            Some(tx) => tx.send(StreamItem::Value(value)).is_ok(),
            None => false,
        }
    }

    /// Fail the current connection run with `error`.
    pub fn fail(&self, error: RecastError) -> bool {
        match self.inner.feed.lock().as_ref() {
            Some(tx) => tx.send(StreamItem::Error(error)).is_ok(),
            None => false,
        }
    }

    /// Complete the current connection run normally.
    pub fn complete(&self) {
        *self.inner.feed.lock() = None;
    }

    /// Wait until the operator has connected (up to five seconds).
    ///
    /// Connecting happens on a spawned pump task, so tests must await it
    /// before driving emissions.
    pub async fn until_connected(&self) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !self.is_connected() {
            assert!(
                Instant::now() < deadline,
                "the operator did not connect within 5s"
            );
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

impl<T> Default for ProbeSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ProbeSource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> ConnectSource<T> for ProbeSource<T> {
    fn connect(&self) -> SourceBoxStream<T> {
        self.inner.connects.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();
        *self.inner.feed.lock() = Some(tx);
        Box::pin(TrackedStream {
            inner: UnboundedReceiverStream::new(rx),
            counters: Arc::clone(&self.inner),
        })
    }
}

/// Counts the release of one connection run when the operator drops it.
struct TrackedStream<T> {
    inner: UnboundedReceiverStream<StreamItem<T>>,
    counters: Arc<ProbeInner<T>>,
}

impl<T> Stream for TrackedStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl<T> Drop for TrackedStream<T> {
    fn drop(&mut self) {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}
