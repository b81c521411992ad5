// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Capability interface for the upstream producer being multiplexed.

use futures::Stream;
use recast_core::StreamItem;
use std::pin::Pin;

/// Type alias for the boxed item stream produced by one connection run.
pub type SourceBoxStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;

/// A connectable upstream producer.
///
/// Each call to [`connect`](Self::connect) begins a fresh production run: a
/// stream of [`StreamItem::Value`] items ending in at most one terminal
/// signal: an in-band [`StreamItem::Error`], or plain end-of-stream for
/// normal completion. Dropping the returned stream releases the producer.
///
/// The trait is blanket-implemented for closures returning a stream, so any
/// `Fn() -> impl Stream<Item = StreamItem<T>>` is a valid source:
///
/// ```rust
/// use futures::stream;
/// use recast_core::StreamItem;
/// use recast_stream::ConnectSource;
///
/// let source = || stream::iter(vec![StreamItem::Value(42)]);
/// let _items = source.connect();
/// ```
pub trait ConnectSource<T>: Send + Sync {
    /// Begin a fresh production run.
    fn connect(&self) -> SourceBoxStream<T>;
}

impl<T, S, F> ConnectSource<T> for F
where
    F: Fn() -> S + Send + Sync,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
{
    fn connect(&self) -> SourceBoxStream<T> {
        Box::pin((self)())
    }
}
