// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Recast: share one expensive upstream connection among many subscribers.
//!
//! The central type is [`ReplayShared`]: a ref-counted multicast over a
//! [`ConnectSource`] that keeps at most one live upstream connection,
//! replays the latest item to late joiners, and tears the connection down
//! (cache included) when the last subscriber leaves.
//!
//! # Example
//!
//! ```rust
//! use futures::StreamExt;
//! use recast_rx::{ReplayShared, StreamItem};
//! use recast_test_utils::{quote_acme, ProbeSource, Quote};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let feed = ProbeSource::<Quote>::new();
//! let shared = ReplayShared::new(feed.clone());
//!
//! // First subscriber opens the connection
//! let mut first = shared.subscribe();
//! feed.until_connected().await;
//! feed.emit(quote_acme());
//! assert_eq!(first.next().await, Some(StreamItem::Value(quote_acme())));
//!
//! // A late joiner observes the cached quote without a new emission
//! let mut late = shared.subscribe();
//! assert_eq!(late.next().await, Some(StreamItem::Value(quote_acme())));
//! # }
//! ```

pub use recast_core::{RecastError, Result, StopToken, StreamItem};
pub use recast_stream::{
    ConnectSource, ReplayShareExt, ReplayShared, ReplayStream, SourceBoxStream, TerminalSignal,
};
