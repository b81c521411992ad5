// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Replaying ref-count share operator for async Rust streams.
//!
//! This crate multiplexes one expensive upstream producer across many
//! independent subscribers:
//!
//! - **One live connection**: the upstream is connected when the subscriber
//!   count goes 0→1 and disconnected when it goes 1→0; never more than one
//!   connection at a time.
//! - **Replay of the latest item**: a subscriber joining while the connection
//!   is live immediately observes the most recently produced item, then every
//!   later item.
//! - **No stale data**: the cached item is discarded the instant the last
//!   subscriber leaves, so a later subscriber restarts the producer from
//!   scratch instead of seeing old state.
//!
//! The entry points are [`ReplayShared`] (the operator facade) and
//! [`ReplayShareExt::replay_share`] (sugar on any [`ConnectSource`],
//! including plain closures returning a stream).
//!
//! # Example
//!
//! ```rust
//! use futures::{stream, StreamExt};
//! use recast_core::StreamItem;
//! use recast_stream::ReplayShareExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! // Each connect() run produces a fresh stream
//! let shared = (|| stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)]))
//!     .replay_share();
//!
//! let mut sub = shared.subscribe();
//! assert_eq!(sub.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(sub.next().await, Some(StreamItem::Value(2)));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod replay_shared;
pub mod source;

// Re-export commonly used types
pub use replay_shared::{ReplayShareExt, ReplayShared, ReplayStream, TerminalSignal};
pub use source::{ConnectSource, SourceBoxStream};
