// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ref-counted, last-item-replaying multicast over a single upstream
//! connection.
//!
//! A [`ReplayShared`] is a subscription factory around a [`ConnectSource`]:
//! subscribers share one live connection, late joiners immediately observe
//! the most recently produced item, and the connection is torn down (cache
//! included) the moment the last subscriber leaves.
//!
//! ## Characteristics
//!
//! - **Ref-counted connection**: the source is connected on the 0→1
//!   subscriber transition and disconnected on 1→0. `connect()` and the
//!   teardown each fire exactly once per transition, even under concurrent
//!   subscribe/cancel from multiple threads.
//! - **Latest-item replay**: while the connection is live, the last item is
//!   cached; a new subscriber observes it synchronously at subscription time,
//!   strictly before any later item.
//! - **No stale cache**: the cached item is discarded on teardown. A
//!   subscriber arriving afterwards restarts the producer cold and sees
//!   nothing until the fresh connection emits.
//! - **Terminal signals**: an upstream error is fanned out to every attached
//!   subscriber and ends their streams; normal completion just ends them. By
//!   default a terminal signal is not cached: the next subscriber triggers a
//!   fresh connection attempt. [`ReplayShared::with_terminal_replay`] makes
//!   terminal signals sticky instead.
//!
//! ## Example
//!
//! ```rust
//! use futures::{stream, StreamExt};
//! use recast_core::StreamItem;
//! use recast_stream::ReplayShared;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let shared = ReplayShared::new(|| {
//!     stream::iter(vec![StreamItem::Value("tick"), StreamItem::Value("tock")])
//! });
//!
//! let mut first = shared.subscribe();
//! assert_eq!(first.next().await, Some(StreamItem::Value("tick")));
//! assert_eq!(first.next().await, Some(StreamItem::Value("tock")));
//! # }
//! ```
//!
//! ## Comparison with a plain broadcast
//!
//! | Concern | Plain broadcast | `ReplayShared` |
//! |---------|-----------------|----------------|
//! | Late subscriber | sees nothing until next emission | sees the cached latest item immediately |
//! | No subscribers | source keeps running | source is disconnected, cache dropped |
//! | After terminal | closed for good | reconnects for the next subscriber (default) |
//!
//! [`ConnectSource`]: crate::source::ConnectSource

mod controller;
mod implementation;
mod state;
mod subscription;

pub use implementation::{ReplayShareExt, ReplayShared};
pub use state::TerminalSignal;
pub use subscription::ReplayStream;
