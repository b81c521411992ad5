// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the recast library.
//!
//! This crate provides helper types and utilities for testing the
//! subscription-multiplexing operator. It is designed for use in development
//! and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`ProbeSource`]: a [`ConnectSource`](recast_stream::ConnectSource) under
//!   test control. Values, failures and completion are pushed from the test
//!   body, and every connect/disconnect is counted.
//! - [`Quote`]: a small fixture value type with named constructors
//!   ([`quote_acme`] and friends).
//! - Assertion helpers guarding every stream read with a timeout:
//!   [`unwrap_stream`], [`unwrap_value`], [`assert_stream_ended`],
//!   [`assert_no_element_emitted`], [`assert_eventually`].

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod probe_source;
pub mod quote;

use futures::{Stream, StreamExt};
use recast_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

// Re-export commonly used test utilities
pub use helpers::{
    assert_eventually, assert_no_element_emitted, assert_stream_ended, unwrap_stream, unwrap_value,
};
pub use probe_source::ProbeSource;
pub use quote::{quote_acme, quote_hooli, quote_initech, quote_umbrella, Quote};

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// This helper simplifies test setup by handling the `StreamItem` wrapping
/// automatically, allowing tests to send plain values while the stream
/// receives `StreamItem<T>`.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>`, for testing error
/// propagation.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
