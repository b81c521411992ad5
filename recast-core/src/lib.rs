// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types for the recast subscription-multiplexing library.
//!
//! This crate contains the leaf building blocks shared by the rest of the
//! workspace:
//!
//! - [`StreamItem`]: the value-or-error element flowing through streams
//! - [`RecastError`]: the root error type
//! - [`StopToken`]: a cloneable stop/disconnect signal with an awaitable future
//! - [`task::spawn`]: runtime-agnostic detached task spawning
//! - [`mutex`]: the locking primitive used for shared state

pub mod error;
pub mod mutex;
pub mod stop_token;
pub mod stream_item;
pub mod task;

pub use self::error::{RecastError, Result};
pub use self::stop_token::StopToken;
pub use self::stream_item::StreamItem;
