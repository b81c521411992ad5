// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic detached task spawning.
//!
//! Spawns fire-and-forget background work on the configured runtime. Callers
//! that need to wind the task down pair it with a [`StopToken`]: create the
//! token first, hand a clone to the future, and signal it when done.
//!
//! # Runtime Support
//!
//! - **Tokio**: `tokio::spawn` (default, `runtime-tokio`)
//! - **smol**: `smol::spawn` (`runtime-smol`)
//! - **async-std**: `async_std::task::spawn` (`runtime-async-std`)
//!
//! When multiple runtime features are enabled, Tokio takes precedence.
//!
//! [`StopToken`]: crate::StopToken

use std::future::Future;

/// Spawn a detached future on the configured runtime.
///
/// The future runs until completion; there is no join handle. Cooperative
/// shutdown is the caller's responsibility (see the module docs).
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let _future = future;

    #[cfg(feature = "runtime-tokio")]
    let _ = tokio::spawn(_future);

    #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
    smol::spawn(_future).detach();

    #[cfg(all(
        feature = "runtime-async-std",
        not(feature = "runtime-tokio"),
        not(feature = "runtime-smol")
    ))]
    let _ = async_std::task::spawn(_future);
}
