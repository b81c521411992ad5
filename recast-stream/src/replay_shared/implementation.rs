// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::replay_shared::controller::ShareController;
use crate::replay_shared::state::TerminalSignal;
use crate::replay_shared::subscription::ReplayStream;
use crate::source::ConnectSource;
use std::sync::Arc;

/// A subscription factory multiplexing one upstream producer.
///
/// `ReplayShared` keeps at most one live connection to its
/// [`ConnectSource`]: the source is connected when the first subscriber
/// arrives and disconnected (cache discarded) when the last one leaves.
/// While connected, the most recently produced item is replayed to every
/// late joiner.
///
/// See the [module-level documentation](crate::replay_shared) for the full
/// contract and examples.
pub struct ReplayShared<T: Clone + Send + 'static> {
    controller: Arc<ShareController<T>>,
}

impl<T: Clone + Send + 'static> ReplayShared<T> {
    /// Create a shared view over `source`.
    ///
    /// Nothing is connected until the first subscriber arrives. Terminal
    /// signals are not cached: a subscriber arriving after the upstream
    /// completed or failed triggers a fresh connection attempt.
    pub fn new(source: impl ConnectSource<T> + 'static) -> Self {
        Self {
            controller: Arc::new(ShareController::new(Box::new(source), false)),
        }
    }

    /// Create a shared view that replays terminal signals.
    ///
    /// Under this policy a terminal signal is sticky: a subscriber arriving
    /// after the upstream completed observes an immediately ended stream, and
    /// one arriving after a failure observes that error; the source is never
    /// reconnected.
    pub fn with_terminal_replay(source: impl ConnectSource<T> + 'static) -> Self {
        Self {
            controller: Arc::new(ShareController::new(Box::new(source), true)),
        }
    }

    /// Attach a new subscriber and return its item stream.
    ///
    /// The first subscriber triggers the upstream connection. If an item is
    /// cached at subscription time it is the first item the returned stream
    /// yields.
    pub fn subscribe(&self) -> ReplayStream<T> {
        self.controller.register()
    }

    /// Returns the number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.controller.subscriber_count()
    }

    /// Returns `true` while the upstream connection is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.controller.is_connected()
    }

    /// Returns `true` if the last connection run ended in a terminal signal
    /// and no new connection has been made since.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.controller.is_terminated()
    }

    /// Returns a copy of the cached latest item, if the connection is live
    /// and has produced one.
    #[must_use]
    pub fn last_seen(&self) -> Option<T> {
        self.controller.last_seen()
    }

    /// Returns how the last connection run ended, while in the terminated
    /// state.
    #[must_use]
    pub fn terminal_signal(&self) -> Option<TerminalSignal> {
        self.controller.terminal_signal()
    }
}

impl<T: Clone + Send + 'static> Drop for ReplayShared<T> {
    fn drop(&mut self) {
        // Stop any live connection and end all subscriber streams
        self.controller.shutdown();
    }
}

/// Extension trait turning any [`ConnectSource`] into a [`ReplayShared`].
pub trait ReplayShareExt<T: Clone + Send + 'static>: ConnectSource<T> {
    /// Shares this source among multiple subscribers, replaying the latest
    /// item to late joiners.
    ///
    /// See the [module-level documentation](crate::replay_shared) for usage
    /// examples.
    fn replay_share(self) -> ReplayShared<T>
    where
        Self: Sized + 'static;
}

impl<S, T> ReplayShareExt<T> for S
where
    S: ConnectSource<T>,
    T: Clone + Send + 'static,
{
    fn replay_share(self) -> ReplayShared<T>
    where
        Self: Sized + 'static,
    {
        ReplayShared::new(self)
    }
}
