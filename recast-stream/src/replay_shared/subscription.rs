// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::replay_shared::controller::ShareController;
use async_channel::Receiver;
use futures::Stream;
use recast_core::StreamItem;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// One subscriber's view of a [`ReplayShared`](crate::ReplayShared).
///
/// Yields every item fanned out while the subscription is attached, starting
/// with the cached latest item when one existed at subscription time. An
/// upstream failure arrives as a final [`StreamItem::Error`]; after a
/// terminal signal (or operator teardown) the stream ends.
///
/// Dropping the subscription cancels it. When the last subscription of a
/// shared source goes away, the upstream connection is torn down and the
/// cached item discarded.
pub struct ReplayStream<T: Clone + Send + 'static> {
    receiver: Receiver<StreamItem<T>>,
    registration: Option<u64>,
    controller: Arc<ShareController<T>>,
}

impl<T: Clone + Send + 'static> ReplayStream<T> {
    pub(crate) fn attached(
        receiver: Receiver<StreamItem<T>>,
        registration: u64,
        controller: Arc<ShareController<T>>,
    ) -> Self {
        Self {
            receiver,
            registration: Some(registration),
            controller,
        }
    }

    /// A subscription that was never registered: it only replays what was
    /// enqueued at creation time (a sticky terminal signal).
    pub(crate) fn detached(
        receiver: Receiver<StreamItem<T>>,
        controller: Arc<ShareController<T>>,
    ) -> Self {
        Self {
            receiver,
            registration: None,
            controller,
        }
    }

    /// Cancel this subscription.
    ///
    /// Equivalent to dropping it; kept as an explicit verb for call sites
    /// where the intent matters. Cancelling is idempotent and never blocks
    /// on in-flight deliveries.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.registration.take() {
            self.controller.deregister(id);
        }
    }
}

impl<T: Clone + Send + 'static> Stream for ReplayStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl<T: Clone + Send + 'static> Drop for ReplayStream<T> {
    fn drop(&mut self) {
        self.release();
    }
}
