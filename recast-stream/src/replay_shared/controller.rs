// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The connection-lifecycle state machine.
//!
//! All registry mutations and connection events pass through one mutex, so
//! subscriber-count transitions, cache updates and fan-out are atomic with
//! respect to each other. Connect and disconnect side effects run outside the
//! critical section that decided them: the decision stores (or takes) the
//! connection's [`StopToken`] under the lock, and the spawn/stop happens
//! after the lock is released. A connection stopped before its pump task ever
//! ran simply exits without delivering.

use crate::replay_shared::state::{ConnectionPhase, ShareState, TerminalSignal};
use crate::replay_shared::subscription::ReplayStream;
use crate::source::ConnectSource;
use futures::future::{select, Either};
use futures::StreamExt;
use recast_core::mutex::Mutex;
use recast_core::{task, StopToken, StreamItem};
use std::sync::Arc;

pub(crate) struct ShareController<T: Clone + Send + 'static> {
    source: Box<dyn ConnectSource<T>>,
    replay_terminal: bool,
    state: Mutex<ShareState<T>>,
}

impl<T: Clone + Send + 'static> ShareController<T> {
    pub(crate) fn new(source: Box<dyn ConnectSource<T>>, replay_terminal: bool) -> Self {
        Self {
            source,
            replay_terminal,
            state: Mutex::new(ShareState::new()),
        }
    }

    /// Attach a new subscriber.
    ///
    /// If the replay slot holds an item it is enqueued into the subscriber's
    /// private channel inside the same critical section that registers it, so
    /// the subscriber observes it strictly before any later fan-out. A 0→1
    /// registry crossing claims a fresh epoch and connection handle under the
    /// lock; the pump task is spawned after the lock is released.
    pub(crate) fn register(self: &Arc<Self>) -> ReplayStream<T> {
        let (tx, rx) = async_channel::unbounded();
        let mut connect: Option<(u64, StopToken)> = None;

        let registration = {
            let mut state = self.state.lock();

            if self.replay_terminal {
                if let ConnectionPhase::Terminated(signal) = &state.phase {
                    // Sticky terminal: replay it and never reconnect
                    if let TerminalSignal::Failed(error) = signal {
                        let _ = tx.try_send(StreamItem::Error(error.clone()));
                    }
                    drop(tx); // closes the channel after the replayed signal
                    return ReplayStream::detached(rx, Arc::clone(self));
                }
            }

            if let Some(value) = state.last_seen.clone() {
                let _ = tx.try_send(StreamItem::Value(value));
            }

            let (id, was_empty) = state.subscribers.add(tx);
            if was_empty {
                debug_assert!(state.connection.is_none());
                state.epoch += 1;
                let stop = StopToken::new();
                state.connection = Some(stop.clone());
                state.phase = ConnectionPhase::Connecting;
                connect = Some((state.epoch, stop));
            }
            id
        };

        if let Some((epoch, stop)) = connect {
            self.open_connection(epoch, stop);
        }

        ReplayStream::attached(rx, registration, Arc::clone(self))
    }

    /// Detach a subscriber. Unknown ids are absorbed as no-ops, which makes
    /// double-cancel and cancel-after-terminal harmless.
    pub(crate) fn deregister(&self, id: u64) {
        let mut disconnect: Option<StopToken> = None;
        {
            let mut state = self.state.lock();
            let removal = state.subscribers.remove(id);
            if removal.removed && removal.now_empty && state.phase.is_live() {
                state.last_seen = None;
                state.phase = ConnectionPhase::Idle;
                disconnect = state.connection.take();
            }
        }
        if let Some(stop) = disconnect {
            debug!("closing upstream connection: last subscriber departed");
            stop.stop();
        }
    }

    /// Route one item from the connection with the given epoch.
    fn on_item(&self, epoch: u64, value: T) {
        let mut state = self.state.lock();

        if state.epoch != epoch || !state.phase.is_live() {
            // A stale connection delivered after its disconnect
            return;
        }
        if state.subscribers.is_empty() {
            // The last subscriber departed while this item was in flight; an
            // empty registry must never hold a cached item
            warn!("dropping item produced with no subscribers attached");
            return;
        }

        state.phase = ConnectionPhase::Active;
        state.last_seen = Some(value.clone());
        state.subscribers.fan_out(&StreamItem::Value(value));
    }

    /// Route the terminal signal from the connection with the given epoch.
    ///
    /// Every subscriber present receives the signal exactly once and is
    /// implicitly detached; the replay slot and connection handle are
    /// released. The next registration starts cold from `Terminated`.
    fn on_terminal(&self, epoch: u64, signal: TerminalSignal) {
        let mut state = self.state.lock();

        if state.epoch != epoch || !state.phase.is_live() {
            return;
        }

        debug!("upstream connection terminated (epoch {})", epoch);

        let entries = state.subscribers.drain();
        if let TerminalSignal::Failed(error) = &signal {
            for entry in &entries {
                let _ = entry.sender.try_send(StreamItem::Error(error.clone()));
            }
        }
        // Dropping the drained senders ends every subscriber stream
        drop(entries);

        state.last_seen = None;
        state.connection = None;
        state.phase = ConnectionPhase::Terminated(signal);
    }

    /// Tear everything down: used when the operator facade is dropped.
    pub(crate) fn shutdown(&self) {
        let disconnect;
        {
            let mut state = self.state.lock();
            state.subscribers.drain();
            state.last_seen = None;
            disconnect = state.connection.take();
            if state.phase.is_live() {
                state.phase = ConnectionPhase::Idle;
            }
        }
        if let Some(stop) = disconnect {
            stop.stop();
        }
    }

    /// Spawn the pump task owning one connection run.
    ///
    /// Called outside the critical section that claimed the epoch, so a
    /// source that produces synchronously can never re-enter the lock.
    fn open_connection(self: &Arc<Self>, epoch: u64, stop: StopToken) {
        debug!("opening upstream connection (epoch {})", epoch);
        let controller = Arc::clone(self);
        task::spawn(async move {
            // The subscriber that requested this connection may have come and
            // gone before the task ever ran; a dead request must not touch
            // the source
            {
                let state = controller.state.lock();
                if state.epoch != epoch || !state.phase.is_live() {
                    return;
                }
            }

            let mut upstream = controller.source.connect();
            loop {
                if stop.is_stopped() {
                    break;
                }
                match select(upstream.next(), stop.stopped()).await {
                    Either::Left((Some(StreamItem::Value(value)), _)) => {
                        controller.on_item(epoch, value);
                    }
                    Either::Left((Some(StreamItem::Error(error)), _)) => {
                        controller.on_terminal(epoch, TerminalSignal::Failed(error));
                        break;
                    }
                    Either::Left((None, _)) => {
                        controller.on_terminal(epoch, TerminalSignal::Completed);
                        break;
                    }
                    Either::Right(((), _)) => break,
                }
            }
            // Dropping the stream releases the upstream producer
        });
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.state.lock().phase.is_live()
    }

    pub(crate) fn is_terminated(&self) -> bool {
        matches!(self.state.lock().phase, ConnectionPhase::Terminated(_))
    }

    pub(crate) fn last_seen(&self) -> Option<T> {
        self.state.lock().last_seen.clone()
    }

    pub(crate) fn terminal_signal(&self) -> Option<TerminalSignal> {
        match &self.state.lock().phase {
            ConnectionPhase::Terminated(signal) => Some(signal.clone()),
            _ => None,
        }
    }
}
