// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Connection lifecycle state: phase, replay slot and subscriber registry.
//!
//! Everything in this module lives behind the controller's single mutex, so
//! phase, cache and registry are only ever observed together and fully
//! applied.

use async_channel::Sender;
use recast_core::{RecastError, StopToken, StreamItem};

/// How one connection run ended.
#[derive(Debug, Clone)]
pub enum TerminalSignal {
    /// The upstream completed normally.
    Completed,
    /// The upstream failed; the payload was fanned out unchanged.
    Failed(RecastError),
}

impl TerminalSignal {
    /// Returns `true` for normal completion.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, TerminalSignal::Completed)
    }

    /// Returns `true` for an upstream failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, TerminalSignal::Failed(_))
    }
}

/// Lifecycle phase of the shared upstream connection.
///
/// Invariants:
/// - the connection handle is `Some` iff the phase is `Connecting` or `Active`
/// - the replay slot is `Some` only while `Active`
/// - the registry is empty in `Idle` and `Terminated`
#[derive(Debug)]
pub(crate) enum ConnectionPhase {
    /// No connection, no cache, no subscribers.
    Idle,
    /// Connection requested; first item or terminal not yet observed.
    Connecting,
    /// Connection open and at least one item seen.
    Active,
    /// The connection delivered its terminal signal; subscribers present at
    /// that instant were detached.
    Terminated(TerminalSignal),
}

impl ConnectionPhase {
    /// `true` while the upstream connection is open.
    pub(crate) const fn is_live(&self) -> bool {
        matches!(self, ConnectionPhase::Connecting | ConnectionPhase::Active)
    }
}

pub(crate) struct SubscriberEntry<T> {
    id: u64,
    pub(crate) sender: Sender<StreamItem<T>>,
}

/// Outcome of removing a subscriber from the registry.
pub(crate) struct Removal {
    /// Whether the id was present at all (double-cancel is a no-op).
    pub(crate) removed: bool,
    /// Whether this removal crossed the 1→0 boundary.
    pub(crate) now_empty: bool,
}

/// Insertion-ordered set of attached subscribers.
///
/// `add` and `remove` report the 0↔1 boundary crossings; computed under the
/// same lock as the phase transition they gate, this is what makes connect
/// and disconnect fire exactly once each.
pub(crate) struct SubscriberRegistry<T> {
    entries: Vec<SubscriberEntry<T>>,
    next_id: u64,
}

impl<T> SubscriberRegistry<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a subscriber channel. Returns its id and whether the registry
    /// was empty before the call (the 0→1 crossing).
    pub(crate) fn add(&mut self, sender: Sender<StreamItem<T>>) -> (u64, bool) {
        let was_empty = self.entries.is_empty();
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(SubscriberEntry { id, sender });
        (id, was_empty)
    }

    /// Remove a subscriber by id.
    pub(crate) fn remove(&mut self, id: u64) -> Removal {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() < before;
        Removal {
            removed,
            now_empty: removed && self.entries.is_empty(),
        }
    }

    /// Detach every subscriber, returning the entries so the caller can
    /// deliver a final signal before the channels close.
    pub(crate) fn drain(&mut self) -> Vec<SubscriberEntry<T>> {
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver one item to every subscriber, in registration order.
    pub(crate) fn fan_out(&self, item: &StreamItem<T>)
    where
        T: Clone,
    {
        for entry in &self.entries {
            let _ = entry.sender.try_send(item.clone());
        }
    }
}

/// The complete mutable state owned by the controller.
pub(crate) struct ShareState<T> {
    pub(crate) phase: ConnectionPhase,
    /// Incremented on every connect; stamps pump tasks so a stale
    /// connection's late deliveries are rejected.
    pub(crate) epoch: u64,
    /// Disconnect handle for the live connection.
    pub(crate) connection: Option<StopToken>,
    /// Replay slot: the last item seen on the live connection.
    pub(crate) last_seen: Option<T>,
    pub(crate) subscribers: SubscriberRegistry<T>,
}

impl<T> ShareState<T> {
    pub(crate) const fn new() -> Self {
        Self {
            phase: ConnectionPhase::Idle,
            epoch: 0,
            connection: None,
            last_seen: None,
            subscribers: SubscriberRegistry::new(),
        }
    }
}
