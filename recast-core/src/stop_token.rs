// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cloneable stop signal with an awaitable future.
//!
//! A [`StopToken`] is the handle used to tear a running producer down: the
//! side that owns the connection keeps a clone and calls [`StopToken::stop`],
//! while the task driving the producer awaits [`StopToken::stopped`] and winds
//! down when it resolves. It is runtime-agnostic and works on any executor.

use event_listener::{Event, EventListener};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Cloneable stop/disconnect signal.
///
/// All clones share the same state: once any clone calls [`stop`](Self::stop),
/// every waiter on [`stopped`](Self::stopped) is woken and
/// [`is_stopped`](Self::is_stopped) returns `true` on all of them. Stopping is
/// idempotent.
#[derive(Clone, Debug)]
pub struct StopToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    stopped: AtomicBool,
    event: Event,
}

impl StopToken {
    /// Create a new token in the not-stopped state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                stopped: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Signal the token, waking all waiters.
    ///
    /// Idempotent: calling it again has no additional effect.
    pub fn stop(&self) {
        // Release so writes made before stopping are visible to woken waiters
        self.inner.stopped.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Check whether the token has been signaled (non-blocking).
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::Acquire)
    }

    /// Wait asynchronously until the token is signaled.
    ///
    /// Resolves immediately if the token is already stopped.
    pub fn stopped(&self) -> Stopped<'_> {
        Stopped {
            token: self,
            listener: None,
        }
    }
}

impl Default for StopToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`StopToken::stopped`].
pub struct Stopped<'a> {
    token: &'a StopToken,
    listener: Option<EventListener>,
}

impl Future for Stopped<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.token.is_stopped() {
                return Poll::Ready(());
            }
            match self.listener.take() {
                // Register, then loop to re-check the flag: a stop() racing
                // with listen() must not be missed
                None => self.listener = Some(self.token.inner.event.listen()),
                Some(mut listener) => match Pin::new(&mut listener).poll(cx) {
                    // Notified; loop to re-check (and re-listen if spurious)
                    Poll::Ready(()) => {}
                    Poll::Pending => {
                        self.listener = Some(listener);
                        return Poll::Pending;
                    }
                },
            }
        }
    }
}
