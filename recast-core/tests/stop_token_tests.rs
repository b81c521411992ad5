// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recast_core::StopToken;
use std::time::Duration;

#[test]
fn starts_not_stopped() {
    let token = StopToken::new();
    assert!(!token.is_stopped());
}

#[test]
fn stop_is_visible_and_idempotent() {
    let token = StopToken::new();
    token.stop();
    token.stop();
    assert!(token.is_stopped());
}

#[test]
fn clones_share_state() {
    let token = StopToken::new();
    let clone = token.clone();

    clone.stop();

    assert!(token.is_stopped());
    assert!(clone.is_stopped());
}

#[tokio::test]
async fn stopped_resolves_immediately_when_already_stopped() {
    let token = StopToken::new();
    token.stop();

    token.stopped().await;
}

#[tokio::test]
async fn stopped_wakes_waiter_on_stop() {
    let token = StopToken::new();
    let waiter = token.clone();

    let handle = tokio::spawn(async move {
        waiter.stopped().await;
    });

    // Give the waiter a chance to register before signaling
    tokio::time::sleep(Duration::from_millis(10)).await;
    token.stop();

    tokio::time::timeout(Duration::from_millis(500), handle)
        .await
        .expect("waiter should be woken")
        .expect("waiter task should not panic");
}

#[tokio::test]
async fn stopped_wakes_multiple_waiters() {
    let token = StopToken::new();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let waiter = token.clone();
            tokio::spawn(async move {
                waiter.stopped().await;
            })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(10)).await;
    token.stop();

    for handle in handles {
        tokio::time::timeout(Duration::from_millis(500), handle)
            .await
            .expect("every waiter should be woken")
            .expect("waiter task should not panic");
    }
}
