// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recast_stream::ReplayShared;
use recast_test_utils::{
    assert_no_element_emitted, quote_acme, quote_hooli, quote_initech, unwrap_stream,
    unwrap_value, ProbeSource, Quote,
};

#[tokio::test]
async fn subscriber_before_first_emission_receives_nothing() {
    // Arrange
    let feed = ProbeSource::<Quote>::new();
    let shared = ReplayShared::new(feed.clone());

    // Act
    let mut sub = shared.subscribe();
    feed.until_connected().await;

    // Assert - nothing is replayed while the connection has produced nothing
    assert_no_element_emitted(&mut sub, 50).await;
    assert!(shared.last_seen().is_none());
}

#[tokio::test]
async fn broadcasts_to_all_subscribers() {
    // Arrange
    let feed = ProbeSource::<Quote>::new();
    let shared = ReplayShared::new(feed.clone());

    let mut first = shared.subscribe();
    let mut second = shared.subscribe();
    feed.until_connected().await;

    // Act
    assert!(feed.emit(quote_acme()));

    // Assert - both subscribers receive the same quote
    assert_eq!(
        unwrap_value(unwrap_stream(&mut first, 500).await),
        quote_acme()
    );
    assert_eq!(
        unwrap_value(unwrap_stream(&mut second, 500).await),
        quote_acme()
    );
}

#[tokio::test]
async fn late_subscriber_receives_cached_item_immediately() {
    // Arrange
    let feed = ProbeSource::<Quote>::new();
    let shared = ReplayShared::new(feed.clone());

    let mut first = shared.subscribe();
    feed.until_connected().await;
    assert!(feed.emit(quote_acme()));
    assert_eq!(
        unwrap_value(unwrap_stream(&mut first, 500).await),
        quote_acme()
    );

    // Act - join while the connection is live, without a new emission
    let mut late = shared.subscribe();

    // Assert - the cached quote arrives without waiting for the feed
    assert_eq!(
        unwrap_value(unwrap_stream(&mut late, 500).await),
        quote_acme()
    );
}

#[tokio::test]
async fn late_subscriber_sees_cached_item_before_subsequent_ones() {
    // Arrange
    let feed = ProbeSource::<Quote>::new();
    let shared = ReplayShared::new(feed.clone());

    let mut first = shared.subscribe();
    feed.until_connected().await;
    assert!(feed.emit(quote_acme()));
    assert_eq!(
        unwrap_value(unwrap_stream(&mut first, 500).await),
        quote_acme()
    );

    // Act - join, then let the feed move on
    let mut late = shared.subscribe();
    assert!(feed.emit(quote_initech()));

    // Assert - cached item strictly precedes the new one
    assert_eq!(
        unwrap_value(unwrap_stream(&mut late, 500).await),
        quote_acme()
    );
    assert_eq!(
        unwrap_value(unwrap_stream(&mut late, 500).await),
        quote_initech()
    );

    // The original subscriber sees only the new emission once
    assert_eq!(
        unwrap_value(unwrap_stream(&mut first, 500).await),
        quote_initech()
    );
}

#[tokio::test]
async fn cache_tracks_the_most_recent_item() {
    // Arrange
    let feed = ProbeSource::<Quote>::new();
    let shared = ReplayShared::new(feed.clone());

    let mut first = shared.subscribe();
    feed.until_connected().await;

    // Act - two emissions, then a late join
    assert!(feed.emit(quote_acme()));
    assert!(feed.emit(quote_hooli()));
    let _ = unwrap_stream(&mut first, 500).await;
    let _ = unwrap_stream(&mut first, 500).await;

    let mut late = shared.subscribe();

    // Assert - only the most recent quote is replayed
    assert_eq!(
        unwrap_value(unwrap_stream(&mut late, 500).await),
        quote_hooli()
    );
    assert_eq!(shared.last_seen(), Some(quote_hooli()));
}

#[tokio::test]
async fn cancelled_subscriber_receives_no_further_items() {
    // Arrange
    let feed = ProbeSource::<Quote>::new();
    let shared = ReplayShared::new(feed.clone());

    let mut keeper = shared.subscribe();
    let leaver = shared.subscribe();
    feed.until_connected().await;
    assert_eq!(shared.subscriber_count(), 2);

    // Act
    leaver.cancel();

    // Assert - deregistration is immediate
    assert_eq!(shared.subscriber_count(), 1);

    // The remaining subscriber still receives emissions
    assert!(feed.emit(quote_acme()));
    assert_eq!(
        unwrap_value(unwrap_stream(&mut keeper, 500).await),
        quote_acme()
    );
}

#[tokio::test]
async fn instances_do_not_share_state() {
    // Arrange - two independent shared views
    let feed_a = ProbeSource::<Quote>::new();
    let shared_a = ReplayShared::new(feed_a.clone());
    let feed_b = ProbeSource::<Quote>::new();
    let shared_b = ReplayShared::new(feed_b.clone());

    let mut sub_a = shared_a.subscribe();
    let mut sub_b = shared_b.subscribe();
    feed_a.until_connected().await;
    feed_b.until_connected().await;

    // Act
    assert!(feed_a.emit(quote_acme()));
    assert!(feed_b.emit(quote_initech()));

    // Assert - each instance caches its own feed
    assert_eq!(
        unwrap_value(unwrap_stream(&mut sub_a, 500).await),
        quote_acme()
    );
    assert_eq!(
        unwrap_value(unwrap_stream(&mut sub_b, 500).await),
        quote_initech()
    );

    let mut late_a = shared_a.subscribe();
    let mut late_b = shared_b.subscribe();
    assert_eq!(
        unwrap_value(unwrap_stream(&mut late_a, 500).await),
        quote_acme()
    );
    assert_eq!(
        unwrap_value(unwrap_stream(&mut late_b, 500).await),
        quote_initech()
    );
}

#[tokio::test]
async fn dropping_the_shared_view_ends_subscribers() {
    // Arrange
    let feed = ProbeSource::<Quote>::new();
    let shared = ReplayShared::new(feed.clone());

    let mut sub = shared.subscribe();
    feed.until_connected().await;

    // Act
    drop(shared);

    // Assert - the subscriber stream ends
    recast_test_utils::assert_stream_ended(&mut sub, 500).await;
}
