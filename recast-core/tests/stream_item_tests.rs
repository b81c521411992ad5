// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recast_core::{RecastError, StreamItem};

#[test]
fn value_and_error_predicates() {
    let value = StreamItem::Value(42);
    assert!(value.is_value());
    assert!(!value.is_error());

    let error: StreamItem<i32> = StreamItem::Error(RecastError::upstream_error("boom"));
    assert!(error.is_error());
    assert!(!error.is_value());
}

#[test]
fn ok_extracts_value_and_discards_error() {
    assert_eq!(StreamItem::Value(7).ok(), Some(7));

    let error: StreamItem<i32> = StreamItem::Error(RecastError::upstream_error("boom"));
    assert_eq!(error.ok(), None);
}

#[test]
fn err_extracts_error_and_discards_value() {
    assert!(StreamItem::Value(7).err().is_none());

    let error: StreamItem<i32> = StreamItem::Error(RecastError::upstream_error("boom"));
    assert!(matches!(
        error.err(),
        Some(RecastError::UpstreamError { .. })
    ));
}

#[test]
fn map_transforms_value_and_passes_error_through() {
    let doubled = StreamItem::Value(21).map(|v| v * 2);
    assert_eq!(doubled, StreamItem::Value(42));

    let error: StreamItem<i32> = StreamItem::Error(RecastError::upstream_error("boom"));
    assert!(error.map(|v| v * 2).is_error());
}

#[test]
fn errors_are_never_equal() {
    let a: StreamItem<i32> = StreamItem::Error(RecastError::upstream_error("same"));
    let b: StreamItem<i32> = StreamItem::Error(RecastError::upstream_error("same"));
    assert_ne!(a, b);
}

#[test]
fn converts_from_and_into_result() {
    let item: StreamItem<i32> = Ok(5).into();
    assert_eq!(item, StreamItem::Value(5));

    let result: Result<i32, RecastError> = StreamItem::Value(5).into();
    assert_eq!(result.unwrap(), 5);

    let result: Result<i32, RecastError> =
        StreamItem::<i32>::Error(RecastError::upstream_error("boom")).into();
    assert!(result.is_err());
}

#[test]
#[should_panic(expected = "called `StreamItem::unwrap()` on an `Error` value")]
fn unwrap_panics_on_error() {
    let error: StreamItem<i32> = StreamItem::Error(RecastError::upstream_error("boom"));
    let _ = error.unwrap();
}
