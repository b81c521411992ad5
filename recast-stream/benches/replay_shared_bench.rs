// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::{future::join_all, stream, StreamExt};
use recast_core::StreamItem;
use recast_stream::ReplayShared;
use std::hint::black_box;
use tokio::runtime::Runtime;

pub fn bench_replay_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay_shared");
    let sizes = [100usize, 1000usize, 10000];
    let subscriber_counts = [1usize, 2usize, 4usize];

    for &size in &sizes {
        for &subscribers in &subscriber_counts {
            let id = BenchmarkId::from_parameter(format!("m{size}_s{subscribers}"));
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                id,
                &(size, subscribers),
                |bencher, &(size, subscribers)| {
                    bencher.iter(|| {
                        let rt = Runtime::new().unwrap();
                        rt.block_on(async move {
                            let shared = ReplayShared::new(move || {
                                stream::iter((0..size).map(|v| StreamItem::Value(v as u64)))
                            });

                            // Attach all subscribers, then drain them to completion
                            let futures: Vec<_> = (0..subscribers)
                                .map(|_| {
                                    let mut sub = shared.subscribe();
                                    async move {
                                        while let Some(item) = sub.next().await {
                                            black_box(item);
                                        }
                                    }
                                })
                                .collect();

                            join_all(futures).await;
                        });
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_replay_shared);
criterion_main!(benches);
