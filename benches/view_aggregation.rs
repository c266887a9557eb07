//! 访问统计聚合性能基准测试

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use linkhub::services::{aggregate_payloads, user_agent};
use linkhub::storage::ShortcutViewPayload;

const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "curl/8.4.0",
];

const REFERERS: [&str; 3] = ["", "https://search.example", "https://chat.example"];

fn make_payloads(n: usize) -> Vec<ShortcutViewPayload> {
    (0..n)
        .map(|i| ShortcutViewPayload {
            shortcut_id: 1,
            ip: format!("10.0.{}.{}", i / 256 % 256, i % 256),
            referer: REFERERS[i % REFERERS.len()].to_string(),
            user_agent: USER_AGENTS[i % USER_AGENTS.len()].to_string(),
        })
        .collect()
}

/// 单条 User-Agent 解析
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics/classify");
    group.throughput(Throughput::Elements(1));

    for (i, ua) in USER_AGENTS.iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(i), ua, |b, ua| {
            b.iter(|| user_agent::classify(black_box(ua)));
        });
    }

    group.finish();
}

/// 不同访问量下的完整聚合
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics/aggregate_payloads");

    for size in [100usize, 1_000, 10_000] {
        let payloads = make_payloads(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payloads, |b, payloads| {
            b.iter(|| aggregate_payloads(black_box(payloads.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_aggregate);
criterion_main!(benches);
