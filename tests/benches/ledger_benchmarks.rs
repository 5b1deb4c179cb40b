//! # wibBTC Ledger Benchmarks
//!
//! | Area | Operation | Target |
//! |------|-----------|--------|
//! | Conversion | shares <-> balance (U512 intermediate) | < 1us |
//! | Mint | deposit + share credit | < 10us |
//! | Transfer | share move between holders | < 10us |
//! | Snapshot | serialize N holders | linear in N |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;
use wibbtc_ledger::prelude::*;

const ONE: u128 = 1_000_000_000_000_000_000;

fn addr(n: u32) -> Address {
    let mut bytes = [0u8; 20];
    bytes[16..].copy_from_slice(&n.to_be_bytes());
    Address::new(bytes)
}

fn funded_ledger(holders: u32, amount: u128) -> InMemoryDeployment {
    let d = create_test_ledger();
    for n in 1..=holders {
        let who = addr(n);
        d.asset.mint(who, U256::from(amount) * U256::from(1_000u32));
        d.asset.approve(who, d.ledger.address(), U256::MAX);
        d.ledger.mint(who, U256::from(amount)).unwrap();
    }
    d
}

// ============================================================================
// Conversions
// ============================================================================

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    let mut rng = rand::thread_rng();
    let rate = ExchangeRate::from_raw(U256::from(rng.gen_range(ONE..2 * ONE)));
    let amount = U256::from(rng.gen_range(ONE..1_000 * ONE));

    group.bench_function("shares_for_deposit", |b| {
        b.iter(|| shares_for_deposit(black_box(amount), black_box(rate)))
    });
    group.bench_function("shares_for_redemption", |b| {
        b.iter(|| shares_for_redemption(black_box(amount), black_box(rate)))
    });
    group.bench_function("balance_for_shares", |b| {
        b.iter(|| balance_for_shares(black_box(amount), black_box(rate)))
    });
    group.finish();
}

// ============================================================================
// Ledger operations
// ============================================================================

fn bench_ledger_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger");
    group.measurement_time(Duration::from_secs(5));

    let d = funded_ledger(2, 1_000_000 * ONE);
    d.rate.set_raw(U256::from(ONE + ONE / 7));
    let (a, b) = (addr(1), addr(2));

    group.bench_function("mint", |bench| {
        bench.iter(|| d.ledger.mint(a, black_box(U256::from(ONE))).unwrap())
    });
    group.bench_function("transfer_round_trip", |bench| {
        bench.iter(|| {
            d.ledger.transfer(a, b, black_box(U256::from(ONE))).unwrap();
            d.ledger.transfer(b, a, black_box(U256::from(ONE))).unwrap();
        })
    });
    group.bench_function("balance_of", |bench| {
        bench.iter(|| d.ledger.balance_of(black_box(a)).unwrap())
    });
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for holders in [10u32, 100, 1_000] {
        let d = funded_ledger(holders, ONE);
        group.throughput(Throughput::Elements(u64::from(holders)));
        group.bench_with_input(BenchmarkId::new("capture", holders), &holders, |b, _| {
            b.iter(|| black_box(d.ledger.snapshot().unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("check_invariants", holders), &holders, |b, _| {
            b.iter(|| black_box(d.ledger.check_invariants().unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_conversions,
    bench_ledger_operations,
    bench_snapshot
);
criterion_main!(benches);
