//! # Concurrency Tests
//!
//! Many callers hammer one ledger from a multi-threaded runtime. Operations
//! are serialized by the ledger lock, so totals must match the sequential sum.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wibbtc_ledger::prelude::*;

    use crate::fixtures::{addr, create_funded, fund, units};

    const TASKS: u8 = 16;
    const ROUNDS: u128 = 50;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mints_sum_exactly() {
        let d = Arc::new(create_test_ledger());
        for byte in 1..=TASKS {
            fund(&d, addr(byte), units(ROUNDS * 100));
        }

        let mut handles = Vec::new();
        for byte in 1..=TASKS {
            let d = Arc::clone(&d);
            handles.push(tokio::spawn(async move {
                for _ in 0..ROUNDS {
                    d.ledger.mint(addr(byte), units(100)).unwrap();
                    tokio::task::yield_now().await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let expected = units(u128::from(TASKS) * ROUNDS * 100);
        assert_eq!(d.ledger.total_shares(), expected);
        assert_eq!(d.ledger.underlying_reserves().unwrap(), expected);
        assert_eq!(d.ledger.stats().mints, u64::from(TASKS) * 50);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transfers_conserve_shares() {
        let holders: Vec<_> = (1..=TASKS).map(|b| (addr(b), 10_000u128)).collect();
        let d = Arc::new(create_funded(&holders));
        let total = d.ledger.total_shares();

        let mut handles = Vec::new();
        for byte in 1..=TASKS {
            let d = Arc::clone(&d);
            handles.push(tokio::task::spawn_blocking(move || {
                let next = addr(byte % TASKS + 1);
                for round in 0..ROUNDS {
                    // Some of these overdraw once balances drift; that is fine.
                    let _ = d.ledger.transfer(addr(byte), next, units(round * 7));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(d.ledger.total_shares(), total);
        assert!(d.ledger.check_invariants().unwrap().is_valid());
        let sum = (1..=TASKS).fold(U256::zero(), |acc, b| acc + d.ledger.shares_of(addr(b)));
        assert_eq!(sum, total);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_burns_cannot_overdraw() {
        let alice = addr(0xA1);
        let d = Arc::new(create_funded(&[(alice, 1_000)]));

        let mut handles = Vec::new();
        for _ in 0..TASKS {
            let d = Arc::clone(&d);
            handles.push(tokio::task::spawn_blocking(move || {
                d.ledger.burn(alice, units(300)).is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 3);
        assert_eq!(d.ledger.balance_of(alice).unwrap(), units(100));
        assert_eq!(d.asset.balance_of(alice).unwrap(), units(900));
    }
}
