//! # Accounting Properties
//!
//! proptest checks of the rounding and conservation rules over arbitrary rates
//! and amounts.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use wibbtc_ledger::prelude::*;

    use crate::fixtures::{addr, deploy_at_rate, fund, units, ONE};

    fn rate_strategy() -> impl Strategy<Value = u128> {
        (ONE / 2)..=(10 * ONE)
    }

    fn amount_strategy() -> impl Strategy<Value = u128> {
        10u128..=1_000_000_000_000_000_000_000_000
    }

    proptest! {
        #[test]
        fn prop_round_trip_never_profits(rate in rate_strategy(), amount in amount_strategy()) {
            let d = deploy_at_rate(rate);
            let alice = addr(0xA1);
            fund(&d, alice, units(amount));

            d.ledger.mint(alice, units(amount)).unwrap();
            let balance = d.ledger.balance_of(alice).unwrap();
            prop_assert!(balance <= units(amount));

            let paid = d.ledger.burn(alice, balance).unwrap();
            prop_assert_eq!(paid, balance);
            prop_assert!(d.asset.balance_of(alice).unwrap() <= units(amount));
        }

        #[test]
        fn prop_burn_beyond_balance_rejected(
            rate in rate_strategy(),
            amount in amount_strategy(),
            excess in 1u128..1_000,
        ) {
            let d = deploy_at_rate(rate);
            let alice = addr(0xA1);
            fund(&d, alice, units(amount));
            d.ledger.mint(alice, units(amount)).unwrap();

            let balance = d.ledger.balance_of(alice).unwrap();
            let shares_before = d.ledger.shares_of(alice);
            let result = d.ledger.burn(alice, balance + units(excess));

            let rejected = matches!(result, Err(LedgerError::InsufficientShares { .. }));
            prop_assert!(rejected);
            prop_assert_eq!(d.ledger.shares_of(alice), shares_before);
        }

        #[test]
        fn prop_transfer_conserves_supply(
            rate in rate_strategy(),
            amount in amount_strategy(),
            fraction in 0u128..=100,
        ) {
            let d = deploy_at_rate(rate);
            let (alice, bob) = (addr(0xA1), addr(0xB0));
            fund(&d, alice, units(amount));
            d.ledger.mint(alice, units(amount)).unwrap();

            let supply = d.ledger.total_supply().unwrap();
            let shares = d.ledger.total_shares();
            let to_send = d.ledger.balance_of(alice).unwrap() * units(fraction) / units(100);
            d.ledger.transfer(alice, bob, to_send).unwrap();

            prop_assert_eq!(d.ledger.total_shares(), shares);
            prop_assert_eq!(d.ledger.total_supply().unwrap(), supply);
            let sum = d.ledger.balance_of(alice).unwrap() + d.ledger.balance_of(bob).unwrap();
            prop_assert!(sum <= supply);
            prop_assert!(d.ledger.check_invariants().unwrap().is_valid());
        }

        #[test]
        fn prop_balance_monotone_in_rate(
            low in rate_strategy(),
            bump in 0u128..=ONE,
            amount in amount_strategy(),
        ) {
            let d = deploy_at_rate(low);
            let alice = addr(0xA1);
            fund(&d, alice, units(amount));
            d.ledger.mint(alice, units(amount)).unwrap();

            let before = d.ledger.balance_of(alice).unwrap();
            d.rate.set_raw(units(low + bump));
            prop_assert!(d.ledger.balance_of(alice).unwrap() >= before);
        }

        #[test]
        fn prop_conversions_round_down(shares in 0u128..=u128::MAX / 2, rate in 1u128..=(100 * ONE)) {
            let rate = ExchangeRate::from_raw(units(rate));
            let balance = balance_for_shares(units(shares), rate).unwrap();
            let back = shares_for_transfer(balance, rate).unwrap();
            prop_assert!(back <= units(shares));
            let ceil = shares_for_redemption(balance, rate).unwrap();
            prop_assert!(ceil <= units(shares));
        }
    }
}
