//! # Collaborator Failure Tests
//!
//! A failed asset or rate-source call must leave the ledger exactly as it was.

#[cfg(test)]
mod tests {
    use wibbtc_ledger::prelude::*;

    use crate::fixtures::{addr, create_funded, deploy_flaky, units};

    #[test]
    fn test_failed_payout_leaves_shares_intact() {
        let (ledger, asset, _rate) = deploy_flaky();
        let alice = addr(0xA1);
        asset.inner().mint(alice, units(100));
        asset.inner().approve(alice, ledger.address(), units(100));
        ledger.mint(alice, units(100)).unwrap();
        let before = ledger.snapshot().unwrap();

        asset.fail_next_payout();
        let err = ledger.burn(alice, units(60)).unwrap_err();

        assert!(matches!(err, LedgerError::TransferFailed(AssetError::Other(_))));
        assert!(err.is_collaborator_failure());
        assert_eq!(ledger.snapshot().unwrap(), before);
        assert_eq!(asset.inner().balance_of(alice).unwrap(), U256::zero());

        // The next attempt goes through.
        ledger.burn(alice, units(60)).unwrap();
        assert_eq!(ledger.balance_of(alice).unwrap(), units(40));
    }

    #[test]
    fn test_failed_burn_shares_payout_rolls_back() {
        let (ledger, asset, _rate) = deploy_flaky();
        let alice = addr(0xA1);
        asset.inner().mint(alice, units(10));
        asset.inner().approve(alice, ledger.address(), units(10));
        ledger.mint(alice, units(10)).unwrap();

        asset.fail_next_payout();
        assert!(ledger.burn_shares(alice, units(10)).is_err());
        assert_eq!(ledger.shares_of(alice), units(10));
    }

    #[test]
    fn test_rate_outage_blocks_everything_but_share_reads() {
        let d = create_funded(&[(addr(1), 500)]);
        d.rate.fail_with(RateError::Other("core paused".to_string()));

        let outage = LedgerError::RateUnavailable(RateError::Other("core paused".to_string()));
        assert_eq!(d.ledger.mint(addr(1), units(1)), Err(outage.clone()));
        assert_eq!(d.ledger.burn(addr(1), units(1)), Err(outage.clone()));
        assert_eq!(d.ledger.transfer(addr(1), addr(2), units(1)), Err(outage.clone()));
        assert_eq!(d.ledger.balance_of(addr(1)), Err(outage.clone()));
        assert_eq!(d.ledger.total_supply(), Err(outage));

        assert_eq!(d.ledger.shares_of(addr(1)), units(500));
        assert_eq!(d.ledger.total_shares(), units(500));

        let stats = d.ledger.stats();
        assert_eq!(stats.collaborator_failures, 3);
        assert_eq!(stats.rejected_operations, 3);
    }

    #[test]
    fn test_rejected_deposit_mints_nothing() {
        let d = create_funded(&[]);
        let alice = addr(0xA1);
        d.asset.mint(alice, units(100));
        d.asset.approve(alice, d.ledger.address(), units(100));
        d.asset.set_rejecting(true);

        assert_eq!(
            d.ledger.mint(alice, units(100)),
            Err(LedgerError::TransferFailed(AssetError::Rejected))
        );
        assert!(d.ledger.total_shares().is_zero());
        assert!(d.ledger.events().iter().all(|e| e.kind() != "mint"));
    }

    #[test]
    fn test_zero_rate_is_invalid() {
        let d = create_funded(&[(addr(1), 100)]);
        d.rate.set_raw(U256::zero());

        assert_eq!(d.ledger.burn(addr(1), units(1)), Err(LedgerError::InvalidRate));
        assert_eq!(d.ledger.burn_shares(addr(1), units(1)), Err(LedgerError::InvalidRate));
        assert_eq!(
            d.ledger.transfer(addr(1), addr(2), units(1)),
            Err(LedgerError::InvalidRate)
        );
        assert_eq!(d.ledger.shares_of(addr(1)), units(100));
    }
}
