//! Property tests for the decimal conversion and fee arithmetic, plus an
//! engine-level conservation property over wrap and unwrap sequences.

mod common;

use proptest::prelude::*;

use common::{addr, engine_addr, fee_recipient, make_engine, MockFungibleToken};
use reef_engine::decimals::{convert_decimals, transfer_amount_for_wrap};
use reef_engine::fee::{unwrap_fee, MIN_UNWRAP_FEE_DIVISOR};
use reef_engine::Interaction;
use reef_ledger::LedgerRead;
use reef_types::{TokenId, LEDGER_DECIMALS};

proptest! {
    /// Scaling down partitions the value exactly into converted and
    /// truncated parts.
    #[test]
    fn convert_down_partitions_value(
        decimals in 0u8..=18,
        amount in any::<u128>(),
    ) {
        let shift = 10u128.pow((LEDGER_DECIMALS - decimals) as u32);
        let (converted, truncated) = convert_decimals(LEDGER_DECIMALS, decimals, amount).unwrap();
        prop_assert_eq!(converted * shift + truncated, amount);
        prop_assert!(truncated < shift);
    }

    /// Scaling up then back down is lossless.
    #[test]
    fn convert_up_down_roundtrip(
        decimals in 0u8..=18,
        amount in 0u128..1_000_000_000_000_000_000,
    ) {
        let (up, lost) = convert_decimals(decimals, LEDGER_DECIMALS, amount).unwrap();
        prop_assert_eq!(lost, 0);
        prop_assert_eq!(convert_decimals(LEDGER_DECIMALS, decimals, up).unwrap(), (amount, 0));
    }

    /// The external pull for a coarse wrap covers the credited amount
    /// exactly, the surplus being the reported dust.
    #[test]
    fn wrap_transfer_covers_credit(
        decimals in 0u8..18,
        amount in 0u128..1_000_000_000_000_000_000_000_000_000_000,
    ) {
        let shift = 10u128.pow((LEDGER_DECIMALS - decimals) as u32);
        let (transfer, dust) = transfer_amount_for_wrap(amount, decimals).unwrap();
        prop_assert_eq!(transfer * shift, amount + dust);
        prop_assert!(dust < shift);
    }

    /// Wrapping then unwrapping the same amount loses at most one external
    /// unit to rounding.
    #[test]
    fn round_trip_loss_bounded(
        decimals in 0u8..18,
        amount in 1u128..1_000_000_000_000_000_000_000_000_000_000,
    ) {
        let (pulled, _) = transfer_amount_for_wrap(amount, decimals).unwrap();
        let (pushed, _) = convert_decimals(LEDGER_DECIMALS, decimals, amount).unwrap();
        prop_assert!(pulled - pushed <= 1);
    }

    /// The fee never exceeds the divisor-implied rate cap.
    #[test]
    fn fee_bounded_by_rate_cap(
        amount in any::<u128>(),
        divisor in MIN_UNWRAP_FEE_DIVISOR..u128::MAX,
    ) {
        let fee = unwrap_fee(amount, divisor);
        prop_assert!(fee <= amount / MIN_UNWRAP_FEE_DIVISOR);
    }

    /// Internal supply of a wrapped fungible always equals custody: every
    /// unit in the ledger is backed by an external unit the engine holds.
    #[test]
    fn wrap_unwrap_conserves_custody(
        decimals in 0u8..=18,
        amount in 1u128..1_000_000_000_000_000_000_000_000,
        unwrap_pct in 0u128..=100,
    ) {
        let user = addr(1);
        let asset = addr(0xa1);
        let token = TokenId::from_fungible(&asset);
        let shift = 10u128.pow((LEDGER_DECIMALS - decimals) as u32);

        let mut engine = make_engine();
        let mock = MockFungibleToken::new(decimals, engine_addr());
        mock.set_balance(user, u128::MAX / shift);
        engine.register_fungible(asset, Box::new(mock.clone()));

        engine
            .submit_single(&user, &Interaction::WrapFungible { asset, amount })
            .unwrap();
        let unwrap_amount = amount / 100 * unwrap_pct;
        if unwrap_amount > 0 {
            engine
                .submit_single(&user, &Interaction::UnwrapFungible { asset, amount: unwrap_amount })
                .unwrap();
        }

        let supply = engine.ledger().balance_of(&user, &token)
            + engine.ledger().balance_of(&fee_recipient(), &token);
        prop_assert_eq!(mock.balance(&engine_addr()) * shift, supply);
    }
}
