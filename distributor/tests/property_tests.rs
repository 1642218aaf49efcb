//! Property-based tests for batch planning invariants
//!
//! - Batch count is exactly ceil(n / capacity)
//! - Concatenating batches reproduces the input, order preserved
//! - Every batch respects the capacity bound; only the last may be smaller
//! - Amounts are conserved across partitioning under exact arithmetic

use distributor::plan;
use distributor::types::{total_requested, Address, TokenAmount, Transfer};
use proptest::prelude::*;

/// Strategy for generating transfers with hex-ish addresses
fn transfer_strategy() -> impl Strategy<Value = Transfer> {
    ("[a-f0-9]{8,40}", 0u64..1_000_000_000_000u64).prop_map(|(addr, amount)| Transfer {
        recipient: Address::new(format!("0x{}", addr)).unwrap(),
        amount: TokenAmount::parse(&amount.to_string()).unwrap(),
    })
}

fn transfers_strategy() -> impl Strategy<Value = Vec<Transfer>> {
    prop::collection::vec(transfer_strategy(), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: plan produces ceil(n/c) batches
    #[test]
    fn prop_batch_count(transfers in transfers_strategy(), capacity in 1usize..25) {
        let batches = plan(&transfers, capacity).unwrap();
        let expected = transfers.len().div_ceil(capacity);
        prop_assert_eq!(batches.len(), expected);
    }

    /// Property: concatenation reconstructs the original list exactly
    #[test]
    fn prop_concatenation_round_trips(transfers in transfers_strategy(), capacity in 1usize..25) {
        let batches = plan(&transfers, capacity).unwrap();
        let rebuilt: Vec<Transfer> = batches.into_iter().flat_map(|b| b.transfers).collect();
        prop_assert_eq!(rebuilt, transfers);
    }

    /// Property: every batch is non-empty and within capacity; all but the
    /// last are full
    #[test]
    fn prop_size_bounds(transfers in transfers_strategy(), capacity in 1usize..25) {
        let batches = plan(&transfers, capacity).unwrap();

        for (i, batch) in batches.iter().enumerate() {
            prop_assert!(!batch.is_empty());
            prop_assert!(batch.len() <= capacity);
            prop_assert_eq!(batch.index, i);
            if i + 1 < batches.len() {
                prop_assert_eq!(batch.len(), capacity);
            }
        }
    }

    /// Property: no amount is lost or duplicated by partitioning
    #[test]
    fn prop_amounts_conserved(transfers in transfers_strategy(), capacity in 1usize..25) {
        let before = total_requested(&transfers).unwrap();

        let batches = plan(&transfers, capacity).unwrap();
        let per_batch: Vec<TokenAmount> = batches
            .iter()
            .map(|b| total_requested(&b.transfers).unwrap())
            .collect();
        let after = TokenAmount::checked_sum(&per_batch).unwrap();

        prop_assert_eq!(before, after);
    }
}
