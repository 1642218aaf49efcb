//! Property-based tests for amount invariants
//!
//! - Parsing accepts exactly the non-negative integers
//! - Display/parse round-trips
//! - Checked sums agree with wide-integer reference arithmetic

use ledger_client::types::TokenAmount;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: any u64 rendered as decimal parses and round-trips
    #[test]
    fn prop_u64_round_trips(value in any::<u64>()) {
        let amount = TokenAmount::parse(&value.to_string()).unwrap();
        prop_assert_eq!(amount.to_string(), value.to_string());
    }

    /// Property: negative inputs are always rejected
    #[test]
    fn prop_negative_rejected(value in 1u64..u64::MAX) {
        let input = format!("-{}", value);
        prop_assert!(TokenAmount::parse(&input).is_err());
    }

    /// Property: fractional inputs are always rejected
    #[test]
    fn prop_fractional_rejected(whole in 0u64..1_000_000u64, frac in 1u32..1000u32) {
        let rendered = format!("{}.{:03}", whole, frac);
        prop_assert!(TokenAmount::parse(&rendered).is_err());
    }

    /// Property: checked sums agree with u128 reference arithmetic
    #[test]
    fn prop_sum_matches_reference(values in prop::collection::vec(any::<u64>(), 0..50)) {
        let amounts: Vec<TokenAmount> = values
            .iter()
            .map(|v| TokenAmount::parse(&v.to_string()).unwrap())
            .collect();

        let reference: u128 = values.iter().map(|v| *v as u128).sum();
        let total = TokenAmount::checked_sum(&amounts).unwrap();
        prop_assert_eq!(total.to_string(), reference.to_string());
    }

    /// Property: surrounding whitespace never changes the parsed value
    #[test]
    fn prop_whitespace_trimmed(value in any::<u64>()) {
        let padded = format!("  {}\t", value);
        let amount = TokenAmount::parse(&padded).unwrap();
        prop_assert_eq!(amount, TokenAmount::parse(&value.to_string()).unwrap());
    }
}
