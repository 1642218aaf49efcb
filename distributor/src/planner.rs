//! Batch planner
//!
//! Partitions the recipient list into fixed-size contiguous batches.
//! Batch *i* holds the transfers at original indices
//! `[i*capacity, min((i+1)*capacity, n))`, so concatenating all batches in
//! order reproduces the input exactly: nothing duplicated, nothing dropped.

use crate::error::{Error, Result};
use crate::types::{Batch, Transfer};
use tracing::debug;

/// Partition transfers into batches of at most `capacity`
///
/// `capacity` must be at least 1; an empty input produces zero batches.
pub fn plan(transfers: &[Transfer], capacity: usize) -> Result<Vec<Batch>> {
    if capacity == 0 {
        return Err(Error::Config(
            "batch capacity must be at least 1".to_string(),
        ));
    }

    let batches: Vec<Batch> = transfers
        .chunks(capacity)
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            transfers: chunk.to_vec(),
        })
        .collect();

    debug!(
        "Planned {} batches for {} transfers (capacity {})",
        batches.len(),
        transfers.len(),
        capacity
    );

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, TokenAmount};

    fn transfers(n: usize) -> Vec<Transfer> {
        (0..n)
            .map(|i| Transfer {
                recipient: Address::new(format!("0xrecipient{:03}", i)).unwrap(),
                amount: TokenAmount::parse(&((i + 1) * 100).to_string()).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_empty_input_plans_zero_batches() {
        assert!(plan(&[], 10).unwrap().is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = plan(&transfers(3), 0);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_exact_multiple() {
        let input = transfers(6);
        let batches = plan(&input, 3).unwrap();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 3));
    }

    #[test]
    fn test_remainder_goes_to_last_batch() {
        let input = transfers(7);
        let batches = plan(&input, 3).unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 3);
        assert_eq!(batches[1].len(), 3);
        assert_eq!(batches[2].len(), 1);
    }

    #[test]
    fn test_capacity_larger_than_input() {
        let input = transfers(4);
        let batches = plan(&input, 100).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 4);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let input = transfers(11);
        let batches = plan(&input, 4).unwrap();

        let rebuilt: Vec<Transfer> = batches
            .into_iter()
            .flat_map(|b| b.transfers)
            .collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_indices_are_sequential() {
        let batches = plan(&transfers(10), 3).unwrap();
        let indices: Vec<usize> = batches.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_five_recipients_capacity_two() {
        // [(A,100),(B,200),(C,300),(D,400),(E,500)] at capacity 2
        let input = transfers(5);
        let batches = plan(&input, 2).unwrap();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].transfers, input[0..2].to_vec());
        assert_eq!(batches[1].transfers, input[2..4].to_vec());
        assert_eq!(batches[2].transfers, input[4..5].to_vec());
    }
}
