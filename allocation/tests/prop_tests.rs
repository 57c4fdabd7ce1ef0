use proptest::prelude::*;

use splitcalc_allocation::{
    allocate_amount, complement_pair, AllocationEngine, Arithmetic, RatioRounding, ShareEntry,
    ShareTable,
};
use splitcalc_types::{Balance, Bps, Destination};

/// Random share table of 1..=11 entries that sums to exactly 10000 bps.
fn valid_table() -> impl Strategy<Value = ShareTable> {
    prop::collection::vec(0u32..=10_000, 0..11).prop_map(|mut cuts| {
        cuts.push(0);
        cuts.push(10_000);
        cuts.sort_unstable();
        cuts.windows(2)
            .enumerate()
            .map(|(i, w)| {
                ShareEntry::new(
                    Destination::new(format!("acc://dest-{i}")).unwrap(),
                    Bps::new(w[1] - w[0]).unwrap(),
                )
            })
            .collect::<ShareTable>()
    })
}

proptest! {
    /// Floor loss is bounded: sum ≤ B and B − sum < number of entries.
    #[test]
    fn floor_loss_is_bounded(balance in any::<u64>(), table in valid_table()) {
        let allocs = AllocationEngine::new(Arithmetic::Exact)
            .allocate(Balance::new(balance), &table)
            .unwrap();
        let sum: u128 = allocs.iter().map(|a| a.amount.base_units() as u128).sum();
        prop_assert!(sum <= balance as u128, "allocated {} > balance {}", sum, balance);
        prop_assert!(
            (balance as u128 - sum) < allocs.len() as u128,
            "loss {} not below entry count {}",
            balance as u128 - sum,
            allocs.len()
        );
    }

    /// Every entry yields one allocation, in order, with zero shares kept.
    #[test]
    fn one_allocation_per_entry(balance in any::<u64>(), table in valid_table()) {
        let allocs = AllocationEngine::default()
            .allocate(Balance::new(balance), &table)
            .unwrap();
        prop_assert_eq!(allocs.len(), table.len());
        for (a, e) in allocs.iter().zip(table.entries()) {
            prop_assert_eq!(&a.destination, &e.destination);
            prop_assert_eq!(a.share, e.share);
            if e.share == Bps::ZERO {
                prop_assert_eq!(a.amount, Balance::ZERO);
            }
        }
    }

    /// A zero balance allocates zero everywhere on both arithmetic paths.
    #[test]
    fn zero_balance_is_all_zero(table in valid_table()) {
        for arithmetic in [Arithmetic::Exact, Arithmetic::Float] {
            let allocs = AllocationEngine::new(arithmetic)
                .allocate(Balance::ZERO, &table)
                .unwrap();
            prop_assert!(allocs.iter().all(|a| a.amount.is_zero()));
        }
    }

    /// Tables that do not total 10000 never produce allocations.
    #[test]
    fn invalid_tables_are_rejected(shares in prop::collection::vec(0u32..=10_000, 1..8)) {
        let table: ShareTable = shares
            .iter()
            .enumerate()
            .map(|(i, s)| ShareEntry::new(
                Destination::new(format!("acc://dest-{i}")).unwrap(),
                Bps::new(*s).unwrap(),
            ))
            .collect();
        let total: u32 = shares.iter().sum();
        let result = AllocationEngine::default().allocate(Balance::new(1_000_000), &table);
        prop_assert_eq!(result.is_ok(), total == 10_000);
    }

    /// Balances divisible by 10000 split exactly on both arithmetic paths.
    #[test]
    fn divisible_balances_agree_across_paths(
        units in 0u64..(1u64 << 32),
        share in 0u32..=10_000,
    ) {
        let balance = Balance::new(units * 10_000);
        let share = Bps::new(share).unwrap();
        let exact = allocate_amount(balance, share, Arithmetic::Exact);
        let float = allocate_amount(balance, share, Arithmetic::Float);
        prop_assert_eq!(exact.base_units(), units * share.get() as u64);
        prop_assert_eq!(float, exact);
    }

    /// Complement pairs always sum to the budget.
    #[test]
    fn complement_pair_sums_to_budget(
        budget in 0u32..=10_000,
        x in any::<u64>(),
        y in any::<u64>(),
        truncate in any::<bool>(),
    ) {
        prop_assume!(x != 0 || y != 0);
        let rounding = if truncate { RatioRounding::Truncate } else { RatioRounding::Nearest };
        let (a, b) = complement_pair(Bps::new(budget).unwrap(), x, y, rounding).unwrap();
        prop_assert_eq!(a.get() + b.get(), budget);
    }
}
