//! Partitioning Tests
//!
//! Group sizes, ordering and the empty-input contract.

use crate::*;
use kvbatch::{build_get_ops, build_put_ops, partition, OperationGroup, ToOp};
use proptest::prelude::*;

fn sizes(groups: &[OperationGroup]) -> Vec<usize> {
    groups.iter().map(|g| g.len()).collect()
}

// =============================================================================
// CONCRETE SIZES
// =============================================================================

#[test]
fn test_130_pairs_make_two_groups() {
    let groups = build_put_ops(&kvs(130), 128).unwrap();
    assert_eq!(sizes(&groups), vec![128, 2]);
}

#[test]
fn test_256_pairs_make_two_full_groups() {
    let groups = build_put_ops(&kvs(256), 128).unwrap();
    assert_eq!(sizes(&groups), vec![128, 128]);
}

#[test]
fn test_single_pair() {
    let groups = build_put_ops(&kvs(1), 128).unwrap();
    assert_eq!(sizes(&groups), vec![1]);
}

#[test]
fn test_empty_input_fails() {
    let err = build_put_ops(&[], 128).unwrap_err();
    assert!(matches!(err, Error::EmptyInput(_)));
    assert!(err.is_contract_violation());
}

// =============================================================================
// GET PINNING
// =============================================================================

#[test]
fn test_revision_zero_is_unpinned() {
    let groups = build_get_ops(&[KeyRevision::new("k", 0)], 128).unwrap();
    assert_eq!(groups[0].ops(), &[Op::get("k")]);
}

#[test]
fn test_revision_five_is_pinned() {
    let groups = build_get_ops(&[KeyRevision::new("k", 5)], 128).unwrap();
    assert_eq!(
        groups[0].ops(),
        &[Op::Get {
            key: "k".to_string(),
            revision: Some(5)
        }]
    );
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_groups_bounded_nonempty_and_ordered(
        revisions in proptest::collection::vec(-2i64..20, 1..700),
        cap in 1usize..300,
    ) {
        let reads: Vec<KeyRevision> = revisions
            .iter()
            .enumerate()
            .map(|(i, rev)| KeyRevision::new(format!("key/{}", i), *rev))
            .collect();

        let groups = partition(&reads, cap).unwrap();

        for group in &groups {
            prop_assert!(!group.is_empty());
            prop_assert!(group.len() <= cap);
        }

        let flattened: Vec<Op> = groups.iter().flat_map(|g| g.ops().to_vec()).collect();
        let expected: Vec<Op> = reads.iter().map(ToOp::to_op).collect();
        prop_assert_eq!(flattened, expected);
    }
}
