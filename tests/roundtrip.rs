//! End-to-end checks across the library: the partition golden value, and
//! encode/recover round trips on both a small custom schema and the default
//! printable-ASCII schema.

use std::collections::BTreeMap;

use num_bigint::BigUint;

use partita::partition::{partition_table, partitions};
use partita::recover::{recover, StrategyKind};
use partita::schema::Schema;

/// The reference implementation computes p(171) and prints this value.
#[test]
fn partition_golden_171() {
    assert_eq!(partitions(171).to_string(), "301384802048");
}

/// Schema weights are partition numbers of the character code points.
#[test]
fn default_weights_come_from_the_partition_table() {
    let schema = Schema::new();
    let table = partition_table(0x7e);
    for (c, w) in schema.weights() {
        assert_eq!(w, &table[c as usize], "weight mismatch for '{c}'");
    }
}

#[test]
fn encode_then_recover_small_schema() {
    let weights: BTreeMap<char, BigUint> = [('x', 4u32), ('y', 9), ('z', 25)]
        .into_iter()
        .map(|(c, w)| (c, BigUint::from(w)))
        .collect();
    let schema = Schema::with_parts(weights, BigUint::from(1000u32), 1, 4);

    let z = schema.encode("zyx").unwrap();
    assert_eq!(z, BigUint::from(1038u32));

    for kind in [StrategyKind::Backtracking, StrategyKind::MeetInTheMiddle] {
        let report = recover(&schema, &z, kind, 1, 4, 0).unwrap();
        assert!(
            report.passwords.iter().any(|p| p == "zyx"),
            "{kind} did not recover the original password"
        );
        // Every candidate must encode back to the same z.
        for candidate in &report.passwords {
            assert_eq!(schema.encode(candidate).unwrap(), z, "candidate {candidate}");
        }
    }
}

#[test]
fn recover_default_schema_pair() {
    let schema = Schema::new();
    let a = schema.weight('H').unwrap();
    let b = schema.weight('i').unwrap();
    let z = a + b + schema.constant();

    let report = recover(&schema, &z, StrategyKind::Backtracking, 2, 2, 0).unwrap();
    assert_eq!(report.passwords, vec!["Hi", "iH"]);
}
