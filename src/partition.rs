use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Compute the table of partition numbers p(0)..=p(n).
///
/// Uses Euler's pentagonal-number recurrence:
///
/// ```text
/// p(i) = sum over k >= 1 of (-1)^(k+1) * [ p(i - k(3k-1)/2) + p(i - k(3k+1)/2) ]
/// ```
///
/// where terms with a negative argument are dropped. Each entry depends only
/// on earlier entries, so the table is filled strictly left to right.
pub fn partition_table(n: u64) -> Vec<BigUint> {
    let n = n as usize;
    let mut table = Vec::with_capacity(n + 1);
    table.push(BigUint::one());

    for i in 1..=n {
        // Positive and negative terms are summed separately so the
        // subtraction happens exactly once. p(i) is non-negative, and the
        // positive terms of the recurrence always dominate the negative
        // ones, so the unsigned subtraction cannot underflow.
        let mut plus = BigUint::zero();
        let mut minus = BigUint::zero();

        let mut k = 1usize;
        loop {
            // Generalized pentagonal numbers g(k) = k(3k-1)/2 and g(-k) = k(3k+1)/2.
            let g1 = k * (3 * k - 1) / 2;
            if g1 > i {
                break;
            }
            let g2 = k * (3 * k + 1) / 2;

            let acc = if k % 2 == 1 { &mut plus } else { &mut minus };
            *acc += &table[i - g1];
            if g2 <= i {
                *acc += &table[i - g2];
            }
            k += 1;
        }

        table.push(plus - minus);
    }

    table
}

/// Number of partitions of `n`: the ways to write `n` as a sum of positive
/// integers, ignoring order. p(0) is 1 (the empty partition).
pub fn partitions(n: u64) -> BigUint {
    let mut table = partition_table(n);
    table.pop().unwrap_or_else(BigUint::one)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Independent oracle: accumulate parts 1..=n coin-change style.
    /// dp[j] counts partitions of j using parts up to i.
    fn partitions_by_parts(n: usize) -> Vec<BigUint> {
        let mut dp = vec![BigUint::zero(); n + 1];
        dp[0] = BigUint::one();
        for i in 1..=n {
            for j in i..=n {
                let prev = dp[j - i].clone();
                dp[j] += prev;
            }
        }
        dp
    }

    #[test]
    fn test_small_values() {
        let expected: [u32; 11] = [1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42];
        for (n, want) in expected.iter().enumerate() {
            assert_eq!(
                partitions(n as u64),
                BigUint::from(*want),
                "p({n}) mismatch"
            );
        }
    }

    #[test]
    fn test_zero_is_one() {
        let table = partition_table(0);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0], BigUint::one());
        assert_eq!(partitions(0), BigUint::one());
    }

    #[test]
    fn test_golden_values() {
        assert_eq!(partitions(100).to_string(), "190569292");
        assert_eq!(partitions(171).to_string(), "301384802048");
        assert_eq!(partitions(200).to_string(), "3972999029388");
    }

    #[test]
    fn test_monotonic() {
        let table = partition_table(150);
        for i in 1..table.len() {
            assert!(table[i] >= table[i - 1], "p({i}) < p({})", i - 1);
        }
    }

    #[test]
    fn test_agrees_with_parts_accumulation() {
        let pentagonal = partition_table(120);
        let by_parts = partitions_by_parts(120);
        assert_eq!(pentagonal, by_parts);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(partitions(64), partitions(64));
    }
}
