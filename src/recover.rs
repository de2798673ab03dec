use std::collections::HashMap;
use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{debug, warn};

use crate::schema::{Schema, SchemaError};

/// Cap on partial-sum table entries per half in meet-in-the-middle.
/// Lengths whose half search space exceeds this are skipped.
const MAX_PARTIAL_ENTRIES: u64 = 1 << 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Backtracking,
    MeetInTheMiddle,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backtracking => "backtracking",
            Self::MeetInTheMiddle => "meet-in-the-middle",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a recovery run: every candidate password found, plus the
/// counters the strategies track while searching.
#[derive(Debug)]
pub struct Report {
    pub strategy: StrategyKind,
    pub passwords: Vec<String>,
    pub combinations_checked: u64,
    pub elapsed: Duration,
    /// True when the search stopped early because `limit` was reached.
    pub truncated: bool,
}

/// Search for every password within `min_len..=max_len` whose encoding
/// equals `z` under `schema`.
///
/// The target weight sum is `K = z - constant`; a `z` below the constant is
/// rejected before any search state is allocated. `limit` caps the number of
/// solutions, with 0 meaning unlimited.
pub fn recover(
    schema: &Schema,
    z: &BigUint,
    kind: StrategyKind,
    min_len: usize,
    max_len: usize,
    limit: usize,
) -> Result<Report, SchemaError> {
    let target = schema.target_sum(z)?;
    debug!(target = %target, strategy = %kind, min_len, max_len, "starting recovery");

    // Sorted ascending by weight: an overshoot while scanning a row means
    // every later character overshoots too.
    let mut chars: Vec<(char, &BigUint)> = schema.weights().collect();
    chars.sort_by(|a, b| a.1.cmp(b.1));

    let started = Instant::now();
    let mut search = Search {
        chars,
        target: &target,
        limit,
        combinations: 0,
        truncated: false,
        results: Vec::new(),
    };

    match kind {
        StrategyKind::Backtracking => search.backtrack_all(min_len, max_len),
        StrategyKind::MeetInTheMiddle => search.meet_in_the_middle(min_len, max_len),
    }

    let mut passwords = search.results;
    passwords.sort();
    passwords.dedup();

    Ok(Report {
        strategy: kind,
        passwords,
        combinations_checked: search.combinations,
        elapsed: started.elapsed(),
        truncated: search.truncated,
    })
}

struct Search<'a> {
    chars: Vec<(char, &'a BigUint)>,
    target: &'a BigUint,
    limit: usize,
    combinations: u64,
    truncated: bool,
    results: Vec<String>,
}

impl<'a> Search<'a> {
    /// Smallest and largest character weights, if the table is non-empty.
    fn weight_bounds(&self) -> Option<(&'a BigUint, &'a BigUint)> {
        let first = self.chars.first()?;
        let last = self.chars.last()?;
        Some((first.1, last.1))
    }

    /// Can any string of `len` characters reach the target at all?
    fn length_feasible(&self, min_w: &BigUint, max_w: &BigUint, len: usize) -> bool {
        *self.target >= min_w * len && *self.target <= max_w * len
    }

    fn record(&mut self, password: String) {
        self.results.push(password);
        if self.limit > 0 && self.results.len() >= self.limit {
            self.truncated = true;
        }
    }

    // Exhaustive depth-first search with bound pruning.
    fn backtrack_all(&mut self, min_len: usize, max_len: usize) {
        let Some((min_w, max_w)) = self.weight_bounds() else {
            return;
        };

        for len in min_len..=max_len {
            if self.truncated {
                return;
            }
            if !self.length_feasible(min_w, max_w, len) {
                continue;
            }
            let mut prefix = String::with_capacity(len);
            self.descend(&mut prefix, BigUint::zero(), len, min_w, max_w);
        }
    }

    fn descend(
        &mut self,
        prefix: &mut String,
        sum: BigUint,
        remaining: usize,
        min_w: &BigUint,
        max_w: &BigUint,
    ) {
        self.combinations += 1;

        if remaining == 0 {
            if &sum == self.target {
                self.record(prefix.clone());
            }
            return;
        }

        let rest = remaining - 1;
        let lo_rest = min_w * rest;
        let hi_rest = max_w * rest;

        for idx in 0..self.chars.len() {
            let (c, w) = self.chars[idx];
            let next = &sum + w;
            if &next > self.target {
                // Ascending order: every later character overshoots too.
                break;
            }

            let need = self.target - &next;
            if need > hi_rest {
                // Not enough headroom left; a heavier character may still work.
                continue;
            }
            if need < lo_rest {
                // Even the lightest fill overshoots, and it only gets worse.
                break;
            }

            prefix.push(c);
            self.descend(prefix, next, rest, min_w, max_w);
            prefix.pop();

            if self.truncated {
                return;
            }
        }
    }

    // Split each length in half, tabulate every weight sum of the front
    // half, then stream the back half against the table. Cuts the search
    // from O(c^n) to O(c^(n/2)) at the cost of holding one half in memory.
    fn meet_in_the_middle(&mut self, min_len: usize, max_len: usize) {
        let Some((min_w, max_w)) = self.weight_bounds() else {
            return;
        };

        for len in min_len..=max_len {
            if self.truncated {
                return;
            }
            if !self.length_feasible(min_w, max_w, len) {
                continue;
            }

            let front_len = len / 2;
            let back_len = len - front_len;
            let table_size = (self.chars.len() as u64).checked_pow(back_len as u32);
            match table_size {
                Some(size) if size <= MAX_PARTIAL_ENTRIES => {}
                _ => {
                    warn!(length = len, "half search space exceeds entry cap, skipping length");
                    continue;
                }
            }

            let mut front = HashMap::new();
            let mut buf = String::with_capacity(front_len);
            self.tabulate(&mut front, &mut buf, BigUint::zero(), front_len);

            let mut suffix = String::with_capacity(back_len);
            self.join(&front, &mut suffix, BigUint::zero(), back_len);
        }
    }

    /// Enumerate all strings of `remaining` characters, grouping them by
    /// their weight sum. Prefixes that already overshoot the target are cut.
    fn tabulate(
        &mut self,
        table: &mut HashMap<BigUint, Vec<String>>,
        buf: &mut String,
        sum: BigUint,
        remaining: usize,
    ) {
        if remaining == 0 {
            self.combinations += 1;
            table.entry(sum).or_default().push(buf.clone());
            return;
        }

        for idx in 0..self.chars.len() {
            let (c, w) = self.chars[idx];
            let next = &sum + w;
            if &next > self.target {
                break;
            }
            buf.push(c);
            self.tabulate(table, buf, next, remaining - 1);
            buf.pop();
        }
    }

    /// Enumerate back-half strings and match each against the front table.
    fn join(
        &mut self,
        front: &HashMap<BigUint, Vec<String>>,
        suffix: &mut String,
        sum: BigUint,
        remaining: usize,
    ) {
        if self.truncated {
            return;
        }

        if remaining == 0 {
            self.combinations += 1;
            if &sum > self.target {
                return;
            }
            let need = self.target - &sum;
            if let Some(fronts) = front.get(&need) {
                for f in fronts {
                    self.record(format!("{f}{suffix}"));
                    if self.truncated {
                        return;
                    }
                }
            }
            return;
        }

        for idx in 0..self.chars.len() {
            let (c, w) = self.chars[idx];
            let next = &sum + w;
            if &next > self.target {
                break;
            }
            suffix.push(c);
            self.join(front, suffix, next, remaining - 1);
            suffix.pop();

            if self.truncated {
                return;
            }
        }
    }
}
