//! Integer partition numbers and the partition-sum password schema.
//!
//! The core is [`partition::partitions`], Euler's pentagonal-number
//! recurrence for p(n) over arbitrary-precision integers. On top of it sits
//! [`schema::Schema`], a character-to-weight lookup table whose weights are
//! partition numbers, and [`recover`], which inverts encoded values back to
//! candidate passwords by backtracking or meet-in-the-middle search.

pub mod partition;
pub mod recover;
pub mod schema;
