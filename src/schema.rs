use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;
use tracing::debug;

use crate::partition::partition_table;

/// Additive constant applied after summing the per-character weights.
pub const DEFAULT_CONSTANT: u64 = 426_609_638_937;

/// Accepted password length range of the default schema.
pub const DEFAULT_MIN_LEN: usize = 10;
pub const DEFAULT_MAX_LEN: usize = 32;

// Printable ASCII, space through tilde.
const ALPHABET_FIRST: u32 = 0x20;
const ALPHABET_LAST: u32 = 0x7e;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("password too short: {len} characters, minimum is {min}")]
    TooShort { len: usize, min: usize },

    #[error("password too long: {len} characters, maximum is {max}")]
    TooLong { len: usize, max: usize },

    #[error("character '{0}' not found in the lookup table")]
    UnsupportedChar(char),

    #[error("encoded value is smaller than the schema constant")]
    ValueOutOfRange,
}

/// The partition-sum password schema: an immutable character-to-weight
/// table, an additive constant, and the accepted length range.
///
/// A password encodes to `Z = sum(weight(c) for c in password) + constant`.
/// In the default schema the weight of a character is the partition number
/// of its code point, so the table is derived from one shared partition
/// table at construction time.
#[derive(Debug, Clone)]
pub struct Schema {
    weights: BTreeMap<char, BigUint>,
    constant: BigUint,
    min_len: usize,
    max_len: usize,
}

impl Schema {
    /// Build the default schema over printable ASCII.
    pub fn new() -> Self {
        let table = partition_table(u64::from(ALPHABET_LAST));
        let weights = (ALPHABET_FIRST..=ALPHABET_LAST)
            .filter_map(char::from_u32)
            .map(|c| (c, table[c as usize].clone()))
            .collect();

        Self {
            weights,
            constant: BigUint::from(DEFAULT_CONSTANT),
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
        }
    }

    /// Build a schema from an explicit weight table, constant, and length
    /// range. The default schema is `with_parts` over printable ASCII with
    /// partition-number weights.
    pub fn with_parts(
        weights: BTreeMap<char, BigUint>,
        constant: BigUint,
        min_len: usize,
        max_len: usize,
    ) -> Self {
        Self {
            weights,
            constant,
            min_len,
            max_len,
        }
    }

    /// Weight of a single character, if it is in the table.
    pub fn weight(&self, c: char) -> Option<&BigUint> {
        self.weights.get(&c)
    }

    /// All `(character, weight)` pairs in character order.
    pub fn weights(&self) -> impl Iterator<Item = (char, &BigUint)> {
        self.weights.iter().map(|(c, w)| (*c, w))
    }

    pub fn constant(&self) -> &BigUint {
        &self.constant
    }

    pub fn len_bounds(&self) -> (usize, usize) {
        (self.min_len, self.max_len)
    }

    /// Encode a password to its Z value.
    ///
    /// Typographical double quotes are folded to the straight quote first,
    /// then the length is validated against the schema bounds. Any character
    /// absent from the table is an error, never a silent default.
    pub fn encode(&self, password: &str) -> Result<BigUint, SchemaError> {
        let password = normalize_quotes(password);

        let len = password.chars().count();
        if len < self.min_len {
            return Err(SchemaError::TooShort {
                len,
                min: self.min_len,
            });
        }
        if len > self.max_len {
            return Err(SchemaError::TooLong {
                len,
                max: self.max_len,
            });
        }

        let mut sum = BigUint::zero();
        for c in password.chars() {
            let weight = self
                .weights
                .get(&c)
                .ok_or(SchemaError::UnsupportedChar(c))?;
            debug!(character = %c, weight = %weight, "mapped");
            sum += weight;
        }
        debug!(sum = %sum, "weight sum");

        Ok(sum + &self.constant)
    }

    /// The target weight sum `K = Z - constant` that a password must reach
    /// to encode to `z`. Errors when `z` is below the constant.
    pub fn target_sum(&self, z: &BigUint) -> Result<BigUint, SchemaError> {
        if z < &self.constant {
            return Err(SchemaError::ValueOutOfRange);
        }
        Ok(z - &self.constant)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold typographical double quotes (U+201C, U+201D) to the straight quote.
pub fn normalize_quotes(password: &str) -> String {
    password
        .chars()
        .map(|c| match c {
            '\u{201c}' | '\u{201d}' => '"',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let schema = Schema::new();
        assert_eq!(schema.weight(' ').map(ToString::to_string).as_deref(), Some("8349"));
        assert_eq!(schema.weight('a').map(ToString::to_string).as_deref(), Some("133230930"));
        assert_eq!(schema.weight('~').map(ToString::to_string).as_deref(), Some("3519222692"));
        assert_eq!(schema.weight('é'), None);
        assert_eq!(schema.weights().count(), 95);
    }

    #[test]
    fn test_encode_golden() {
        let schema = Schema::new();
        let z = schema.encode("correct horse").unwrap();
        assert_eq!(z.to_string(), "434150881753");
    }

    #[test]
    fn test_encode_idempotent() {
        let schema = Schema::new();
        assert_eq!(
            schema.encode("hunter2hunter2").unwrap().to_string(),
            "435800277841"
        );
        assert_eq!(
            schema.encode("hunter2hunter2").unwrap().to_string(),
            "435800277841"
        );
    }

    #[test]
    fn test_quote_normalization() {
        let schema = Schema::new();
        let straight = schema.encode("say \"hello\" now").unwrap();
        let curly = schema.encode("say \u{201c}hello\u{201d} now").unwrap();
        assert_eq!(straight, curly);
    }

    #[test]
    fn test_length_bounds() {
        let schema = Schema::new();
        assert_eq!(
            schema.encode("too short"),
            Err(SchemaError::TooShort { len: 9, min: 10 })
        );
        let long = "x".repeat(33);
        assert_eq!(
            schema.encode(&long),
            Err(SchemaError::TooLong { len: 33, max: 32 })
        );
    }

    #[test]
    fn test_unsupported_char() {
        let schema = Schema::new();
        assert_eq!(
            schema.encode("caffè latte!"),
            Err(SchemaError::UnsupportedChar('è'))
        );
    }

    #[test]
    fn test_target_sum() {
        let schema = Schema::new();
        let z = schema.encode("correct horse").unwrap();
        let k = schema.target_sum(&z).unwrap();
        assert_eq!(k.to_string(), "7541242816");

        let below = BigUint::from(7u32);
        assert_eq!(schema.target_sum(&below), Err(SchemaError::ValueOutOfRange));
    }
}
