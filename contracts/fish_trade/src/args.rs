//! Positional argument checks shared by the entry points.

use crate::{Error, Result};

/// Fail with `InvalidArgumentCount` unless `args` holds exactly `expected` items.
pub fn expect_count(function: &str, args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::InvalidArgumentCount {
            function: function.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

/// Parse a non-negative base-10 integer. `field` names the argument in the error.
///
/// Only ASCII digits are accepted; a leading `+` is rejected like any other sign.
pub fn parse_u64(field: &'static str, raw: &str) -> Result<u64> {
    let invalid = || Error::ParseError {
        field,
        value: raw.to_string(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u64>().map_err(|_| invalid())
}
