// SPDX-License-Identifier: GPL-3.0-or-later
//
// masterpass-protocol
// Copyright (C) 2025  Nikita Podvirnyi <krypt0nn@vk.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use regex::Regex;

lazy_static::lazy_static! {
    /// Non-negative integer without sign or separators.
    pub static ref INTEGER_REGEX: Regex = Regex::new(r#"^[0-9]+$"#)
        .expect("failed to build integer regex");

    /// Non-negative decimal number with an optional fraction part.
    pub static ref DECIMAL_REGEX: Regex = Regex::new(r#"^([0-9]+)(?:\.([0-9]*))?$"#)
        .expect("failed to build decimal regex");
}

/// Amount of decimal places of the Algo token.
pub const ALGO_DECIMALS: u32 = 6;

/// Amount of microAlgos in 1 Algo.
pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount format: {0:?}")]
    InvalidFormat(String),

    #[error("amount has more than {0} fraction digits")]
    TooPrecise(u32),

    #[error("amount doesn't fit into 64 bits")]
    Overflow
}

/// Scale human-readable supply to its on-chain value: `supply * 10^decimals`.
///
/// Return `None` if the result doesn't fit into `u64`.
#[inline]
pub fn scale_supply(supply: u64, decimals: u32) -> Option<u64> {
    10_u64.checked_pow(decimals)?.checked_mul(supply)
}

/// Parse non-negative integer string.
pub fn parse_integer(text: impl AsRef<str>) -> Result<u64, Error> {
    let text = text.as_ref().trim();

    if text.is_empty() {
        return Err(Error::Empty);
    }

    if !INTEGER_REGEX.is_match(text) {
        return Err(Error::InvalidFormat(text.to_string()));
    }

    text.parse::<u64>().map_err(|_| Error::Overflow)
}

/// Parse decimal string into integer base units with `decimals` places,
/// e.g. `parse_decimal("1.5", 6) == Ok(1_500_000)`.
pub fn parse_decimal(text: impl AsRef<str>, decimals: u32) -> Result<u64, Error> {
    let text = text.as_ref().trim();

    if text.is_empty() {
        return Err(Error::Empty);
    }

    let Some(captures) = DECIMAL_REGEX.captures(text) else {
        return Err(Error::InvalidFormat(text.to_string()));
    };

    let whole = captures.get(1)
        .map(|whole| whole.as_str())
        .unwrap_or_default();

    let fraction = captures.get(2)
        .map(|fraction| fraction.as_str().trim_end_matches('0'))
        .unwrap_or_default();

    if fraction.len() > decimals as usize {
        return Err(Error::TooPrecise(decimals));
    }

    let whole = whole.parse::<u64>().map_err(|_| Error::Overflow)?;
    let whole = scale_supply(whole, decimals).ok_or(Error::Overflow)?;

    if fraction.is_empty() {
        return Ok(whole);
    }

    let padding = decimals - fraction.len() as u32;

    let fraction = fraction.parse::<u64>().map_err(|_| Error::Overflow)?;
    let fraction = scale_supply(fraction, padding).ok_or(Error::Overflow)?;

    whole.checked_add(fraction).ok_or(Error::Overflow)
}

#[test]
fn test_scale_supply() {
    assert_eq!(scale_supply(1_000_000, 2), Some(100_000_000));
    assert_eq!(scale_supply(42, 0), Some(42));
    assert_eq!(scale_supply(0, 19), Some(0));
    assert_eq!(scale_supply(1, 19), Some(10_000_000_000_000_000_000));
    assert_eq!(scale_supply(2, 19), None);
    assert_eq!(scale_supply(1, 20), None);
}

#[test]
fn test_parse_integer() {
    assert_eq!(parse_integer("1000000"), Ok(1_000_000));
    assert_eq!(parse_integer(" 12 "), Ok(12));
    assert_eq!(parse_integer(""), Err(Error::Empty));
    assert_eq!(parse_integer("-1"), Err(Error::InvalidFormat(String::from("-1"))));
    assert_eq!(parse_integer("1.5"), Err(Error::InvalidFormat(String::from("1.5"))));
    assert_eq!(parse_integer("99999999999999999999"), Err(Error::Overflow));
}

#[test]
fn test_parse_decimal() {
    assert_eq!(parse_decimal("1", ALGO_DECIMALS), Ok(MICROALGOS_PER_ALGO));
    assert_eq!(parse_decimal("1.5", ALGO_DECIMALS), Ok(1_500_000));
    assert_eq!(parse_decimal("0.000001", ALGO_DECIMALS), Ok(1));
    assert_eq!(parse_decimal("2.", ALGO_DECIMALS), Ok(2_000_000));
    assert_eq!(parse_decimal("0.1000000", ALGO_DECIMALS), Ok(100_000));
    assert_eq!(parse_decimal("0.0000001", ALGO_DECIMALS), Err(Error::TooPrecise(6)));
    assert_eq!(parse_decimal(".5", ALGO_DECIMALS), Err(Error::InvalidFormat(String::from(".5"))));
    assert_eq!(parse_decimal("1,5", ALGO_DECIMALS), Err(Error::InvalidFormat(String::from("1,5"))));
    assert_eq!(parse_decimal("20000000000000", ALGO_DECIMALS), Err(Error::Overflow));
    assert_eq!(parse_decimal("  ", ALGO_DECIMALS), Err(Error::Empty));
}
