//! SUI amounts and the unit converter.
//!
//! Amounts are held as integer MIST (1 SUI = 10^9 MIST). User input arrives as a
//! decimal string; conversion is exact on the decimal digits and truncates anything
//! past the ninth fractional digit, so the result is `floor(amount × 10^9)`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UnitError;

/// Number of decimal places of the SUI coin.
pub const SUI_DECIMALS: u32 = 9;

/// MIST in one SUI.
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// An amount in MIST, the smallest SUI unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Mist(u64);

impl Mist {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Whole SUI, saturating at `u64::MAX` MIST.
    pub const fn from_sui(sui: u64) -> Self {
        Self(sui.saturating_mul(MIST_PER_SUI))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Decimal SUI with trailing zeros removed (`1500000000` → `"1.5"`).
    pub fn to_sui_string(&self) -> String {
        let whole = self.0 / MIST_PER_SUI;
        let frac = self.0 % MIST_PER_SUI;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:09}");
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }

    /// Decimal SUI rounded half-up to `places` fractional digits (at most 9).
    pub fn to_fixed(&self, places: u32) -> String {
        let places = places.min(SUI_DECIMALS);
        let step = 10u128.pow(SUI_DECIMALS - places);
        let rounded = (self.0 as u128 + step / 2) / step;
        if places == 0 {
            return rounded.to_string();
        }
        let scale = 10u128.pow(places);
        format!(
            "{}.{:0width$}",
            rounded / scale,
            rounded % scale,
            width = places as usize
        )
    }
}

impl fmt::Display for Mist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SUI", self.to_sui_string())
    }
}

/// A parsed non-negative decimal, scaled and truncated to a fixed number of places.
struct Scaled {
    value: u128,
    exact_zero: bool,
}

fn parse_scaled(input: &str, decimals: u32) -> Result<Scaled, UnitError> {
    let invalid = || UnitError::InvalidAmount(input.to_string());
    let s = input.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if let Some(rest) = s.strip_prefix('-') {
        // A well-formed negative number is a sign problem, not a format problem.
        parse_scaled(rest, decimals)?;
        return Err(UnitError::NotPositive(input.to_string()));
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let overflow = || UnitError::AmountOverflow(input.to_string());
    let mut value: u128 = 0;
    for b in int_part.bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .ok_or_else(overflow)?;
    }
    for i in 0..decimals as usize {
        let digit = frac_part.as_bytes().get(i).map_or(0, |b| b - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(digit)))
            .ok_or_else(overflow)?;
    }

    let exact_zero = int_part.bytes().chain(frac_part.bytes()).all(|b| b == b'0');
    Ok(Scaled { value, exact_zero })
}

/// Parse a non-negative decimal SUI amount into MIST. Zero is allowed.
pub fn parse_amount(input: &str) -> Result<Mist, UnitError> {
    let scaled = parse_scaled(input, SUI_DECIMALS)?;
    u64::try_from(scaled.value)
        .map(Mist)
        .map_err(|_| UnitError::AmountOverflow(input.to_string()))
}

/// Convert a strictly positive decimal SUI amount into MIST.
///
/// Fails with `NotPositive` for zero or negative input and with `AmountTooSmall`
/// when a positive amount truncates to zero MIST.
pub fn to_smallest_unit(input: &str) -> Result<Mist, UnitError> {
    let scaled = parse_scaled(input, SUI_DECIMALS)?;
    if scaled.exact_zero {
        return Err(UnitError::NotPositive(input.to_string()));
    }
    if scaled.value == 0 {
        return Err(UnitError::AmountTooSmall(input.to_string()));
    }
    u64::try_from(scaled.value)
        .map(Mist)
        .map_err(|_| UnitError::AmountOverflow(input.to_string()))
}

/// Check that a decimal is strictly greater than zero, at any precision.
///
/// Unlike [`to_smallest_unit`], a positive value below one MIST is accepted.
pub fn ensure_positive(input: &str) -> Result<(), UnitError> {
    if parse_scaled(input, 0)?.exact_zero {
        return Err(UnitError::NotPositive(input.to_string()));
    }
    Ok(())
}

/// Parse a duration in seconds, truncating any fractional part.
///
/// With `allow_zero == false`, zero input is `NotPositive` and a positive value
/// below one second is `DurationTooShort`.
pub fn parse_seconds(input: &str, allow_zero: bool) -> Result<u64, UnitError> {
    let scaled = parse_scaled(input, 0)?;
    if !allow_zero {
        if scaled.exact_zero {
            return Err(UnitError::NotPositive(input.to_string()));
        }
        if scaled.value == 0 {
            return Err(UnitError::DurationTooShort);
        }
    }
    u64::try_from(scaled.value).map_err(|_| UnitError::AmountOverflow(input.to_string()))
}

/// Whole seconds a stream paying `rate` per second can run on `balance`.
pub fn stream_duration(rate: Mist, balance: Mist) -> Result<u64, UnitError> {
    if rate.is_zero() {
        return Err(UnitError::NotPositive(rate.raw().to_string()));
    }
    if rate > balance {
        return Err(UnitError::RateExceedsBalance {
            rate: rate.raw(),
            balance: balance.raw(),
        });
    }
    let duration = balance.raw() / rate.raw();
    if duration == 0 {
        return Err(UnitError::DurationTooShort);
    }
    Ok(duration)
}
