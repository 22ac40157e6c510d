//! Estimates shown while a stream or vesting form is being filled in.
//!
//! Previews never fail: incomplete or invalid input simply yields `None`.

use paystream_types::{ensure_positive, parse_amount, parse_seconds, stream_duration, Mist};
use paystream_utils::{format_duration_compact, format_duration_long};
use serde::Serialize;

const SECS_PER_DAY: u64 = 86_400;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreamPreview {
    pub duration_secs: u64,
    /// e.g. `"11d 13h 46m"`
    pub formatted_duration: String,
    pub rate_per_day: Mist,
    pub balance: Mist,
}

impl StreamPreview {
    pub fn from_inputs(amount_per_second: &str, topup_balance: &str) -> Option<Self> {
        let rate = parse_amount(amount_per_second).ok()?;
        let balance = parse_amount(topup_balance).ok()?;
        let duration_secs = stream_duration(rate, balance).ok()?;
        Some(Self {
            duration_secs,
            formatted_duration: format_duration_compact(duration_secs),
            rate_per_day: Mist::new(rate.raw().saturating_mul(SECS_PER_DAY)),
            balance,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VestingPreview {
    pub period_secs: u64,
    /// e.g. `"30 days"`
    pub formatted_period: String,
    pub formatted_cliff: Option<String>,
    pub total_amount: Mist,
    pub release_rate: Mist,
}

impl VestingPreview {
    /// `cliff` is optional in the preview; an unparseable cliff leaves it unset.
    pub fn from_inputs(amount: &str, cliff: &str, release_rate: &str, period: &str) -> Option<Self> {
        let total_amount = parse_amount(amount).ok()?;
        ensure_positive(release_rate).ok()?;
        let release_rate = parse_amount(release_rate).ok()?;
        let period_secs = parse_seconds(period, true).ok()?;
        let formatted_cliff = parse_seconds(cliff, true).ok().map(format_duration_long);
        Some(Self {
            period_secs,
            formatted_period: format_duration_long(period_secs),
            formatted_cliff,
            total_amount,
            release_rate,
        })
    }
}
