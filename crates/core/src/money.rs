//! Whole-dong money amounts and the `vi-VN` currency formatter.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Basis points in 1.00 (100%).
pub const BPS_SCALE: u32 = 10_000;

/// An amount of Vietnamese dong.
///
/// VND has no minor unit, so the amount is a plain count of dong. Arithmetic
/// saturates instead of overflowing: price calculations are total.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn vnd(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Unit price times quantity.
    pub fn times(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Scale by a basis-point factor, rounding half-up to the whole dong.
    ///
    /// `scale_bps(8_500)` is "times 0.85". Factors above 10 000 are allowed
    /// (used for nothing today, but the arithmetic does not care).
    pub fn scale_bps(self, bps: u32) -> Money {
        let scaled = (u128::from(self.0) * u128::from(bps) + u128::from(BPS_SCALE / 2))
            / u128::from(BPS_SCALE);
        Money(u64::try_from(scaled).unwrap_or(u64::MAX))
    }

    /// Apply a whole-percent discount (`percent` is clamped to 100).
    pub fn less_percent(self, percent: u8) -> Money {
        let keep = 100 - u32::from(percent.min(100));
        self.scale_bps(keep * 100)
    }

    /// Render as `vi-VN` currency, e.g. `1.250.000 ₫`.
    pub fn format_vnd(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out.push('\u{a0}');
        out.push('₫');
        out
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_vnd())
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}
