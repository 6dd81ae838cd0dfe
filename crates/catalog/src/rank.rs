//! Quality ranks and the rank-to-multiplier table.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use gala_core::{BPS_SCALE, DomainError, DomainResult, ValueObject};

/// Quality rank of a catalog item.
///
/// Any label outside A-D parses to [`Rank::Unrecognized`], which always
/// prices at the plain wholesale price.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rank {
    A,
    B,
    C,
    D,
    Unrecognized,
}

impl ValueObject for Rank {}

impl Rank {
    pub const KNOWN: [Rank; 4] = [Rank::A, Rank::B, Rank::C, Rank::D];

    /// Total parse: never fails.
    pub fn parse(label: &str) -> Rank {
        match label.trim() {
            "A" | "a" => Rank::A,
            "B" | "b" => Rank::B,
            "C" | "c" => Rank::C,
            "D" | "d" => Rank::D,
            _ => Rank::Unrecognized,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
            Rank::D => "D",
            Rank::Unrecognized => "?",
        }
    }
}

impl core::fmt::Display for Rank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Rank {
    fn from(value: String) -> Self {
        Rank::parse(&value)
    }
}

impl From<Rank> for String {
    fn from(value: Rank) -> Self {
        value.label().to_string()
    }
}

/// Multipliers applied on top of the wholesale price, in basis points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTable {
    pub version: u32,
    pub a_bps: u32,
    pub b_bps: u32,
    pub c_bps: u32,
    pub d_bps: u32,
}

impl ValueObject for RankTable {}

impl Default for RankTable {
    fn default() -> Self {
        Self {
            version: 1,
            a_bps: 8_500,
            b_bps: 9_000,
            c_bps: 9_500,
            d_bps: 10_000,
        }
    }
}

impl RankTable {
    /// Multiplier for `rank`; unrecognized ranks get 1.00.
    pub fn multiplier_bps(&self, rank: Rank) -> u32 {
        match rank {
            Rank::A => self.a_bps,
            Rank::B => self.b_bps,
            Rank::C => self.c_bps,
            Rank::D => self.d_bps,
            Rank::Unrecognized => BPS_SCALE,
        }
    }

    /// Extra discount shown next to the rank badge ("Rank A: 15% off").
    pub fn discount_percent(&self, rank: Rank) -> u32 {
        (BPS_SCALE.saturating_sub(self.multiplier_bps(rank))) / 100
    }

    pub fn set(&mut self, rank: Rank, bps: u32) -> DomainResult<()> {
        let slot = match rank {
            Rank::A => &mut self.a_bps,
            Rank::B => &mut self.b_bps,
            Rank::C => &mut self.c_bps,
            Rank::D => &mut self.d_bps,
            Rank::Unrecognized => {
                return Err(DomainError::validation(
                    "unrecognized rank always prices at 1.00",
                ));
            }
        };
        *slot = bps;
        Ok(())
    }

    pub fn validate(&self) -> DomainResult<()> {
        for rank in Rank::KNOWN {
            let bps = self.multiplier_bps(rank);
            if bps == 0 || bps > BPS_SCALE {
                return Err(DomainError::validation(format!(
                    "rank {rank} multiplier must be within 1..={BPS_SCALE} bps, got {bps}"
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for RankTable {
    type Err = DomainError;

    /// Parse overrides of the form `A=8500,B=9000`; ranks not listed keep
    /// their default multiplier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = RankTable::default();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (label, bps) = pair.split_once('=').ok_or_else(|| {
                DomainError::validation(format!("expected RANK=BPS, got `{pair}`"))
            })?;
            let bps: u32 = bps
                .trim()
                .parse()
                .map_err(|e| DomainError::validation(format!("rank {label}: {e}")))?;
            table.set(Rank::parse(label), bps)?;
        }
        table.validate()?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_rank_discounts() {
        let table = RankTable::default();
        assert_eq!(table.multiplier_bps(Rank::A), 8_500);
        assert_eq!(table.multiplier_bps(Rank::B), 9_000);
        assert_eq!(table.multiplier_bps(Rank::C), 9_500);
        assert_eq!(table.multiplier_bps(Rank::D), 10_000);
        assert_eq!(table.discount_percent(Rank::A), 15);
        assert_eq!(table.discount_percent(Rank::C), 5);
        assert_eq!(table.discount_percent(Rank::D), 0);
    }

    #[test]
    fn unrecognized_rank_is_unmultiplied() {
        let table = RankTable::default();
        assert_eq!(Rank::parse("Z"), Rank::Unrecognized);
        assert_eq!(table.multiplier_bps(Rank::Unrecognized), BPS_SCALE);
        assert_eq!(table.discount_percent(Rank::Unrecognized), 0);
    }

    #[test]
    fn parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(Rank::parse(" b "), Rank::B);
        assert_eq!(Rank::parse("AA"), Rank::Unrecognized);
        assert_eq!(Rank::parse(""), Rank::Unrecognized);
    }

    #[test]
    fn table_overrides_parse() {
        let table: RankTable = "A=8000, D=9900".parse().unwrap();
        assert_eq!(table.a_bps, 8_000);
        assert_eq!(table.b_bps, 9_000);
        assert_eq!(table.d_bps, 9_900);
    }

    #[test]
    fn table_rejects_bad_overrides() {
        assert!(matches!("A".parse::<RankTable>(), Err(DomainError::Validation(_))));
        assert!(matches!("A=abc".parse::<RankTable>(), Err(DomainError::Validation(_))));
        assert!(matches!("A=0".parse::<RankTable>(), Err(DomainError::Validation(_))));
        assert!(matches!("B=12000".parse::<RankTable>(), Err(DomainError::Validation(_))));
        assert!(matches!("Z=9000".parse::<RankTable>(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rank_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Rank::C).unwrap(), "\"C\"");
        let rank: Rank = serde_json::from_str("\"Z\"").unwrap();
        assert_eq!(rank, Rank::Unrecognized);
    }
}
