use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::amount::floor_product;
use crate::core::{AssetType, TransactionInput};

/// Which long-term holding deduction table applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionTable {
    /// Held under 3 years, unregistered, or a presale right
    NotEligible,
    /// 2% a year up to 30%
    General,
    /// 4% per holding year plus 4% per residence year, each up to 40%
    Residence,
}

impl DeductionTable {
    pub fn display(&self) -> &'static str {
        match self {
            DeductionTable::NotEligible => "Not eligible",
            DeductionTable::General => "General (2%/year)",
            DeductionTable::Residence => "Sole residence (4%+4%/year)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LongTermDeduction {
    pub table: DeductionTable,
    pub holding_rate: Decimal,
    pub residence_rate: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl LongTermDeduction {
    fn none() -> Self {
        LongTermDeduction {
            table: DeductionTable::NotEligible,
            holding_rate: Decimal::ZERO,
            residence_rate: Decimal::ZERO,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

pub fn long_term_deduction(
    input: &TransactionInput,
    holding_years: i32,
    taxable_gain: Decimal,
) -> LongTermDeduction {
    if holding_years < 3
        || matches!(
            input.asset_type,
            AssetType::Unregistered | AssetType::PresaleRight
        )
    {
        return LongTermDeduction::none();
    }

    let years = Decimal::from(holding_years);
    let residence_years = input.residence_years.floor().max(Decimal::ZERO);
    let lives_there = residence_years >= dec!(2) || input.residence_exception;

    let (table, holding_rate, residence_rate) =
        if input.asset_type == AssetType::HighValueResidence && lives_there {
            (
                DeductionTable::Residence,
                (years * dec!(0.04)).min(dec!(0.40)),
                (residence_years * dec!(0.04)).min(dec!(0.40)),
            )
        } else {
            (
                DeductionTable::General,
                (years * dec!(0.02)).min(dec!(0.30)),
                Decimal::ZERO,
            )
        };

    let rate = holding_rate + residence_rate;
    LongTermDeduction {
        table,
        holding_rate,
        residence_rate,
        rate,
        amount: floor_product(taxable_gain, rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(asset_type: AssetType) -> TransactionInput {
        TransactionInput {
            asset_type,
            ..Default::default()
        }
    }

    #[test]
    fn under_three_years_has_no_deduction() {
        let d = long_term_deduction(&asset(AssetType::Land), 2, dec!(100000000));
        assert_eq!(d.table, DeductionTable::NotEligible);
        assert_eq!(d.amount, Decimal::ZERO);
    }

    #[test]
    fn general_table_caps_at_thirty_percent() {
        let d = long_term_deduction(&asset(AssetType::GeneralHousing), 4, dec!(200000000));
        assert_eq!(d.rate, dec!(0.08));
        assert_eq!(d.amount, dec!(16000000));

        let d = long_term_deduction(&asset(AssetType::Land), 20, dec!(100000000));
        assert_eq!(d.rate, dec!(0.30));
    }

    #[test]
    fn unregistered_and_presale_excluded() {
        for t in [AssetType::Unregistered, AssetType::PresaleRight] {
            let d = long_term_deduction(&asset(t), 10, dec!(100000000));
            assert_eq!(d.amount, Decimal::ZERO);
        }
    }

    #[test]
    fn residence_table_adds_residence_years() {
        let input = TransactionInput {
            asset_type: AssetType::HighValueResidence,
            residence_years: dec!(3.9),
            ..Default::default()
        };
        let d = long_term_deduction(&input, 5, dec!(100000000));
        assert_eq!(d.table, DeductionTable::Residence);
        assert_eq!(d.holding_rate, dec!(0.20));
        assert_eq!(d.residence_rate, dec!(0.12));
        assert_eq!(d.amount, dec!(32000000));

        let d = long_term_deduction(&input, 15, dec!(100000000));
        assert_eq!(d.holding_rate, dec!(0.40));
    }

    #[test]
    fn residence_without_living_there_uses_general_table() {
        let input = TransactionInput {
            asset_type: AssetType::HighValueResidence,
            residence_years: dec!(1.9),
            ..Default::default()
        };
        let d = long_term_deduction(&input, 5, dec!(100000000));
        assert_eq!(d.table, DeductionTable::General);
        assert_eq!(d.rate, dec!(0.10));

        let waived = TransactionInput {
            residence_exception: true,
            ..input
        };
        let d = long_term_deduction(&waived, 5, dec!(100000000));
        assert_eq!(d.table, DeductionTable::Residence);
        assert_eq!(d.residence_rate, dec!(0.04));
    }
}
