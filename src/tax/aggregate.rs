//! Combining with an earlier declaration in the same year, and netting
//! amended returns against what was originally reported.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::amount::{add_amounts, sub_amounts};
use crate::core::{AssetType, TransactionInput};
use crate::tax::law::BASIC_DEDUCTION;

/// Income amounts leading to the tax base
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncomeAmounts {
    /// Taxable gain less the long-term deduction for this disposal
    pub current: Decimal,
    /// Income amount of an earlier declaration combined with this one
    pub prior: Decimal,
    pub total: Decimal,
    pub aggregated: bool,
    pub basic_deduction: Decimal,
    pub tax_base: Decimal,
}

pub fn basic_deduction(input: &TransactionInput) -> Decimal {
    if input.asset_type == AssetType::Unregistered {
        return Decimal::ZERO;
    }
    match input.custom_basic_deduction {
        Some(custom) if !input.has_prior_declaration => {
            custom.min(BASIC_DEDUCTION).max(Decimal::ZERO)
        }
        _ => BASIC_DEDUCTION,
    }
}

pub fn income_amounts(input: &TransactionInput, current: Decimal) -> IncomeAmounts {
    let aggregated = input.has_prior_declaration;
    let prior = if aggregated {
        input.prior_income_amount
    } else {
        Decimal::ZERO
    };
    let total = add_amounts(current, prior);
    let basic_deduction = basic_deduction(input);

    IncomeAmounts {
        current,
        prior,
        total,
        aggregated,
        basic_deduction,
        tax_base: sub_amounts(total, basic_deduction).max(Decimal::ZERO),
    }
}

/// Amounts owed after netting the original return and any earlier declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AmountsDue {
    /// Decided tax (with the construction penalty) less the originally reported tax; may be negative
    pub additional_income_tax: Decimal,
    /// Surtax less the originally reported surtax; may be negative
    pub additional_surtax: Decimal,
    /// Tax decided on the earlier declaration, credited when aggregating
    pub prior_tax: Decimal,
    pub income_tax: Decimal,
    pub surtax: Decimal,
}

pub struct Liabilities {
    pub decided_tax: Decimal,
    pub construction_penalty: Decimal,
    pub surtax: Decimal,
    pub income_tax_penalty: Decimal,
    pub surtax_penalty: Decimal,
}

pub fn amounts_due(input: &TransactionInput, liabilities: &Liabilities) -> AmountsDue {
    let additional_income_tax = sub_amounts(
        add_amounts(liabilities.decided_tax, liabilities.construction_penalty),
        input.initial_income_tax,
    );
    let additional_surtax = sub_amounts(liabilities.surtax, input.initial_surtax);

    let before_prior = add_amounts(
        additional_income_tax.max(Decimal::ZERO),
        liabilities.income_tax_penalty,
    );
    let prior_tax = if input.has_prior_declaration {
        input.prior_tax_amount
    } else {
        Decimal::ZERO
    };

    AmountsDue {
        additional_income_tax,
        additional_surtax,
        prior_tax,
        income_tax: sub_amounts(before_prior, prior_tax).max(Decimal::ZERO),
        surtax: add_amounts(additional_surtax.max(Decimal::ZERO), liabilities.surtax_penalty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unregistered_has_no_basic_deduction() {
        let input = TransactionInput {
            asset_type: AssetType::Unregistered,
            custom_basic_deduction: Some(dec!(1000000)),
            ..Default::default()
        };
        assert_eq!(basic_deduction(&input), Decimal::ZERO);
    }

    #[test]
    fn custom_deduction_is_capped() {
        let mut input = TransactionInput {
            custom_basic_deduction: Some(dec!(9000000)),
            ..Default::default()
        };
        assert_eq!(basic_deduction(&input), dec!(2500000));
        input.custom_basic_deduction = Some(dec!(1000000));
        assert_eq!(basic_deduction(&input), dec!(1000000));
        input.has_prior_declaration = true;
        assert_eq!(basic_deduction(&input), dec!(2500000));
    }

    #[test]
    fn aggregation_adds_prior_income() {
        let input = TransactionInput {
            has_prior_declaration: true,
            prior_income_amount: dec!(50000000),
            ..Default::default()
        };
        let income = income_amounts(&input, dec!(30000000));
        assert_eq!(income.total, dec!(80000000));
        assert_eq!(income.tax_base, dec!(77500000));
        assert!(income.aggregated);
    }

    #[test]
    fn prior_income_ignored_without_aggregation() {
        let input = TransactionInput {
            prior_income_amount: dec!(50000000),
            ..Default::default()
        };
        let income = income_amounts(&input, dec!(1000000));
        assert_eq!(income.total, dec!(1000000));
        assert_eq!(income.tax_base, Decimal::ZERO);
    }

    fn liabilities(decided: Decimal, penalty: Decimal) -> Liabilities {
        Liabilities {
            decided_tax: decided,
            construction_penalty: Decimal::ZERO,
            surtax: dec!(100000),
            income_tax_penalty: penalty,
            surtax_penalty: Decimal::ZERO,
        }
    }

    #[test]
    fn prior_tax_credited_after_penalties() {
        let input = TransactionInput {
            has_prior_declaration: true,
            prior_tax_amount: dec!(4000000),
            ..Default::default()
        };
        let due = amounts_due(&input, &liabilities(dec!(10000000), dec!(500000)));
        assert_eq!(due.income_tax, dec!(6500000));

        let due = amounts_due(&input, &liabilities(dec!(1000000), Decimal::ZERO));
        assert_eq!(due.income_tax, Decimal::ZERO);
    }

    #[test]
    fn amended_return_nets_original_figures() {
        let input = TransactionInput {
            initial_income_tax: dec!(12000000),
            initial_surtax: dec!(300000),
            ..Default::default()
        };
        let due = amounts_due(&input, &liabilities(dec!(10000000), Decimal::ZERO));
        assert_eq!(due.additional_income_tax, dec!(-2000000));
        assert_eq!(due.income_tax, Decimal::ZERO);
        assert_eq!(due.additional_surtax, dec!(-200000));
        assert_eq!(due.surtax, Decimal::ZERO);
    }
}
