use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::amount::{floor_product, floor_product3, prorate, sub_amounts};
use crate::core::{AcquisitionMethod, AssetType, TransactionInput};
use crate::tax::law::{DEEMED_EXPENSE_RATE, HIGH_VALUE_THRESHOLD};
use crate::tax::price::AcquisitionPrice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseLabel {
    /// Substantiated necessary expenses
    Actual,
    /// 3% of the official acquisition value
    Deemed,
    /// Substantiated expenses replacing a converted acquisition price
    ActualReplacingConverted,
}

impl ExpenseLabel {
    pub fn display(&self) -> &'static str {
        match self {
            ExpenseLabel::Actual => "Actual expenses",
            ExpenseLabel::Deemed => "Deemed expense (3%)",
            ExpenseLabel::ActualReplacingConverted => "Actual expenses (converted price not used)",
        }
    }
}

impl std::fmt::Display for ExpenseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Acquisition price and expense after burden-gift apportionment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBasis {
    pub acquisition_price: Decimal,
    pub expense: Decimal,
    pub expense_label: ExpenseLabel,
}

pub fn resolve_cost_basis(
    input: &TransactionInput,
    price: &AcquisitionPrice,
    burden_ratio: Decimal,
) -> CostBasis {
    let actual_expense = || floor_product(input.expenses.total(), burden_ratio);
    let deemed_expense = || floor_product3(price.expense_basis, DEEMED_EXPENSE_RATE, burden_ratio);

    match price.method {
        AcquisitionMethod::Converted if input.actual_expense_with_converted => CostBasis {
            acquisition_price: Decimal::ZERO,
            expense: actual_expense(),
            expense_label: ExpenseLabel::ActualReplacingConverted,
        },
        // Converted prices already derive from the (apportioned) disposal price
        AcquisitionMethod::Converted => CostBasis {
            acquisition_price: price.price,
            expense: deemed_expense(),
            expense_label: ExpenseLabel::Deemed,
        },
        AcquisitionMethod::Official => CostBasis {
            acquisition_price: floor_product(price.price, burden_ratio),
            expense: deemed_expense(),
            expense_label: ExpenseLabel::Deemed,
        },
        AcquisitionMethod::Actual => CostBasis {
            acquisition_price: floor_product(price.price, burden_ratio),
            expense: actual_expense(),
            expense_label: ExpenseLabel::Actual,
        },
    }
}

/// Gain split into its taxable and exempt parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Gain {
    pub raw: Decimal,
    pub taxable: Decimal,
    /// Part of a high-value residence's gain below the exemption threshold
    pub exempt: Decimal,
}

pub fn compute_gain(input: &TransactionInput, cost: &CostBasis) -> Gain {
    let raw = sub_amounts(
        sub_amounts(input.disposal_price, cost.acquisition_price),
        cost.expense,
    )
    .max(Decimal::ZERO);

    if input.asset_type != AssetType::HighValueResidence {
        return Gain {
            raw,
            taxable: raw,
            exempt: Decimal::ZERO,
        };
    }

    let valuation = if input.is_burden_gift() {
        input.burden_gift.gift_value
    } else {
        input.disposal_price
    };
    let taxable = if valuation > HIGH_VALUE_THRESHOLD {
        prorate(raw, valuation - HIGH_VALUE_THRESHOLD, valuation)
    } else {
        Decimal::ZERO
    };
    log::debug!(
        "High-value residence: valuation={}, raw={}, taxable={}",
        valuation,
        raw,
        taxable
    );

    Gain {
        raw,
        taxable,
        exempt: raw - taxable,
    }
}
