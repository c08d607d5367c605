use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::amount::floor_product;
use crate::core::{ExemptionType, TransactionInput};
use crate::tax::law::{TaxYear, FARM_REDUCTION_CAP, SURTAX_RATE};

/// Tax reduction and the agricultural/fishing surtax levied on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exemption {
    pub program: ExemptionType,
    /// Reduction rate, where the program has one
    pub rate: Option<Decimal>,
    pub amount: Decimal,
    pub surtax: Decimal,
}

impl Exemption {
    /// Computed tax left after the reduction
    pub fn decided_tax(&self, tax: Decimal) -> Decimal {
        (tax - self.amount).max(Decimal::ZERO)
    }
}

pub fn compute_exemption(input: &TransactionInput, year: Option<TaxYear>, tax: Decimal) -> Exemption {
    let (rate, amount) = match input.exemption {
        ExemptionType::None => (None, Decimal::ZERO),
        ExemptionType::Farm8Year => (None, tax.min(FARM_REDUCTION_CAP)),
        ExemptionType::PublicCashStandard => {
            let rate = year.map_or(dec!(0.10), |y| y.public_cash_reduction_rate());
            (Some(rate), floor_product(tax, rate))
        }
        ExemptionType::Custom => {
            let rate = input.custom_exemption_rate / dec!(100);
            (Some(rate), floor_product(tax, rate))
        }
    };
    let amount = amount.max(Decimal::ZERO);

    let surtax = match input.exemption {
        ExemptionType::PublicCashStandard | ExemptionType::Custom if !input.surtax_exempt => {
            floor_product(amount, SURTAX_RATE)
        }
        _ => Decimal::ZERO,
    };

    Exemption {
        program: input.exemption,
        rate,
        amount,
        surtax,
    }
}
