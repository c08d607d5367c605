use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::amount::floor_product;
use crate::tax::penalty::Levy;

/// Amounts above which part of a bill may be paid later
struct InstallmentTiers {
    /// Above this, half the bill may be deferred
    half_above: Decimal,
    /// Above this, everything over it may be deferred
    excess_above: Decimal,
}

impl Levy {
    fn installment_tiers(&self) -> InstallmentTiers {
        match self {
            Levy::IncomeTax => InstallmentTiers {
                half_above: dec!(20000000),
                excess_above: dec!(10000000),
            },
            Levy::Surtax => InstallmentTiers {
                half_above: dec!(10000000),
                excess_above: dec!(5000000),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InstallmentPlan {
    pub total: Decimal,
    /// Largest amount that may be deferred
    pub max: Decimal,
    pub deferred: Decimal,
    pub immediate: Decimal,
}

/// Largest deferrable part of `total`
pub fn installment_max(levy: Levy, total: Decimal) -> Decimal {
    let tiers = levy.installment_tiers();
    if total > tiers.half_above {
        floor_product(total, dec!(0.5))
    } else if total > tiers.excess_above {
        total - tiers.excess_above
    } else {
        Decimal::ZERO
    }
}

/// Split `total` into what is paid now and what is deferred, honouring the request where allowed.
pub fn plan_installments(levy: Levy, total: Decimal, requested: Decimal) -> InstallmentPlan {
    let max = installment_max(levy, total);
    let deferred = requested.max(Decimal::ZERO).min(max);
    InstallmentPlan {
        total,
        max,
        deferred,
        immediate: total - deferred,
    }
}
