use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::amount::prorate;
use crate::core::{AcquisitionMethod, Normalized, TransactionInput};
use crate::tax::land_grade::LandGradeConversion;

/// How the acquisition price was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLabel {
    Actual,
    Official,
    Converted,
    /// Converted using the land-grade value at acquisition
    LandGrade,
    /// Converted using the land grade on the deemed 1985-01-01 acquisition date
    DeemedGrade1985,
}

impl PriceLabel {
    pub fn display(&self) -> &'static str {
        match self {
            PriceLabel::Actual => "Actual cost",
            PriceLabel::Official => "Official price",
            PriceLabel::Converted => "Converted price",
            PriceLabel::LandGrade => "Converted price (land grade)",
            PriceLabel::DeemedGrade1985 => "Converted price (85.1.1 deemed grade)",
        }
    }
}

impl std::fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Acquisition price before burden-gift apportionment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionPrice {
    pub price: Decimal,
    /// Value the 3% deemed expense is computed on
    pub expense_basis: Decimal,
    pub method: AcquisitionMethod,
    pub label: PriceLabel,
}

pub fn resolve_acquisition_price(normalized: &Normalized) -> AcquisitionPrice {
    let input = &normalized.input;
    match input.acquisition_method {
        AcquisitionMethod::Actual => {
            let price = input.acquisition_costs.total();
            AcquisitionPrice {
                price,
                expense_basis: price,
                method: AcquisitionMethod::Actual,
                label: PriceLabel::Actual,
            }
        }
        AcquisitionMethod::Official => AcquisitionPrice {
            price: input.official_price,
            expense_basis: input.official_price,
            method: AcquisitionMethod::Official,
            label: PriceLabel::Official,
        },
        AcquisitionMethod::Converted => converted_price(normalized),
    }
}

fn converted_price(normalized: &Normalized) -> AcquisitionPrice {
    let input = &normalized.input;

    if let Some(conversion) = land_grade_conversion(normalized) {
        let official_total = conversion.total(input.land_area);
        let price = prorate(
            input.disposal_price,
            official_total,
            input.transfer_official_price,
        );
        log::debug!(
            "Land-grade conversion: unit={}, total={}, price={}",
            conversion.unit_price,
            official_total,
            price
        );
        let label = if normalized.deemed_1985 {
            PriceLabel::DeemedGrade1985
        } else {
            PriceLabel::LandGrade
        };
        return AcquisitionPrice {
            price,
            expense_basis: official_total,
            method: AcquisitionMethod::Converted,
            label,
        };
    }

    AcquisitionPrice {
        price: prorate(
            input.disposal_price,
            input.official_price,
            input.transfer_official_price,
        ),
        expense_basis: input.official_price,
        method: AcquisitionMethod::Converted,
        label: PriceLabel::Converted,
    }
}

fn land_grade_conversion(normalized: &Normalized) -> Option<LandGradeConversion> {
    let input = &normalized.input;
    if !input.asset_type.is_land_like() || !normalized.pre_1990 || !input.land_grades.is_complete()
    {
        return None;
    }
    let conversion = LandGradeConversion::from_grades(&input.land_grades);
    (conversion.denominator > Decimal::ZERO).then_some(conversion)
}

/// Share of a burden gift that counts as a disposal: assumed debt over gift value, at most 1.
pub fn burden_ratio(input: &TransactionInput) -> Decimal {
    let gift = &input.burden_gift;
    if !input.is_burden_gift() || gift.gift_value <= Decimal::ZERO {
        return Decimal::ONE;
    }
    gift.debt_amount
        .checked_div(gift.gift_value)
        .unwrap_or(Decimal::ONE)
        .min(Decimal::ONE)
}
