use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::amount::floor_product;
use crate::core::{AssetType, LandUse, TransactionInput};
use crate::tax::law::{TaxYear, NON_BUSINESS_SURCHARGE, UNREGISTERED_RATE};

/// Which calculation produced the computed tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Progressive brackets
    Progressive,
    /// Progressive brackets plus 10 points for non-business land
    NonBusinessSurcharge,
    /// Flat rate for short holdings
    ShortTerm,
    /// Flat 70% on unregistered assets
    Unregistered,
    /// Progressive brackets on the base combined with an earlier declaration
    Aggregated,
}

impl RateBasis {
    pub fn display(&self) -> &'static str {
        match self {
            RateBasis::Progressive => "Progressive rate",
            RateBasis::NonBusinessSurcharge => "Non-business land (+10%p)",
            RateBasis::ShortTerm => "Short-term rate",
            RateBasis::Unregistered => "Unregistered (70%)",
            RateBasis::Aggregated => "Aggregated progressive rate",
        }
    }
}

impl std::fmt::Display for RateBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// One tax figure considered by the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxCandidate {
    pub basis: RateBasis,
    pub rate: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateSelection {
    pub basis: RateBasis,
    /// Marginal (or flat) rate of the chosen calculation
    pub rate: Decimal,
    pub tax: Decimal,
    pub candidates: Vec<TaxCandidate>,
}

impl RateSelection {
    fn chosen(candidate: TaxCandidate, candidates: Vec<TaxCandidate>) -> Self {
        RateSelection {
            basis: candidate.basis,
            rate: candidate.rate,
            tax: candidate.tax,
            candidates,
        }
    }
}

/// Flat rate for assets held under two years, if any
pub fn short_term_rate(asset_type: AssetType, holding_years: i32) -> Option<Decimal> {
    match asset_type {
        AssetType::PresaleRight if holding_years < 1 => Some(dec!(0.70)),
        AssetType::PresaleRight => Some(dec!(0.60)),
        AssetType::HighValueResidence => None,
        AssetType::GeneralHousing if holding_years < 1 => Some(dec!(0.70)),
        AssetType::GeneralHousing if holding_years < 2 => Some(dec!(0.60)),
        AssetType::GeneralHousing => None,
        _ if holding_years < 1 => Some(dec!(0.50)),
        _ if holding_years < 2 => Some(dec!(0.40)),
        _ => None,
    }
}

fn is_non_business_land(input: &TransactionInput) -> bool {
    input.asset_type.is_land_like()
        && input.land_use == LandUse::NonBusiness
        && !input.non_business_exception
}

/// Compute every applicable tax for `base` and keep the largest.
///
/// Ties go to the progressive (or surcharge) calculation.
pub fn select_rate(
    input: &TransactionInput,
    year: TaxYear,
    base: Decimal,
    holding_years: i32,
) -> RateSelection {
    let base = base.max(Decimal::ZERO);

    if input.asset_type == AssetType::Unregistered {
        let flat = TaxCandidate {
            basis: RateBasis::Unregistered,
            rate: UNREGISTERED_RATE,
            tax: floor_product(base, UNREGISTERED_RATE),
        };
        return RateSelection::chosen(flat, vec![flat]);
    }

    let bracket = year.bracket_for(base);
    let progressive = TaxCandidate {
        basis: RateBasis::Progressive,
        rate: bracket.rate,
        tax: year.progressive_tax(base),
    };
    let surcharge = is_non_business_land(input).then(|| TaxCandidate {
        basis: RateBasis::NonBusinessSurcharge,
        rate: bracket.rate + NON_BUSINESS_SURCHARGE,
        tax: bracket.tax(base, NON_BUSINESS_SURCHARGE),
    });
    // Surcharge tax is never below the plain schedule
    let primary = surcharge.unwrap_or(progressive);

    let short_term = short_term_rate(input.asset_type, holding_years).map(|rate| TaxCandidate {
        basis: RateBasis::ShortTerm,
        rate,
        tax: floor_product(base, rate),
    });

    let mut candidates = vec![progressive];
    candidates.extend(surcharge);
    candidates.extend(short_term);

    let chosen = match short_term {
        Some(short) if short.tax > primary.tax => short,
        _ => primary,
    };
    log::debug!(
        "Rate selection: base={}, chosen={} at {} = {}",
        base,
        chosen.basis,
        chosen.rate,
        chosen.tax
    );

    RateSelection::chosen(chosen, candidates)
}

/// Tax on a base combined with an earlier declaration; always progressive.
pub fn aggregated_tax(year: TaxYear, base: Decimal) -> RateSelection {
    let base = base.max(Decimal::ZERO);
    let candidate = TaxCandidate {
        basis: RateBasis::Aggregated,
        rate: year.bracket_for(base).rate,
        tax: year.progressive_tax(base),
    };
    RateSelection::chosen(candidate, vec![candidate])
}
