//! Canonical snapshot of a transaction.
//!
//! Several input fields depend on others (a burden gift fixes the disposal
//! price, farmland fixes the reduction program, and so on). All of those
//! derivations happen here, once, before any calculation.

use rust_decimal::Decimal;

use super::amount::floor_product;
use super::dates::statutory_deadline;
use super::transaction::{
    AcquisitionMethod, AssetType, DeclarationType, DisposalCause, ExemptionType, GiftEvaluation,
    LandUse, TransactionInput,
};
use super::warnings::Warning;
use crate::tax::land_grade::LandGradeConversion;
use crate::tax::law::{deemed_acquisition_floor, deemed_business_use_window, land_grade_cutover};

/// Input after all derived fields have been filled in
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub input: TransactionInput,
    /// Acquired (or donor-acquired) before land grades were retired
    pub pre_1990: bool,
    /// The entered acquisition date was replaced by 1985-01-01
    pub deemed_1985: bool,
    pub warnings: Vec<Warning>,
}

pub fn normalize(raw: &TransactionInput) -> Normalized {
    let mut input = raw.clone();
    let mut warnings = Vec::new();

    let deemed_1985 = deem_acquisition_date(&mut input, &mut warnings);
    deem_business_use(&mut input, &mut warnings);

    let pre_1990 = input
        .carryover_start_date()
        .map_or(false, |date| date < land_grade_cutover());

    force_acquisition_method(&mut input, &mut warnings);
    apply_burden_gift_debt(&mut input, &mut warnings);
    derive_official_prices(&mut input, pre_1990, &mut warnings);
    reset_exemption(&mut input, &mut warnings);
    apply_declaration_type(&mut input, &mut warnings);

    for warning in &warnings {
        log::warn!("{}", warning.message());
    }

    Normalized {
        input,
        pre_1990,
        deemed_1985,
        warnings,
    }
}

fn deem_acquisition_date(input: &mut TransactionInput, warnings: &mut Vec<Warning>) -> bool {
    let floor = deemed_acquisition_floor();
    match input.acquisition_date {
        Some(entered) if entered < floor => {
            input.acquisition_date = Some(floor);
            warnings.push(Warning::DeemedAcquisitionDate { entered });
            true
        }
        _ => false,
    }
}

fn deem_business_use(input: &mut TransactionInput, warnings: &mut Vec<Warning>) {
    let (from, to) = deemed_business_use_window();
    let in_window = input
        .acquisition_date
        .map_or(false, |date| date >= from && date <= to);

    if input.asset_type.is_land_like() && in_window && input.land_use != LandUse::Business {
        input.land_use = LandUse::Business;
        warnings.push(Warning::DeemedBusinessUse);
    }
}

fn force_acquisition_method(input: &mut TransactionInput, warnings: &mut Vec<Warning>) {
    let from = input.acquisition_method;
    let to = if input.is_burden_gift() {
        match input.burden_gift.evaluation {
            GiftEvaluation::Official => AcquisitionMethod::Official,
            GiftEvaluation::Market if from == AcquisitionMethod::Official => {
                AcquisitionMethod::Actual
            }
            GiftEvaluation::Market => from,
        }
    } else if input.acquisition_cause.is_gratuitous() {
        AcquisitionMethod::Actual
    } else {
        from
    };

    if to != from {
        input.acquisition_method = to;
        warnings.push(Warning::AcquisitionMethodForced { from, to });
    }

    if input.is_burden_gift()
        && input.burden_gift.evaluation == GiftEvaluation::Official
        && input.actual_expense_with_converted
    {
        input.actual_expense_with_converted = false;
        warnings.push(Warning::ActualExpenseOptionDropped);
    }
}

fn apply_burden_gift_debt(input: &mut TransactionInput, warnings: &mut Vec<Warning>) {
    let gift = &mut input.burden_gift;
    if !gift.deposit_debt.is_zero() || !gift.loan_debt.is_zero() {
        gift.debt_amount = gift.deposit_debt + gift.loan_debt;
    }

    if input.is_burden_gift() && input.disposal_price != input.burden_gift.debt_amount {
        input.disposal_price = input.burden_gift.debt_amount;
        warnings.push(Warning::BurdenGiftPrice {
            debt: input.burden_gift.debt_amount,
        });
    }
}

fn derive_official_prices(input: &mut TransactionInput, pre_1990: bool, warnings: &mut Vec<Warning>) {
    if !input.asset_type.is_land_like() || !input.acquisition_method.uses_official_values() {
        return;
    }

    if pre_1990 && input.land_grades.is_complete() {
        input.unit_official_price = LandGradeConversion::from_grades(&input.land_grades).unit_price;
    }

    let area = input.land_area;
    if area <= Decimal::ZERO {
        return;
    }

    let mut derived = false;
    if input.unit_official_price > Decimal::ZERO {
        let total = floor_product(area, input.unit_official_price);
        derived |= total != input.official_price;
        input.official_price = total;
    }
    if input.unit_transfer_official_price > Decimal::ZERO {
        let total = floor_product(area, input.unit_transfer_official_price);
        derived |= total != input.transfer_official_price;
        input.transfer_official_price = total;
    }

    if derived {
        warnings.push(Warning::DerivedOfficialPrice {
            acquisition: input.official_price,
            disposal: input.transfer_official_price,
        });
    }
}

/// The asset type decides first; the disposal cause only matters for assets
/// the asset-type rule leaves alone.
fn reset_exemption(input: &mut TransactionInput, warnings: &mut Vec<Warning>) {
    let from = input.exemption;
    let to = match input.asset_type {
        AssetType::Farmland => ExemptionType::Farm8Year,
        AssetType::PresaleRight | AssetType::Unregistered
            if from == ExemptionType::PublicCashStandard =>
        {
            ExemptionType::None
        }
        _ if from == ExemptionType::PublicCashStandard
            && input.disposal_cause != DisposalCause::Expropriation =>
        {
            ExemptionType::None
        }
        _ => from,
    };

    if to != from {
        input.exemption = to;
        warnings.push(Warning::ExemptionReset { from, to });
    }

    match input.exemption {
        ExemptionType::Farm8Year => input.surtax_exempt = true,
        ExemptionType::None => input.surtax_exempt = false,
        _ => {}
    }
}

fn apply_declaration_type(input: &mut TransactionInput, warnings: &mut Vec<Warning>) {
    if input.declaration_type == DeclarationType::Regular {
        input.payment_date = input.disposal_date.and_then(statutory_deadline);
    }

    if input.declaration_type == DeclarationType::Amended {
        if input.has_prior_declaration {
            input.has_prior_declaration = false;
            warnings.push(Warning::AggregationIgnored);
        }
    } else if !input.initial_income_tax.is_zero() || !input.initial_surtax.is_zero() {
        input.initial_income_tax = Decimal::ZERO;
        input.initial_surtax = Decimal::ZERO;
        warnings.push(Warning::InitialFiguresIgnored);
    }
}
