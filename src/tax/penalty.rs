use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::amount::{add_amounts, floor_product, floor_product3, format_rate, sub_amounts};
use crate::core::dates::add_months;
use crate::core::{AcquisitionCause, AcquisitionMethod, DeclarationType, TransactionInput};
use crate::tax::law::{CONSTRUCTION_PENALTY_RATE, LATE_PAYMENT_DAILY_RATE};
use crate::tax::price::AcquisitionPrice;

/// Tax a penalty is assessed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Levy {
    IncomeTax,
    /// Agricultural/fishing special tax; exempt from the under-reporting penalty
    Surtax,
}

/// Reduction of the after-deadline penalty by months after the deadline
const AFTER_DEADLINE_REDUCTIONS: [(u32, Decimal); 3] =
    [(1, dec!(0.50)), (3, dec!(0.30)), (6, dec!(0.20))];

/// Reduction of the amended-return penalty by months after the deadline
const AMENDED_REDUCTIONS: [(u32, Decimal); 6] = [
    (1, dec!(0.90)),
    (3, dec!(0.75)),
    (6, dec!(0.50)),
    (12, dec!(0.30)),
    (18, dec!(0.20)),
    (24, dec!(0.10)),
];

const AFTER_DEADLINE_RATE: Decimal = dec!(0.20);
const AMENDED_RATE: Decimal = dec!(0.10);
const LATE_REGULAR_RATE: Decimal = dec!(0.20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyDates {
    pub deadline: Option<NaiveDate>,
    pub report: Option<NaiveDate>,
    pub payment: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PenaltyBreakdown {
    /// Tax the penalties are assessed on
    pub base: Decimal,
    pub report_rate: Decimal,
    pub reduction: Decimal,
    /// Filing window (months after the deadline) that earned the reduction
    pub reduction_window: Option<u32>,
    pub report: Decimal,
    pub delay_days: i64,
    pub delay: Decimal,
    pub total: Decimal,
    pub description: String,
}

impl PenaltyBreakdown {
    fn none(base: Decimal) -> Self {
        PenaltyBreakdown {
            base,
            report_rate: Decimal::ZERO,
            reduction: Decimal::ZERO,
            reduction_window: None,
            report: Decimal::ZERO,
            delay_days: 0,
            delay: Decimal::ZERO,
            total: Decimal::ZERO,
            description: "No penalty".to_string(),
        }
    }
}

/// Under-reporting rate, reduction and description for a return
struct ReportTerms {
    rate: Decimal,
    reduction: Decimal,
    window: Option<u32>,
    description: String,
}

fn reduction_for(
    table: &[(u32, Decimal)],
    deadline: NaiveDate,
    report: NaiveDate,
) -> Option<(u32, Decimal)> {
    table.iter().copied().find(|(months, _)| {
        add_months(deadline, *months).map_or(false, |limit| report <= limit)
    })
}

fn report_terms(
    levy: Levy,
    declaration_type: DeclarationType,
    deadline: NaiveDate,
    report: NaiveDate,
) -> ReportTerms {
    let terms = |rate, found: Option<(u32, Decimal)>, label: &str| {
        let description = match found {
            Some((months, reduction)) => format!(
                "{} within {} month(s) ({} reduction)",
                label,
                months,
                format_rate(reduction)
            ),
            None => format!("{} (no reduction)", label),
        };
        ReportTerms {
            rate,
            reduction: found.map_or(Decimal::ZERO, |(_, r)| r),
            window: found.map(|(m, _)| m),
            description,
        }
    };

    match (levy, declaration_type) {
        (Levy::Surtax, _) => ReportTerms {
            rate: Decimal::ZERO,
            reduction: Decimal::ZERO,
            window: None,
            description: "Waived for surtax".to_string(),
        },
        (Levy::IncomeTax, DeclarationType::AfterDeadline) => terms(
            AFTER_DEADLINE_RATE,
            reduction_for(&AFTER_DEADLINE_REDUCTIONS, deadline, report),
            "After deadline",
        ),
        (Levy::IncomeTax, DeclarationType::Amended) => terms(
            AMENDED_RATE,
            reduction_for(&AMENDED_REDUCTIONS, deadline, report),
            "Amended",
        ),
        (Levy::IncomeTax, DeclarationType::Regular) if report > deadline => ReportTerms {
            rate: LATE_REGULAR_RATE,
            reduction: Decimal::ZERO,
            window: None,
            description: format!("Filed after deadline ({})", format_rate(LATE_REGULAR_RATE)),
        },
        (Levy::IncomeTax, DeclarationType::Regular) => ReportTerms {
            rate: Decimal::ZERO,
            reduction: Decimal::ZERO,
            window: None,
            description: String::new(),
        },
    }
}

/// Under-reporting and late-payment penalties on `due − paid`.
pub fn compute_penalty(
    levy: Levy,
    declaration_type: DeclarationType,
    due: Decimal,
    paid: Decimal,
    dates: PenaltyDates,
) -> PenaltyBreakdown {
    let base = sub_amounts(due, paid).max(Decimal::ZERO);
    let (Some(deadline), Some(report), Some(payment)) = (dates.deadline, dates.report, dates.payment)
    else {
        return PenaltyBreakdown::none(base);
    };
    if base.is_zero() {
        return PenaltyBreakdown::none(base);
    }

    let delay_days = if payment > deadline {
        (payment - deadline).num_days()
    } else {
        0
    };
    let delay = floor_product3(base, Decimal::from(delay_days), LATE_PAYMENT_DAILY_RATE);

    let terms = report_terms(levy, declaration_type, deadline, report);
    let report_penalty = floor_product3(base, terms.rate, Decimal::ONE - terms.reduction);
    let total = add_amounts(report_penalty, delay);

    let description = if total.is_zero() {
        "No penalty".to_string()
    } else {
        let mut parts = Vec::new();
        if !terms.description.is_empty() {
            parts.push(terms.description);
        }
        if delay_days > 0 {
            parts.push(format!("late payment {} days", delay_days));
        }
        parts.join(", ")
    };
    log::debug!(
        "{:?} penalty: base={}, report={}, delay={} ({} days)",
        levy,
        base,
        report_penalty,
        delay,
        delay_days
    );

    PenaltyBreakdown {
        base,
        report_rate: terms.rate,
        reduction: terms.reduction,
        reduction_window: terms.window,
        report: report_penalty,
        delay_days,
        delay,
        total,
        description,
    }
}

/// Penalty on a converted acquisition price for a new building sold within five years.
pub fn construction_penalty(input: &TransactionInput, price: &AcquisitionPrice) -> Decimal {
    let applies = input.asset_type.is_building()
        && input.acquisition_cause == AcquisitionCause::Construction
        && price.method == AcquisitionMethod::Converted;
    if !applies {
        return Decimal::ZERO;
    }

    let within_five_years = match (input.acquisition_date, input.disposal_date) {
        (Some(acquired), Some(disposed)) => {
            add_months(acquired, 60).map_or(false, |limit| disposed <= limit)
        }
        _ => false,
    };

    if within_five_years {
        floor_product(price.price, CONSTRUCTION_PENALTY_RATE)
    } else {
        Decimal::ZERO
    }
}
