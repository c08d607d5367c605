use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::amount::{add_amounts, floor_product, sub_amounts};
use crate::core::{normalize, statutory_deadline, TransactionInput, Warning};
use crate::tax::aggregate::{amounts_due, income_amounts, AmountsDue, IncomeAmounts, Liabilities};
use crate::tax::deduction::{long_term_deduction, LongTermDeduction};
use crate::tax::exemption::{compute_exemption, Exemption};
use crate::tax::gain::{compute_gain, resolve_cost_basis, ExpenseLabel, Gain};
use crate::tax::holding::{holding_periods, HoldingPeriods};
use crate::tax::installment::{plan_installments, InstallmentPlan};
use crate::tax::law::{TaxYear, HIGH_VALUE_THRESHOLD, LOCAL_INCOME_TAX_RATE};
use crate::tax::penalty::{
    compute_penalty, construction_penalty, Levy, PenaltyBreakdown, PenaltyDates,
};
use crate::tax::price::{burden_ratio, resolve_acquisition_price, PriceLabel};
use crate::tax::rate::{aggregated_tax, select_rate, RateSelection};

/// Itemized result of one calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    pub disposal_price: Decimal,
    pub acquisition_price: Decimal,
    pub acquisition_label: PriceLabel,
    pub expense: Decimal,
    pub expense_label: ExpenseLabel,
    pub gain: Gain,
    pub long_term: LongTermDeduction,
    pub income: IncomeAmounts,
    pub computed: RateSelection,
    pub exemption: Exemption,
    pub decided_tax: Decimal,
    pub construction_penalty: Decimal,
    pub initial_income_tax: Decimal,
    pub initial_surtax: Decimal,
    pub income_tax_penalty: PenaltyBreakdown,
    pub surtax_penalty: PenaltyBreakdown,
    pub due: AmountsDue,
    pub income_tax: InstallmentPlan,
    pub surtax: InstallmentPlan,
    /// Income tax and surtax payable now
    pub total_immediate: Decimal,
    /// 10% of the income tax payable
    pub local_income_tax: Decimal,
    pub holding: HoldingPeriods,
    pub deadline: Option<NaiveDate>,
    pub high_value_threshold: Decimal,
    pub burden_gift: bool,
    pub burden_ratio: Decimal,
    pub warnings: Vec<Warning>,
}

/// Run the whole calculation for one disposal.
///
/// Never fails: missing or malformed figures contribute 0 and missing dates
/// disable whatever depends on them.
pub fn compute_tax(raw: &TransactionInput) -> TaxResult {
    let normalized = normalize(raw);
    let input = &normalized.input;
    let year = input.disposal_date.map(TaxYear::from_date);
    let schedule_year = year.unwrap_or(TaxYear::LATEST);

    let price = resolve_acquisition_price(&normalized);
    let ratio = burden_ratio(input);
    let cost = resolve_cost_basis(input, &price, ratio);
    let gain = compute_gain(input, &cost);

    let holding = holding_periods(input);
    let long_term = long_term_deduction(input, holding.for_deduction.years, gain.taxable);
    let income = income_amounts(input, sub_amounts(gain.taxable, long_term.amount));

    let computed = if income.aggregated {
        aggregated_tax(schedule_year, income.tax_base)
    } else {
        select_rate(input, schedule_year, income.tax_base, holding.for_rate.years)
    };

    let exemption = compute_exemption(input, year, computed.tax);
    let decided_tax = exemption.decided_tax(computed.tax);
    let construction_penalty = construction_penalty(input, &price);

    let deadline = input.disposal_date.and_then(statutory_deadline);
    let dates = PenaltyDates {
        deadline,
        report: input.report_date,
        payment: input.payment_date,
    };
    let income_tax_penalty = compute_penalty(
        Levy::IncomeTax,
        input.declaration_type,
        add_amounts(decided_tax, construction_penalty),
        input.initial_income_tax,
        dates,
    );
    let surtax_penalty = compute_penalty(
        Levy::Surtax,
        input.declaration_type,
        exemption.surtax,
        input.initial_surtax,
        dates,
    );

    let due = amounts_due(
        input,
        &Liabilities {
            decided_tax,
            construction_penalty,
            surtax: exemption.surtax,
            income_tax_penalty: income_tax_penalty.total,
            surtax_penalty: surtax_penalty.total,
        },
    );

    let income_tax = plan_installments(Levy::IncomeTax, due.income_tax, input.installment_request);
    let surtax = plan_installments(Levy::Surtax, due.surtax, input.surtax_installment_request);

    log::info!(
        "Calculated: base={}, tax={} ({}), income tax due={}, surtax due={}",
        income.tax_base,
        computed.tax,
        computed.basis,
        due.income_tax,
        due.surtax
    );

    TaxResult {
        disposal_price: input.disposal_price,
        acquisition_price: cost.acquisition_price,
        acquisition_label: price.label,
        expense: cost.expense,
        expense_label: cost.expense_label,
        gain,
        long_term,
        income,
        computed,
        exemption,
        decided_tax,
        construction_penalty,
        initial_income_tax: input.initial_income_tax,
        initial_surtax: input.initial_surtax,
        income_tax_penalty,
        surtax_penalty,
        total_immediate: add_amounts(income_tax.immediate, surtax.immediate),
        local_income_tax: floor_product(due.income_tax, LOCAL_INCOME_TAX_RATE),
        due,
        income_tax,
        surtax,
        holding,
        deadline,
        high_value_threshold: HIGH_VALUE_THRESHOLD,
        burden_gift: input.is_burden_gift(),
        burden_ratio: ratio,
        warnings: normalized.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::parse_date;
    use crate::core::{AssetType, DeclarationType, ExemptionType};
    use rust_decimal_macros::dec;

    fn housing() -> TransactionInput {
        let mut input = TransactionInput {
            asset_type: AssetType::GeneralHousing,
            disposal_price: dec!(500000000),
            acquisition_date: parse_date("2020-06-01"),
            disposal_date: parse_date("2024-06-15"),
            report_date: parse_date("2024-07-01"),
            ..Default::default()
        };
        input.acquisition_costs.purchase = dec!(300000000);
        input
    }

    #[test]
    fn housing_breakdown() {
        let r = compute_tax(&housing());
        assert_eq!(r.gain.raw, dec!(200000000));
        assert_eq!(r.long_term.amount, dec!(16000000));
        assert_eq!(r.income.current, dec!(184000000));
        assert_eq!(r.income.tax_base, dec!(181500000));
        assert_eq!(r.computed.tax, dec!(49030000));
        assert_eq!(r.decided_tax, dec!(49030000));
        assert_eq!(r.income_tax_penalty.total, Decimal::ZERO);
        assert_eq!(r.due.income_tax, dec!(49030000));
        assert_eq!(r.income_tax.max, dec!(24515000));
        assert_eq!(r.local_income_tax, dec!(4903000));
        assert_eq!(r.deadline, parse_date("2024-09-02"));
        assert_eq!(r.holding.for_rate.years, 4);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn deterministic() {
        let input = housing();
        assert_eq!(compute_tax(&input), compute_tax(&input));
    }

    #[test]
    fn empty_input_is_all_zero() {
        let r = compute_tax(&TransactionInput::default());
        assert_eq!(r.computed.tax, Decimal::ZERO);
        assert_eq!(r.total_immediate, Decimal::ZERO);
        assert_eq!(r.deadline, None);
        assert_eq!(r.holding, HoldingPeriods::default());
    }

    #[test]
    fn public_cash_reduction_with_surtax() {
        let mut input = housing();
        input.asset_type = AssetType::Land;
        input.disposal_cause = crate::core::DisposalCause::Expropriation;
        input.exemption = ExemptionType::PublicCashStandard;
        let r = compute_tax(&input);
        assert_eq!(r.exemption.amount, dec!(4903000));
        assert_eq!(r.exemption.surtax, dec!(980600));
        assert_eq!(r.decided_tax, dec!(44127000));
        assert_eq!(r.surtax.total, dec!(980600));
        assert_eq!(r.total_immediate, r.income_tax.immediate + r.surtax.immediate);
    }

    #[test]
    fn late_filing_adds_penalty() {
        let mut input = housing();
        input.declaration_type = DeclarationType::AfterDeadline;
        input.report_date = parse_date("2024-09-20");
        input.payment_date = parse_date("2024-09-20");
        let r = compute_tax(&input);
        // 18 days late, filed within a month of the deadline
        assert_eq!(r.income_tax_penalty.report, dec!(4903000));
        assert_eq!(r.income_tax_penalty.delay, dec!(194158));
        assert_eq!(r.due.income_tax, dec!(54127158));
    }
}
