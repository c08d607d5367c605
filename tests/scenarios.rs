//! End-to-end calculations through the library API

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use yangdo::core::dates::parse_date;
use yangdo::core::{
    read_transaction_json, AssetType, DeclarationType, DisposalCause, TransactionInput, Warning,
};
use yangdo::tax::installment::plan_installments;
use yangdo::tax::land_grade::LAND_GRADE_TABLE;
use yangdo::tax::penalty::{compute_penalty, Levy, PenaltyDates};
use yangdo::tax::price::burden_ratio;
use yangdo::tax::deduction::DeductionTable;
use yangdo::tax::rate::{select_rate, RateBasis};
use yangdo::tax::TaxYear;
use yangdo::compute_tax;

fn load(name: &str) -> TransactionInput {
    let file = File::open(format!("tests/data/{}", name)).unwrap();
    read_transaction_json(file).unwrap()
}

#[test]
fn housing_held_four_years() {
    let r = compute_tax(&load("housing.json"));

    assert_eq!(r.gain.raw, dec!(200000000));
    assert_eq!(r.long_term.amount, dec!(16000000));
    assert_eq!(r.income.current, dec!(184000000));
    assert_eq!(r.income.tax_base, dec!(181500000));
    assert_eq!(r.computed.tax, dec!(49030000));
    assert_eq!(r.computed.basis, RateBasis::Progressive);
    assert_eq!(r.income_tax.total, dec!(49030000));
    assert_eq!(r.income_tax.max, dec!(24515000));
    // 30,000,000 requested, clamped to the maximum
    assert_eq!(r.income_tax.deferred, dec!(24515000));
    assert_eq!(r.income_tax.immediate, dec!(24515000));
    assert_eq!(r.local_income_tax, dec!(4903000));
    assert_eq!(r.total_immediate, dec!(24515000));
}

#[test]
fn unregistered_flat_rate() {
    let r = compute_tax(&load("unregistered.json"));

    assert_eq!(r.gain.raw, dec!(50000000));
    assert_eq!(r.long_term.amount, Decimal::ZERO);
    assert_eq!(r.income.basic_deduction, Decimal::ZERO);
    assert_eq!(r.computed.basis, RateBasis::Unregistered);
    assert_eq!(r.computed.tax, dec!(35000000));
    assert_eq!(r.computed.candidates.len(), 1);
}

#[test]
fn expropriated_land_filed_late() {
    let r = compute_tax(&load("expropriated_land.json"));

    assert_eq!(r.acquisition_price, dec!(240000000));
    assert_eq!(r.expense, dec!(3960000));
    assert_eq!(r.gain.raw, dec!(656040000));
    assert_eq!(r.long_term.amount, dec!(196812000));
    assert_eq!(r.income.tax_base, dec!(456728000));
    assert_eq!(r.computed.tax, dec!(156751200));
    // 15% for disposals from 2025
    assert_eq!(r.exemption.amount, dec!(23512680));
    assert_eq!(r.exemption.surtax, dec!(4702536));
    assert_eq!(r.decided_tax, dec!(133238520));

    assert_eq!(r.deadline, parse_date("2025-03-31"));
    assert_eq!(r.income_tax_penalty.reduction_window, Some(3));
    assert_eq!(r.income_tax_penalty.report, dec!(18653392));
    assert_eq!(r.income_tax_penalty.delay_days, 40);
    assert_eq!(r.income_tax_penalty.delay, dec!(1172498));
    assert_eq!(r.income_tax.total, dec!(153064410));

    assert_eq!(r.surtax_penalty.report, Decimal::ZERO);
    assert_eq!(r.surtax.total, dec!(4743918));
    assert_eq!(r.surtax.max, Decimal::ZERO);
    assert_eq!(r.local_income_tax, dec!(15306441));
    assert!(!r.warnings.is_empty());
}

#[test]
fn aggregated_with_prior_declaration() {
    let r = compute_tax(&load("aggregated.json"));

    assert!(r.income.aggregated);
    assert_eq!(r.income.current, dec!(100000000));
    assert_eq!(r.income.prior, dec!(50000000));
    assert_eq!(r.income.basic_deduction, dec!(2500000));
    assert_eq!(r.income.tax_base, dec!(147500000));
    // held under a year, but the 50% short-term rate is not compared
    assert_eq!(r.holding.for_rate.years, 0);
    assert_eq!(r.computed.basis, RateBasis::Aggregated);
    assert_eq!(r.computed.tax, dec!(36185000));
    assert_eq!(r.computed.candidates.len(), 1);

    // penalties run on the full decided tax; the prior tax is credited afterwards
    assert_eq!(r.income_tax_penalty.base, dec!(36185000));
    assert_eq!(r.income_tax_penalty.report, dec!(3618500));
    assert_eq!(r.income_tax_penalty.delay_days, 15);
    assert_eq!(r.income_tax_penalty.delay, dec!(119410));
    assert_eq!(r.due.prior_tax, dec!(5000000));
    assert_eq!(r.due.income_tax, dec!(34922910));
    assert_eq!(r.income_tax.max, dec!(17461455));
    assert_eq!(r.local_income_tax, dec!(3492291));
}

#[test]
fn amended_return_nets_initial_tax() {
    let r = compute_tax(&load("amended.json"));

    // aggregation is dropped for amended returns
    assert!(!r.income.aggregated);
    assert!(r.warnings.contains(&Warning::AggregationIgnored));
    assert_eq!(r.income.tax_base, dec!(181500000));
    assert_eq!(r.decided_tax, dec!(49030000));
    assert_eq!(r.initial_income_tax, dec!(40000000));

    assert_eq!(r.deadline, parse_date("2024-09-02"));
    assert_eq!(r.income_tax_penalty.base, dec!(9030000));
    assert_eq!(r.income_tax_penalty.reduction_window, Some(3));
    assert_eq!(r.income_tax_penalty.report, dec!(225750));
    assert_eq!(r.income_tax_penalty.delay_days, 43);
    assert_eq!(r.income_tax_penalty.delay, dec!(85423));
    assert_eq!(r.due.additional_income_tax, dec!(9030000));
    assert_eq!(r.due.income_tax, dec!(9341173));
    assert_eq!(r.income_tax.max, Decimal::ZERO);
}

#[test]
fn new_building_penalty_joins_the_penalty_base() {
    let r = compute_tax(&load("new_building.json"));

    assert_eq!(r.acquisition_price, dec!(600000000));
    assert_eq!(r.expense, dec!(9000000));
    assert_eq!(r.gain.raw, dec!(391000000));
    assert_eq!(r.long_term.amount, dec!(23460000));
    assert_eq!(r.income.tax_base, dec!(365040000));
    assert_eq!(r.decided_tax, dec!(120076000));
    assert_eq!(r.construction_penalty, dec!(30000000));

    assert_eq!(r.income_tax_penalty.base, dec!(150076000));
    assert_eq!(r.income_tax_penalty.report, dec!(15007600));
    assert_eq!(r.income_tax_penalty.delay_days, 20);
    assert_eq!(r.income_tax_penalty.delay, dec!(660334));
    assert_eq!(r.due.income_tax, dec!(165743934));
}

#[test]
fn oversized_converted_price_does_not_panic() {
    let r = compute_tax(&load("oversized_new_building.json"));

    assert_eq!(r.acquisition_price, Decimal::from_scientific("1e28").unwrap());
    assert_eq!(r.gain.raw, Decimal::ZERO);
    assert_eq!(r.construction_penalty, Decimal::from_scientific("5e26").unwrap());
    assert_eq!(r.income_tax_penalty.delay_days, 168);
    // base × days is out of range
    assert_eq!(r.income_tax_penalty.delay, Decimal::ZERO);
    assert_eq!(r.income_tax_penalty.report, Decimal::from_scientific("8e25").unwrap());
    assert_eq!(r.due.income_tax, Decimal::from_scientific("5.8e26").unwrap());
}

#[test]
fn burden_gift_apportions_cost() {
    let r = compute_tax(&load("burden_gift.json"));

    assert!(r.burden_gift);
    assert_eq!(r.burden_ratio, dec!(0.5));
    assert_eq!(r.disposal_price, dec!(300000000));
    assert!(r
        .warnings
        .contains(&Warning::BurdenGiftPrice { debt: dec!(300000000) }));
    assert_eq!(r.acquisition_price, dec!(100000000));
    assert_eq!(r.expense, dec!(5000000));
    assert_eq!(r.gain.raw, dec!(195000000));
    assert_eq!(r.long_term.amount, dec!(35100000));
    assert_eq!(r.income.tax_base, dec!(157400000));
    assert_eq!(r.computed.tax, dec!(39872000));
}

#[test]
fn high_value_residence_uses_residence_table() {
    let r = compute_tax(&load("high_value_residence.json"));

    assert_eq!(r.gain.raw, dec!(1200000000));
    assert_eq!(r.gain.taxable, dec!(480000000));
    assert_eq!(r.gain.exempt, dec!(720000000));
    assert_eq!(r.long_term.table, DeductionTable::Residence);
    assert_eq!(r.long_term.holding_rate, dec!(0.40));
    assert_eq!(r.long_term.residence_rate, dec!(0.24));
    assert_eq!(r.long_term.amount, dec!(307200000));
    assert_eq!(r.income.tax_base, dec!(170300000));
    assert_eq!(r.computed.basis, RateBasis::Progressive);
    assert_eq!(r.computed.tax, dec!(44774000));
}

#[test]
fn after_deadline_within_a_month_is_ten_percent() {
    let p = compute_penalty(
        Levy::IncomeTax,
        DeclarationType::AfterDeadline,
        dec!(30000000),
        Decimal::ZERO,
        PenaltyDates {
            deadline: parse_date("2024-03-31"),
            report: parse_date("2024-04-20"),
            payment: parse_date("2024-03-31"),
        },
    );
    assert_eq!(p.report, dec!(3000000));
    assert_eq!(p.report, dec!(30000000) * dec!(0.10));
}

#[test]
fn installment_clamps_request() {
    let plan = plan_installments(Levy::IncomeTax, dec!(25000000), dec!(15000000));
    assert_eq!(plan.max, dec!(12500000));
    assert_eq!(plan.deferred, dec!(12500000));
}

#[test]
fn identical_inputs_give_identical_results() {
    for name in [
        "housing.json",
        "unregistered.json",
        "expropriated_land.json",
        "aggregated.json",
        "amended.json",
        "new_building.json",
        "burden_gift.json",
        "high_value_residence.json",
    ] {
        let input = load(name);
        assert_eq!(compute_tax(&input), compute_tax(&input.clone()));
    }
}

#[test]
fn progressive_tax_continuous_at_bounds() {
    for year in [TaxYear(2022), TaxYear(2023)] {
        for bracket in year.brackets() {
            let Some(bound) = bracket.upper else { continue };
            let below = year.progressive_tax(bound);
            let above = year.progressive_tax(bound + Decimal::ONE);
            assert!(above >= below, "{} decreases at {}", year, bound);
            assert!(above - below <= Decimal::ONE, "{} jumps at {}", year, bound);
        }
    }
}

#[test]
fn selected_tax_is_never_below_a_candidate() {
    let assets = [
        AssetType::GeneralHousing,
        AssetType::HighValueResidence,
        AssetType::Commercial,
        AssetType::Land,
        AssetType::PresaleRight,
        AssetType::OccupancyRight,
        AssetType::Farmland,
        AssetType::Unregistered,
    ];
    for asset_type in assets {
        let input = TransactionInput {
            asset_type,
            land_use: yangdo::core::LandUse::NonBusiness,
            ..Default::default()
        };
        for years in [0, 1, 2, 5] {
            let mut base = dec!(1000000);
            while base < dec!(5000000000) {
                let s = select_rate(&input, TaxYear(2024), base, years);
                for c in &s.candidates {
                    assert!(s.tax >= c.tax);
                }
                base *= dec!(3);
            }
        }
    }
}

#[test]
fn land_grade_table_is_monotonic() {
    for i in 1..LAND_GRADE_TABLE.len() {
        assert!(LAND_GRADE_TABLE[i - 1] <= LAND_GRADE_TABLE[i]);
    }
}

#[test]
fn burden_apportionment_never_exceeds_full_cost() {
    for (debt, value) in [
        (dec!(0), dec!(100)),
        (dec!(30), dec!(100)),
        (dec!(100), dec!(100)),
        (dec!(250), dec!(100)),
        (dec!(10), dec!(0)),
    ] {
        let mut input = TransactionInput {
            disposal_cause: DisposalCause::BurdenGift,
            disposal_price: debt,
            ..Default::default()
        };
        input.burden_gift.gift_value = value;
        input.burden_gift.debt_amount = debt;
        input.acquisition_costs.purchase = dec!(77777);
        input.expenses.other = dec!(3333);

        let ratio = burden_ratio(&input);
        assert!(ratio >= Decimal::ZERO && ratio <= Decimal::ONE);

        let r = compute_tax(&input);
        assert!(r.acquisition_price <= dec!(77777));
        assert!(r.expense <= dec!(3333));
    }
}
