use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Portion of a sole residence's price exempt from tax (disposals from 2021-12-08)
pub const HIGH_VALUE_THRESHOLD: Decimal = dec!(1200000000);
/// Annual cap on the 8-year farming reduction
pub const FARM_REDUCTION_CAP: Decimal = dec!(100000000);
/// Annual basic deduction per filer
pub const BASIC_DEDUCTION: Decimal = dec!(2500000);
/// Late-payment penalty per day (0.022%)
pub const LATE_PAYMENT_DAILY_RATE: Decimal = dec!(0.00022);
/// Agricultural/fishing surtax on the reduced amount
pub const SURTAX_RATE: Decimal = dec!(0.20);
/// Local income tax as a share of national income tax
pub const LOCAL_INCOME_TAX_RATE: Decimal = dec!(0.10);
/// Deemed expense for converted and official acquisition prices
pub const DEEMED_EXPENSE_RATE: Decimal = dec!(0.03);
pub const UNREGISTERED_RATE: Decimal = dec!(0.70);
/// Added to the bracket rate for non-business land
pub const NON_BUSINESS_SURCHARGE: Decimal = dec!(0.10);
/// Converted-price penalty for new buildings sold within five years
pub const CONSTRUCTION_PENALTY_RATE: Decimal = dec!(0.05);

/// Acquisitions before this date are deemed to happen on it
pub fn deemed_acquisition_floor() -> NaiveDate {
    statutory_date(1985, 1, 1)
}

/// Land grades were replaced by official land prices on this date
pub fn land_grade_cutover() -> NaiveDate {
    statutory_date(1990, 8, 30)
}

/// Land acquired in this window is deemed business-use
pub fn deemed_business_use_window() -> (NaiveDate, NaiveDate) {
    (statutory_date(2009, 3, 16), statutory_date(2012, 12, 31))
}

fn statutory_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("statutory dates are valid calendar dates")
}

/// One step of a progressive schedule.
///
/// Tax within the bracket is `base × rate − deduction`; the deduction makes
/// the schedule continuous at each bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    /// Inclusive upper bound; `None` for the top bracket
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
}

impl Bracket {
    const fn new(upper: Decimal, rate: Decimal, deduction: Decimal) -> Self {
        Bracket {
            upper: Some(upper),
            rate,
            deduction,
        }
    }

    const fn top(rate: Decimal, deduction: Decimal) -> Self {
        Bracket {
            upper: None,
            rate,
            deduction,
        }
    }

    pub fn contains(&self, base: Decimal) -> bool {
        self.upper.map_or(true, |upper| base <= upper)
    }

    /// floor(base × (rate + extra) − deduction), never negative; 0 on overflow
    pub fn tax(&self, base: Decimal, extra_rate: Decimal) -> Decimal {
        base.checked_mul(self.rate + extra_rate)
            .and_then(|v| v.checked_sub(self.deduction))
            .map(|v| v.floor().max(Decimal::ZERO))
            .unwrap_or_else(|| {
                log::warn!("Overflow taxing {} at {}; using 0", base, self.rate + extra_rate);
                Decimal::ZERO
            })
    }
}

/// Disposals before 2023-01-01
pub static BRACKETS_2022: [Bracket; 8] = [
    Bracket::new(dec!(12000000), dec!(0.06), dec!(0)),
    Bracket::new(dec!(46000000), dec!(0.15), dec!(1080000)),
    Bracket::new(dec!(88000000), dec!(0.24), dec!(5220000)),
    Bracket::new(dec!(150000000), dec!(0.35), dec!(14900000)),
    Bracket::new(dec!(300000000), dec!(0.38), dec!(19400000)),
    Bracket::new(dec!(500000000), dec!(0.40), dec!(25400000)),
    Bracket::new(dec!(1000000000), dec!(0.42), dec!(35400000)),
    Bracket::top(dec!(0.45), dec!(65400000)),
];

/// Disposals from 2023-01-01
pub static BRACKETS_2023: [Bracket; 8] = [
    Bracket::new(dec!(14000000), dec!(0.06), dec!(0)),
    Bracket::new(dec!(50000000), dec!(0.15), dec!(1260000)),
    Bracket::new(dec!(88000000), dec!(0.24), dec!(5760000)),
    Bracket::new(dec!(150000000), dec!(0.35), dec!(15440000)),
    Bracket::new(dec!(300000000), dec!(0.38), dec!(19940000)),
    Bracket::new(dec!(500000000), dec!(0.40), dec!(25940000)),
    Bracket::new(dec!(1000000000), dec!(0.42), dec!(35940000)),
    Bracket::top(dec!(0.45), dec!(65940000)),
];

/// Korean tax year (calendar year of the disposal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Newest year with a configured schedule; used when no disposal date is known
    pub const LATEST: TaxYear = TaxYear(2023);

    pub fn from_date(date: NaiveDate) -> Self {
        TaxYear(date.year())
    }

    /// Progressive schedule in force for disposals in this year
    pub fn brackets(&self) -> &'static [Bracket] {
        if self.0 >= 2023 {
            &BRACKETS_2023
        } else {
            &BRACKETS_2022
        }
    }

    /// Bracket applying to `base` in this year's schedule
    pub fn bracket_for(&self, base: Decimal) -> &'static Bracket {
        let brackets = self.brackets();
        brackets
            .iter()
            .find(|b| b.contains(base))
            .unwrap_or(&brackets[brackets.len() - 1])
    }

    /// Plain progressive tax on `base`
    pub fn progressive_tax(&self, base: Decimal) -> Decimal {
        if base <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.bracket_for(base).tax(base, Decimal::ZERO)
    }

    /// Reduction rate for public-project cash compensation
    pub fn public_cash_reduction_rate(&self) -> Decimal {
        // 15% from 2025-01-01
        if self.0 >= 2025 {
            dec!(0.15)
        } else {
            dec!(0.10)
        }
    }

    pub fn display(&self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
