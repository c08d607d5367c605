use serde::Serialize;

use crate::core::{period_between, AcquisitionCause, HoldingPeriod, TransactionInput};

/// Holding periods measured for the two purposes that need them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HoldingPeriods {
    /// Decides short-term rates; inherited assets count the decedent's holding
    pub for_rate: HoldingPeriod,
    /// Decides the long-term deduction; only carryover gifts count the donor's holding
    pub for_deduction: HoldingPeriod,
}

pub fn holding_periods(input: &TransactionInput) -> HoldingPeriods {
    let rate_start = match (input.acquisition_cause, input.original_acquisition_date) {
        (AcquisitionCause::Inheritance | AcquisitionCause::GiftCarryover, Some(original)) => {
            Some(original)
        }
        _ => input.acquisition_date,
    };

    HoldingPeriods {
        for_rate: period_between(rate_start, input.disposal_date),
        for_deduction: period_between(input.carryover_start_date(), input.disposal_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::parse_date;

    fn inherited(cause: AcquisitionCause) -> TransactionInput {
        TransactionInput {
            acquisition_cause: cause,
            original_acquisition_date: parse_date("2010-01-01"),
            acquisition_date: parse_date("2023-01-01"),
            disposal_date: parse_date("2024-06-01"),
            ..Default::default()
        }
    }

    #[test]
    fn inheritance_counts_decedent_for_rate_only() {
        let periods = holding_periods(&inherited(AcquisitionCause::Inheritance));
        assert_eq!(periods.for_rate.years, 14);
        assert_eq!(periods.for_deduction.years, 1);
    }

    #[test]
    fn carryover_gift_counts_donor_for_both() {
        let periods = holding_periods(&inherited(AcquisitionCause::GiftCarryover));
        assert_eq!(periods.for_rate.years, 14);
        assert_eq!(periods.for_deduction.years, 14);
    }

    #[test]
    fn purchase_ignores_original_date() {
        let periods = holding_periods(&inherited(AcquisitionCause::Sale));
        assert_eq!(periods.for_rate.years, 1);
        assert_eq!(periods.for_deduction, periods.for_rate);
    }

    #[test]
    fn missing_original_date_falls_back_to_acquisition() {
        let mut input = inherited(AcquisitionCause::Inheritance);
        input.original_acquisition_date = None;
        assert_eq!(holding_periods(&input).for_rate.years, 1);
    }
}
