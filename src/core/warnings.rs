use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

use super::transaction::{AcquisitionMethod, ExemptionType};

/// Adjustments made to the input before calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Acquisitions before 1985-01-01 are deemed to happen on 1985-01-01.
    DeemedAcquisitionDate { entered: NaiveDate },
    /// Land acquired 2009-03-16..=2012-12-31 is treated as business-use land.
    DeemedBusinessUse,
    /// The acquisition price method is fixed by the acquisition or disposal cause.
    AcquisitionMethodForced {
        from: AcquisitionMethod,
        to: AcquisitionMethod,
    },
    /// The actual-expense option is unavailable for officially valued burden gifts.
    ActualExpenseOptionDropped,
    /// The reduction program does not apply to this asset or disposal cause.
    ExemptionReset { from: ExemptionType, to: ExemptionType },
    /// Assumed debt replaces the disposal price of a burden gift.
    BurdenGiftPrice {
        debt: Decimal,
    },
    /// Official valuations were derived from land area and unit prices.
    DerivedOfficialPrice {
        acquisition: Decimal,
        disposal: Decimal,
    },
    /// Amended-return figures were entered on a non-amended return and ignored.
    InitialFiguresIgnored,
    /// Aggregation with a prior declaration does not apply to amended returns.
    AggregationIgnored,
}

impl Warning {
    pub fn message(&self) -> String {
        match self {
            Warning::DeemedAcquisitionDate { entered } => format!(
                "Acquisition date {} is before 1985-01-01; 1985-01-01 is used instead",
                entered
            ),
            Warning::DeemedBusinessUse => {
                "Land acquired between 2009-03-16 and 2012-12-31 is deemed business-use".to_string()
            }
            Warning::AcquisitionMethodForced { from, to } => {
                format!("Acquisition method {:?} replaced by {:?}", from, to)
            }
            Warning::ActualExpenseOptionDropped => {
                "Actual-expense option is not available with official gift valuation".to_string()
            }
            Warning::ExemptionReset { from, to } => format!(
                "Reduction program '{}' does not apply; using '{}'",
                from.display(),
                to.display()
            ),
            Warning::BurdenGiftPrice { debt } => {
                format!("Disposal price set to the assumed debt ({})", debt)
            }
            Warning::DerivedOfficialPrice {
                acquisition,
                disposal,
            } => format!(
                "Official prices derived from land area: acquisition {}, disposal {}",
                acquisition, disposal
            ),
            Warning::InitialFiguresIgnored => {
                "Original return figures only apply to amended returns".to_string()
            }
            Warning::AggregationIgnored => {
                "Prior declaration aggregation is not available on amended returns".to_string()
            }
        }
    }
}
