use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Read;
use yangdo_derive::FieldSchema;

use super::amount::{lenient_amount, lenient_optional_amount};
use super::dates::lenient_date;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no input received; provide a file or pipe JSON to stdin")]
    Empty,
    #[error("malformed transaction JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// One field of the JSON input, produced by `#[derive(FieldSchema)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
}

/// Which kind of return is being filed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationType {
    /// Preliminary return filed on time
    #[default]
    Regular,
    /// Return filed after the statutory deadline
    AfterDeadline,
    /// Correction of an earlier return for the same disposal
    Amended,
}

impl DeclarationType {
    pub fn display(&self) -> &'static str {
        match self {
            DeclarationType::Regular => "Regular",
            DeclarationType::AfterDeadline => "After deadline",
            DeclarationType::Amended => "Amended",
        }
    }
}

/// Asset classification driving rates and deductions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    #[default]
    GeneralHousing,
    /// Sole home of a one-household owner priced above the exemption threshold
    HighValueResidence,
    Commercial,
    Land,
    /// Right to an apartment still under construction
    PresaleRight,
    /// Redevelopment association member's occupancy right
    OccupancyRight,
    /// Farmland cultivated by the owner (8-year self-farming)
    Farmland,
    Unregistered,
}

impl AssetType {
    /// Land and farmland share the land-grade and non-business-use rules
    pub fn is_land_like(&self) -> bool {
        matches!(self, AssetType::Land | AssetType::Farmland)
    }

    pub fn is_building(&self) -> bool {
        matches!(
            self,
            AssetType::GeneralHousing | AssetType::HighValueResidence | AssetType::Commercial
        )
    }

    pub fn display(&self) -> &'static str {
        match self {
            AssetType::GeneralHousing => "Housing",
            AssetType::HighValueResidence => "High-value sole residence",
            AssetType::Commercial => "Commercial building",
            AssetType::Land => "Land",
            AssetType::PresaleRight => "Presale right",
            AssetType::OccupancyRight => "Occupancy right",
            AssetType::Farmland => "Farmland",
            AssetType::Unregistered => "Unregistered asset",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// How the asset leaves the filer's hands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DisposalCause {
    #[default]
    Sale,
    Expropriation,
    Auction,
    /// Gift where the recipient assumes debt secured on the asset
    BurdenGift,
    Exchange,
}

/// How the filer originally obtained the asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionCause {
    #[default]
    Sale,
    Construction,
    Auction,
    Inheritance,
    Gift,
    /// Gift from a spouse or lineal relative taxed with the donor's basis
    GiftCarryover,
}

impl AcquisitionCause {
    pub fn is_gratuitous(&self) -> bool {
        matches!(
            self,
            AcquisitionCause::Inheritance | AcquisitionCause::Gift | AcquisitionCause::GiftCarryover
        )
    }
}

/// Acquisition price valuation method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMethod {
    /// Substantiated purchase cost
    #[default]
    Actual,
    /// Disposal price scaled by the ratio of official valuations
    Converted,
    /// Official valuation at acquisition
    Official,
}

impl AcquisitionMethod {
    pub fn uses_official_values(&self) -> bool {
        matches!(self, AcquisitionMethod::Converted | AcquisitionMethod::Official)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    #[default]
    Business,
    NonBusiness,
}

/// Tax reduction program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExemptionType {
    #[default]
    None,
    /// 8-year self-farming or farmland replacement
    #[serde(rename = "farm_8y")]
    Farm8Year,
    /// Cash compensation for land taken by a public project
    PublicCashStandard,
    /// Reduction at a filer-supplied percentage
    Custom,
}

impl ExemptionType {
    pub fn display(&self) -> &'static str {
        match self {
            ExemptionType::None => "None",
            ExemptionType::Farm8Year => "8-year farming",
            ExemptionType::PublicCashStandard => "Public project (cash)",
            ExemptionType::Custom => "Custom rate",
        }
    }
}

/// How the gifted property was valued for gift tax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GiftEvaluation {
    #[default]
    Market,
    Official,
}

/// Components of a substantiated acquisition cost
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct AcquisitionCosts {
    /// Purchase price paid
    #[serde(default, deserialize_with = "lenient_amount")]
    pub purchase: Decimal,
    /// Acquisition and registration taxes
    #[serde(default, deserialize_with = "lenient_amount")]
    pub acquisition_tax: Decimal,
    /// Other acquisition costs such as litigation fees
    #[serde(default, deserialize_with = "lenient_amount")]
    pub other: Decimal,
    /// Brokerage fee paid on acquisition
    #[serde(default, deserialize_with = "lenient_amount")]
    pub brokerage: Decimal,
}

impl AcquisitionCosts {
    pub fn total(&self) -> Decimal {
        self.purchase + self.acquisition_tax + self.other + self.brokerage
    }
}

/// Substantiated necessary expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct Expenses {
    /// Capital expenditure (extensions, window frames and the like)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub capital_expenditure: Decimal,
    /// Brokerage fee paid on disposal
    #[serde(default, deserialize_with = "lenient_amount")]
    pub disposal_brokerage: Decimal,
    /// Other expenses such as notary fees
    #[serde(default, deserialize_with = "lenient_amount")]
    pub other: Decimal,
}

impl Expenses {
    pub fn total(&self) -> Decimal {
        self.capital_expenditure + self.disposal_brokerage + self.other
    }
}

/// Inputs for converting land acquired before 1990-08-30 via land grades
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct LandGrades {
    /// Official unit price per m² as of 1990-01-01
    #[serde(default, deserialize_with = "lenient_amount")]
    pub base_unit_price_1990: Decimal,
    /// Land grade at acquisition
    #[serde(default, deserialize_with = "lenient_amount")]
    pub at_acquisition: Decimal,
    /// Land grade as of 1990-08-30
    #[serde(default, deserialize_with = "lenient_amount")]
    pub at_1990_aug_30: Decimal,
    /// Land grade in effect immediately before 1990-08-30
    #[serde(default, deserialize_with = "lenient_amount")]
    pub before_1990_aug_30: Decimal,
}

/// Burden-bearing gift figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct BurdenGift {
    /// How the gift was valued (market or official)
    #[serde(default)]
    pub evaluation: GiftEvaluation,
    /// Total valuation of the gifted property
    #[serde(default, deserialize_with = "lenient_amount")]
    pub gift_value: Decimal,
    /// Tenant deposit assumed by the recipient
    #[serde(default, deserialize_with = "lenient_amount")]
    pub deposit_debt: Decimal,
    /// Loan assumed by the recipient
    #[serde(default, deserialize_with = "lenient_amount")]
    pub loan_debt: Decimal,
    /// Total assumed debt (derived from deposit and loan when either is given)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub debt_amount: Decimal,
}

/// Complete description of one disposal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct TransactionInput {
    /// regular, after_deadline or amended
    #[serde(default)]
    pub declaration_type: DeclarationType,
    /// Date the return is filed
    #[serde(default, deserialize_with = "lenient_date")]
    pub report_date: Option<NaiveDate>,
    /// Date the tax is paid
    #[serde(default, deserialize_with = "lenient_date")]
    pub payment_date: Option<NaiveDate>,
    /// Income tax the filer wishes to pay in installments
    #[serde(default, deserialize_with = "lenient_amount")]
    pub installment_request: Decimal,
    /// Surtax the filer wishes to pay in installments
    #[serde(default, deserialize_with = "lenient_amount")]
    pub surtax_installment_request: Decimal,

    /// Income tax reported on the original return (amended returns only)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub initial_income_tax: Decimal,
    /// Surtax reported on the original return (amended returns only)
    #[serde(default, deserialize_with = "lenient_amount")]
    pub initial_surtax: Decimal,

    /// Another disposal was already declared this year
    #[serde(default)]
    pub has_prior_declaration: bool,
    /// Capital gains income amount of the earlier declaration
    #[serde(default, deserialize_with = "lenient_amount")]
    pub prior_income_amount: Decimal,
    /// Tax decided on the earlier declaration
    #[serde(default, deserialize_with = "lenient_amount")]
    pub prior_tax_amount: Decimal,

    /// Asset classification
    #[serde(default)]
    pub asset_type: AssetType,
    /// Land area in m²
    #[serde(default, deserialize_with = "lenient_amount")]
    pub land_area: Decimal,
    /// business or non_business
    #[serde(default)]
    pub land_use: LandUse,
    /// Non-business land that is exempt from the surcharge
    #[serde(default)]
    pub non_business_exception: bool,
    /// Land-grade conversion inputs for land acquired before 1990-08-30
    #[serde(default)]
    pub land_grades: LandGrades,

    /// How the asset was acquired
    #[serde(default)]
    pub acquisition_cause: AcquisitionCause,
    /// How the asset is disposed of
    #[serde(default)]
    pub disposal_cause: DisposalCause,
    /// Disposal (transfer) date
    #[serde(default, deserialize_with = "lenient_date")]
    pub disposal_date: Option<NaiveDate>,
    /// Acquisition date
    #[serde(default, deserialize_with = "lenient_date")]
    pub acquisition_date: Option<NaiveDate>,
    /// Decedent's or donor's acquisition date (inheritance, carryover gift)
    #[serde(default, deserialize_with = "lenient_date")]
    pub original_acquisition_date: Option<NaiveDate>,

    /// Burden-bearing gift figures
    #[serde(default)]
    pub burden_gift: BurdenGift,

    /// Disposal price
    #[serde(default, deserialize_with = "lenient_amount")]
    pub disposal_price: Decimal,
    /// actual, converted or official
    #[serde(default)]
    pub acquisition_method: AcquisitionMethod,
    /// Substantiated acquisition costs
    #[serde(default)]
    pub acquisition_costs: AcquisitionCosts,
    /// Total official valuation at acquisition
    #[serde(default, deserialize_with = "lenient_amount")]
    pub official_price: Decimal,
    /// Total official valuation at disposal
    #[serde(default, deserialize_with = "lenient_amount")]
    pub transfer_official_price: Decimal,
    /// Official land price per m² at acquisition
    #[serde(default, deserialize_with = "lenient_amount")]
    pub unit_official_price: Decimal,
    /// Official land price per m² at disposal
    #[serde(default, deserialize_with = "lenient_amount")]
    pub unit_transfer_official_price: Decimal,

    /// Substantiated necessary expenses
    #[serde(default)]
    pub expenses: Expenses,
    /// Prove actual expenses instead of using a converted acquisition price
    #[serde(default)]
    pub actual_expense_with_converted: bool,

    /// Years the filer lived in the residence
    #[serde(default, deserialize_with = "lenient_amount")]
    pub residence_years: Decimal,
    /// Residence requirement waived by a special provision
    #[serde(default)]
    pub residence_exception: bool,

    /// Tax reduction program
    #[serde(default)]
    pub exemption: ExemptionType,
    /// Reduction percentage for the custom program
    #[serde(default, deserialize_with = "lenient_amount")]
    pub custom_exemption_rate: Decimal,
    /// Reduction is waived from the agricultural/fishing surtax
    #[serde(default)]
    pub surtax_exempt: bool,

    /// Basic deduction override (capped at the annual limit)
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub custom_basic_deduction: Option<Decimal>,
}

impl TransactionInput {
    pub fn is_burden_gift(&self) -> bool {
        self.disposal_cause == DisposalCause::BurdenGift
    }

    /// Start date used for carryover gifts, which keep the donor's date
    pub fn carryover_start_date(&self) -> Option<NaiveDate> {
        match (self.acquisition_cause, self.original_acquisition_date) {
            (AcquisitionCause::GiftCarryover, Some(original)) => Some(original),
            _ => self.acquisition_date,
        }
    }
}

/// Read a single transaction from JSON
pub fn read_transaction_json<R: Read>(reader: R) -> Result<TransactionInput, InputError> {
    let input = serde_json::from_reader(reader)?;
    Ok(input)
}

/// Read a batch of transactions from a JSON array
pub fn read_batch_json<R: Read>(reader: R) -> Result<Vec<TransactionInput>, InputError> {
    let inputs = serde_json::from_reader(reader)?;
    Ok(inputs)
}

/// Hex SHA-256 of the canonical JSON encoding; equal inputs give equal results.
pub fn input_fingerprint(input: &TransactionInput) -> String {
    // Serializing plain data with string keys cannot fail
    let canonical = serde_json::to_vec(input).unwrap_or_default();
    hex::encode(Sha256::digest(&canonical))
}
