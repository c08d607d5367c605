pub mod amount;
pub mod dates;
pub mod normalize;
pub mod transaction;
pub mod warnings;

// Flat public surface for domain types and functions.
pub use amount::{format_rate, format_won, parse_amount};
pub use dates::{period_between, statutory_deadline, HoldingPeriod};
pub use normalize::{normalize, Normalized};
pub use transaction::{
    input_fingerprint, read_batch_json, read_transaction_json, AcquisitionCause,
    AcquisitionCosts, AcquisitionMethod, AssetType, BurdenGift, DeclarationType, DisposalCause,
    ExemptionType, Expenses, GiftEvaluation, InputError, InputField, LandGrades, LandUse,
    TransactionInput,
};
pub use warnings::Warning;
