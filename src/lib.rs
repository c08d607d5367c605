//! Korean capital gains tax (양도소득세) on real-estate disposals.
//!
//! [`compute_tax`] takes one [`TransactionInput`] and returns an itemized
//! [`TaxResult`]: acquisition price, gain, long-term deduction, comparative
//! rate selection, reductions and surtax, penalties, and installment limits.

pub mod core;
pub mod tax;

pub use crate::core::{
    input_fingerprint, parse_amount, period_between, statutory_deadline, HoldingPeriod,
    TransactionInput, Warning,
};
pub use crate::tax::{compute_tax, pre1990_unit_price, TaxResult};
