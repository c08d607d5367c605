pub mod aggregate;
pub mod deduction;
pub mod engine;
pub mod exemption;
pub mod gain;
pub mod holding;
pub mod installment;
pub mod land_grade;
pub mod law;
pub mod penalty;
pub mod price;
pub mod rate;

pub use engine::{compute_tax, TaxResult};
pub use land_grade::{grade_value, pre1990_unit_price, LandGradeConversion};
pub use law::TaxYear;
