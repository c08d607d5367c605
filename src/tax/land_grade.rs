//! Land-grade conversion for land acquired before 1990-08-30, when land
//! grades (토지등급) were replaced by official per-m² land prices.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::amount::{floor_product, prorate};
use crate::core::LandGrades;

/// Won value per land grade; index 0 is unused.
pub static LAND_GRADE_TABLE: [u64; 366] = [
    0,
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10,
    11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
    21, 22, 23, 24, 25, 26, 27, 28, 29, 30,
    31, 32, 33, 34, 35, 36, 37, 38, 39, 40,
    42, 44, 46, 48, 50, 52, 54, 56, 58, 60,
    63, 66, 69, 72, 75, 78, 81, 85, 89, 93,
    97, 101, 106, 111, 116, 121, 127, 133, 139, 145,
    152, 159, 166, 174, 182, 191, 200, 210, 220, 231,
    242, 254, 266, 279, 292, 306, 321, 337, 353, 370,
    388, 407, 427, 448, 470, 493, 517, 542, 569, 597,
    626, 657, 689, 723, 759, 796, 835, 876, 919, 964,
    1010, 1060, 1110, 1170, 1220, 1280, 1350, 1420, 1490, 1560,
    1640, 1720, 1810, 1900, 1990, 2090, 2190, 2300, 2420, 2540,
    2670, 2800, 2940, 3090, 3240, 3400, 3570, 3750, 3940, 4130,
    4340, 4560, 4790, 5020, 5280, 5540, 5820, 6110, 6410, 6730,
    7070, 7420, 7790, 8180, 8590, 9020, 9470, 9940, 10400, 10900,
    11500, 12000, 12600, 13300, 13900, 14600, 15400, 16100, 17000, 17800,
    18700, 19600, 20600, 21700, 22700, 23900, 25100, 26300, 27600, 29000,
    30500, 32000, 33600, 35300, 37100, 38900, 40900, 42900, 45100, 47300,
    49700, 52200, 54800, 57500, 60400, 63400, 66600, 69900, 73400, 77100,
    81000, 85000, 89300, 93700, 98400, 103000, 108000, 113000, 119000, 125000,
    131000, 138000, 145000, 152000, 160000, 168000, 176000, 185000, 194000, 204000,
    214000, 225000, 236000, 248000, 261000, 274000, 287000, 302000, 317000, 333000,
    350000, 367000, 385000, 405000, 425000, 446000, 469000, 492000, 517000, 543000,
    570000, 598000, 628000, 660000, 693000, 727000, 764000, 802000, 842000, 884000,
    928000, 975000, 1023000, 1075000, 1128000, 1185000, 1244000, 1306000, 1372000, 1440000,
    1512000, 1588000, 1667000, 1751000, 1838000, 1930000, 2027000, 2128000, 2235000, 2346000,
    2464000, 2587000, 2716000, 2852000, 2995000, 3145000, 3302000, 3467000, 3640000, 3822000,
    4014000, 4214000, 4425000, 4646000, 4879000, 5123000, 5379000, 5648000, 5930000, 6227000,
    6538000, 6865000, 7208000, 7569000, 7947000, 8345000, 8762000, 9200000, 9660000, 10143000,
    10650000, 11183000, 11742000, 12329000, 12945000, 13593000, 14272000, 14986000, 15735000, 16522000,
    17348000, 18216000, 19127000, 20083000, 21087000, 22141000, 23249000, 24411000, 25632000, 26913000,
    28259000, 29672000, 31155000, 32713000, 34349000, 36066000, 37870000, 39763000, 41751000, 43839000,
    46031000, 48883000, 50749000, 53287000, 55951000, 58749000, 61686000, 64771000, 68009000, 71410000,
    74980000, 78729000, 82666000, 86799000, 91139000, 95696000, 100481000, 105505000, 110781000, 116320000,
    121860000, 127400000, 132950000, 138000000, 144050000, 149600000, 155150000, 160000000, 166250000, 171800000,
    177350000, 182900000, 188450000, 194000000, 200000000,];

/// Value of a land grade.
///
/// The grade is rounded to the nearest integer; grades below 1 are worth 0
/// and grades past the end of the table take the last value.
pub fn grade_value(grade: Decimal) -> Decimal {
    let rounded = grade.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded < Decimal::ONE {
        return Decimal::ZERO;
    }
    let last = LAND_GRADE_TABLE.len() - 1;
    let index = rounded.to_usize().unwrap_or(last).min(last);
    Decimal::from(LAND_GRADE_TABLE[index])
}

/// Per-m² official value at acquisition derived from land grades.
///
/// floor(base × grade(acquisition) ÷ ((grade(1990-08-30) + grade(before)) ÷ 2)),
/// or 0 when the averaged grade value is 0.
pub fn pre1990_unit_price(
    base_unit_price_1990: Decimal,
    acquisition_grade: Decimal,
    grade_1990: Decimal,
    grade_before_1990: Decimal,
) -> Decimal {
    LandGradeConversion::new(
        base_unit_price_1990,
        acquisition_grade,
        grade_1990,
        grade_before_1990,
    )
    .unit_price
}

/// Intermediate values of a land-grade conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LandGradeConversion {
    pub acquisition_value: Decimal,
    pub value_1990: Decimal,
    pub value_before_1990: Decimal,
    /// Average of the two 1990 grade values
    pub denominator: Decimal,
    pub unit_price: Decimal,
}

impl LandGradeConversion {
    pub fn new(
        base_unit_price_1990: Decimal,
        acquisition_grade: Decimal,
        grade_1990: Decimal,
        grade_before_1990: Decimal,
    ) -> Self {
        let acquisition_value = grade_value(acquisition_grade);
        let value_1990 = grade_value(grade_1990);
        let value_before_1990 = grade_value(grade_before_1990);
        let denominator = (value_1990 + value_before_1990) / dec!(2);
        let unit_price = prorate(base_unit_price_1990, acquisition_value, denominator);

        LandGradeConversion {
            acquisition_value,
            value_1990,
            value_before_1990,
            denominator,
            unit_price,
        }
    }

    pub fn from_grades(grades: &LandGrades) -> Self {
        Self::new(
            grades.base_unit_price_1990,
            grades.at_acquisition,
            grades.at_1990_aug_30,
            grades.before_1990_aug_30,
        )
    }

    /// Acquisition-time official value of `area` m²
    pub fn total(&self, area: Decimal) -> Decimal {
        floor_product(self.unit_price, area)
    }
}

impl LandGrades {
    /// All four conversion inputs were supplied
    pub fn is_complete(&self) -> bool {
        self.base_unit_price_1990 > Decimal::ZERO
            && self.at_acquisition > Decimal::ZERO
            && self.at_1990_aug_30 > Decimal::ZERO
            && self.before_1990_aug_30 > Decimal::ZERO
    }
}
