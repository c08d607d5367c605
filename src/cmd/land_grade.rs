//! Land-grade command - preview the pre-1990 conversion

use clap::Args;
use rust_decimal::Decimal;
use yangdo::core::format_won;
use yangdo::tax::LandGradeConversion;

#[derive(Args, Debug)]
pub struct LandGradeCommand {
    /// Official unit price per m² as of 1990-01-01
    #[arg(long)]
    base: Decimal,

    /// Land grade at acquisition
    #[arg(long)]
    acquisition_grade: Decimal,

    /// Land grade as of 1990-08-30
    #[arg(long)]
    grade_1990: Decimal,

    /// Land grade immediately before 1990-08-30
    #[arg(long)]
    grade_before_1990: Decimal,

    /// Land area in m²; prints the total official value as well
    #[arg(long)]
    area: Option<Decimal>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl LandGradeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let conversion = LandGradeConversion::new(
            self.base,
            self.acquisition_grade,
            self.grade_1990,
            self.grade_before_1990,
        );
        let total = self.area.map(|area| conversion.total(area));

        if self.json {
            let value = serde_json::json!({
                "conversion": conversion,
                "total": total,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!(
            "Grade values: acquisition {}, 1990-08-30 {}, before {}",
            format_won(conversion.acquisition_value),
            format_won(conversion.value_1990),
            format_won(conversion.value_before_1990)
        );
        if conversion.denominator.is_zero() {
            println!("1990 grade values are 0; no conversion possible");
        }
        println!("Unit price at acquisition: {}", format_won(conversion.unit_price));
        if let (Some(area), Some(total)) = (self.area, total) {
            println!("Official value ({} m²): {}", area, format_won(total));
        }
        Ok(())
    }
}
