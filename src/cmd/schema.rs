//! Schema command - print the expected input format

use clap::Args;
use schemars::schema_for;
use yangdo::core::{
    AcquisitionCosts, BurdenGift, Expenses, InputField, LandGrades, TransactionInput,
};

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the transaction input
    JsonSchema,
    /// Field names, kinds and descriptions
    Fields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Fields => {
                self.print_fields();
                Ok(())
            }
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(TransactionInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_fields(&self) {
        println!("Transaction Input Format");
        println!("========================");
        println!("Amounts accept numbers or strings with thousands separators (\"1,250,000\").");
        println!("Dates are YYYY-MM-DD; anything else is treated as no date.");
        print_section("transaction", TransactionInput::field_schema());
        print_section("acquisition_costs", AcquisitionCosts::field_schema());
        print_section("expenses", Expenses::field_schema());
        print_section("land_grades", LandGrades::field_schema());
        print_section("burden_gift", BurdenGift::field_schema());
    }
}

fn print_section(title: &str, fields: &[InputField]) {
    println!();
    println!("[{}]", title);
    for field in fields {
        println!("{:32} {:18} {}", field.name, field.kind, field.description);
    }
}
