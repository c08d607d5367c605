//! Batch command - one summary row per transaction

use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use yangdo::core::{format_won, input_fingerprint, TransactionInput};
use yangdo::tax::{compute_tax, TaxResult};

use super::read_batch;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// JSON file containing an array of transactions ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let inputs = read_batch(&self.input)?;
        let results = compute_all(&inputs);
        let rows: Vec<_> = results
            .iter()
            .enumerate()
            .map(|(i, (input, result))| BatchRow::new(i + 1, input, result))
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if rows.is_empty() {
            println!("No transactions found");
            return Ok(());
        }
        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}

/// Compute every input, reusing results for identical transactions.
pub fn compute_all(inputs: &[TransactionInput]) -> Vec<(&TransactionInput, TaxResult)> {
    let mut cache: HashMap<String, TaxResult> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let fingerprint = input_fingerprint(input);
            let result = match cache.get(&fingerprint) {
                Some(cached) => {
                    log::debug!("Reusing result for {}", &fingerprint[..12]);
                    cached.clone()
                }
                None => {
                    let result = compute_tax(input);
                    cache.insert(fingerprint, result.clone());
                    result
                }
            };
            (input, result)
        })
        .collect()
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct BatchRow {
    #[tabled(rename = "#")]
    pub row_num: usize,

    #[tabled(rename = "Disposed")]
    pub disposal_date: String,

    #[tabled(rename = "Asset")]
    pub asset: String,

    #[tabled(rename = "Gain")]
    pub gain: String,

    #[tabled(rename = "Tax Base")]
    pub tax_base: String,

    #[tabled(rename = "Tax")]
    pub computed_tax: String,

    #[tabled(rename = "Income Tax Due")]
    pub income_tax: String,

    #[tabled(rename = "Surtax Due")]
    pub surtax: String,

    #[tabled(rename = "Pay Now")]
    pub pay_now: String,

    #[tabled(rename = "Local Tax")]
    pub local_income_tax: String,
}

impl BatchRow {
    fn new(row_num: usize, input: &TransactionInput, result: &TaxResult) -> Self {
        BatchRow {
            row_num,
            disposal_date: input
                .disposal_date
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            asset: input.asset_type.display().to_string(),
            gain: format_won(result.gain.raw),
            tax_base: format_won(result.income.tax_base),
            computed_tax: format_won(result.computed.tax),
            income_tax: format_won(result.income_tax.total),
            surtax: format_won(result.surtax.total),
            pay_now: format_won(result.total_immediate),
            local_income_tax: format_won(result.local_income_tax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn identical_inputs_share_results() {
        let a = TransactionInput {
            disposal_price: dec!(100000000),
            ..Default::default()
        };
        let b = TransactionInput {
            disposal_price: dec!(200000000),
            ..Default::default()
        };
        let inputs = vec![a.clone(), b, a];
        let results = compute_all(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].1, results[2].1);
        assert_ne!(results[0].1, results[1].1);
    }
}
