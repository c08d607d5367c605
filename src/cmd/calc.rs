//! Calc command - full breakdown for a single disposal

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};
use yangdo::core::{format_rate, format_won};
use yangdo::tax::{compute_tax, TaxResult};

use super::read_input;

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// JSON file describing the transaction ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output the full result as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output line items as CSV
    #[arg(long)]
    csv: bool,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_input(&self.input)?;
        let result = compute_tax(&input);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        let items = line_items(&result);
        if self.csv {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for item in &items {
                wtr.serialize(item)?;
            }
            wtr.flush()?;
        } else {
            print_breakdown(&result, &items);
        }
        Ok(())
    }
}

/// One row of the breakdown
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LineItem {
    #[tabled(rename = "Section")]
    pub section: &'static str,

    #[tabled(rename = "Item")]
    pub item: String,

    #[tabled(rename = "Amount")]
    pub amount: String,

    #[tabled(rename = "Note")]
    pub note: String,
}

fn item(section: &'static str, item: &str, amount: Decimal, note: impl Into<String>) -> LineItem {
    LineItem {
        section,
        item: item.to_string(),
        amount: format_won(amount),
        note: note.into(),
    }
}

pub fn line_items(r: &TaxResult) -> Vec<LineItem> {
    let mut items = vec![
        item("Gain", "Disposal price", r.disposal_price, ""),
        item(
            "Gain",
            "Acquisition price",
            r.acquisition_price,
            r.acquisition_label.display(),
        ),
        item("Gain", "Expenses", r.expense, r.expense_label.display()),
        item("Gain", "Gain", r.gain.raw, ""),
    ];

    if r.gain.exempt > Decimal::ZERO || r.gain.taxable != r.gain.raw {
        items.push(item(
            "Gain",
            "Exempt gain",
            r.gain.exempt,
            format!("threshold {}", format_won(r.high_value_threshold)),
        ));
    }
    items.push(item("Gain", "Taxable gain", r.gain.taxable, ""));

    items.push(item(
        "Income",
        "Long-term deduction",
        r.long_term.amount,
        format!(
            "{} {} (held {})",
            r.long_term.table.display(),
            format_rate(r.long_term.rate),
            r.holding.for_deduction
        ),
    ));
    items.push(item("Income", "Income amount", r.income.current, ""));
    if r.income.aggregated {
        items.push(item("Income", "Prior income amount", r.income.prior, "aggregated"));
        items.push(item("Income", "Total income amount", r.income.total, ""));
    }
    items.push(item("Income", "Basic deduction", r.income.basic_deduction, ""));
    items.push(item("Income", "Tax base", r.income.tax_base, ""));

    for candidate in &r.computed.candidates {
        let chosen = if candidate.basis == r.computed.basis {
            " (applied)"
        } else {
            ""
        };
        items.push(item(
            "Tax",
            candidate.basis.display(),
            candidate.tax,
            format!("{}{}", format_rate(candidate.rate), chosen),
        ));
    }
    items.push(item(
        "Tax",
        "Computed tax",
        r.computed.tax,
        format!("held {}", r.holding.for_rate),
    ));

    if r.exemption.amount > Decimal::ZERO {
        let note = match r.exemption.rate {
            Some(rate) => format!("{} {}", r.exemption.program.display(), format_rate(rate)),
            None => r.exemption.program.display().to_string(),
        };
        items.push(item("Tax", "Reduction", r.exemption.amount, note));
    }
    items.push(item("Tax", "Decided tax", r.decided_tax, ""));
    if r.construction_penalty > Decimal::ZERO {
        items.push(item(
            "Tax",
            "New construction penalty",
            r.construction_penalty,
            "5% of converted price",
        ));
    }
    if r.initial_income_tax > Decimal::ZERO {
        items.push(item("Tax", "Originally reported", r.initial_income_tax, ""));
    }
    items.push(item(
        "Tax",
        "Penalty",
        r.income_tax_penalty.total,
        r.income_tax_penalty.description.clone(),
    ));
    if r.due.prior_tax > Decimal::ZERO {
        items.push(item("Tax", "Prior declaration tax", r.due.prior_tax, "credited"));
    }
    items.push(item("Tax", "Income tax due", r.income_tax.total, ""));
    items.push(item(
        "Tax",
        "Installment",
        r.income_tax.deferred,
        format!("max {}", format_won(r.income_tax.max)),
    ));

    if r.surtax.total > Decimal::ZERO || r.exemption.surtax > Decimal::ZERO {
        items.push(item("Surtax", "Surtax", r.exemption.surtax, "20% of reduction"));
        items.push(item(
            "Surtax",
            "Penalty",
            r.surtax_penalty.total,
            r.surtax_penalty.description.clone(),
        ));
        items.push(item("Surtax", "Surtax due", r.surtax.total, ""));
        items.push(item(
            "Surtax",
            "Installment",
            r.surtax.deferred,
            format!("max {}", format_won(r.surtax.max)),
        ));
    }

    items.push(item("Payable", "Pay now", r.total_immediate, ""));
    items.push(item("Payable", "Local income tax", r.local_income_tax, "10% of income tax"));
    items
}

fn print_breakdown(result: &TaxResult, items: &[LineItem]) {
    println!();
    match result.deadline {
        Some(deadline) => println!("CAPITAL GAINS TAX (deadline {})", deadline),
        None => println!("CAPITAL GAINS TAX"),
    }
    if result.burden_gift {
        println!("Burden gift: {} of the gift is a disposal", format_rate(result.burden_ratio));
    }
    println!();

    let table = Table::new(items)
        .with(Style::rounded())
        .with(Modify::new(Columns::one(2)).with(Alignment::right()))
        .to_string();
    println!("{}", table);

    if !result.warnings.is_empty() {
        println!();
        println!("Adjustments:");
        for warning in &result.warnings {
            println!("  - {}", warning.message());
        }
    }
    println!();
}
