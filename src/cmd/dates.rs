//! Deadline and holding-period lookups

use anyhow::anyhow;
use chrono::NaiveDate;
use clap::Args;
use yangdo::core::dates::parse_date;
use yangdo::core::{period_between, statutory_deadline};

fn date_arg(s: &str) -> anyhow::Result<NaiveDate> {
    parse_date(s).ok_or_else(|| anyhow!("invalid date '{}', expected YYYY-MM-DD", s))
}

#[derive(Args, Debug)]
pub struct DeadlineCommand {
    /// Disposal date (YYYY-MM-DD)
    date: String,
}

impl DeadlineCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let disposal = date_arg(&self.date)?;
        let deadline = statutory_deadline(disposal)
            .ok_or_else(|| anyhow!("no filing deadline for {}", disposal))?;
        println!("{}", deadline);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PeriodCommand {
    /// Start date (YYYY-MM-DD)
    start: String,

    /// End date (YYYY-MM-DD)
    end: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl PeriodCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let start = date_arg(&self.start)?;
        let end = date_arg(&self.end)?;
        let period = period_between(Some(start), Some(end));
        if self.json {
            println!("{}", serde_json::to_string(&period)?);
        } else {
            println!("{} years ({} days)", period.years, period.days);
        }
        Ok(())
    }
}
