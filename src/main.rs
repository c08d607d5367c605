use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "yangdo", version, about = "Korean capital gains tax (양도소득세) calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the tax on one disposal
    Calc(cmd::calc::CalcCommand),
    /// Calculate a JSON array of disposals
    Batch(cmd::batch::BatchCommand),
    /// Preliminary return deadline for a disposal date
    Deadline(cmd::dates::DeadlineCommand),
    /// Holding period between two dates
    Period(cmd::dates::PeriodCommand),
    /// Preview a pre-1990 land-grade conversion
    LandGrade(cmd::land_grade::LandGradeCommand),
    /// Print the transaction input format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calc(c) => c.exec(),
        Command::Batch(c) => c.exec(),
        Command::Deadline(c) => c.exec(),
        Command::Period(c) => c.exec(),
        Command::LandGrade(c) => c.exec(),
        Command::Schema(c) => c.exec(),
    }
}
