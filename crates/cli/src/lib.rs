pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "outfitter",
    about = "Outfitter operator CLI",
    long_about = "Apply migrations, load the demo catalog, inspect config, run outfit queries.",
    after_help = "Examples:\n  outfitter seed\n  outfitter outfit brand\n  outfitter outfit range --category top"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the demo catalog fixtures if the catalog is empty, then verify them")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Answer an outfit query against the configured catalog")]
    Outfit {
        #[command(subcommand)]
        query: OutfitQuery,
    },
}

#[derive(Debug, Subcommand)]
enum OutfitQuery {
    #[command(about = "Cheapest item in every category")]
    Category,
    #[command(about = "Cheapest complete outfit from a single brand")]
    Brand,
    #[command(about = "Cheapest and most expensive item of one category")]
    Range {
        #[arg(long, help = "Category name, case-insensitive")]
        category: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Outfit { query } => match query {
            OutfitQuery::Category => {
                commands::outfit::run(commands::outfit::Query::LowestByCategory)
            }
            OutfitQuery::Brand => commands::outfit::run(commands::outfit::Query::LowestByBrand),
            OutfitQuery::Range { category } => {
                commands::outfit::run(commands::outfit::Query::PriceRange { category })
            }
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
