//! Converter CLI
//!
//! Command-line interface for the converter API, plus an offline converter
//! that works from a local rates file.

mod local;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use converter_client::ConverterClient;
use converter_types::CurrencyCode;

use local::{RatesFile, format_result};

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "BRL converter CLI client", long_about = None)]
struct Cli {
    /// Base URL of the converter API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Convert a BRL amount through the API (stored in history)
    #[command(allow_negative_numbers = true)]
    Convert {
        /// Amount in BRL
        amount: f64,
        /// Target currency code (case-sensitive, e.g. USD)
        currency: String,
    },
    /// Show the most recent conversions
    History,
    /// Show rate variation for a currency
    Variation {
        /// Currency code
        currency: String,
    },
    /// Convert offline using a rates file
    Local {
        /// Amount in the file's base currency
        amount: f64,
        /// Target currency code
        currency: String,
        /// Path to the `{base, date, rates}` JSON file
        #[arg(long, env = "CONVERTER_RATES_FILE", default_value = "rates.json")]
        rates_file: PathBuf,
    },
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    Ok(CurrencyCode::parse(s)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ConverterClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Convert { amount, currency } => {
            let code = parse_currency(&currency)?;
            let converted = client.convert(&code, amount).await?;
            println!("{}", format_result(converted, code.as_str()));
        }

        Commands::History => {
            let records = client.recent().await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Commands::Variation { currency } => {
            let code = parse_currency(&currency)?;
            let variations = client.variation(&code).await?;
            println!("{}", serde_json::to_string_pretty(&variations)?);
        }

        Commands::Local {
            amount,
            currency,
            rates_file,
        } => {
            let rates = RatesFile::load(&rates_file)?;
            let result = rates.convert(amount, &currency)?;
            println!("{}", format_result(result, &currency));
        }
    }

    Ok(())
}
