use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use city_livability::filters::WindowSpec;
use city_livability::report::{render_city_report, render_comparison_report};
use city_livability::session::{AnalysisSession, Dataset};

#[derive(Parser, Debug)]
#[command(name = "city_livability")]
#[command(
    about = "Daily weather/pollution analytics and livability scoring for city datasets",
    long_about = None
)]
struct Args {
    /// Path to the JSON dataset (an array of records, or {"records": [...]})
    #[arg(long, env = "DATASET_FILE", default_value = "WeatherAndPollution.json")]
    data: PathBuf,

    /// City to analyze (case-insensitive substring match)
    #[arg(long)]
    city: Option<String>,

    /// First city of a two-city comparison
    #[arg(long)]
    city1: Option<String>,

    /// Second city of a two-city comparison
    #[arg(long)]
    city2: Option<String>,

    /// Trailing window in days, or "all"
    #[arg(long, default_value = "all")]
    window: String,

    /// Emit the analysis as pretty JSON instead of a text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("city_livability=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let window = WindowSpec::parse(&args.window);

    let dataset = Dataset::from_path(&args.data)
        .with_context(|| format!("Could not load dataset from {}", args.data.display()))?;
    let session = AnalysisSession::new(dataset);

    let city = trimmed(args.city.as_deref());
    let city1 = trimmed(args.city1.as_deref());
    let city2 = trimmed(args.city2.as_deref());

    match (city, city1, city2) {
        (Some(city), None, None) => {
            info!("Analyzing city '{}'", city);
            match session.analyze_city(city, window) {
                Ok(analysis) => {
                    if args.json {
                        println!("{}", serde_json::to_string_pretty(&analysis)?);
                    } else {
                        println!("{}", render_city_report(&analysis));
                    }
                }
                Err(outcome) => println!("{}", outcome),
            }
        }
        (_, Some(first), Some(second)) => {
            info!("Comparing '{}' and '{}'", first, second);
            match session.compare(first, second, window) {
                Ok(analysis) => {
                    if args.json {
                        println!("{}", serde_json::to_string_pretty(&analysis)?);
                    } else {
                        println!("{}", render_comparison_report(&analysis));
                    }
                }
                Err(outcome) => println!("{}", outcome),
            }
        }
        _ => {
            println!("No city query. Use --city Delhi or --city1 Delhi --city2 Mumbai.");
        }
    }

    Ok(())
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
