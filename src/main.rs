use chrono::{Local, NaiveDate};
use clap::Parser;
use offerpress::{InMemoryCatalog, OfferError, OfferGenerator, OfferInput};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Render a PV offer from a template directory and an offer record
#[derive(Parser, Debug)]
#[command(name = "offerpress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Template directory containing coords/ and bg/
    #[arg(long, value_name = "DIR")]
    templates: PathBuf,

    /// Offer record (customer, project_details, analysis, company) as JSON
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Product catalog as a JSON object keyed by model name
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// PDF whose pages are appended after the offer pages
    #[arg(long, value_name = "FILE")]
    appendix: Option<PathBuf>,

    /// Layout and naming overrides as JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Offer date printed in the footer (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Where to write the composed PDF
    #[arg(long, short, value_name = "FILE")]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), OfferError> {
    log::info!("Loading offer record from {}", cli.input.display());
    let input: OfferInput = serde_json::from_str(&fs::read_to_string(&cli.input)?)?;

    let mut builder = OfferGenerator::builder()
        .with_template_dir(&cli.templates)
        .with_offer_date(cli.date.unwrap_or_else(|| Local::now().date_naive()));

    if let Some(path) = &cli.catalog {
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        let catalog = InMemoryCatalog::from_json(&value)?;
        log::info!("Loaded {} catalog products from {}", catalog.len(), path.display());
        builder = builder.with_catalog(Arc::new(catalog));
    }
    if let Some(path) = &cli.config {
        builder = builder.with_config_file(path)?;
    }
    let generator = builder.build()?;

    let appendix = cli.appendix.as_ref().map(fs::read).transpose()?;
    generator.generate_to_file(&input, appendix.as_deref(), &cli.output)?;

    log::info!("Successfully generated {}", cli.output.display());
    Ok(())
}
