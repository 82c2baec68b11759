use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use bookarb::arb::{self, Detection};
use bookarb::file::read_json;
use bookarb::money::CURRENCY_DECIMALS;
use bookarb::print::{tabulate_allocation, tabulate_best_prices};
use bookarb::quote::OddsQuote;
use bookarb::stake::StakeAllocation;
use bookarb_feed::client::OddsApiClient;
use bookarb_feed::config::{FeedConfig, OddsFormat, Region};
use bookarb_feed::model::Event;
use bookarb_feed::print::{tabulate_opportunities, tabulate_summary};
use bookarb_feed::scan::{self, ScanReport};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the odds from: a quote object or an array of events
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// download live odds for a sport key (e.g. americanfootball_nfl)
    #[clap(short = 'd', long)]
    download: Option<String>,

    /// comma-separated markets to scan; discovered from the feed if omitted
    #[clap(short = 'm', long, value_delimiter = ',')]
    markets: Option<Vec<String>>,

    /// comma-separated bookmaker regions
    #[clap(short = 'r', long, value_delimiter = ',', default_value = "us")]
    regions: Vec<Region>,

    /// total amount to spread across the outcomes of each arbitrage
    #[clap(short = 'b', long)]
    budget: Option<f64>,

    /// format of the prices in the source data
    #[clap(long, default_value = "decimal")]
    odds_format: OddsFormat,

    /// The Odds API key
    #[clap(long, env = "ODDS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// print the results as JSON rather than tables
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.file.is_none() && self.download.is_none()
            || self.file.is_some() && self.download.is_some()
        {
            bail!("either the -f or the -d flag must be specified");
        }
        if self.download.is_some() && self.api_key.is_none() {
            bail!("an API key is required to download odds (--api-key or ODDS_API_KEY)");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OddsFile {
    Events(Vec<Event>),
    Quote(OddsQuote),
}

#[derive(Debug, Serialize)]
struct QuoteReport {
    detection: Detection,
    allocation: Option<StakeAllocation>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let start_time = Instant::now();
    if let Some(path) = &args.file {
        match read_json::<OddsFile>(path)? {
            OddsFile::Quote(quote) => analyse_quote(&args, &quote)?,
            OddsFile::Events(events) => {
                info!("read {} events from {path:?}", events.len());
                let snapshots = scan::snapshots_of(&events, args.odds_format);
                let report = scan::evaluate(snapshots, args.budget)?;
                print_report(&args, &report)?;
            }
        }
    } else if let Some(sport) = &args.download {
        let report = download(&args, sport).await?;
        print_report(&args, &report)?;
    }
    debug!("took {:.3}s", start_time.elapsed().as_millis() as f64 / 1_000.);
    Ok(())
}

fn analyse_quote(args: &Args, quote: &OddsQuote) -> anyhow::Result<()> {
    let detection = arb::detect(quote)?;
    let allocation = match (detection.arbitrage(), args.budget) {
        (Some(arbitrage), Some(budget)) => Some(arbitrage.allocate(budget)?.rounded(CURRENCY_DECIMALS)),
        _ => None,
    };

    if args.json {
        let report = QuoteReport { detection, allocation };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}",
        Console::default().render(&tabulate_best_prices(detection.best_prices()))
    );
    match detection.arbitrage() {
        Some(arbitrage) => println!(
            "arbitrage: Σ={:.4}, profit={:.2}%",
            arbitrage.implied_sum, arbitrage.profit_pct
        ),
        None => println!("no arbitrage: Σ={:.4}", detection.implied_sum()),
    }
    if let Some(allocation) = &allocation {
        println!("{}", Console::default().render(&tabulate_allocation(allocation)));
    }
    Ok(())
}

async fn download(args: &Args, sport: &str) -> anyhow::Result<ScanReport> {
    let api_key = args
        .api_key
        .clone()
        .ok_or_else(|| anyhow!("missing API key"))?;
    let config = FeedConfig::new(api_key)
        .with_regions(args.regions.clone())
        .with_odds_format(args.odds_format);
    let client = OddsApiClient::new(config)?;

    let markets = match &args.markets {
        Some(markets) => markets.clone(),
        None => {
            let markets = client.discover_markets(sport).await?;
            info!("discovered markets for {sport}: {markets:?}");
            markets
        }
    };
    let report = scan::scan(&client, sport, &markets, args.budget).await?;
    debug!("cache stats: {:?}", client.cache_stats().await);
    Ok(report)
}

fn print_report(args: &Args, report: &ScanReport) -> anyhow::Result<()> {
    let report = report.rounded(CURRENCY_DECIMALS);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", Console::default().render(&tabulate_summary(&report)));
    if report.opportunities.is_empty() {
        println!("no arbitrage opportunities found");
        return Ok(());
    }
    println!(
        "{}",
        Console::default().render(&tabulate_opportunities(&report.opportunities))
    );
    for opportunity in &report.opportunities {
        if let Some(allocation) = &opportunity.allocation {
            println!("{} [{}]", opportunity.event, opportunity.market);
            println!("{}", Console::default().render(&tabulate_allocation(allocation)));
        }
    }
    Ok(())
}
