//! clientePredict
//!
//! Serves Poisson match-outcome probabilities for football fixtures.

use clap::{Parser, Subcommand};
use cliente_predict::{
    api::{self, AppState},
    config::Config,
    data::Aggregator,
    model::ExpectedGoals,
    predict,
    types::{Market, Selection},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cliente-predict")]
#[command(about = "Football match probabilities from historical goal averages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<String>,
    },
    /// List every team in the historical dataset
    Teams,
    /// Price a single fixture
    Predict {
        /// Home team name
        #[arg(long)]
        home: String,
        /// Away team name
        #[arg(long)]
        away: String,
        /// Market code (1x2, over25, btts, spread)
        #[arg(short, long, default_value = "1x2")]
        market: String,
        /// 1x2 selection (home, draw, away)
        #[arg(short, long, default_value = "home")]
        selection: String,
        /// Decimal odds on offer
        #[arg(short, long)]
        odds: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve { bind } => serve(config, bind).await,
        Commands::Teams => show_teams(config),
        Commands::Predict {
            home,
            away,
            market,
            selection,
            odds,
        } => predict_fixture(config, &home, &away, &market, &selection, odds),
    }
}

async fn serve(config: Config, bind: Option<String>) -> anyhow::Result<()> {
    tracing::info!("Starting clientePredict API");

    let aggregator = Arc::new(Aggregator::load(&config.dataset)?);
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let state = Arc::new(AppState::new(aggregator, &config));

    api::start_server(state, &addr).await?;
    Ok(())
}

fn show_teams(config: Config) -> anyhow::Result<()> {
    let aggregator = Aggregator::load(&config.dataset)?;

    println!("\n⚽ {} teams\n", aggregator.list_teams().len());
    for team in aggregator.list_teams() {
        println!("{}", team);
    }

    Ok(())
}

fn predict_fixture(
    config: Config,
    home: &str,
    away: &str,
    market: &str,
    selection: &str,
    odds: Option<f64>,
) -> anyhow::Result<()> {
    let aggregator = Aggregator::load(&config.dataset)?;
    let expected = ExpectedGoals::for_fixture(&aggregator, home, away);

    let parsed_market = match market.parse::<Market>() {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!("{}; pricing the 1x2 home win instead", e);
            None
        }
    };
    let selection = Selection::parse_or_home(selection);

    let outcome = predict::outcome_breakdown(expected, &config.model);
    let prediction = predict::price_market(
        expected,
        parsed_market,
        selection,
        odds,
        &config.model,
        &config.verdict,
    );

    println!("\n📈 {} vs {}\n", home, away);
    println!("Expected goals: {:.2} - {:.2}", expected.home, expected.away);
    println!(
        "1x2: home {:.1}% | draw {:.1}% | away {:.1}%",
        outcome.home * 100.0,
        outcome.draw * 100.0,
        outcome.away * 100.0
    );
    println!("\nMarket: {} ({})", market, selection);
    println!("Probability: {:.4}", prediction.rounded_prob());
    match prediction.rounded_ev() {
        Some(ev) => println!("EV: {:+.3}", ev),
        None => println!("EV: N/A"),
    }
    println!("Pick: {}", prediction.pick.label());

    Ok(())
}
