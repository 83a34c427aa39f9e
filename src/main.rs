use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use travel_recommender::models::{BudgetLevel, DestinationType, TypePreference, UserPreferences};
use travel_recommender::ui::{self, TripForm, ViewState};
use travel_recommender::{AppState, BackendClient, RecommenderConfig, TravelRecommender, telemetry, web};

/// Weather-aware travel destination recommendations
#[derive(Debug, Parser)]
#[command(name = "travel-recommender", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the recommendation API
    Serve {
        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fill in the recommendation form and print the results
    Recommend {
        /// City or address to travel from
        #[arg(long)]
        location: String,
        /// Preferred kind of trip (beach, city, cultural, mountain, nature)
        #[arg(long = "type")]
        preferred_type: Option<DestinationType>,
        /// Budget level (low, medium, high)
        #[arg(long)]
        budget: Option<BudgetLevel>,
        /// Activity of interest, may be repeated
        #[arg(long = "activity")]
        activities: Vec<String>,
        /// Base URL of the recommendation API
        #[arg(long, env = "TRAVEL_RECOMMENDER_BACKEND", default_value = "http://localhost:5000")]
        backend: String,
        /// Print the raw recommendations as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the destination catalog
    Destinations,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = RecommenderConfig::load_from_path(cli.config.clone())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    let _telemetry = telemetry::init(&config.logging)?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::from_config(&config)?;
            tracing::info!(
                "Serving {} destinations",
                state.recommender.destinations().len()
            );
            web::run(state, &config.server).await
        }
        Command::Recommend {
            location,
            preferred_type,
            budget,
            activities,
            backend,
            json,
        } => {
            let form = TripForm {
                preferences: UserPreferences {
                    preferred_type: preferred_type
                        .map_or(TypePreference::Blank, TypePreference::Kind),
                    budget_level: budget,
                    activities,
                },
                location,
            };
            let client = BackendClient::new(backend)?;

            if !json {
                print!("{}", ui::render(&ViewState::Loading));
            }
            let state = ui::submit(&client, &form).await;

            match state {
                ViewState::Failed(message) => anyhow::bail!(message),
                ViewState::Loaded(recs) if json => {
                    println!("{}", serde_json::to_string_pretty(&recs)?);
                }
                state => print!("{}", ui::render(&state)),
            }
            Ok(())
        }
        Command::Destinations => {
            let recommender = TravelRecommender::from_config(&config.recommender)
                .context("Failed to load destination catalog")?;
            for d in recommender.destinations() {
                println!(
                    "{:>3}  {:<28} {:<9} {:<13} best in {:<7} budget {}",
                    d.id, d.name, d.kind, d.climate, d.best_season, d.budget_level
                );
            }
            Ok(())
        }
    }
}
