//! Recipe Finder - search recipes through a caching front end
//!
//! Runs the JSON HTTP server by default, or performs a single search or
//! recipe lookup from the command line.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recipefinder::cli::{Cli, Command};
use recipefinder::config::Config;
use recipefinder::data::{RecipeDetails, RecipeSummary};
use recipefinder::server;

/// Installs the fmt subscriber, filtered by `RUST_LOG` when set.
/// Logs go to stderr so command output on stdout stays clean.
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recipefinder=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_results(results: &[RecipeSummary]) {
    if results.is_empty() {
        println!("No recipes found.");
        return;
    }
    for recipe in results {
        println!(
            "{:>8}  {}",
            recipe.id,
            recipe.title.as_deref().unwrap_or("(untitled)")
        );
    }
}

fn print_recipe(recipe: &RecipeDetails) {
    println!("{}", recipe.title);
    println!("Preparation time: {} minutes", recipe.ready_in_minutes);
    println!("Servings: {}", recipe.servings);
    println!();
    println!("Ingredients");
    for line in recipe.ingredients() {
        println!("  - {}", line);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_cli(&cli)?;
    let service = config.build_service()?;

    match cli.command.clone().unwrap_or_default() {
        Command::Serve { bind } => {
            server::serve(bind, Arc::new(service)).await?;
        }
        command @ Command::Search { .. } => {
            let params = command.search_params().unwrap_or_default();
            let results = service.search(&params).await?;
            print_results(&results);
        }
        Command::Show { id } => {
            let recipe = service.recipe(&id).await?;
            print_recipe(&recipe);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    // Flatten to the message so the exit report reads `Error: "<message>"`.
    run(cli).await.map_err(|e| e.to_string().into())
}
