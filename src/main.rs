//! # Shopwright Command Line Entry Point
//!
//! Loads catalogs and actors from JSON, generates a shop, and prints it as JSON.

use clap::Parser;
use log::{error, info, warn};
use shopwright::config::{DEFAULT_BASE_PRICE_PERCENT, DEFAULT_MAX_ITEMS, DEFAULT_MIN_ITEMS};
use shopwright::{
    create_rng, DicePoolCheckEngine, InMemoryActors, InMemoryCatalog, ShopConfiguration,
    ShopError, ShopGenerator, ShopRequest, ShopResult,
};
use std::fs;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Command line arguments for the shop generator.
#[derive(Parser, Debug)]
#[command(name = "shopwright")]
#[command(about = "Generates a randomized shop inventory from item catalogs")]
#[command(version)]
struct Args {
    /// JSON file of catalogs, keyed by catalog id
    #[arg(long)]
    catalog: PathBuf,

    /// JSON file of actor sheets, keyed by actor id
    #[arg(long)]
    actors: PathBuf,

    /// JSON shop request; replaces the individual shop flags below
    #[arg(long)]
    request: Option<PathBuf>,

    /// Shop type (general, armor, gear, weapon, nerf_herder)
    #[arg(long, default_value = "general")]
    shop_type: String,

    /// Location modifier (minus_two .. plus_four, or -2 .. 4)
    #[arg(long, default_value = "no_change", allow_hyphen_values = true)]
    location: String,

    /// Lower bound on the number of items
    #[arg(long, default_value_t = DEFAULT_MIN_ITEMS)]
    min_items: usize,

    /// Upper bound on the number of items
    #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
    max_items: usize,

    /// Stock restricted items
    #[arg(long)]
    shady: bool,

    /// Actor whose skills are rolled to find items
    #[arg(long)]
    actor: Option<String>,

    /// Price percentage (100 is unchanged)
    #[arg(long, default_value_t = DEFAULT_BASE_PRICE_PERCENT)]
    base_price: u32,

    /// Random seed for reproducible shops
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ShopResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Shopwright v{}", shopwright::VERSION);

    let result = run(args).await;
    if let Err(e) = &result {
        error!("Generation failed: {}", e);
    }
    result
}

/// Initializes `env_logger`, letting `RUST_LOG` override the requested level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn build_request(args: &Args) -> ShopResult<ShopRequest> {
    if let Some(path) = &args.request {
        let contents = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&contents)?);
    }

    Ok(ShopRequest {
        shady: args.shady,
        shop_type: args.shop_type.clone(),
        min_items: args.min_items,
        max_items: args.max_items,
        location: args.location.clone(),
        actor: args.actor.clone().unwrap_or_default(),
        base_price: args.base_price,
        seed: args.seed,
    })
}

async fn run(args: Args) -> ShopResult<()> {
    let config = ShopConfiguration::try_from(build_request(&args)?)?;
    let catalog = InMemoryCatalog::load(&args.catalog)?;
    let actors = InMemoryActors::load(&args.actors)?;
    if !actors.contains(config.checking_actor()) {
        return Err(ShopError::ActorUnavailable(format!(
            "unknown actor '{}' in {}",
            config.checking_actor(),
            args.actors.display()
        )));
    }
    let checks = DicePoolCheckEngine::new(
        actors,
        create_rng(config.seed().map(|seed| seed.wrapping_add(1))),
    );

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, keeping the items found so far");
            on_interrupt.cancel();
        }
    });

    let generator = ShopGenerator::new(&catalog, &checks);
    let inventory = generator.generate_until(&config, &cancel).await?;

    info!(
        "Generated {} items worth {} credits",
        inventory.len(),
        inventory.total_price()
    );
    println!("{}", serde_json::to_string_pretty(&inventory)?);
    Ok(())
}
