//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Replays a recorded session of cache requests and reports the matching size per security.
//--------------------------------------------------------------------------------------------------
// To replay a file: cargo run --bin order-cache-replay -- session.json
// Only some securities: cargo run --bin order-cache-replay -- session.json --security SecId1
// Print the resting orders afterwards: cargo run --bin order-cache-replay -- session.json --dump
//
// The file holds a JSON array of requests, for example:
//   [{"request_type": "place", "order_id": "OrdId1", "security_id": "SecId1", "side": "Buy",
//     "qty": 100, "user": "User1", "company": "CompanyA"},
//    {"request_type": "cancel_user", "user": "User2"}]
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use order_cache::{
    CacheConfig, CacheRequest, OrderCache, OrderCacheService, inbounds::handlers::handle_request,
};

/// Command line arguments for the replay tool
#[derive(Parser, Debug)]
#[command(author, version, about = "Replays cache requests and reports matchable quantity")]
struct Args {
    /// JSON file holding an array of cache requests
    requests: PathBuf,

    /// Security to report on; repeat for several. Defaults to every security left in the cache.
    #[arg(short, long)]
    security: Vec<String>,

    /// Print the resting orders as JSON after matching
    #[arg(long)]
    dump: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = CacheConfig::try_from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let raw = fs::read_to_string(&args.requests)
        .with_context(|| format!("failed to read {}", args.requests.display()))?;
    let requests: Vec<CacheRequest> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", args.requests.display()))?;

    info!("Replaying {} requests from {}", requests.len(), args.requests.display());

    let mut cache = OrderCache::with_config(&config);
    for request in requests {
        handle_request(&mut cache, request);
    }

    info!(
        "{} orders resting across {} securities",
        cache.len(),
        cache.security_count()
    );

    let securities: BTreeSet<String> = if args.security.is_empty() {
        cache
            .get_all_orders()
            .into_iter()
            .map(|order| order.security_id().to_owned())
            .collect()
    } else {
        args.security.into_iter().collect()
    };

    for security_id in &securities {
        let matched = cache.get_matching_size_for_security(security_id);
        println!("{}\t{}", security_id, matched);
    }

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&cache.get_all_orders())?);
    }

    Ok(())
}
