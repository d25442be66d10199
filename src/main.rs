//! LRU TTL Cache - sample program
//!
//! Builds a cache from environment configuration, walks through the basic
//! operations, then hammers it from concurrent tasks and prints statistics.

use std::sync::Arc;

use anyhow::{ensure, Context};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::{CacheConfig, EvictionCache};

const WORKERS: usize = 4;
const OPS_PER_WORKER: usize = 1_000;
const KEY_SPACE: usize = 64;

type SharedCache = Arc<EvictionCache<String, String>>;

/// Main entry point for the sample program.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Run the add/get/remove walkthrough
/// 4. Drive the cache from concurrent workers
/// 5. Print the final statistics as JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env().context("Failed to load cache configuration")?;
    info!(
        "Configuration loaded: capacity={}, ttl={}s",
        config.capacity, config.ttl_secs
    );

    let cache: SharedCache = Arc::new(EvictionCache::from_config(&config)?);

    walkthrough(&cache)?;
    run_workers(cache.clone()).await?;

    let stats = cache.stats();
    info!(
        "Workload finished: hit_rate={:.2}, evictions={}",
        stats.hit_rate(),
        stats.evictions
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Adds, reads and removes a single key.
fn walkthrough(cache: &SharedCache) -> anyhow::Result<()> {
    cache.add("key1".to_string(), "value".to_string());

    let value = cache.get("key1").context("key1 not found after add")?;
    ensure!(value == "value", "unexpected value for key1: {}", value);
    info!("get: {}", value);

    cache.remove("key1");
    ensure!(cache.is_empty(), "unexpected length: {}", cache.len());

    Ok(())
}

/// Spawns workers that mix writes and reads over a shared key space.
async fn run_workers(cache: SharedCache) -> anyhow::Result<()> {
    let mut handles = Vec::with_capacity(WORKERS);

    for worker in 0..WORKERS {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            let mut evictions = 0usize;
            for op in 0..OPS_PER_WORKER {
                let key = format!("key-{}", (op * (worker + 1)) % KEY_SPACE);
                if op % 3 == 0 {
                    if cache.add(key, format!("worker-{}-op-{}", worker, op)) {
                        evictions += 1;
                    }
                } else {
                    cache.get(&key);
                }
            }
            debug!("Worker {} done, caused {} evictions", worker, evictions);
        }));
    }

    for handle in handles {
        handle.await.context("Worker task panicked")?;
    }

    Ok(())
}
