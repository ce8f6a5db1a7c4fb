//! Presence sweeper entry point
//!
//! Run with:
//! ```bash
//! cargo run -p pulse-sweeper
//! ```
//!
//! Periodically transitions users who are marked online but have been
//! inactive past the configured threshold to offline, fanning each
//! transition out to the broadcast channels. Configuration is loaded from
//! environment variables.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use pulse_cache::{RedisActivityGate, RedisPool, RedisPoolConfig, RedisPublisher};
use pulse_common::{try_init_tracing, AppConfig};
use pulse_db::{
    create_pool, DatabaseConfig, PgPresenceRepository, PgRoomRepository, PgVotableRepository,
    PgVoteRepository,
};
use pulse_service::{PresenceService, ServiceContextBuilder};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Sweeper failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting presence sweeper...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        interval_mins = config.presence.sweep_interval_mins,
        threshold_mins = config.presence.offline_threshold_mins,
        "Configuration loaded"
    );

    let pg_pool = create_pool(&DatabaseConfig::from_app_config(&config.database)).await?;
    let redis_pool = RedisPool::new(RedisPoolConfig::from(&config.redis))?;
    redis_pool.health_check().await?;

    let ctx = ServiceContextBuilder::new()
        .vote_repo(Arc::new(PgVoteRepository::new(pg_pool.clone())))
        .votable_repo(Arc::new(PgVotableRepository::new(pg_pool.clone())))
        .presence_repo(Arc::new(PgPresenceRepository::new(pg_pool.clone())))
        .room_repo(Arc::new(PgRoomRepository::new(pg_pool)))
        .activity_gate(Arc::new(RedisActivityGate::new(
            redis_pool.clone(),
            config.presence.activity_ttl_secs,
        )))
        .publisher(Arc::new(RedisPublisher::new(redis_pool)))
        .presence_config(config.presence.clone())
        .build()?;

    let interval_secs = config.presence.sweep_interval_mins.max(1) * 60;
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    // First tick fires immediately; sweep once on startup, then on schedule
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let service = PresenceService::new(&ctx);
                match service.cleanup_offline().await {
                    Ok(swept) => info!(swept, "Sweep completed"),
                    Err(e) => warn!(error = %e, "Sweep failed, will retry next interval"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping sweeper");
                break;
            }
        }
    }

    Ok(())
}
