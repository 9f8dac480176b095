//! FitAuth Server: identity and access control for the fitness club platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use fitauth_api::{AppState, build_app};
use fitauth_auth::notify::LogNotifier;
use fitauth_auth::{AccessGuard, AuthService, OtpManager, TokenIssuer};
use fitauth_core::config::AppConfig;
use fitauth_core::error::AppError;
use fitauth_core::traits::{Clock, SystemClock};
use fitauth_database::{
    AccountRepository, AccountStore, DatabasePool, MemoryAccountStore, MemoryOtpStore,
    OtpRepository, OtpStore,
};

/// How often expired verification codes are swept.
const OTP_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    let env = std::env::var("FITAUTH_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FitAuth v{}", env!("CARGO_PKG_VERSION"));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // ── Step 1: Stores ───────────────────────────────────────────
    let (accounts, otp_store) = init_stores(&config, Arc::clone(&clock)).await?;

    // ── Step 2: Auth system ──────────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let tokens = Arc::new(TokenIssuer::new(&config.auth, Arc::clone(&clock)));
    let otp = Arc::new(OtpManager::new(otp_store, Arc::clone(&clock), &config.otp)?);
    let auth = Arc::new(AuthService::new(
        accounts,
        otp,
        Arc::new(LogNotifier),
        Arc::clone(&tokens),
        Arc::clone(&clock),
        &config.auth,
        &config.otp,
    )?);
    let guard = Arc::new(AccessGuard::new(tokens));

    if config.auth.bootstrap_admin.is_some() {
        tracing::info!("Bootstrap admin login enabled on the dashboard");
    }

    // ── Step 3: HTTP server ──────────────────────────────────────
    let app = build_app(AppState::new(auth, guard), &config.server.cors);
    fitauth_api::serve(app, &config.server.bind_address()).await
}

/// Selects PostgreSQL when a database URL is configured, memory otherwise,
/// and starts the sweeper for expired verification codes.
async fn init_stores(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<(Arc<dyn AccountStore>, Arc<dyn OtpStore>), AppError> {
    if config.database.is_configured() {
        tracing::info!("Connecting to database...");
        let db = DatabasePool::connect(&config.database).await?;
        fitauth_database::migration::run_migrations(db.pool()).await?;

        let otp_repo = OtpRepository::new(db.pool().clone());
        let sweeper = otp_repo.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(OTP_PURGE_INTERVAL);
            loop {
                ticker.tick().await;
                match sweeper.purge_expired(clock.now()).await {
                    Ok(0) => {}
                    Ok(n) => tracing::debug!(purged = n, "Purged expired verification codes"),
                    Err(e) => tracing::warn!(error = %e, "Failed to purge verification codes"),
                }
            }
        });

        Ok((
            Arc::new(AccountRepository::new(db.pool().clone())),
            Arc::new(otp_repo),
        ))
    } else {
        tracing::warn!("No database configured; accounts are kept in memory only");

        let otp_store = MemoryOtpStore::new();
        let sweeper = otp_store.clone();
        let sweep_clock = Arc::clone(&clock);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(OTP_PURGE_INTERVAL);
            loop {
                ticker.tick().await;
                let purged = sweeper.purge_expired(sweep_clock.now());
                if purged > 0 {
                    tracing::debug!(purged, "Purged expired verification codes");
                }
            }
        });

        Ok((
            Arc::new(MemoryAccountStore::with_clock(clock)),
            Arc::new(otp_store),
        ))
    }
}
