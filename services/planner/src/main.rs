use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod accounts;
mod error;
mod middleware;
mod models;
mod notes;
mod routes;
mod schedule;
mod session;
mod validation;

use common::store::{StoreConfig, health_check, init_store};

use crate::{accounts::AccountService, session::SessionManager};

/// Name of the user collection file inside the data directory
const USERS_FILE: &str = "users.json";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub sessions: SessionManager,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting planner service");

    // Initialize the user record store
    let store_config = StoreConfig::from_env()?;
    let store = init_store(&store_config, USERS_FILE).await?;

    // Check store accessibility
    if health_check(&store).await? {
        info!("Record store reachable");
    } else {
        anyhow::bail!("Failed to open record store");
    }

    info!("Planner service initialized successfully");

    let accounts = AccountService::new(store);
    let sessions = SessionManager::new();

    let app_state = AppState { accounts, sessions };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Planner service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
