use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamelog::auth::Authenticator;
use gamelog::franchise::repository::{InMemoryFranchiseRepository, PostgresFranchiseRepository};
use gamelog::game::repository::{InMemoryGameRepository, PostgresGameRepository};
use gamelog::user::repository::{InMemoryUserRepository, PostgresUserRepository};
use gamelog::{build_router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamelog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gamelog server");

    // The signing secret and expiry policy are read once here and injected;
    // nothing downstream touches the environment
    let authenticator = Arc::new(Authenticator::from_env());

    let state = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .expect("Failed to connect to database");
            info!("Using PostgreSQL repositories");
            AppState::new(
                authenticator,
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresGameRepository::new(pool.clone())),
                Arc::new(PostgresFranchiseRepository::new(pool)),
            )
        }
        Err(_) => {
            info!("DATABASE_URL not set, using in-memory repositories");
            AppState::new(
                authenticator,
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryGameRepository::new()),
                Arc::new(InMemoryFranchiseRepository::new()),
            )
        }
    };

    let app = build_router(state);

    let addr = std::env::var("GAMELOG_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
