use cyphertech::{config::AppConfig, db, routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cyphertech=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    config.validate()?;

    // Database connection
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    db::migrate(&pool).await?;

    let pool_check: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
    tracing::info!(ping = pool_check, "database connection established");

    let app_state = AppState::new(pool, config.access_token_secret.clone());
    let app = routes::build_router(app_state);

    let addr = config.socket_addr();
    tracing::info!("Server running on: {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
