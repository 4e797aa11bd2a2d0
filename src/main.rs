use color_eyre::eyre::Result;
use docsched_api::config::ApiConfig;
use docsched_db::{create_pool, schema::initialize_database};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Schema creation is idempotent, so every start makes sure it exists
    initialize_database(&db_pool).await?;

    // Start API server
    docsched_api::start_server(config, db_pool).await?;

    Ok(())
}
