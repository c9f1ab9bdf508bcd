use std::sync::Arc;

use clinicdesk_api::config::ApiConfig;
use clinicdesk_db::{
    create_pool, repositories::availability::PgAvailabilityStore, schema::initialize_database,
};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;
    initialize_database(&db_pool).await?;

    let store = Arc::new(PgAvailabilityStore::new(db_pool));
    clinicdesk_api::start_server(config, store).await?;

    Ok(())
}
