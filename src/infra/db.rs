use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use super::InfraError;

const APP_NAME: &str = "waitlist-api";

/// Connects and pings, so a returned handle is known to be reachable.
pub async fn init_db(uri: &SecretString, database_name: &str) -> Result<Database, InfraError> {
    let mut options = ClientOptions::parse(uri.expose_secret())
        .await
        .map_err(InfraError::StoreConnection)?;
    options.app_name = Some(APP_NAME.to_string());

    let client = Client::with_options(options).map_err(InfraError::StoreConnection)?;
    let db = client.database(database_name);
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(InfraError::StoreConnection)?;

    info!(database = database_name, "Connected to MongoDB");
    Ok(db)
}
