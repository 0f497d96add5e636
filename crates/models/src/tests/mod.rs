

use sea_orm::DatabaseConnection;

use crate::db::{connect_and_migrate, DatabaseConfig};

/// Fresh in-memory SQLite database with the schema applied.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    Ok(connect_and_migrate(&DatabaseConfig::in_memory()).await?)
}
