use sqlx::{MySqlPool, mysql::MySqlPoolOptions};
use std::time::Duration;

pub async fn init_db(database_url: &str, acquire_timeout: Duration) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}
