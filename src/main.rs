use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use std::sync::Arc;

mod api;
mod auth;
mod board;
mod config;
mod db;
mod docs;
mod model;
mod models;
mod routes;
mod store;

use auth::session::{FileSessionStore, SessionStore};
use board::registry::BoardRegistry;
use config::Config;
use db::init_db;
use store::{ScheduleStore, mysql::MySqlStore, remote::Remote};

use crate::docs::ApiDoc;
use anyhow::Context;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Escala"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "escala.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url, config.store_timeout)
        .await
        .context("Failed to connect to database")?;

    let store: Arc<dyn ScheduleStore> = Arc::new(MySqlStore::new(pool));
    let remote = Remote::new(store, config.store_timeout);
    let registry = Data::new(BoardRegistry::new(
        remote.clone(),
        config.board_capacity,
        config.board_idle,
    ));

    let sessions: Arc<dyn SessionStore> = Arc::new(
        FileSessionStore::open(&config.session_dir).context("Failed to open session store")?,
    );
    let sessions = Data::from(sessions);
    let remote = Data::new(remote);

    let server_addr = config.server_addr.clone();
    info!(
        addr = %server_addr,
        multi_tenant = config.multi_tenant,
        "Listening"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(remote.clone())
            .app_data(registry.clone())
            .app_data(sessions.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            // Configure auth + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
