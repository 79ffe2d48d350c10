mod app;
mod config;
mod db;
mod errors;
mod migrations;
mod notes;
mod shared;
mod state;

use config::Config;
use db::init_db;
pub use errors::{Error, Result};
pub use shared::views;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = Config::from_env()?;

    shared::tracing::setup_tracing(&config);

    let conn = init_db(&config).await?;

    let app = app::create_app(conn, &config)?;

    let app = shared::tracing::add_tracing_layer(app);

    let port = config.port;
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
