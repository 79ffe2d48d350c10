use tokio_rusqlite::Connection;

use crate::config::Config;

use super::migrations::MIGRATIONS;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    TokioRusqlite(tokio_rusqlite::Error),
    #[error(transparent)]
    Rusqlite(rusqlite::Error),
}

impl From<tokio_rusqlite::Error> for Error {
    fn from(error: tokio_rusqlite::Error) -> Self {
        match error {
            tokio_rusqlite::Error::Rusqlite(error) => Self::Rusqlite(error),
            error => Self::TokioRusqlite(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Rusqlite(error)
    }
}

pub type DB = Connection;

pub async fn init_db(config: &Config) -> Result<DB> {
    let path = config.database_path();

    tracing::info!(
        path = %path,
        host = %config.db_host,
        port = config.db_port,
        user = %config.db_user,
        "opening notes database"
    );

    let conn = tokio_rusqlite::Connection::open(path).await?;

    conn.call(|conn| {
        migrate(conn)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(())
    })
    .await?;

    Ok(conn)
}

#[cfg(test)]
pub async fn init_test_db() -> Result<DB> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;

    conn.call(|conn| {
        migrate(conn)?;

        Ok(())
    })
    .await?;

    Ok(conn)
}

fn migrate(conn: &mut rusqlite::Connection) -> std::result::Result<(), tokio_rusqlite::Error> {
    MIGRATIONS
        .to_latest(conn)
        .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}
