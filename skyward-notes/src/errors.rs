use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::db;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    DB(#[from] db::Error),
    #[error("config: {0}")]
    Config(#[from] envy::Error),
    #[error("template: {0}")]
    Template(#[from] minijinja::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ErrorResponse {
    Unexpected { message: String },
}

impl From<Error> for ErrorResponse {
    fn from(error: Error) -> Self {
        tracing::error!("{:?}", error);
        match error {
            Error::DB(_) => Self::Unexpected {
                message: "Unexpected error".into(),
            },
            error => Self::Unexpected {
                message: error.to_string(),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let mut res = axum::Json(ErrorResponse::from(self)).into_response();
        *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        res
    }
}
