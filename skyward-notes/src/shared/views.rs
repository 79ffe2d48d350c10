use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
};
use minijinja::{Environment, Error};

#[derive(Debug, Clone)]
pub struct Views {
    pub env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new(env: Environment<'static>) -> Self {
        let engine = Arc::new(env);
        Self { env: engine }
    }
}

impl Views {
    pub fn response<D: serde::Serialize>(&self, key: &str, data: D) -> Response {
        match self.render(key, data) {
            Ok(x) => Html(x).into_response(),
            Err(err) => {
                tracing::error!("{err:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }

    pub fn render<D: serde::Serialize>(&self, key: &str, data: D) -> Result<String, Error> {
        let template = self.env.get_template(key)?;
        let rendered = template.render(&data)?;

        Ok(rendered)
    }
}

impl<ApplicationState> FromRequestParts<ApplicationState> for Views
where
    Self: FromRef<ApplicationState>,
    ApplicationState: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_: &mut Parts, state: &ApplicationState) -> Result<Self, Self::Rejection> {
        Ok(Self::from_ref(state))
    }
}
