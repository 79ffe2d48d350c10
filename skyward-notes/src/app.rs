use axum::Router;
use minijinja::Environment;
use tower_http::services::ServeDir;

use crate::{
    config::Config,
    db::DB,
    errors,
    notes::{self, NoteStore},
    state::AppState,
    views::Views,
};

pub fn create_app(db: DB, config: &Config) -> errors::Result<Router> {
    let mut env = Environment::new();
    notes::add_templates(&mut env)?;

    let views = Views::new(env);
    let state = AppState {
        store: NoteStore::new(db),
        views,
    };

    let app = Router::new()
        .merge(notes::router(state))
        .nest_service("/assets", ServeDir::new(&config.assets_dir));

    Ok(app)
}
