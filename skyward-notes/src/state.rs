use axum_macros::FromRef;

use crate::{notes::NoteStore, views::Views};

#[derive(FromRef, Clone)]
pub struct AppState {
    pub store: NoteStore,
    pub views: Views,
}
