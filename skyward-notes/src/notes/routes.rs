use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};

use crate::{state::AppState, views::Views, Result};

use super::{
    handlers::{self, Submitted},
    NoteStore, NoteSubmission, PageQuery,
};

async fn notes_view(views: Views, State(store): State<NoteStore>, Query(query): Query<PageQuery>) -> Result<Response> {
    let page = handlers::notes_page(&store, query).await?;

    Ok(views.response("notes.html", page))
}

async fn submit_note(
    views: Views,
    State(store): State<NoteStore>,
    Form(submission): Form<NoteSubmission>,
) -> Result<Response> {
    let response = match handlers::submit_note(&store, submission).await? {
        Submitted::Redirect(status) => Redirect::to(&status.location()).into_response(),
        Submitted::Render(page) => views.response("notes.html", page),
    };

    Ok(response)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(notes_view).post(submit_note))
        .with_state(state)
}
