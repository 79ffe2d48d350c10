use serde::Serialize;

use crate::Result;

use super::{
    coerce_id, Action, FormError, Note, NoteId, NoteStore, NoteSubmission, PageQuery, Status, TITLE_MAX_CHARS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteForm {
    pub mode: FormMode,
    pub title: String,
    pub body: String,
    pub note_id: Option<NoteId>,
}

impl Default for NoteForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            body: String::new(),
            note_id: None,
        }
    }
}

/// Everything `notes.html` needs, computed once per request.
#[derive(Debug, Clone, Serialize)]
pub struct NotesPage {
    pub flash: Option<&'static str>,
    pub errors: Vec<String>,
    pub form: NoteForm,
    pub notes: Vec<Note>,
    pub note_count: usize,
}

#[derive(Debug)]
pub enum Submitted {
    Redirect(Status),
    Render(NotesPage),
}

pub async fn notes_page(store: &NoteStore, query: PageQuery) -> Result<NotesPage> {
    let flash = query.status.as_deref().and_then(Status::parse).map(Status::message);
    let mut errors = Vec::new();
    let mut form = NoteForm::default();

    let edit_id = query.edit.as_deref().map(coerce_id).filter(|id| *id > 0);
    if let Some(id) = edit_id {
        match store.find_by_id(id).await? {
            Some(note) => {
                form = NoteForm {
                    mode: FormMode::Update,
                    title: note.title,
                    body: note.body,
                    note_id: Some(note.id),
                }
            }
            None => {
                tracing::debug!(note_id = id, "edit requested for missing note");
                errors.push(FormError::NoteNotFound);
            }
        }
    }

    page(store, flash, errors, form).await
}

pub async fn submit_note(store: &NoteStore, submission: NoteSubmission) -> Result<Submitted> {
    let action = Action::parse(submission.action.as_deref());
    let note_id = submission.note_id.as_deref().map(coerce_id);

    if action == Action::Delete {
        let Some(id) = note_id else {
            tracing::debug!("delete submitted without a note id");
            return page(store, None, vec![FormError::MissingNoteId], NoteForm::default())
                .await
                .map(Submitted::Render);
        };

        let deleted = store.delete_by_id(id).await?;
        tracing::info!(note_id = id, deleted, "note deleted");
        return Ok(Submitted::Redirect(Status::Deleted));
    }

    let title = submission.title.as_deref().unwrap_or_default().trim().to_string();
    let body = submission.body.as_deref().unwrap_or_default().trim().to_string();

    let errors = validate(action, &title, &body, note_id);
    if !errors.is_empty() {
        tracing::debug!(?errors, "note submission rejected");
        let mode = match action {
            Action::Update => FormMode::Update,
            _ => FormMode::Create,
        };
        let form = NoteForm {
            mode,
            title,
            body,
            note_id,
        };
        return page(store, None, errors, form).await.map(Submitted::Render);
    }

    match (action, note_id) {
        (Action::Update, Some(id)) => {
            let updated = store.update_by_id(id, title, body).await?;
            tracing::info!(note_id = id, updated, "note updated");
            Ok(Submitted::Redirect(Status::Updated))
        }
        _ => {
            let id = store.create(title, body).await?;
            tracing::info!(note_id = id, "note created");
            Ok(Submitted::Redirect(Status::Created))
        }
    }
}

/// Runs every check on a create or update. `title` and `body` are already trimmed.
pub fn validate(action: Action, title: &str, body: &str, note_id: Option<NoteId>) -> Vec<FormError> {
    let mut errors = Vec::new();

    if title.is_empty() {
        errors.push(FormError::TitleRequired);
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(FormError::TitleTooLong);
    }

    if body.is_empty() {
        errors.push(FormError::BodyRequired);
    }

    if action == Action::Update && note_id.is_none() {
        errors.push(FormError::MissingNoteId);
    }

    errors
}

async fn page(
    store: &NoteStore,
    flash: Option<&'static str>,
    errors: Vec<FormError>,
    form: NoteForm,
) -> Result<NotesPage> {
    let notes = store.list_all().await?;

    Ok(NotesPage {
        flash,
        errors: errors.iter().map(ToString::to_string).collect(),
        form,
        note_count: notes.len(),
        notes,
    })
}
