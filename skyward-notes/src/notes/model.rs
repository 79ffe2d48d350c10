use serde::{Deserialize, Serialize};

pub type NoteId = i64;

pub const TITLE_MAX_CHARS: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Query string of `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub status: Option<String>,
    pub edit: Option<String>,
}

/// Urlencoded body of `POST /`.
#[derive(Debug, Default, Deserialize)]
pub struct NoteSubmission {
    pub action: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub note_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    /// Anything other than `update` or `delete` is a create.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("update") => Self::Update,
            Some("delete") => Self::Delete,
            _ => Self::Create,
        }
    }
}

/// Outcome of a successful mutation, carried through the redirect as `?status=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Created,
    Updated,
    Deleted,
}

impl Status {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Note saved successfully.",
            Self::Updated => "Note updated successfully.",
            Self::Deleted => "Note removed successfully.",
        }
    }

    pub fn location(self) -> String {
        format!("/?status={}", self.token())
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Missing note identifier.")]
    MissingNoteId,
    #[error("Title is required.")]
    TitleRequired,
    #[error("Title must be 120 characters or less.")]
    TitleTooLong,
    #[error("Content cannot be empty.")]
    BodyRequired,
    #[error("Note not found or already removed.")]
    NoteNotFound,
}

/// Integer value of a submitted id: the leading digits (with an optional sign),
/// `0` when there are none, saturating at the `NoteId` bounds.
pub fn coerce_id(value: &str) -> NoteId {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(['-', '+']));
    let digits = value[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return 0;
    }

    value[..sign_len + digits].parse().unwrap_or(if value.starts_with('-') {
        NoteId::MIN
    } else {
        NoteId::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tokens() {
        for status in [Status::Created, Status::Updated, Status::Deleted] {
            assert_eq!(Status::parse(status.token()), Some(status));
        }
        assert_eq!(Status::parse("bogus"), None);
        assert_eq!(Status::parse(""), None);
        assert_eq!(Status::Created.message(), "Note saved successfully.");
        assert_eq!(Status::Deleted.location(), "/?status=deleted");
    }

    #[test]
    fn action_defaults_to_create() {
        assert_eq!(Action::parse(None), Action::Create);
        assert_eq!(Action::parse(Some("archive")), Action::Create);
        assert_eq!(Action::parse(Some("update")), Action::Update);
        assert_eq!(Action::parse(Some("delete")), Action::Delete);
    }

    #[test]
    fn coerce_id_reads_leading_digits() {
        assert_eq!(coerce_id("42"), 42);
        assert_eq!(coerce_id(" 7"), 7);
        assert_eq!(coerce_id("12abc"), 12);
        assert_eq!(coerce_id("-3"), -3);
        assert_eq!(coerce_id("abc"), 0);
        assert_eq!(coerce_id(""), 0);
        assert_eq!(coerce_id("-"), 0);
        assert_eq!(coerce_id("99999999999999999999999"), NoteId::MAX);
        assert_eq!(coerce_id("-99999999999999999999999"), NoteId::MIN);
    }
}
