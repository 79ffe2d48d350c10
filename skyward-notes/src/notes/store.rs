use rusqlite::{params, OptionalExtension, Row};

use crate::db::{self, DB};

use super::{Note, NoteId};

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            body: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

/// CRUD over the `notes` table. No validation happens here.
#[derive(Clone)]
pub struct NoteStore {
    db: DB,
}

impl NoteStore {
    pub fn new(db: DB) -> Self {
        Self { db }
    }

    /// Most recently touched first.
    pub async fn list_all(&self) -> db::Result<Vec<Note>> {
        self.db
            .call(|conn| {
                let notes = conn
                    .prepare(
                        "SELECT id, title, body, created_at, updated_at FROM notes ORDER BY updated_at DESC, id DESC",
                    )?
                    .query_map([], |row| Note::try_from(row))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(notes)
            })
            .await
            .map_err(db::Error::from)
    }

    pub async fn find_by_id(&self, id: NoteId) -> db::Result<Option<Note>> {
        self.db
            .call(move |conn| {
                let note = conn
                    .query_row(
                        "SELECT id, title, body, created_at, updated_at FROM notes WHERE id = ?",
                        params![id],
                        |row| Note::try_from(row),
                    )
                    .optional()?;
                Ok(note)
            })
            .await
            .map_err(db::Error::from)
    }

    pub async fn create(&self, title: String, body: String) -> db::Result<NoteId> {
        self.db
            .call(move |conn| {
                let now = chrono::Utc::now();
                let id: NoteId = conn.query_row(
                    "INSERT INTO notes (title, body, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id",
                    params![title, body, now, now],
                    |row| row.get(0),
                )?;
                Ok(id)
            })
            .await
            .map_err(db::Error::from)
    }

    /// Returns `false` when no row has this id.
    pub async fn update_by_id(&self, id: NoteId, title: String, body: String) -> db::Result<bool> {
        self.db
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE notes SET title = ?, body = ?, updated_at = ? WHERE id = ?",
                    params![title, body, chrono::Utc::now(), id],
                )?;
                Ok(changed > 0)
            })
            .await
            .map_err(db::Error::from)
    }

    /// Returns `false` when no row has this id.
    pub async fn delete_by_id(&self, id: NoteId) -> db::Result<bool> {
        self.db
            .call(move |conn| {
                let changed = conn.execute("DELETE FROM notes WHERE id = ?", params![id])?;
                Ok(changed > 0)
            })
            .await
            .map_err(db::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::init_test_db, Result};

    async fn store() -> Result<NoteStore> {
        Ok(NoteStore::new(init_test_db().await?))
    }

    #[tokio::test]
    async fn list_all_is_empty_without_notes() -> Result<()> {
        let store = store().await?;

        assert!(store.list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_then_find() -> Result<()> {
        let store = store().await?;

        let id = store.create("T".into(), "B".into()).await?;
        let note = store.find_by_id(id).await?.expect("note exists");

        assert!(id > 0);
        assert_eq!(note.id, id);
        assert_eq!(note.title, "T");
        assert_eq!(note.body, "B");
        assert_eq!(note.created_at, note.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn find_missing_is_none() -> Result<()> {
        let store = store().await?;

        assert_eq!(store.find_by_id(404).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_unique() -> Result<()> {
        let store = store().await?;

        let first = store.create("first".into(), "1".into()).await?;
        let second = store.create("second".into(), "2".into()).await?;

        assert_ne!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn list_all_orders_by_updated_at() -> Result<()> {
        let store = store().await?;

        let first = store.create("first".into(), "1".into()).await?;
        let second = store.create("second".into(), "2".into()).await?;
        let third = store.create("third".into(), "3".into()).await?;

        let ids = store.list_all().await?.into_iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![third, second, first]);

        store.update_by_id(first, "first".into(), "edited".into()).await?;

        let ids = store.list_all().await?.into_iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![first, third, second]);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_title_and_body() -> Result<()> {
        let store = store().await?;

        let id = store.create("draft".into(), "old".into()).await?;
        let before = store.find_by_id(id).await?.expect("note exists");

        assert!(store.update_by_id(id, "final".into(), "new".into()).await?);

        let after = store.find_by_id(id).await?.expect("note exists");
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, "final");
        assert_eq!(after.body, "new");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_is_noop() -> Result<()> {
        let store = store().await?;
        store.create("kept".into(), "body".into()).await?;

        assert!(!store.update_by_id(404, "x".into(), "y".into()).await?);

        let notes = store.list_all().await?;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "kept");
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_note() -> Result<()> {
        let store = store().await?;

        let id = store.create("gone".into(), "soon".into()).await?;
        let kept = store.create("kept".into(), "body".into()).await?;

        assert!(store.delete_by_id(id).await?);
        assert!(!store.delete_by_id(id).await?);

        let ids = store.list_all().await?.into_iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![kept]);
        Ok(())
    }
}
