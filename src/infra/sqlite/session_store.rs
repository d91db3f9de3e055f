use std::path::PathBuf;

use anyhow::Context;
use rusqlite::{params, OptionalExtension};

use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::usecase::ports::session::{SessionStore, SessionStoreError};

const TOKEN_KEY: &str = "auth_token";

/// Keeps the signed-in token in a one-table SQLite file so a sign-in
/// survives restarts.
pub struct SqliteSessionStore {
    pub db_path: PathBuf,
}

impl SqliteSessionStore {
    pub fn open(db_path: PathBuf) -> Result<Self, SessionStoreError> {
        init_db(&db_path)?;
        Ok(Self { db_path })
    }
}

impl SessionStore for SqliteSessionStore {
    fn load_token(&self) -> Result<Option<String>, SessionStoreError> {
        let conn = open_connection(&self.db_path)?;
        let token = conn
            .query_row(
                "SELECT value FROM session WHERE key = ?1",
                params![TOKEN_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .context("failed to read session token")?;
        Ok(token.filter(|token| !token.is_empty()))
    }

    fn save_token(&self, token: &str) -> Result<(), SessionStoreError> {
        let conn = open_connection(&self.db_path)?;
        conn.execute(
            "INSERT INTO session(key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![TOKEN_KEY, token],
        )
        .context("failed to store session token")?;
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionStoreError> {
        let conn = open_connection(&self.db_path)?;
        conn.execute("DELETE FROM session WHERE key = ?1", params![TOKEN_KEY])
            .context("failed to clear session token")?;
        Ok(())
    }
}
