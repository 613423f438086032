//! Chat history persistence (spec.md §4.3 "Persistence contract", §6
//! "Persistence schema"): a single `pi_chat_history` table, upserted by
//! message id, `:memory:` skips persistence entirely.
//!
//! Grounded on the donor pack's `hi-youichi-loom` SQLite message store:
//! blocking `rusqlite` calls wrapped in `tokio::task::spawn_blocking`.

use std::path::PathBuf;
use std::sync::Arc;

use gw_core::chat::{PERSISTED_HISTORY_LIMIT, Role};
use gw_core::{ChatMessage, MessageId};
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("background task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Chat history store. `:memory:` (the literal path `:memory:`) produces a
/// no-op store per spec.md §4.3; anything else opens a file-backed SQLite
/// connection.
pub enum ChatStore {
    None,
    Sqlite(SqliteChatStore),
}

impl ChatStore {
    pub fn open(db_path: &str) -> Result<Self, PersistenceError> {
        if db_path == ":memory:" {
            return Ok(ChatStore::None);
        }
        Ok(ChatStore::Sqlite(SqliteChatStore::open(PathBuf::from(db_path))?))
    }

    /// Best-effort insert; failures are logged, never propagated (spec.md
    /// §4.3: "inserts are best-effort").
    pub async fn append(&self, msg: &ChatMessage) {
        if let ChatStore::Sqlite(store) = self {
            if let Err(e) = store.append(msg).await {
                tracing::warn!(error = %e, "chat history append failed");
            }
        }
    }

    pub async fn load_recent(&self) -> Vec<ChatMessage> {
        match self {
            ChatStore::None => Vec::new(),
            ChatStore::Sqlite(store) => store.load_recent().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "chat history load failed");
                Vec::new()
            }),
        }
    }
}

pub struct SqliteChatStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteChatStore {
    pub fn open(db_path: PathBuf) -> Result<Self, PersistenceError> {
        let conn = Connection::open(db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pi_chat_history (
                message_id TEXT PRIMARY KEY,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                agent_used TEXT,
                duration_ms INTEGER,
                timestamp INTEGER NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS pi_chat_history_timestamp_idx ON pi_chat_history(timestamp)",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn append(&self, msg: &ChatMessage) -> Result<(), PersistenceError> {
        let conn = self.conn.clone();
        let role = role_str(msg.role).to_string();
        let id = msg.id.as_str().to_string();
        let content = msg.content.clone();
        let agent_used = msg.agent_used.clone();
        let duration_ms = msg.duration_ms;
        let timestamp = msg.timestamp;
        tokio::task::spawn_blocking(move || -> Result<(), rusqlite::Error> {
            let guard = conn.blocking_lock();
            guard.execute(
                "INSERT INTO pi_chat_history (message_id, role, content, agent_used, duration_ms, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(message_id) DO UPDATE SET
                    role = excluded.role,
                    content = excluded.content,
                    agent_used = excluded.agent_used,
                    duration_ms = excluded.duration_ms,
                    timestamp = excluded.timestamp",
                params![id, role, content, agent_used, duration_ms, timestamp],
            )?;
            Ok(())
        })
        .await??;
        Ok(())
    }

    pub async fn load_recent(&self) -> Result<Vec<ChatMessage>, PersistenceError> {
        let conn = self.conn.clone();
        let rows = tokio::task::spawn_blocking(move || -> Result<Vec<ChatMessage>, rusqlite::Error> {
            let guard = conn.blocking_lock();
            let mut stmt = guard.prepare(
                "SELECT message_id, role, content, agent_used, duration_ms, timestamp
                 FROM pi_chat_history ORDER BY timestamp DESC LIMIT ?1",
            )?;
            let mut out: Vec<ChatMessage> = stmt
                .query_map(params![PERSISTED_HISTORY_LIMIT as i64], |row| {
                    let role: String = row.get(1)?;
                    Ok(ChatMessage {
                        id: MessageId::from_string(row.get::<_, String>(0)?),
                        role: role_from_str(&role),
                        content: row.get(2)?,
                        agent_used: row.get(3)?,
                        duration_ms: row.get::<_, Option<i64>>(4)?.map(|v| v as u64),
                        timestamp: row.get(5)?,
                    })
                })?
                .collect::<Result<_, _>>()?;
            out.reverse();
            Ok(out)
        })
        .await??;
        Ok(rows)
    }
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn role_from_str(s: &str) -> Role {
    match s {
        "assistant" => Role::Assistant,
        _ => Role::User,
    }
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
