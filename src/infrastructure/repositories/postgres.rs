use std::sync::Arc;

use futures::StreamExt;
use sqlx::{FromRow, Pool, Postgres};

use crate::domain::{
    models::Recipient,
    repositories::{RecipientDirectory, RecipientStream},
    value_objects::RecipientId,
};

pub type PgPool = Pool<Postgres>;

/// Registered users stored in the `users` table.
#[derive(Clone)]
pub struct PostgresRecipientDirectory {
    pool: PgPool,
}

impl PostgresRecipientDirectory {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

impl RecipientDirectory for PostgresRecipientDirectory {
    // One query: rows inserted after it starts are not seen, and the stream
    // holds a pool connection until it is dropped.
    fn all_recipients(&self) -> RecipientStream<'_> {
        sqlx::query_as::<_, RecipientRecord>(
            r#"SELECT chat_id FROM users ORDER BY created_at, chat_id"#,
        )
        .fetch(&self.pool)
        .map(|row| row.map(Recipient::from).map_err(anyhow::Error::from))
        .boxed()
    }
}

#[derive(FromRow)]
struct RecipientRecord {
    chat_id: i64,
}

impl From<RecipientRecord> for Recipient {
    fn from(record: RecipientRecord) -> Self {
        Recipient {
            recipient_id: RecipientId(record.chat_id),
        }
    }
}
