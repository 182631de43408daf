mod error;

pub use error::*;

use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    pub fn single(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Unix seconds, as stored in the `*_at` and `pub_date` columns.
pub fn timestamp() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}
