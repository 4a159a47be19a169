//! Account persistence.
//!
//! Handlers talk to a [`UserStore`]; the Postgres implementation is the only
//! place that knows how a duplicate key is reported by the database.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    Connection, PgPool, Row,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{info_span, Instrument};
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

/// A stored account. `password_hash` is the bcrypt hash, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Result of an insert: a duplicate username/email is an expected outcome,
/// not an error.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(User),
    Conflict,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Find an account whose username OR email matches. When two different
    /// accounts match, the username match is returned.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn insert(&self, user: NewUser) -> Result<InsertOutcome, StoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to Postgres using the service pool settings.
    ///
    /// # Errors
    /// Returns an error if the pool cannot establish its first connection.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }

    /// Create the `users` table and its unique constraints if missing.
    ///
    /// # Errors
    /// Returns an error if any schema statement fails.
    pub async fn ensure_schema(&self) -> Result<()> {
        for (index, statement) in split_sql_statements(SCHEMA_SQL).iter().enumerate() {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .with_context(|| format!("failed to execute schema statement {}", index + 1))?;
        }

        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let query = r"
            SELECT id, username, email, password, created_at
            FROM users
            WHERE username = $1 OR email = $2
            ORDER BY (username = $1) DESC
            LIMIT 1
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.map(|row| user_from_row(&row)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = "SELECT id, username, email, password, created_at FROM users WHERE username = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.map(|row| user_from_row(&row)))
    }

    async fn insert(&self, user: NewUser) -> Result<InsertOutcome, StoreError> {
        let query = r"
            INSERT INTO users
                (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password, created_at
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match row {
            Ok(row) => Ok(InsertOutcome::Created(user_from_row(&row))),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;
        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password"),
        created_at: row.get("created_at"),
    }
}

/// Postgres reports unique constraint violations as SQLSTATE 23505.
pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}
