//! One-shot idempotent seeding of the items table.
//!
//! Reads a JSON array of records, skips ids that already exist, inserts
//! the rest inside a single transaction, and commits. Inserts carry
//! `ON CONFLICT (id) DO NOTHING` so a row landing out-of-band between the
//! existence check and the insert is absorbed instead of failing the
//! commit.

use std::path::Path;

use anyhow::{Context, Result};
use itemseed_core::{Item, SeedError};
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, Transaction};

/// Row counts from a completed seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Outcome of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The target table is absent; nothing was written.
    TableMissing,
    Seeded(SeedReport),
}

/// Seed the items table from a JSON file.
///
/// Returns [`SeedOutcome::TableMissing`] without touching the database
/// when the table has not been created yet; the caller treats that as a
/// soft failure. Malformed records and database errors propagate.
pub async fn seed_items(pool: &PgPool, seed_file: &Path) -> Result<SeedOutcome> {
    if !table_exists(pool, Item::TABLE).await? {
        tracing::error!(
            table = Item::TABLE,
            "table does not exist, run the database setup script first"
        );
        return Ok(SeedOutcome::TableMissing);
    }

    let raw = std::fs::read_to_string(seed_file)
        .with_context(|| format!("reading seed file {}", seed_file.display()))?;
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(&raw).context("seed file is not a JSON array of objects")?;

    let mut tx = pool.begin().await?;
    let mut report = SeedReport { inserted: 0, skipped: 0 };
    for record in &records {
        let id = record_id(record)?;
        let existing: Option<i64> =
            sqlx::query_scalar(&format!("SELECT id FROM {} WHERE id = $1", Item::TABLE))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() || !insert_record(&mut tx, record).await? {
            report.skipped += 1;
        } else {
            report.inserted += 1;
        }
    }
    tx.commit().await?;

    tracing::info!(
        table = Item::TABLE,
        inserted = report.inserted,
        skipped = report.skipped,
        "table seeded successfully"
    );
    Ok(SeedOutcome::Seeded(report))
}

async fn table_exists(pool: &PgPool, table: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = $1
        )",
    )
    .bind(table)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

async fn insert_record(
    tx: &mut Transaction<'_, Postgres>,
    record: &Map<String, Value>,
) -> Result<bool> {
    let (sql, values) = build_insert(record)?;
    let mut query = sqlx::query(&sql);
    for value in values {
        query = match value {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Float(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Vector(v) => query.bind(v),
        };
    }
    let result = query.execute(&mut **tx).await?;
    Ok(result.rows_affected() > 0)
}

/// A seed-record value reduced to the SQL types the loader binds.
#[derive(Debug, Clone, PartialEq)]
enum SqlValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// pgvector text literal, bound through a `::vector` cast.
    Vector(String),
}

/// Construct the INSERT statement and bind list for one record.
///
/// Column order follows the record's own field order; null-valued fields
/// are omitted so the column keeps its database default.
fn build_insert(record: &Map<String, Value>) -> Result<(String, Vec<SqlValue>), SeedError> {
    let mut columns = Vec::with_capacity(record.len());
    let mut placeholders = Vec::with_capacity(record.len());
    let mut values = Vec::with_capacity(record.len());

    for (column, value) in record {
        validate_column(column)?;
        if value.is_null() {
            continue;
        }
        let placeholder = format!("${}", values.len() + 1);
        if Item::is_embedding_column(column) {
            values.push(SqlValue::Vector(embedding_literal(column, value)?));
            placeholders.push(format!("{placeholder}::vector"));
        } else {
            values.push(scalar_value(column, value)?);
            placeholders.push(placeholder);
        }
        columns.push(column.as_str());
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT (id) DO NOTHING",
        Item::TABLE,
        columns.join(", "),
        placeholders.join(", "),
    );
    Ok((sql, values))
}

fn record_id(record: &Map<String, Value>) -> Result<i64, SeedError> {
    record.get("id").and_then(Value::as_i64).ok_or(SeedError::MissingId)
}

fn scalar_value(column: &str, value: &Value) -> Result<SqlValue, SeedError> {
    match value {
        Value::Bool(b) => Ok(SqlValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Float(f))
            } else {
                Err(unsupported(column, value))
            }
        },
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(unsupported(column, value)),
    }
}

fn embedding_literal(column: &str, value: &Value) -> Result<String, SeedError> {
    let embedding: Vec<f32> = serde_json::from_value(value.clone())
        .map_err(|_| SeedError::InvalidEmbedding(column.to_owned()))?;
    Ok(vector_literal(&embedding))
}

fn vector_literal(embedding: &[f32]) -> String {
    format!("[{}]", embedding.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(","))
}

fn validate_column(column: &str) -> Result<(), SeedError> {
    let mut chars = column.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid { Ok(()) } else { Err(SeedError::InvalidColumn(column.to_owned())) }
}

fn unsupported(column: &str, value: &Value) -> SeedError {
    let mut rendered = value.to_string();
    if let Some((idx, _)) = rendered.char_indices().nth(80) {
        rendered.truncate(idx);
        rendered.push_str("...");
    }
    SeedError::UnsupportedValue { column: column.to_owned(), value: rendered }
}
