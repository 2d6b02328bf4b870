//! Read-back similarity probe against the seeded table.

use anyhow::Result;
use itemseed_core::Item;
use sqlx::{PgPool, Row};

/// A ranked row from the similarity probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: i64,
    pub distance: f64,
}

/// Compare the lowest-id item's `embedding_ada002` against every row with
/// the cosine distance operator and log the two closest matches.
///
/// Purely diagnostic. The first match is the probe row itself at distance
/// zero; an empty table yields no neighbors instead of an error.
pub async fn verify_similarity(pool: &PgPool) -> Result<Vec<Neighbor>> {
    let first: Option<(i64, String)> = sqlx::query_as(&format!(
        "SELECT id, embedding_ada002::text FROM {} ORDER BY id LIMIT 1",
        Item::TABLE
    ))
    .fetch_optional(pool)
    .await?;

    let Some((first_id, embedding)) = first else {
        tracing::info!(table = Item::TABLE, "no rows to run the similarity check against");
        return Ok(Vec::new());
    };

    let rows = sqlx::query(&format!(
        "SELECT id, embedding_ada002 <=> $1::vector AS distance
         FROM {} ORDER BY distance LIMIT 2",
        Item::TABLE
    ))
    .bind(&embedding)
    .fetch_all(pool)
    .await?;

    let neighbors: Vec<Neighbor> = rows
        .iter()
        .map(|row| Ok(Neighbor { id: row.try_get("id")?, distance: row.try_get("distance")? }))
        .collect::<Result<_>>()?;

    tracing::info!(item = first_id, "cosine distance of the two closest items to the first item:");
    for neighbor in &neighbors {
        tracing::info!(id = neighbor.id, distance = neighbor.distance, "neighbor");
    }
    Ok(neighbors)
}
