use serde::{Deserialize, Serialize};

/// A catalog item carrying two precomputed embedding spaces.
///
/// The seed file may add further scalar columns beyond these; the loader
/// inserts whatever fields each record names. This struct documents the
/// minimum row shape and owns the table mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub embedding_ada002: Vec<f32>,
    pub embedding_nomic: Vec<f32>,
}

impl Item {
    /// Target table; assumed to exist before seeding runs.
    pub const TABLE: &'static str = "items";

    /// Columns stored as pgvector `vector` values rather than scalars.
    pub const EMBEDDING_COLUMNS: [&'static str; 2] = ["embedding_ada002", "embedding_nomic"];

    pub fn is_embedding_column(column: &str) -> bool {
        Self::EMBEDDING_COLUMNS.contains(&column)
    }
}
