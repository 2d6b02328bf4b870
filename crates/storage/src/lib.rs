//! PostgreSQL access layer for itemseed
//!
//! Engine construction plus the one-shot seeding and verification
//! routines. The table is assumed to exist already; schema management
//! lives in the database setup tooling, not here.

mod engine;
mod seeder;
mod verify;

pub use engine::create_engine;
pub use seeder::{SeedOutcome, SeedReport, seed_items};
pub use verify::{Neighbor, verify_similarity};
