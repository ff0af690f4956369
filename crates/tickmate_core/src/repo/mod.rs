//! Persistence collaborator contracts.
//!
//! # Responsibility
//! - Define the intent-level interface the engine drives on tick mutation.
//! - Keep durability, batching and sync entirely outside the engine.
//!
//! # Invariants
//! - Repository writes receive already-validated tick records.
//! - The engine never assumes when or how a write becomes durable.

pub mod tick_repo;

pub use tick_repo::{MemoryTickRepository, RepoError, RepoResult, TickRepository};
