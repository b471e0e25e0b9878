//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the async data-access contract consumed by services.
//! - Isolate SQLite query details from request orchestration.
//!
//! # Invariants
//! - Repository APIs return `None` for missing rows and `Err` only for
//!   storage faults or rejected commits.
//! - Writes are staged per unit of work and committed atomically.

pub mod camp_repo;
pub mod seed;
pub mod unit_of_work;
