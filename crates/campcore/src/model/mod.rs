//! Conference entity model.
//!
//! # Responsibility
//! - Define the in-memory shape of camps, talks and speakers.
//! - Express optional hydration of related entities explicitly.
//!
//! # Invariants
//! - `Camp::moniker` is the natural key and never changes once persisted.
//! - Numeric ids are assigned by storage; `None` means "not yet persisted".
//! - A `Talk` references its camp by id only, never by value.

pub mod camp;
pub mod related;
pub mod speaker;
pub mod talk;
