//! Core data-access and mapping layer for the camp schedule backend.
//! This crate owns the entity graph invariants and the boundary contract.

pub mod config;
pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use mapper::{CampModel, SpeakerModel, TalkModel};
pub use model::camp::{Camp, CampId, CampValidationError, Location};
pub use model::related::Related;
pub use model::speaker::{Speaker, SpeakerId};
pub use model::talk::{Talk, TalkId};
pub use repo::camp_repo::{
    CampRepository, RepoError, RepoResult, SqliteCampRepository, SqliteCampStore,
};
pub use repo::unit_of_work::{
    CommitOutcome, CommitReport, Entity, EntityKind, GeneratedKey, StageTicket,
};
pub use service::camp_service::CampService;
pub use service::error::{Created, ResponseStatus, ServiceError, ServiceResult};
pub use service::talk_service::TalkService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
