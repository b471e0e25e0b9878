//! Entity <-> wire model mapping.
//!
//! # Responsibility
//! - Project entities into the shapes exposed at the boundary.
//! - Build new entities from wire models and apply wire models onto
//!   existing entities.
//!
//! # Invariants
//! - Reverse mapping never sets ids or associations (`Camp::talks`,
//!   `Talk::camp_id`, `Talk::speaker`); the write path sets those from
//!   looked-up entities.
//! - `Location` is projected to `venue` only. The reverse direction restores
//!   the venue name and nothing else.
//! - Applying onto an existing camp never changes its moniker.

pub mod camp;
pub mod models;
pub mod speaker;
pub mod talk;

pub use camp::{apply_camp_model, camp_from_model, camp_to_model, camps_to_models};
pub use models::{CampModel, SpeakerModel, TalkModel};
pub use speaker::{apply_speaker_model, speaker_from_model, speaker_to_model, speakers_to_models};
pub use talk::{apply_talk_model, talk_from_model, talk_to_model, talks_to_models};
