//! Talk entity.

use crate::model::camp::CampId;
use crate::model::related::Related;
use crate::model::speaker::{Speaker, SpeakerId};
use serde::{Deserialize, Serialize};

/// Storage-assigned talk identifier.
pub type TalkId = i64;

/// One session presented at a camp.
///
/// # Invariants
/// - Once persisted, `camp_id` is set and `speaker` carries a key.
/// - The owning camp is referenced by id only, so a hydrated camp graph
///   never loops back onto itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    /// `None` until the talk has been committed.
    pub id: Option<TalkId>,
    /// Owning camp. Set by the write path from a looked-up camp.
    pub camp_id: Option<CampId>,
    /// Presenting speaker. Set by the write path from a looked-up speaker.
    pub speaker: Related<SpeakerId, Speaker>,
    pub title: String,
    pub abstract_text: String,
    /// Audience level, conventionally 100 to 400.
    pub level: i32,
}

impl Talk {
    /// Creates an unsaved talk without associations.
    pub fn new(title: impl Into<String>, abstract_text: impl Into<String>, level: i32) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            level,
            ..Self::default()
        }
    }

    /// Key of the presenting speaker, hydrated or not.
    pub fn speaker_id(&self) -> Option<SpeakerId> {
        self.speaker.key()
    }
}
