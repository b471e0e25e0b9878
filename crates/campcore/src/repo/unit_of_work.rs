//! Staged change tracking for one unit of work.
//!
//! # Responsibility
//! - Record inserts, updates and deletes until the owner commits.
//! - Report the outcome of a commit, including storage-assigned ids.
//!
//! # Invariants
//! - Staging never touches storage.
//! - A `StageTicket` is only meaningful for the commit that follows it.

use crate::model::camp::{Camp, CampId};
use crate::model::speaker::{Speaker, SpeakerId};
use crate::model::talk::{Talk, TalkId};
use std::fmt::{Display, Formatter};

/// Entity kinds the repository can stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Camp,
    Talk,
    Speaker,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camp => "camp",
            Self::Talk => "talk",
            Self::Speaker => "speaker",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any entity that can be handed to `add`, `update` or `delete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Camp(Camp),
    Talk(Talk),
    Speaker(Speaker),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Camp(_) => EntityKind::Camp,
            Self::Talk(_) => EntityKind::Talk,
            Self::Speaker(_) => EntityKind::Speaker,
        }
    }

    /// Storage id, if the entity has been persisted.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Camp(camp) => camp.id,
            Self::Talk(talk) => talk.id,
            Self::Speaker(speaker) => speaker.id,
        }
    }
}

impl From<Camp> for Entity {
    fn from(value: Camp) -> Self {
        Self::Camp(value)
    }
}

impl From<Talk> for Entity {
    fn from(value: Talk) -> Self {
        Self::Talk(value)
    }
}

impl From<Speaker> for Entity {
    fn from(value: Speaker) -> Self {
        Self::Speaker(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One pending mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChange {
    pub kind: ChangeKind,
    pub entity: Entity,
}

/// Position of a staged change inside its unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageTicket(usize);

impl StageTicket {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered list of pending mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<StagedChange>,
}

impl ChangeSet {
    pub fn stage(&mut self, kind: ChangeKind, entity: Entity) -> StageTicket {
        self.changes.push(StagedChange { kind, entity });
        StageTicket(self.changes.len() - 1)
    }

    pub fn as_slice(&self) -> &[StagedChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

/// Id generated by storage for an inserted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKey {
    Camp(CampId),
    Talk(TalkId),
    Speaker(SpeakerId),
}

/// Details of a commit that changed persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    rows_affected: usize,
    generated: Vec<Option<GeneratedKey>>,
}

impl CommitReport {
    pub(crate) fn record(&mut self, rows: usize, generated: Option<GeneratedKey>) {
        self.rows_affected += rows;
        self.generated.push(generated);
    }

    pub fn rows_affected(&self) -> usize {
        self.rows_affected
    }

    pub fn generated_key(&self, ticket: StageTicket) -> Option<GeneratedKey> {
        self.generated.get(ticket.index()).copied().flatten()
    }

    pub fn camp_id(&self, ticket: StageTicket) -> Option<CampId> {
        match self.generated_key(ticket) {
            Some(GeneratedKey::Camp(id)) => Some(id),
            _ => None,
        }
    }

    pub fn talk_id(&self, ticket: StageTicket) -> Option<TalkId> {
        match self.generated_key(ticket) {
            Some(GeneratedKey::Talk(id)) => Some(id),
            _ => None,
        }
    }

    pub fn speaker_id(&self, ticket: StageTicket) -> Option<SpeakerId> {
        match self.generated_key(ticket) {
            Some(GeneratedKey::Speaker(id)) => Some(id),
            _ => None,
        }
    }
}

/// Result of `save_changes` when storage did not reject the commit.
///
/// A rejected commit is reported as `Err(RepoError)` instead, so the three
/// outcomes (applied, no effect, rejected) stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// At least one row changed.
    Applied(CommitReport),
    /// Nothing was staged, or every staged statement matched zero rows.
    NoChanges,
}

impl CommitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn report(&self) -> Option<&CommitReport> {
        match self {
            Self::Applied(report) => Some(report),
            Self::NoChanges => None,
        }
    }
}
