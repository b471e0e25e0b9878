//! Talk use-case service.
//!
//! # Invariants
//! - A talk's camp and speaker are always set from looked-up entities, never
//!   from the nested data of a `TalkModel`.
//! - Missing talks on update/delete are client errors (400), not 404s.

use crate::mapper::{apply_talk_model, talk_from_model, talk_to_model, talks_to_models, TalkModel};
use crate::model::related::Related;
use crate::model::speaker::{Speaker, SpeakerId};
use crate::model::talk::TalkId;
use crate::repo::camp_repo::CampRepository;
use crate::service::camp_service::camp_not_found;
use crate::service::commit;
use crate::service::error::{Created, ServiceError, ServiceResult};
use crate::service::links;
use log::info;

/// Talk operations scoped to a camp moniker.
pub struct TalkService<R: CampRepository> {
    repo: R,
}

impl<R: CampRepository> TalkService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists a camp's talks. Unknown monikers are `NotFound`; a camp without
    /// talks yields an empty list.
    pub async fn list_talks(
        &self,
        moniker: &str,
        include_speakers: bool,
    ) -> ServiceResult<Vec<TalkModel>> {
        let talks = self
            .repo
            .get_talks_by_moniker(moniker, include_speakers)
            .await
            .map_err(|err| ServiceError::from_repo("talk_list", err))?
            .ok_or_else(|| camp_not_found(moniker))?;
        Ok(talks_to_models(&talks))
    }

    pub async fn get_talk(
        &self,
        moniker: &str,
        talk_id: TalkId,
        include_speaker: bool,
    ) -> ServiceResult<TalkModel> {
        let talk = self
            .repo
            .get_talk_by_moniker(moniker, talk_id, include_speaker)
            .await
            .map_err(|err| ServiceError::from_repo("talk_get", err))?
            .ok_or_else(|| ServiceError::NotFound(format!("talk {talk_id} in `{moniker}`")))?;
        Ok(talk_to_model(&talk))
    }

    pub async fn create_talk(
        &mut self,
        moniker: &str,
        model: &TalkModel,
    ) -> ServiceResult<Created<TalkModel>> {
        let camp = self
            .repo
            .get_camp(moniker)
            .await
            .map_err(|err| ServiceError::from_repo("talk_create", err))?
            .ok_or_else(|| ServiceError::Validation(format!("camp `{moniker}` does not exist")))?;

        let speaker_id = requested_speaker_id(model)
            .ok_or_else(|| ServiceError::Validation("speaker id is required".to_string()))?;
        let speaker = self.find_speaker(speaker_id, "talk_create").await?;

        let mut talk = talk_from_model(model);
        talk.camp_id = camp.id;
        talk.speaker = Related::Loaded(speaker);

        let ticket = self.repo.add(talk.clone().into());
        let report = commit(&mut self.repo, "talk_create").await?;
        talk.id = report.talk_id(ticket);

        let location = talk
            .id
            .and_then(|id| links::talk_path(&camp.moniker, id))
            .ok_or_else(|| {
                ServiceError::Validation("cannot build a resource path for the talk".to_string())
            })?;

        info!(
            "event=talk_create module=service status=ok moniker={} talk_id={}",
            camp.moniker,
            talk.id.unwrap_or_default()
        );
        Ok(Created {
            location,
            body: talk_to_model(&talk),
        })
    }

    /// Applies a talk model onto an existing talk. A speaker id in the payload
    /// reassigns the speaker after lookup.
    pub async fn update_talk(
        &mut self,
        moniker: &str,
        talk_id: TalkId,
        model: &TalkModel,
    ) -> ServiceResult<TalkModel> {
        let mut talk = self
            .repo
            .get_talk_by_moniker(moniker, talk_id, true)
            .await
            .map_err(|err| ServiceError::from_repo("talk_update", err))?
            .ok_or_else(|| ServiceError::Validation(format!("could not find talk {talk_id}")))?;

        apply_talk_model(model, &mut talk);
        if let Some(speaker_id) = requested_speaker_id(model) {
            if talk.speaker_id() != Some(speaker_id) {
                let speaker = self.find_speaker(speaker_id, "talk_update").await?;
                talk.speaker = Related::Loaded(speaker);
            }
        }

        self.repo.update(talk.clone().into());
        commit(&mut self.repo, "talk_update").await?;

        info!("event=talk_update module=service status=ok moniker={moniker} talk_id={talk_id}");
        Ok(talk_to_model(&talk))
    }

    pub async fn delete_talk(&mut self, moniker: &str, talk_id: TalkId) -> ServiceResult<()> {
        let talk = self
            .repo
            .get_talk_by_moniker(moniker, talk_id, false)
            .await
            .map_err(|err| ServiceError::from_repo("talk_delete", err))?
            .ok_or_else(|| {
                ServiceError::Validation(format!("could not find talk {talk_id} to delete"))
            })?;

        self.repo.delete(talk.into());
        commit(&mut self.repo, "talk_delete").await?;

        info!("event=talk_delete module=service status=ok moniker={moniker} talk_id={talk_id}");
        Ok(())
    }

    async fn find_speaker(
        &self,
        speaker_id: SpeakerId,
        operation: &'static str,
    ) -> ServiceResult<Speaker> {
        self.repo
            .get_speaker(speaker_id)
            .await
            .map_err(|err| ServiceError::from_repo(operation, err))?
            .ok_or_else(|| ServiceError::Validation(format!("speaker {speaker_id} could not be found")))
    }
}

fn requested_speaker_id(model: &TalkModel) -> Option<SpeakerId> {
    model.speaker.as_ref().and_then(|speaker| speaker.speaker_id)
}
