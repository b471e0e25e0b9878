//! Camp use-case service.
//!
//! # Invariants
//! - Create checks the moniker before staging; the unique index on
//!   `camps.moniker` still rejects a concurrent duplicate at commit.
//! - Updates never change a camp's moniker.

use crate::mapper::{
    apply_camp_model, camp_from_model, camp_to_model, camps_to_models, speakers_to_models,
    CampModel, SpeakerModel,
};
use crate::model::camp::Camp;
use crate::repo::camp_repo::CampRepository;
use crate::service::commit;
use crate::service::error::{Created, ServiceError, ServiceResult};
use crate::service::links;
use chrono::NaiveDate;
use log::info;

/// Camp operations over one repository unit of work.
pub struct CampService<R: CampRepository> {
    repo: R,
}

impl<R: CampRepository> CampService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list_camps(&self, include_talks: bool) -> ServiceResult<Vec<CampModel>> {
        let camps = self
            .repo
            .get_all_camps(include_talks)
            .await
            .map_err(|err| ServiceError::from_repo("camp_list", err))?;
        Ok(camps_to_models(&camps))
    }

    /// Searches camps by event day. No match is reported as `NotFound`.
    pub async fn search_by_date(
        &self,
        date: NaiveDate,
        include_talks: bool,
    ) -> ServiceResult<Vec<CampModel>> {
        let camps = self
            .repo
            .get_camps_by_event_date(date, include_talks)
            .await
            .map_err(|err| ServiceError::from_repo("camp_search", err))?;
        if camps.is_empty() {
            return Err(ServiceError::NotFound(format!("camps on {date}")));
        }
        Ok(camps_to_models(&camps))
    }

    pub async fn get_camp(&self, moniker: &str) -> ServiceResult<CampModel> {
        let camp = self.find_camp(moniker, "camp_get").await?;
        Ok(camp_to_model(&camp))
    }

    /// Lists speakers presenting at a camp.
    pub async fn list_speakers(&self, moniker: &str) -> ServiceResult<Vec<SpeakerModel>> {
        let speakers = self
            .repo
            .get_speakers_by_moniker(moniker)
            .await
            .map_err(|err| ServiceError::from_repo("camp_speakers", err))?
            .ok_or_else(|| camp_not_found(moniker))?;
        Ok(speakers_to_models(&speakers))
    }

    pub async fn create_camp(&mut self, model: &CampModel) -> ServiceResult<Created<CampModel>> {
        let existing = self
            .repo
            .get_camp(&model.moniker)
            .await
            .map_err(|err| ServiceError::from_repo("camp_create", err))?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "moniker `{}` is already in use",
                model.moniker
            )));
        }

        let location = links::camp_path(&model.moniker).ok_or_else(|| {
            ServiceError::Validation(format!(
                "cannot build a resource path for moniker `{}`",
                model.moniker
            ))
        })?;

        let mut camp = camp_from_model(model);
        let ticket = self.repo.add(camp.clone().into());
        let report = commit(&mut self.repo, "camp_create").await?;
        camp.id = report.camp_id(ticket);

        info!(
            "event=camp_create module=service status=ok moniker={}",
            camp.moniker
        );
        Ok(Created {
            location,
            body: camp_to_model(&camp),
        })
    }

    pub async fn update_camp(&mut self, moniker: &str, model: &CampModel) -> ServiceResult<CampModel> {
        let mut camp = self.find_camp(moniker, "camp_update").await?;
        apply_camp_model(model, &mut camp);

        self.repo.update(camp.clone().into());
        commit(&mut self.repo, "camp_update").await?;

        info!("event=camp_update module=service status=ok moniker={moniker}");
        Ok(camp_to_model(&camp))
    }

    /// Deletes a camp and, through the storage cascade, its talks.
    pub async fn delete_camp(&mut self, moniker: &str) -> ServiceResult<()> {
        let camp = self.find_camp(moniker, "camp_delete").await?;

        self.repo.delete(camp.into());
        commit(&mut self.repo, "camp_delete").await?;

        info!("event=camp_delete module=service status=ok moniker={moniker}");
        Ok(())
    }

    async fn find_camp(&self, moniker: &str, operation: &'static str) -> ServiceResult<Camp> {
        self.repo
            .get_camp(moniker)
            .await
            .map_err(|err| ServiceError::from_repo(operation, err))?
            .ok_or_else(|| camp_not_found(moniker))
    }
}

pub(crate) fn camp_not_found(moniker: &str) -> ServiceError {
    ServiceError::NotFound(format!("camp `{moniker}`"))
}
