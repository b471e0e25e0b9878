//! Request-handling services.
//!
//! # Responsibility
//! - Turn boundary operations into repository + mapper calls.
//! - Enforce write-path rules (moniker uniqueness, talk associations).
//! - Map every outcome to one typed error with a single status mapping.
//!
//! # Invariants
//! - Services never hand storage details to clients; see
//!   `ServiceError::client_message`.
//! - A failed commit leaves the service's unit of work empty.

pub mod camp_service;
pub mod error;
pub mod links;
pub mod talk_service;

use crate::repo::camp_repo::CampRepository;
use crate::repo::unit_of_work::{CommitOutcome, CommitReport};
use error::{ServiceError, ServiceResult};
use log::warn;

/// Commits staged changes, treating "no rows affected" as a client failure.
pub(crate) async fn commit<R: CampRepository>(
    repo: &mut R,
    operation: &'static str,
) -> ServiceResult<CommitReport> {
    match repo.save_changes().await {
        Ok(CommitOutcome::Applied(report)) => Ok(report),
        Ok(CommitOutcome::NoChanges) => {
            warn!("event={operation} module=service status=error error_code=no_rows_affected");
            Err(ServiceError::CommitFailed(operation))
        }
        Err(err) => {
            repo.discard_changes();
            Err(ServiceError::from_repo(operation, err))
        }
    }
}
