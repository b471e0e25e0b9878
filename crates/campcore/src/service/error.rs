//! Boundary error taxonomy and status mapping.

use crate::repo::camp_repo::RepoError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message returned to clients for every storage fault.
pub const STORAGE_FAULT_MESSAGE: &str = "Database failed.";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Transport status a boundary adapter should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    Created,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl ResponseStatus {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }
}

/// Errors surfaced by request-handling services.
#[derive(Debug)]
pub enum ServiceError {
    /// Requested camp, talk or speaker does not exist.
    NotFound(String),
    /// Moniker already used by another camp.
    Conflict(String),
    /// Payload or required association is invalid.
    Validation(String),
    /// Commit went through without changing any row.
    CommitFailed(&'static str),
    /// Unexpected persistence failure. Never shown to clients in detail.
    Storage(RepoError),
}

impl ServiceError {
    /// Converts a repository error, logging it when it is a storage fault.
    pub fn from_repo(operation: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::DuplicateMoniker(moniker) => {
                Self::Conflict(format!("moniker `{moniker}` is already in use"))
            }
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            RepoError::MissingAssociation { .. } => Self::Validation(err.to_string()),
            other => {
                error!(
                    "event={operation} module=service status=error error_code=storage_fault error={other}"
                );
                Self::Storage(other)
            }
        }
    }

    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::NotFound(_) => ResponseStatus::NotFound,
            Self::Conflict(_) | Self::Validation(_) | Self::CommitFailed(_) => {
                ResponseStatus::BadRequest
            }
            Self::Storage(_) => ResponseStatus::InternalServerError,
        }
    }

    /// Text safe to return to a client.
    pub fn client_message(&self) -> String {
        match self {
            Self::Storage(_) => STORAGE_FAULT_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "{what} not found"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::Validation(message) => write!(f, "{message}"),
            Self::CommitFailed(operation) => write!(f, "{operation} had no effect"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

/// Successful create outcome: resource path plus the created view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created<T> {
    pub location: String,
    pub body: T,
}

impl<T> Created<T> {
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::Created
    }
}
