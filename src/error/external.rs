use serenity::http::HttpError;
use thiserror::Error;

/// Failure reported by an external collaborator.
///
/// Discord, the monster catalog and the raid dispatcher all report failures through
/// this type so that callers can distinguish a missing resource or missing rights
/// from a transient outage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalError {
    /// The requested resource (usually a channel) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The bot lacks the rights needed for the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Network or API failure that may succeed on a later tick.
    #[error("Transient external error: {0}")]
    Transient(String),
}

/// Maps Discord HTTP status codes onto the collaborator error taxonomy.
///
/// 404 becomes `NotFound`, 401/403 become `PermissionDenied`, everything else
/// (rate limits, gateway hiccups, 5xx) is treated as transient.
impl From<serenity::Error> for ExternalError {
    fn from(err: serenity::Error) -> Self {
        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(ref response)) = err {
            match response.status_code.as_u16() {
                404 => return ExternalError::NotFound(response.error.message.clone()),
                401 | 403 => {
                    return ExternalError::PermissionDenied(response.error.message.clone())
                }
                _ => {}
            }
        }

        ExternalError::Transient(err.to_string())
    }
}

impl From<sea_orm::DbErr> for ExternalError {
    fn from(err: sea_orm::DbErr) -> Self {
        ExternalError::Transient(err.to_string())
    }
}
