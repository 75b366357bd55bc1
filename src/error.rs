use crate::{repository, service::push_client};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("failed to save device token: {0}")]
    TokenSave(#[source] repository::Error),

    #[error("failed to get device tokens: {0}")]
    TokenGet(#[source] repository::Error),

    #[error("failed to delete device token: {0}")]
    TokenDelete(#[source] repository::Error),

    #[error("failed to send notification to user: {0}")]
    SendUser(#[source] repository::Error),

    #[error("failed to send notification to users: {0}")]
    SendUsers(#[source] repository::Error),

    #[error("failed to send notification to tokens: {0}")]
    SendTokens(#[source] push_client::Error),
}

impl Error {
    ///
    /// Stable machine readable code kept identical
    /// across releases so clients can match on it.
    ///
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_FAILED",
            Error::TokenSave(_) => "FCM_TOKEN_SAVE_FAILED",
            Error::TokenGet(_) => "FCM_TOKEN_GET_FAILED",
            Error::TokenDelete(_) => "FCM_TOKEN_DELETE_FAILED",
            Error::SendUser(_) => "FCM_SEND_USER_FAILED",
            Error::SendUsers(_) => "FCM_SEND_USERS_FAILED",
            Error::SendTokens(_) => "FCM_SEND_TOKENS_FAILED",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status = match self {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::TokenSave(_)
            | Error::TokenGet(_)
            | Error::TokenDelete(_)
            | Error::SendUser(_)
            | Error::SendUsers(_)
            | Error::SendTokens(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}
