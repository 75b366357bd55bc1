#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to sign access token request: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("access token request failed: {0}")]
    TokenRequest(#[from] reqwest::Error),

    #[error("access token request rejected: status {status}")]
    TokenRequestRejected { status: u16 },
}
