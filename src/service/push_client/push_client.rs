use super::{Error, MulticastOutcome, PushMessage};
use axum::async_trait;

///
/// Client of the push notification provider.
///
/// Implementations deliver one message to many device tokens and
/// report the outcome per token. Individual token failures are part
/// of the returned outcome, [Error] is reserved for failures of the
/// whole call.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushClient: Send + Sync {
    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<MulticastOutcome, Error>;
}
