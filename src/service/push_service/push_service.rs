use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushService: Send + Sync {
    async fn send_to_user(
        &self,
        user_id: &str,
        notification: input::PushNotification,
    ) -> Result<Option<output::DispatchSummary>, Error>;

    async fn send_to_users(
        &self,
        user_ids: &[String],
        notification: input::PushNotification,
    ) -> Result<Option<output::DispatchSummary>, Error>;

    async fn send_to_tokens(
        &self,
        tokens: Vec<String>,
        notification: input::PushNotification,
    ) -> Result<output::MulticastReport, Error>;
}
