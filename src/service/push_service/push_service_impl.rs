use super::PushService;
use crate::{
    dto::{input, output},
    error::Error,
    repository::DeviceTokensRepository,
    service::push_client::{PushClient, PushMessage},
};
use axum::async_trait;
use futures::future::try_join_all;
use std::{collections::HashMap, sync::Arc};

pub struct PushServiceImpl {
    repository: Arc<dyn DeviceTokensRepository>,
    push_client: Arc<dyn PushClient>,
}

impl PushServiceImpl {
    pub fn new(
        repository: Arc<dyn DeviceTokensRepository>,
        push_client: Arc<dyn PushClient>,
    ) -> Self {
        Self {
            repository,
            push_client,
        }
    }

    fn validate_notification(notification: &input::PushNotification) -> Result<(), Error> {
        if notification.title.is_empty() {
            return Err(Error::Validation("title is empty"));
        }
        if notification.message.is_empty() {
            return Err(Error::Validation("message is empty"));
        }

        Ok(())
    }

    ///
    /// Data values ride along with every notification so the client
    /// can route taps. Absent fields are sent as empty strings because
    /// FCM data payload allows only string values.
    ///
    fn build_message(notification: &input::PushNotification) -> PushMessage {
        PushMessage {
            title: notification.title.clone(),
            body: notification.message.clone(),
            data: HashMap::from([
                (
                    "type".to_string(),
                    notification.notification_type.clone().unwrap_or_default(),
                ),
                (
                    "related_id".to_string(),
                    notification.related_id.clone().unwrap_or_default(),
                ),
                (
                    "link".to_string(),
                    notification.link.clone().unwrap_or_default(),
                ),
            ]),
            link: notification.link.clone().filter(|link| !link.is_empty()),
        }
    }
}

#[async_trait]
impl PushService for PushServiceImpl {
    ///
    /// Sends notification to all devices registered by the user
    ///
    /// ### Returns
    /// [output::DispatchSummary] or [None] when user has no registered devices
    ///
    /// ### Errors
    /// - [Error::Validation] when notification title or message is empty
    /// - [Error::SendUser] when fetching user's tokens fails
    /// - [Error::SendTokens] when push provider rejects the whole send
    ///
    async fn send_to_user(
        &self,
        user_id: &str,
        notification: input::PushNotification,
    ) -> Result<Option<output::DispatchSummary>, Error> {
        Self::validate_notification(&notification)?;

        tracing::info!(user_id, "sending notification to user");

        let device_tokens = self
            .repository
            .find_all(user_id)
            .await
            .map_err(Error::SendUser)?;
        if device_tokens.is_empty() {
            tracing::info!(user_id, "user has no registered devices");
            return Ok(None);
        }

        let tokens = device_tokens
            .into_iter()
            .map(|device_token| device_token.token)
            .collect();
        let report = self.send_to_tokens(tokens, notification).await?;

        Ok(Some(output::DispatchSummary::from(report)))
    }

    ///
    /// Sends notification to all devices registered by any of the users
    ///
    /// ### Returns
    /// [output::DispatchSummary] or [None] when none of the users
    /// has a registered device
    ///
    /// ### Errors
    /// - [Error::Validation] when notification title or message is empty
    /// - [Error::SendUsers] when fetching tokens of any user fails
    /// - [Error::SendTokens] when push provider rejects the whole send
    ///
    async fn send_to_users(
        &self,
        user_ids: &[String],
        notification: input::PushNotification,
    ) -> Result<Option<output::DispatchSummary>, Error> {
        Self::validate_notification(&notification)?;

        tracing::info!(users = user_ids.len(), "sending notification to users");

        let finds = user_ids
            .iter()
            .map(|user_id| self.repository.find_all(user_id));
        let tokens: Vec<String> = try_join_all(finds)
            .await
            .map_err(Error::SendUsers)?
            .into_iter()
            .flatten()
            .map(|device_token| device_token.token)
            .collect();
        if tokens.is_empty() {
            tracing::info!("users have no registered devices");
            return Ok(None);
        }

        let report = self.send_to_tokens(tokens, notification).await?;

        Ok(Some(output::DispatchSummary::from(report)))
    }

    ///
    /// Sends notification to device tokens directly.
    /// Failures of single tokens are reported in the outcome,
    /// they do not fail the whole send.
    ///
    /// ### Returns
    /// [output::MulticastReport] with per token outcomes
    ///
    /// ### Errors
    /// - [Error::Validation] when notification title or message is empty
    /// - [Error::SendTokens] when push provider rejects the whole send
    ///
    async fn send_to_tokens(
        &self,
        tokens: Vec<String>,
        notification: input::PushNotification,
    ) -> Result<output::MulticastReport, Error> {
        Self::validate_notification(&notification)?;

        if tokens.is_empty() {
            tracing::info!("no tokens to send to");
            return Ok(output::MulticastReport {
                success_count: 0,
                failure_count: 0,
                responses: Vec::new(),
            });
        }

        tracing::info!(tokens = tokens.len(), "sending notification to tokens");

        let message = Self::build_message(&notification);
        let outcome = self
            .push_client
            .send_multicast(&tokens, &message)
            .await
            .map_err(Error::SendTokens)?;
        tracing::info!(
            success_count = outcome.success_count,
            failure_count = outcome.failure_count,
            "sent notification to tokens"
        );

        Ok(output::MulticastReport::from(outcome))
    }
}
