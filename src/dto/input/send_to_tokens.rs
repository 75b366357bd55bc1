use super::PushNotification;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SendToTokens {
    pub tokens: Vec<String>,
    pub notification: PushNotification,
}
