use super::PushNotification;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SendToUser {
    pub user_id: String,
    pub notification: PushNotification,
}
