use super::PushNotification;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SendToUsers {
    pub user_ids: Vec<String>,
    pub notification: PushNotification,
}
