use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PushNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub related_id: Option<String>,
    pub link: Option<String>,
}
