use crate::service::push_client;
use serde::Serialize;

#[derive(Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl From<push_client::SendOutcome> for SendOutcome {
    fn from(value: push_client::SendOutcome) -> Self {
        Self {
            success: value.success,
            message_id: value.message_id,
            error: value.error,
        }
    }
}
