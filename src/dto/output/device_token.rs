use crate::repository::{self, DeviceType};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct DeviceToken {
    pub device_id: String,
    pub token: String,
    pub device_type: DeviceType,
    pub device_info: String,
    pub created_at: OffsetDateTime,
    pub last_used: OffsetDateTime,
}

impl From<repository::DeviceToken> for DeviceToken {
    fn from(value: repository::DeviceToken) -> Self {
        Self {
            device_id: value.device_id,
            token: value.token,
            device_type: value.device_type,
            device_info: value.device_info,
            created_at: value.created_at,
            last_used: value.last_used,
        }
    }
}
