use crate::repository::DeviceType;
use bson::DateTime;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct DeviceTokenFindEntity {
    pub device_id: String,

    pub token: String,
    pub device_type: DeviceType,
    pub device_info: String,

    pub created_at: DateTime,
    pub last_used: DateTime,
}
