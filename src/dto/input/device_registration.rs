use crate::repository::DeviceType;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeviceRegistration {
    pub user_id: String,
    pub token: String,
    pub device_info: String,
    #[serde(default)]
    pub device_type: DeviceType,
}
