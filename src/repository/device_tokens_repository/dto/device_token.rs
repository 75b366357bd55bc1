use super::DeviceType;
use crate::repository::device_tokens_repository::entity::DeviceTokenFindEntity;
use time::OffsetDateTime;

pub struct DeviceToken {
    pub device_id: String,

    pub token: String,
    pub device_type: DeviceType,
    pub device_info: String,

    pub created_at: OffsetDateTime,
    pub last_used: OffsetDateTime,
}

impl From<DeviceTokenFindEntity> for DeviceToken {
    fn from(value: DeviceTokenFindEntity) -> Self {
        Self {
            device_id: value.device_id,
            token: value.token,
            device_type: value.device_type,
            device_info: value.device_info,
            created_at: value.created_at.into(),
            last_used: value.last_used.into(),
        }
    }
}
