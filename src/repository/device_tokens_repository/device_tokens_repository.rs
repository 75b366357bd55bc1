use super::{DeviceToken, DeviceType};
use crate::repository;
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceTokensRepository: Send + Sync {
    ///
    /// Creates record of the device or fully replaces existing one.
    /// created_at and last_used are assigned by the database server.
    ///
    async fn upsert(
        &self,
        user_id: &str,
        device_id: &str,
        token: &str,
        device_type: DeviceType,
        device_info: &str,
    ) -> Result<(), repository::Error>;

    ///
    /// Finds all device token records registered by the user.
    ///
    async fn find_all(&self, user_id: &str) -> Result<Vec<DeviceToken>, repository::Error>;

    ///
    /// Finds user's record with exact token value.
    ///
    async fn find_by_token(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Option<DeviceToken>, repository::Error>;

    ///
    /// Updates record's last_used to the database server time.
    ///
    /// ### Errors
    /// - [repository::Error::NoDocumentUpdated] when record does not exist
    ///
    async fn update_last_used(
        &self,
        user_id: &str,
        device_id: &str,
    ) -> Result<(), repository::Error>;

    ///
    /// Deletes record of the device.
    /// Deleting record that does not exist is not an error.
    ///
    async fn delete(&self, user_id: &str, device_id: &str) -> Result<(), repository::Error>;
}
