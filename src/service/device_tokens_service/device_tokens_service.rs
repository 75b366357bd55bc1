use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceTokensService: Send + Sync {
    async fn register_device(
        &self,
        registration: input::DeviceRegistration,
    ) -> Result<output::RegisteredDevice, Error>;

    async fn list_devices(&self, user_id: &str) -> Result<output::DeviceTokenList, Error>;

    async fn remove_device(&self, user_id: &str, device_id: &str) -> Result<(), Error>;
}
