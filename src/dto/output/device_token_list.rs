use super::DeviceToken;
use serde::Serialize;

#[derive(Serialize)]
pub struct DeviceTokenList {
    pub tokens: Vec<DeviceToken>,
}
