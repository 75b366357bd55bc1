use serde::{Deserialize, Serialize};
use strum::AsRefStr;

///
/// Platform the device token was issued for.
///
/// Decides how device_id is derived during registration
/// and defaults to [DeviceType::Pwa] when absent from input.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Pwa,
    Mobile,
    Web,
}
