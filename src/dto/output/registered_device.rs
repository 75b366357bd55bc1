use serde::Serialize;

#[derive(Serialize)]
pub struct RegisteredDevice {
    pub device_id: String,
    pub message: String,
}
