use crate::repository::DeviceType;
use sha2::{Digest, Sha256};

const DEVICE_ID_LEN: usize = 20;

///
/// Derives stable device id from device description.
///
/// Mobile devices send an installation id which is already unique.
/// Browser based devices send a user agent string which is hashed
/// so the same browser maps to the same id on every registration.
///
pub fn resolve_device_id(device_type: DeviceType, device_info: &str) -> String {
    match device_type {
        DeviceType::Mobile => device_info.to_string(),
        DeviceType::Pwa | DeviceType::Web => {
            let mut device_id = hex::encode(Sha256::digest(device_info.as_bytes()));
            device_id.truncate(DEVICE_ID_LEN);
            device_id
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolve_device_id_pwa_hashed() {
        let device_id = resolve_device_id(DeviceType::Pwa, "test");

        assert_eq!(device_id, "9f86d081884c7d659a2f");
    }

    #[test]
    fn resolve_device_id_web_same_as_pwa() {
        let pwa = resolve_device_id(DeviceType::Pwa, "Mozilla/5.0 (X11; Linux x86_64)");
        let web = resolve_device_id(DeviceType::Web, "Mozilla/5.0 (X11; Linux x86_64)");

        assert_eq!(pwa, web);
    }

    #[test]
    fn resolve_device_id_hash_len() {
        let device_id = resolve_device_id(DeviceType::Web, "Mozilla/5.0 (X11; Linux x86_64)");

        assert_eq!(device_id.len(), DEVICE_ID_LEN);
        assert!(device_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn resolve_device_id_different_device_info_different_id() {
        let first = resolve_device_id(DeviceType::Web, "Mozilla/5.0 (X11; Linux x86_64)");
        let second = resolve_device_id(DeviceType::Web, "Mozilla/5.0 (Windows NT 10.0)");

        assert_ne!(first, second);
    }

    #[test]
    fn resolve_device_id_mobile_verbatim() {
        let device_id = resolve_device_id(DeviceType::Mobile, "installation-id-1234");

        assert_eq!(device_id, "installation-id-1234");
    }
}
