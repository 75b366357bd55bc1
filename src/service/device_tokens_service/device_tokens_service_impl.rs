use super::{device_id::resolve_device_id, DeviceTokensService};
use crate::{
    dto::{input, output},
    error::Error,
    repository::{self, DeviceToken, DeviceTokensRepository},
};
use axum::async_trait;
use std::sync::Arc;

const MAX_TOKENS_PER_USER: usize = 5;

pub struct DeviceTokensServiceImpl {
    repository: Arc<dyn DeviceTokensRepository>,
}

impl DeviceTokensServiceImpl {
    pub fn new(repository: Arc<dyn DeviceTokensRepository>) -> Self {
        Self { repository }
    }

    fn validate_registration(registration: &input::DeviceRegistration) -> Result<(), Error> {
        if registration.user_id.is_empty() {
            return Err(Error::Validation("user_id is empty"));
        }
        if registration.token.is_empty() {
            return Err(Error::Validation("token is empty"));
        }
        if registration.device_info.is_empty() {
            return Err(Error::Validation("device_info is empty"));
        }

        Ok(())
    }

    ///
    /// Refreshing last_used is not worth failing the registration,
    /// failure is only logged.
    ///
    async fn touch_last_used(&self, user_id: &str, device_id: &str) {
        if let Err(err) = self.repository.update_last_used(user_id, device_id).await {
            tracing::warn!(%err, user_id, device_id, "failed to refresh last_used");
        }
    }

    async fn evict_least_recently_used(
        &self,
        user_id: &str,
        device_tokens: &[DeviceToken],
    ) -> Result<(), repository::Error> {
        let least_recently_used = match device_tokens.iter().min_by_key(|token| token.last_used) {
            Some(device_token) => device_token,
            None => return Ok(()),
        };

        tracing::info!(
            user_id,
            device_id = %least_recently_used.device_id,
            "token limit reached, evicting least recently used device"
        );

        self.repository
            .delete(user_id, &least_recently_used.device_id)
            .await
    }
}

#[async_trait]
impl DeviceTokensService for DeviceTokensServiceImpl {
    ///
    /// Saves user's device token so push notifications can reach the device
    ///
    /// Known token only has its last_used refreshed. Unknown token creates
    /// a new record and may evict user's least recently used device when
    /// the device limit is reached.
    ///
    /// ### Returns
    /// [output::RegisteredDevice] with resolved device id
    ///
    /// ### Errors
    /// - [Error::Validation] when any of the fields is empty
    /// - [Error::TokenSave] when database operation fails
    ///
    async fn register_device(
        &self,
        registration: input::DeviceRegistration,
    ) -> Result<output::RegisteredDevice, Error> {
        Self::validate_registration(&registration)?;

        tracing::info!(
            user_id = %registration.user_id,
            device_type = registration.device_type.as_ref(),
            "registering device token"
        );

        let known_device = self
            .repository
            .find_by_token(&registration.user_id, &registration.token)
            .await
            .map_err(Error::TokenSave)?;
        if let Some(device_token) = known_device {
            self.touch_last_used(&registration.user_id, &device_token.device_id)
                .await;
            tracing::info!(device_id = %device_token.device_id, "device token refreshed");

            return Ok(output::RegisteredDevice {
                device_id: device_token.device_id,
                message: "device token refreshed".to_string(),
            });
        }

        let device_id = resolve_device_id(registration.device_type, &registration.device_info);

        let device_tokens = self
            .repository
            .find_all(&registration.user_id)
            .await
            .map_err(Error::TokenSave)?;
        if device_tokens.len() >= MAX_TOKENS_PER_USER {
            self.evict_least_recently_used(&registration.user_id, &device_tokens)
                .await
                .map_err(Error::TokenSave)?;
        }

        self.repository
            .upsert(
                &registration.user_id,
                &device_id,
                &registration.token,
                registration.device_type,
                &registration.device_info,
            )
            .await
            .map_err(Error::TokenSave)?;
        tracing::info!(%device_id, "registered device token");

        Ok(output::RegisteredDevice {
            device_id,
            message: "device token registered".to_string(),
        })
    }

    ///
    /// ### Returns
    /// [output::DeviceTokenList] with all devices registered by the user
    ///
    /// ### Errors
    /// - [Error::TokenGet] when database operation fails
    ///
    async fn list_devices(&self, user_id: &str) -> Result<output::DeviceTokenList, Error> {
        tracing::info!(user_id, "listing device tokens");

        let device_tokens = self
            .repository
            .find_all(user_id)
            .await
            .map_err(Error::TokenGet)?;
        tracing::info!(count = device_tokens.len(), "listed device tokens");

        Ok(output::DeviceTokenList {
            tokens: device_tokens
                .into_iter()
                .map(output::DeviceToken::from)
                .collect(),
        })
    }

    ///
    /// Removes device token so the device no longer receives notifications.
    /// Removing device that does not exist is not an error.
    ///
    /// ### Errors
    /// - [Error::TokenDelete] when database operation fails
    ///
    async fn remove_device(&self, user_id: &str, device_id: &str) -> Result<(), Error> {
        tracing::info!(user_id, device_id, "removing device token");

        self.repository
            .delete(user_id, device_id)
            .await
            .map_err(Error::TokenDelete)?;
        tracing::info!("removed device token");

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repository::{DeviceType, MockDeviceTokensRepository};
    use std::time::Duration;
    use time::OffsetDateTime;

    fn registration(user_id: &str, token: &str) -> input::DeviceRegistration {
        input::DeviceRegistration {
            user_id: user_id.to_string(),
            token: token.to_string(),
            device_info: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
            device_type: DeviceType::Pwa,
        }
    }

    fn device_token(device_id: &str, token: &str, last_used: OffsetDateTime) -> DeviceToken {
        DeviceToken {
            device_id: device_id.to_string(),
            token: token.to_string(),
            device_type: DeviceType::Pwa,
            device_info: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
            created_at: last_used - Duration::from_secs(3600),
            last_used,
        }
    }

    #[tokio::test]
    async fn register_device_empty_user_id() {
        let repository = MockDeviceTokensRepository::new();
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let register_result = service.register_device(registration("", "token 1")).await;

        assert!(matches!(register_result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn register_device_empty_token() {
        let repository = MockDeviceTokensRepository::new();
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let register_result = service.register_device(registration("user 1", "")).await;

        assert!(matches!(register_result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn register_device_empty_device_info() {
        let repository = MockDeviceTokensRepository::new();
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let mut registration = registration("user 1", "token 1");
        registration.device_info = "".to_string();
        let register_result = service.register_device(registration).await;

        assert!(matches!(register_result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn register_device_new_token_saved() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| Ok(None));
        repository.expect_find_all().returning(|_| Ok(Vec::new()));
        repository.expect_delete().never();
        repository
            .expect_upsert()
            .returning(|user_id, device_id, token, device_type, device_info| {
                assert_eq!(user_id, "user 1");
                assert_eq!(
                    device_id,
                    resolve_device_id(DeviceType::Pwa, "Mozilla/5.0 (X11; Linux x86_64)")
                );
                assert_eq!(token, "token 1");
                assert_eq!(device_type, DeviceType::Pwa);
                assert_eq!(device_info, "Mozilla/5.0 (X11; Linux x86_64)");
                Ok(())
            });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let registered = service
            .register_device(registration("user 1", "token 1"))
            .await
            .unwrap();

        assert_eq!(registered.message, "device token registered");
        assert_eq!(
            registered.device_id,
            resolve_device_id(DeviceType::Pwa, "Mozilla/5.0 (X11; Linux x86_64)")
        );
    }

    #[tokio::test]
    async fn register_device_mobile_device_id_verbatim() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| Ok(None));
        repository.expect_find_all().returning(|_| Ok(Vec::new()));
        repository
            .expect_upsert()
            .returning(|_, device_id, _, device_type, _| {
                assert_eq!(device_id, "installation-id-1234");
                assert_eq!(device_type, DeviceType::Mobile);
                Ok(())
            });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let mut registration = registration("user 1", "token 1");
        registration.device_info = "installation-id-1234".to_string();
        registration.device_type = DeviceType::Mobile;
        let registered = service.register_device(registration).await.unwrap();

        assert_eq!(registered.device_id, "installation-id-1234");
    }

    #[tokio::test]
    async fn register_device_below_limit_no_eviction() {
        let now = OffsetDateTime::now_utc();
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| Ok(None));
        repository.expect_find_all().returning(move |_| {
            Ok(vec![
                device_token("device 1", "token 1", now - Duration::from_secs(10)),
                device_token("device 2", "token 2", now - Duration::from_secs(50)),
                device_token("device 3", "token 3", now - Duration::from_secs(30)),
                device_token("device 4", "token 4", now - Duration::from_secs(20)),
            ])
        });
        repository.expect_delete().never();
        repository.expect_upsert().returning(|_, _, _, _, _| Ok(()));
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        service
            .register_device(registration("user 1", "token 5"))
            .await
            .unwrap();

        // assertion happen in mock
    }

    #[tokio::test]
    async fn register_device_at_limit_evicts_least_recently_used() {
        let now = OffsetDateTime::now_utc();
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| Ok(None));
        repository.expect_find_all().returning(move |_| {
            Ok(vec![
                device_token("device 1", "token 1", now - Duration::from_secs(10)),
                device_token("device 2", "token 2", now - Duration::from_secs(50)),
                device_token("device 3", "token 3", now - Duration::from_secs(30)),
                device_token("device 4", "token 4", now - Duration::from_secs(20)),
                device_token("device 5", "token 5", now - Duration::from_secs(40)),
            ])
        });
        repository.expect_delete().returning(|user_id, device_id| {
            assert_eq!(user_id, "user 1");
            assert_eq!(device_id, "device 2");
            Ok(())
        });
        repository.expect_upsert().returning(|_, _, _, _, _| Ok(()));
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let registered = service
            .register_device(registration("user 1", "token 6"))
            .await
            .unwrap();

        assert_eq!(registered.message, "device token registered");
    }

    #[tokio::test]
    async fn register_device_known_token_refreshed() {
        let now = OffsetDateTime::now_utc();
        let mut repository = MockDeviceTokensRepository::new();
        repository
            .expect_find_by_token()
            .returning(move |_, token| Ok(Some(device_token("device 1", token, now))));
        repository
            .expect_update_last_used()
            .returning(|user_id, device_id| {
                assert_eq!(user_id, "user 1");
                assert_eq!(device_id, "device 1");
                Ok(())
            });
        repository.expect_find_all().never();
        repository.expect_delete().never();
        repository.expect_upsert().never();
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let registered = service
            .register_device(registration("user 1", "token 1"))
            .await
            .unwrap();

        assert_eq!(registered.message, "device token refreshed");
        assert_eq!(registered.device_id, "device 1");
    }

    #[tokio::test]
    async fn register_device_known_token_refresh_failure_ignored() {
        let now = OffsetDateTime::now_utc();
        let mut repository = MockDeviceTokensRepository::new();
        repository
            .expect_find_by_token()
            .returning(move |_, token| Ok(Some(device_token("device 1", token, now))));
        repository
            .expect_update_last_used()
            .returning(|_, _| Err(repository::Error::NoDocumentUpdated));
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let registered = service
            .register_device(registration("user 1", "token 1"))
            .await
            .unwrap();

        assert_eq!(registered.message, "device token refreshed");
    }

    #[tokio::test]
    async fn register_device_find_by_token_database_error() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let register_result = service
            .register_device(registration("user 1", "token 1"))
            .await;

        assert!(matches!(register_result, Err(Error::TokenSave(_))));
    }

    #[tokio::test]
    async fn register_device_find_all_database_error() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| Ok(None));
        repository.expect_find_all().returning(|_| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let register_result = service
            .register_device(registration("user 1", "token 1"))
            .await;

        assert!(matches!(register_result, Err(Error::TokenSave(_))));
    }

    #[tokio::test]
    async fn register_device_eviction_database_error() {
        let now = OffsetDateTime::now_utc();
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| Ok(None));
        repository.expect_find_all().returning(move |_| {
            Ok(vec![
                device_token("device 1", "token 1", now - Duration::from_secs(10)),
                device_token("device 2", "token 2", now - Duration::from_secs(50)),
                device_token("device 3", "token 3", now - Duration::from_secs(30)),
                device_token("device 4", "token 4", now - Duration::from_secs(20)),
                device_token("device 5", "token 5", now - Duration::from_secs(40)),
            ])
        });
        repository.expect_delete().returning(|_, _| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        repository.expect_upsert().never();
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let register_result = service
            .register_device(registration("user 1", "token 6"))
            .await;

        assert!(matches!(register_result, Err(Error::TokenSave(_))));
    }

    #[tokio::test]
    async fn register_device_upsert_database_error() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_by_token().returning(|_, _| Ok(None));
        repository.expect_find_all().returning(|_| Ok(Vec::new()));
        repository.expect_upsert().returning(|_, _, _, _, _| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let register_result = service
            .register_device(registration("user 1", "token 1"))
            .await;

        assert!(matches!(register_result, Err(Error::TokenSave(_))));
    }

    #[tokio::test]
    async fn list_devices_tokens_returned() {
        let now = OffsetDateTime::now_utc();
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_all().returning(move |user_id| {
            assert_eq!(user_id, "user 1");
            Ok(vec![
                device_token("device 1", "token 1", now),
                device_token("device 2", "token 2", now),
            ])
        });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let list = service.list_devices("user 1").await.unwrap();

        assert_eq!(list.tokens.len(), 2);
        assert_eq!(list.tokens[0].device_id, "device 1");
        assert_eq!(list.tokens[0].token, "token 1");
        assert_eq!(list.tokens[1].device_id, "device 2");
        assert_eq!(list.tokens[1].token, "token 2");
    }

    #[tokio::test]
    async fn list_devices_database_error() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_find_all().returning(|_| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let list_result = service.list_devices("user 1").await;

        assert!(matches!(list_result, Err(Error::TokenGet(_))));
    }

    #[tokio::test]
    async fn remove_device_deleted() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_delete().returning(|user_id, device_id| {
            assert_eq!(user_id, "user 1");
            assert_eq!(device_id, "device 1");
            Ok(())
        });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        service.remove_device("user 1", "device 1").await.unwrap();

        // assertion happen in mock
    }

    #[tokio::test]
    async fn remove_device_database_error() {
        let mut repository = MockDeviceTokensRepository::new();
        repository.expect_delete().returning(|_, _| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = DeviceTokensServiceImpl::new(Arc::new(repository));

        let remove_result = service.remove_device("user 1", "device 1").await;

        assert!(matches!(remove_result, Err(Error::TokenDelete(_))));
    }
}
