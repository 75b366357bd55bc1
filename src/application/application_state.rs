use super::ApplicationEnv;
use crate::{
    repository::DeviceTokensRepositoryImpl,
    service::{
        device_tokens_service::{DeviceTokensService, DeviceTokensServiceImpl},
        push_client::{FcmPushClient, ServiceAccountKey},
        push_service::{PushService, PushServiceImpl},
    },
};
use axum::extract::FromRef;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub device_tokens_service: Arc<dyn DeviceTokensService>,
    pub push_service: Arc<dyn PushService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let device_tokens_repository = DeviceTokensRepositoryImpl::new(db).await?;
    let device_tokens_repository = Arc::new(device_tokens_repository);

    tracing::info!("creating push client");
    let credentials = std::fs::read_to_string(&env.fcm_credentials_path)?;
    let credentials = serde_json::from_str::<ServiceAccountKey>(&credentials)?;
    let push_client = FcmPushClient::new(credentials)?;
    let push_client = Arc::new(push_client);

    tracing::info!("creating services");
    let device_tokens_service = DeviceTokensServiceImpl::new(device_tokens_repository.clone());
    let device_tokens_service = Arc::new(device_tokens_service);

    let push_service = PushServiceImpl::new(device_tokens_repository, push_client);
    let push_service = Arc::new(push_service);

    Ok((
        ApplicationState {
            device_tokens_service,
            push_service,
        },
        ApplicationStateToClose { db_client },
    ))
}
