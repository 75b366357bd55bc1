use crate::{
    application::ApplicationState,
    dto::{input, output},
    error::Error,
    service::{device_tokens_service::DeviceTokensService, push_service::PushService},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routing() -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/devices", post(register_device))
        .route("/api/v1/devices/:user_id", get(list_devices))
        .route("/api/v1/devices/:user_id/:device_id", delete(remove_device))
        .route("/api/v1/push/user", post(send_to_user))
        .route("/api/v1/push/users", post(send_to_users))
        .route("/api/v1/push/tokens", post(send_to_tokens))
}

async fn register_device(
    State(device_tokens_service): State<Arc<dyn DeviceTokensService>>,
    Json(registration): Json<input::DeviceRegistration>,
) -> Result<(StatusCode, Json<output::RegisteredDevice>), Error> {
    let registered = device_tokens_service.register_device(registration).await?;

    Ok((StatusCode::OK, Json(registered)))
}

async fn list_devices(
    State(device_tokens_service): State<Arc<dyn DeviceTokensService>>,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<output::DeviceTokenList>), Error> {
    let list = device_tokens_service.list_devices(&user_id).await?;

    Ok((StatusCode::OK, Json(list)))
}

async fn remove_device(
    State(device_tokens_service): State<Arc<dyn DeviceTokensService>>,
    Path((user_id, device_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<output::Message>), Error> {
    device_tokens_service
        .remove_device(&user_id, &device_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(output::Message {
            message: "device token deleted".to_string(),
        }),
    ))
}

async fn send_to_user(
    State(push_service): State<Arc<dyn PushService>>,
    Json(send): Json<input::SendToUser>,
) -> Result<(StatusCode, Json<output::DispatchSummary>), Error> {
    let summary = push_service
        .send_to_user(&send.user_id, send.notification)
        .await?
        .unwrap_or_else(output::DispatchSummary::no_recipients);

    Ok((StatusCode::OK, Json(summary)))
}

async fn send_to_users(
    State(push_service): State<Arc<dyn PushService>>,
    Json(send): Json<input::SendToUsers>,
) -> Result<(StatusCode, Json<output::DispatchSummary>), Error> {
    let summary = push_service
        .send_to_users(&send.user_ids, send.notification)
        .await?
        .unwrap_or_else(output::DispatchSummary::no_recipients);

    Ok((StatusCode::OK, Json(summary)))
}

async fn send_to_tokens(
    State(push_service): State<Arc<dyn PushService>>,
    Json(send): Json<input::SendToTokens>,
) -> Result<(StatusCode, Json<output::MulticastReport>), Error> {
    let report = push_service
        .send_to_tokens(send.tokens, send.notification)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}
