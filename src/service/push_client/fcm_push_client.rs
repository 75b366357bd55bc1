use super::{Error, MulticastOutcome, PushClient, PushMessage, SendOutcome, ServiceAccountKey};
use axum::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};
use time::OffsetDateTime;
use tokio::sync::Mutex;

const FIREBASE_MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const GRANT_TYPE_JWT_BEARER: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ACCESS_TOKEN_LIFESPAN: Duration = Duration::from_secs(3600);
const ACCESS_TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

pub struct FcmPushClient {
    credentials: ServiceAccountKey,
    encoding_key: EncodingKey,
    token_cache: Mutex<Option<CachedAccessToken>>,
    http_client: reqwest::Client,
}

impl FcmPushClient {
    pub fn new(credentials: ServiceAccountKey) -> Result<Self, Error> {
        let encoding_key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;

        Ok(Self {
            credentials,
            encoding_key,
            token_cache: Mutex::new(None),
            http_client: reqwest::Client::new(),
        })
    }

    ///
    /// Returns cached OAuth2 access token or exchanges
    /// a fresh self signed JWT for a new one.
    ///
    /// Lock is held across the exchange so concurrent multicasts
    /// don't refresh the token more than once.
    ///
    async fn access_token(&self) -> Result<String, Error> {
        let mut cache = self.token_cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if OffsetDateTime::now_utc() < cached.expires_at - ACCESS_TOKEN_EXPIRY_MARGIN {
                return Ok(cached.access_token.clone());
            }
        }

        tracing::debug!("fetching fresh access token");
        let fresh = self.fetch_access_token().await?;
        let access_token = fresh.access_token.clone();
        *cache = Some(fresh);

        Ok(access_token)
    }

    async fn fetch_access_token(&self) -> Result<CachedAccessToken, Error> {
        let now = OffsetDateTime::now_utc();
        let claims = AccessTokenClaims {
            iss: &self.credentials.client_email,
            scope: FIREBASE_MESSAGING_SCOPE,
            aud: &self.credentials.token_uri,
            iat: now.unix_timestamp(),
            exp: (now + ACCESS_TOKEN_LIFESPAN).unix_timestamp(),
        };
        let assertion =
            jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?;

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", GRANT_TYPE_JWT_BEARER),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::TokenRequestRejected {
                status: response.status().as_u16(),
            });
        }

        let token_response = response.json::<AccessTokenResponse>().await?;

        Ok(CachedAccessToken {
            access_token: token_response.access_token,
            expires_at: now + Duration::from_secs(token_response.expires_in),
        })
    }

    async fn send_single(
        &self,
        url: &str,
        access_token: &str,
        request: &FcmSendRequest<'_>,
    ) -> SendOutcome {
        let response = match self
            .http_client
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return SendOutcome {
                    success: false,
                    message_id: None,
                    error: Some(err.to_string()),
                }
            }
        };

        match response.status().is_success() {
            true => {
                let message_id = response
                    .json::<FcmSendResponse>()
                    .await
                    .ok()
                    .map(|body| body.name);

                SendOutcome {
                    success: true,
                    message_id,
                    error: None,
                }
            }
            false => {
                let status = response.status();
                let error = match response.json::<FcmErrorResponse>().await {
                    Ok(body) => body.error.status.unwrap_or(body.error.message),
                    Err(_) => format!("fcm responded with status {status}"),
                };

                SendOutcome {
                    success: false,
                    message_id: None,
                    error: Some(error),
                }
            }
        }
    }
}

#[async_trait]
impl PushClient for FcmPushClient {
    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<MulticastOutcome, Error> {
        let access_token = self.access_token().await?;
        let url = format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.credentials.project_id
        );

        let mut responses = Vec::with_capacity(tokens.len());
        let mut success_count = 0;
        let mut failure_count = 0;

        for token in tokens {
            let request = FcmSendRequest::new(token, message);
            let outcome = self.send_single(&url, &access_token, &request).await;

            match outcome.success {
                true => success_count += 1,
                false => {
                    failure_count += 1;
                    tracing::warn!(
                        error = outcome.error.as_deref().unwrap_or("unknown"),
                        "failed to send notification to token"
                    );
                }
            }
            responses.push(outcome);
        }

        Ok(MulticastOutcome {
            success_count,
            failure_count,
            responses,
        })
    }
}

struct CachedAccessToken {
    access_token: String,
    expires_at: OffsetDateTime,
}

#[derive(Serialize)]
struct AccessTokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Serialize)]
struct FcmSendRequest<'a> {
    message: FcmMessage<'a>,
}

impl<'a> FcmSendRequest<'a> {
    fn new(token: &'a str, message: &'a PushMessage) -> Self {
        Self {
            message: FcmMessage {
                token,
                notification: FcmNotification {
                    title: &message.title,
                    body: &message.body,
                },
                data: &message.data,
                webpush: message.link.as_deref().map(|link| FcmWebpush {
                    fcm_options: FcmWebpushOptions { link },
                }),
            },
        }
    }
}

#[derive(Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    data: &'a HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webpush: Option<FcmWebpush<'a>>,
}

#[derive(Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct FcmWebpush<'a> {
    fcm_options: FcmWebpushOptions<'a>,
}

#[derive(Serialize)]
struct FcmWebpushOptions<'a> {
    link: &'a str,
}

#[derive(Deserialize)]
struct FcmSendResponse {
    name: String,
}

#[derive(Deserialize)]
struct FcmErrorResponse {
    error: FcmError,
}

#[derive(Deserialize)]
struct FcmError {
    message: String,
    status: Option<String>,
}
