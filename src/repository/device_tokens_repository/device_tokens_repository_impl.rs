use super::{entity::DeviceTokenFindEntity, DeviceToken, DeviceTokensRepository, DeviceType};
use crate::repository::{self, Error};
use axum::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{options::IndexOptions, Database, IndexModel};

const DEVICE_TOKENS: &str = "device_tokens";
const INDEX_NAME_UNIQUE_USER_DEVICE: &str = "unique_user_device";
const INDEX_NAME_USER_TOKEN: &str = "user_token";

pub struct DeviceTokensRepositoryImpl {
    database: Database,
}

impl DeviceTokensRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        tracing::debug!(collection = DEVICE_TOKENS, "creating collection");
        database.create_collection(DEVICE_TOKENS).await?;

        let collection = database.collection::<Document>(DEVICE_TOKENS);

        tracing::debug!("fetching index names");
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_UNIQUE_USER_DEVICE.to_string()) {
            collection
                .create_index(
                    IndexModel::builder()
                        .keys(doc! {
                            "user_id": 1,
                            "device_id": 1,
                        })
                        .options(
                            IndexOptions::builder()
                                .name(INDEX_NAME_UNIQUE_USER_DEVICE.to_string())
                                .unique(true)
                                .build(),
                        )
                        .build(),
                )
                .await?;
            tracing::debug!(
                collection = DEVICE_TOKENS,
                index = INDEX_NAME_UNIQUE_USER_DEVICE,
                "created index"
            );
        }

        if !index_names.contains(&INDEX_NAME_USER_TOKEN.to_string()) {
            collection
                .create_index(
                    IndexModel::builder()
                        .keys(doc! {
                            "user_id": 1,
                            "token": 1,
                        })
                        .options(
                            IndexOptions::builder()
                                .name(INDEX_NAME_USER_TOKEN.to_string())
                                .build(),
                        )
                        .build(),
                )
                .await?;
            tracing::debug!(
                collection = DEVICE_TOKENS,
                index = INDEX_NAME_USER_TOKEN,
                "created index"
            );
        }

        Ok(Self { database })
    }
}

#[async_trait]
impl DeviceTokensRepository for DeviceTokensRepositoryImpl {
    async fn upsert(
        &self,
        user_id: &str,
        device_id: &str,
        token: &str,
        device_type: DeviceType,
        device_info: &str,
    ) -> Result<(), repository::Error> {
        self.database
            .collection::<Document>(DEVICE_TOKENS)
            .update_one(
                doc! {
                    "user_id": user_id,
                    "device_id": device_id,
                },
                doc! {
                    "$set": {
                        "token": token,
                        "device_type": device_type.as_ref(),
                        "device_info": device_info,
                    },
                    // timestamps must come from the database clock, not this process
                    "$currentDate": {
                        "created_at": true,
                        "last_used": true,
                    },
                },
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn find_all(&self, user_id: &str) -> Result<Vec<DeviceToken>, repository::Error> {
        let cursor = self
            .database
            .collection::<DeviceTokenFindEntity>(DEVICE_TOKENS)
            .find(doc! {
                "user_id": user_id,
            })
            .await?;

        let device_tokens = cursor.map_ok(DeviceToken::from).try_collect().await?;

        Ok(device_tokens)
    }

    async fn find_by_token(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Option<DeviceToken>, repository::Error> {
        let entity = self
            .database
            .collection::<DeviceTokenFindEntity>(DEVICE_TOKENS)
            .find_one(doc! {
                "user_id": user_id,
                "token": token,
            })
            .await?
            .map(DeviceToken::from);

        Ok(entity)
    }

    async fn update_last_used(
        &self,
        user_id: &str,
        device_id: &str,
    ) -> Result<(), repository::Error> {
        let update_result = self
            .database
            .collection::<Document>(DEVICE_TOKENS)
            .update_one(
                doc! {
                    "user_id": user_id,
                    "device_id": device_id,
                },
                doc! {
                    "$currentDate": {
                        "last_used": true,
                    },
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn delete(&self, user_id: &str, device_id: &str) -> Result<(), repository::Error> {
        self.database
            .collection::<Document>(DEVICE_TOKENS)
            .delete_one(doc! {
                "user_id": user_id,
                "device_id": device_id,
            })
            .await?;

        Ok(())
    }
}
