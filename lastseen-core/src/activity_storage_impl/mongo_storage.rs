// mongo_storage.rs keeps one document per user in a MongoDB collection,
// upserted by the unique userId field.

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc};
use mongodb::options::{
    ClientOptions, CreateIndexOptions, FindOneAndUpdateOptions, IndexOptions, ReturnDocument,
};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::activity::{
    entity::{platform_or_unknown, UserActivity, UserId, UsersActivity},
    interface::{ActivityError, ActivityResult, ActivityStorage},
};
use crate::error::AsInternalError;

const ERROR_PREFIX: &str = "[ACTIVITY][mongo_storage]";

const USER_ID_INDEX_NAME: &str = "uid_user_id";

/// Shape of a record inside the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserActivityDocument {
    #[serde(rename = "userId")]
    pub user_id: String,

    #[serde(rename = "lastSeen")]
    pub last_seen: bson::DateTime,

    #[serde(rename = "platform", default)]
    pub platform: Option<String>,
}

impl TryFrom<UserActivityDocument> for UserActivity {
    type Error = ActivityError;

    fn try_from(value: UserActivityDocument) -> Result<Self, Self::Error> {
        let user_id = UserId::from_str(&value.user_id).map_err(|_| {
            ActivityError::internal_error("mongo storage found document with empty userId")
        })?;
        let last_seen = Utc
            .timestamp_millis_opt(value.last_seen.timestamp_millis())
            .single()
            .ok_or_else(|| {
                ActivityError::internal_error("mongo storage found out of range lastSeen")
            })?;

        Ok(UserActivity {
            user_id,
            last_seen,
            platform: platform_or_unknown(value.platform),
        })
    }
}

#[derive(Clone)]
pub struct MongoStorage {
    client: Client,
    collection: Collection<UserActivityDocument>,
}

impl MongoStorage {
    /// connect to the store and make sure it answers, then ensure the userId index.
    pub async fn open(uri: &str, database: &str, collection: &str) -> Result<Self, anyhow::Error> {
        let options = ClientOptions::parse(uri)
            .await
            .context("mongo storage parse connection string")?;
        let client = Client::with_options(options).context("mongo storage create client")?;
        let database = client.database(database);

        database
            .run_command(doc! {"ping": 1}, None)
            .await
            .context("mongo storage ping")?;

        let collection = database.collection::<UserActivityDocument>(collection);
        ensure_indexes(&collection).await?;

        tracing::info!(
            "{} connected to {}.{}",
            ERROR_PREFIX,
            database.name(),
            collection.name()
        );

        Ok(Self { client, collection })
    }
}

async fn ensure_indexes(collection: &Collection<UserActivityDocument>) -> Result<(), anyhow::Error> {
    let user_id_index = IndexModel::builder()
        .keys(doc! {"userId": 1})
        .options(
            IndexOptions::builder()
                .unique(true)
                .name(Some(USER_ID_INDEX_NAME.to_string()))
                .build(),
        )
        .build();
    collection
        .create_index(user_id_index, None::<CreateIndexOptions>)
        .await
        .context("mongo storage create userId index")?;

    Ok(())
}

#[async_trait]
impl ActivityStorage for MongoStorage {
    #[instrument(skip(self))]
    async fn upsert(&self, record: &UserActivity) -> ActivityResult<UserActivity> {
        let filter = doc! {"userId": record.user_id.as_str()};
        let update = doc! {
            "$set": {
                "lastSeen": bson::DateTime::from_millis(record.last_seen.timestamp_millis()),
                "platform": record.platform.as_str(),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let persisted = self
            .collection
            .find_one_and_update(filter, update, options)
            .await
            .context("mongo storage upsert")
            .as_internal_err()
            .inspect_err(|err| tracing::error!("{} {}", ERROR_PREFIX, err.detail()))?
            .ok_or_else(|| ActivityError::internal_error("mongo storage upsert returned nothing"))?;

        persisted.try_into()
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> ActivityResult<UsersActivity> {
        let mut cursor = self
            .collection
            .find(None, None)
            .await
            .context("mongo storage find all")
            .as_internal_err()?;

        let mut users = UsersActivity::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .context("mongo storage reading cursor")
            .as_internal_err()?
        {
            let (user_id, activity) = UserActivity::try_from(document)?.into_entry();
            users.insert(user_id, activity);
        }

        Ok(users)
    }

    async fn close(&self) -> ActivityResult<()> {
        self.client.clone().shutdown().await;
        tracing::info!("{} client shut down", ERROR_PREFIX);
        Ok(())
    }
}
