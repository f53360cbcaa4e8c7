use tracing::instrument;

use super::{
    entity::{UserActivity, UserId, UsersActivity},
    interface::{ActivityResult, ActivityStorage},
};

/// Record that `user_id` was active on `platform` just now.
/// Overwrites whatever was stored for that user before.
#[instrument(skip(storage))]
pub async fn ping<AS>(
    storage: &AS,
    user_id: UserId,
    platform: Option<String>,
) -> ActivityResult<UserActivity>
where
    AS: ActivityStorage,
{
    let record = UserActivity::seen_now(user_id, platform);

    storage.upsert(&record).await
}

/// List every tracked user.
#[instrument(skip(storage))]
pub async fn users<AS>(storage: &AS) -> ActivityResult<UsersActivity>
where
    AS: ActivityStorage,
{
    storage.get_all().await
}
