use std::str::FromStr;

use axum::{extract::State, response::IntoResponse};
use lastseen_core::activity::{service, ActivityStorage, UserId};
use serde::Deserialize;
use tracing::instrument;

use crate::dto::*;
use crate::global::AppContext;

const USER_PING_MESSAGE: &str = "User activity logged";

#[derive(Debug, Deserialize)]
pub(crate) struct UserPingBody {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,

    #[serde(rename = "platform", default)]
    pub platform: Option<String>,
}

impl BadRequestErrMsg for UserPingBody {
    fn bad_request_err_msg() -> &'static str {
        "request body must be JSON: {\"userId\": string, \"platform\": string (optional)}"
    }
}

// POST /api/user-ping
// record that `userId` was active on `platform` now.
// body: {"userId": "u1", "platform": "ios"}, platform is optional and defaults to "unknown".
#[instrument(skip(ctx))]
pub(crate) async fn user_ping_handler<AS>(
    State(ctx): State<AppContext<AS>>,
    CustomJson(body): CustomJson<UserPingBody>,
) -> Result<impl IntoResponse, AppError>
where
    AS: ActivityStorage + Clone + Send + Sync + 'static,
{
    tracing::info!(
        "Received ping from userId: {:?} on platform: {:?}",
        body.user_id,
        body.platform
    );

    let user_id = UserId::from_str(body.user_id.as_deref().unwrap_or_default())?;

    let ret = service::ping(&ctx.activity_storage, user_id, body.platform).await?;

    Ok(HttpResponse::ok_with_message(USER_PING_MESSAGE, ret))
}
