use axum::{extract::State, response::IntoResponse};
use lastseen_core::activity::{service, ActivityStorage};
use tracing::instrument;

use crate::dto::*;
use crate::global::AppContext;

// GET /api/users
// every tracked user: {"<userId>": {"lastSeen": "...", "platform": "..."}}
#[instrument(skip(ctx))]
pub(crate) async fn get_users_handler<AS>(
    State(ctx): State<AppContext<AS>>,
) -> Result<impl IntoResponse, AppError>
where
    AS: ActivityStorage + Clone + Send + Sync + 'static,
{
    let users = service::users(&ctx.activity_storage).await?;

    Ok(HttpResponse::ok(users))
}
