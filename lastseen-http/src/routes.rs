use axum::{
    routing::{get, post},
    Router,
};
use lastseen_core::activity::ActivityStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::global::AppContext;
use crate::middlewares;

mod api_handlers;
mod root_handlers;

pub fn register_routes<AS>(app_ctx: AppContext<AS>) -> Router
where
    AS: ActivityStorage + Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(root_handlers())
        .nest("/api", api_handlers())
        .with_state(app_ctx)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(
                    middlewares::processing_time_middleware,
                ))
                .layer(axum::middleware::from_fn(middlewares::tracing_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

fn root_handlers<AS>() -> Router<AppContext<AS>>
where
    AS: ActivityStorage + Clone + Send + Sync + 'static,
{
    Router::new().route("/ping", get(root_handlers::ping::ping_handler))
}

fn api_handlers<AS>() -> Router<AppContext<AS>>
where
    AS: ActivityStorage + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/user-ping",
            post(api_handlers::user_ping::user_ping_handler::<AS>),
        )
        .route("/users", get(api_handlers::users::get_users_handler::<AS>))
}
