use axum::http::StatusCode;

// GET /ping
// liveness probe, answers without touching storage.
pub(crate) async fn ping_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
