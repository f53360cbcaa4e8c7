use axum::{body::Body, extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::{info_span, Instrument};
use uuid::Uuid;

pub(crate) async fn processing_time_middleware(req: Request<Body>, next: Next) -> Response {
    let start = tokio::time::Instant::now();
    let mut response = next.run(req).await;
    let duration_ms = start.elapsed().as_millis();

    let value = format!("lastseen;dur={}", duration_ms);

    if let Ok(server_timing_value) = HeaderValue::from_str(&value) {
        response
            .headers_mut()
            .insert("Server-Timing", server_timing_value);
    }

    response
}

pub(crate) const REQUEST_ID_HEADER_NAME: &str = "x-request-id";

pub(crate) const CORRELATION_ID_HEADER_NAME: &str = "x-correlation-id";

pub(crate) async fn tracing_middleware(mut req: Request, next: Next) -> Response {
    // get request id from header, or generate one
    let request_id_header_val = req
        .headers()
        .get(REQUEST_ID_HEADER_NAME)
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static(""))
        });
    let request_id = request_id_header_val
        .to_str()
        .unwrap_or_default()
        .to_string();

    // generate correlation id for tracing
    let correlation_id = Uuid::new_v4();
    let correlation_id_header_val = HeaderValue::from_str(&correlation_id.to_string())
        .unwrap_or_else(|_| HeaderValue::from_static(""));
    let method = req.method().clone();
    let uri = req.uri().clone();

    let span = info_span!(
        "tracing_middleware",
        %correlation_id,
        %request_id,
        method = %method,
        uri = %uri
    );

    req.extensions_mut().insert(request_id_header_val.clone());

    let mut response = async move {
        tracing::info!("--------------------Request received--------------------");
        next.run(req).await
    }
    .instrument(span)
    .await;

    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER_NAME, request_id_header_val);
    response
        .headers_mut()
        .insert(CORRELATION_ID_HEADER_NAME, correlation_id_header_val);

    response
}
