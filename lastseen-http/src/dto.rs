use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use lastseen_core::activity::ActivityError;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// message returned to clients on any internal failure, details stay in the logs.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Response body. `data` is flattened into the top level object.
#[derive(Debug, Serialize)]
pub struct HttpResponse<T> {
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(flatten)]
    pub data: Option<T>,

    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> HttpResponse<T> {
    pub fn ok(data: T) -> (StatusCode, Json<HttpResponse<T>>) {
        (StatusCode::OK, Json(Self::new(None, data)))
    }

    pub fn ok_with_message(message: &str, data: T) -> (StatusCode, Json<HttpResponse<T>>) {
        (
            StatusCode::OK,
            Json(Self::new(Some(message.to_string()), data)),
        )
    }

    fn new(message: Option<String>, data: T) -> Self {
        Self {
            message,
            data: Some(data),
            error: None,
        }
    }
}

impl HttpResponse<()> {
    fn err(error: String) -> Self {
        Self {
            message: None,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Error, Serialize)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, err_msg) = match self {
            Self::BadRequest(err) => (StatusCode::BAD_REQUEST, err),
            Self::InternalServerError(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
        };

        let resp = HttpResponse::err(err_msg);

        (status_code, Json(resp)).into_response()
    }
}

impl From<ActivityError> for AppError {
    fn from(value: ActivityError) -> Self {
        match value {
            ActivityError::ClientError(v) => {
                tracing::warn!("ActivityError: {}", v);
                Self::BadRequest(v.to_string())
            }
            err @ ActivityError::InternalError(_) => {
                tracing::error!("ActivityError: {}", err.detail());
                Self::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

/// trait to give error massage to inputs(query params, path params,or request body)
pub trait BadRequestErrMsg {
    fn bad_request_err_msg() -> &'static str {
        "Missing or invalid input"
    }
}

/// custom json body to answer malformed bodies with a 400 in the usual error shape.
pub struct CustomJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for CustomJson<T>
where
    T: BadRequestErrMsg + DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state).await.map_err(|err| {
            tracing::debug!("rejected request body: {}", err.body_text());
            AppError::BadRequest(T::bad_request_err_msg().to_string())
        })?;

        Ok(CustomJson(body))
    }
}
