use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ClientError(#[from] pub(crate) anyhow::Error);

impl ClientError {
    pub fn from_msg<S: AsRef<str>>(message: S) -> Self {
        Self(anyhow::anyhow!("{}", message.as_ref()))
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct InternalError(#[from] pub(crate) anyhow::Error);

impl InternalError {
    pub fn from_msg<S: AsRef<str>>(message: S) -> Self {
        Self(anyhow::anyhow!("{}", message.as_ref()))
    }

    /// full chain of causes, for server side logs only.
    pub fn detail(&self) -> String {
        format!("{:#}", self.0)
    }
}

pub trait AsInternalError<T> {
    fn as_internal_err(self) -> Result<T, InternalError>;
}

impl<T, E> AsInternalError<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn as_internal_err(self) -> Result<T, InternalError> {
        self.map_err(|e| InternalError(e.into()))
    }
}
