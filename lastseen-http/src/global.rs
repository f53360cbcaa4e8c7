use lastseen_core::activity::ActivityStorage;
use lastseen_utils::config_util;
use serde::Deserialize;

const ENV_PREFIX: &str = "HTTP_";

const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(alias = "HTTP_PORT", default = "default_http_port")]
    pub http_port: u16,
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

/// get configs of lastseen-http
pub fn load_config() -> Result<AppConfig, anyhow::Error> {
    config_util::get_config::<AppConfig>(ENV_PREFIX)
}

/// dependencies of lastseen-http handlers, built once at startup.
#[derive(Clone)]
pub struct AppContext<AS> {
    pub activity_storage: AS,
}

impl<AS> AppContext<AS>
where
    AS: ActivityStorage + Clone + Send + Sync + 'static,
{
    pub fn new(activity_storage: AS) -> Self {
        Self { activity_storage }
    }
}
