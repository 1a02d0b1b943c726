#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Origin of the scoring backend; `/api/product` is appended per request.
    pub backend_url: String,
    /// Cart endpoint that receives `{alternative, original}` pairs.
    pub cart_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Base URL of an OpenAI-compatible API used for screenshot extraction.
    pub vision_url: String,
    pub vision_model: String,
    pub vision_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("backend_url", &self.backend_url)
            .field("cart_url", &self.cart_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("vision_url", &self.vision_url)
            .field("vision_model", &self.vision_model)
            .field(
                "vision_api_key",
                &self.vision_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
