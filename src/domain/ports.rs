use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Settings a language model adapter needs to reach its service.
pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&str>;
    fn model_name(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// A text-in, text-out generative model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    fn model_name(&self) -> &str;
}
