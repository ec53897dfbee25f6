mod google;

pub use google::GoogleWebTranslator;

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text into the target language. The source language is
    /// detected by the provider.
    async fn translate(&self, text: &str, target: &str) -> Result<Translation, TranslateError>;

    /// Provider name, for logs and error messages.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub detected_source: Option<LanguageCode>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service returned HTTP {0}")]
    Service(u16),

    #[error("Rate limit exceeded")]
    RateLimited,
}
