use serde::{Deserialize, Serialize};

fn default_target_lang() -> String {
    "zh-cn".to_string()
}

fn default_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout; the translation service is network-bound.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            target_lang: default_target_lang(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
