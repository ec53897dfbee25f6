use serde::{Deserialize, Serialize};

fn default_auto() -> bool {
    false
}

fn default_language() -> String {
    "jpn".to_string()
}

fn default_auto_interval_ms() -> u64 {
    2000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Repeat recognition on a timer.
    #[serde(default = "default_auto")]
    pub auto: bool,
    /// Tesseract language code passed to the OCR engine.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_auto_interval_ms")]
    pub auto_interval_ms: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            auto: default_auto(),
            language: default_language(),
            auto_interval_ms: default_auto_interval_ms(),
        }
    }
}
