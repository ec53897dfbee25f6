use std::env;

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::ocr::OcrConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod capture;
pub mod ocr;
pub mod translator;
pub mod ui;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub translator: TranslatorConfig,
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            ocr: OcrConfig::default(),
            translator: TranslatorConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by HONYAKU_* environment variables.
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Ok(lang) = env::var("HONYAKU_OCR_LANG") {
            config.ocr.language = lang;
        }
        if let Ok(target) = env::var("HONYAKU_TARGET_LANG") {
            config.translator.target_lang = target;
        }
        if let Some(interval) = env_parse::<u64>("HONYAKU_AUTO_INTERVAL_MS") {
            config.ocr.auto_interval_ms = interval;
        }
        if let Some(timeout) = env_parse::<u64>("HONYAKU_TRANSLATE_TIMEOUT_MS") {
            config.translator.timeout_ms = timeout;
        }
        if let Ok(endpoint) = env::var("HONYAKU_TRANSLATE_ENDPOINT") {
            config.translator.endpoint = endpoint;
        }
        if let Some(hide) = env_parse::<bool>("HONYAKU_HIDE_CAPTURE_WINDOW") {
            config.ui.hide_capture_window = hide;
        }
        if let Some(hide) = env_parse::<bool>("HONYAKU_HIDE_CAPTURE_THUMBNAIL") {
            config.ui.hide_capture_thumbnail = hide;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
