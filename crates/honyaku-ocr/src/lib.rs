mod tesseract;

use honyaku_types::CapturedImage;
pub use tesseract::TesseractEngine;

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("image is empty or not a valid bitmap")]
    InvalidImage,

    #[error("language data not available: {0}")]
    UnsupportedLanguage(String),

    #[error("ocr backend error: {0}")]
    Backend(String),
}

/// Text recognition over a captured bitmap. Implementations are blocking;
/// callers offload them to a worker thread.
pub trait OcrEngine: Send + Sync {
    fn recognize_text(&self, image: &CapturedImage, language: &str) -> Result<String, OcrError>;
}
