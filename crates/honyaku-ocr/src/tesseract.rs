use std::collections::HashMap;
use std::sync::OnceLock;

use honyaku_types::CapturedImage;
use image::{DynamicImage, RgbaImage};
use rusty_tesseract::Args;

use crate::{OcrEngine, OcrError};

/// OCR backend that shells out to the Tesseract binary.
pub struct TesseractEngine {
    /// Languages the local install reports, fetched once.
    available_langs: OnceLock<Option<Vec<String>>>,
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self {
            available_langs: OnceLock::new(),
        }
    }

    fn check_language(&self, language: &str) -> Result<(), OcrError> {
        let langs = self
            .available_langs
            .get_or_init(|| match rusty_tesseract::get_tesseract_langs() {
                Ok(langs) => Some(langs),
                Err(e) => {
                    tracing::warn!("could not list tesseract languages: {e}");
                    None
                }
            });

        match langs {
            Some(langs) if !langs.iter().any(|l| l == language) => {
                Err(OcrError::UnsupportedLanguage(language.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize_text(&self, image: &CapturedImage, language: &str) -> Result<String, OcrError> {
        self.check_language(language)?;

        let bitmap = decode_rgba(image)?;
        let tess_image = rusty_tesseract::Image::from_dynamic_image(&bitmap)
            .map_err(|e| OcrError::Backend(e.to_string()))?;

        let args = Args {
            lang: language.to_string(),
            config_variables: HashMap::new(),
            dpi: Some(150),
            psm: Some(6),
            oem: Some(3),
        };

        let text = rusty_tesseract::image_to_string(&tess_image, &args)
            .map_err(|e| OcrError::Backend(e.to_string()))?;

        tracing::debug!("ocr produced {} chars", text.len());
        Ok(text)
    }
}

/// Rebuild an image buffer from the captured frame, rejecting frames whose
/// dimensions do not match their pixel data.
pub(crate) fn decode_rgba(image: &CapturedImage) -> Result<DynamicImage, OcrError> {
    if image.width == 0 || image.height == 0 || image.data.len() != image.expected_len() {
        return Err(OcrError::InvalidImage);
    }

    RgbaImage::from_raw(image.width, image.height, image.data.clone())
        .map(DynamicImage::ImageRgba8)
        .ok_or(OcrError::InvalidImage)
}
