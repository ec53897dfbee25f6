use std::sync::Arc;

use honyaku_ocr::{OcrEngine, OcrError};
use honyaku_translator::{TranslateError, Translator};
use honyaku_types::{CapturedImage, RecognitionResult};
use tokio::sync::Mutex;

use crate::preprocess::normalize;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("recognition failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),

    #[error("worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Memo of the most recent run. Depth 1: only the immediately prior text is
/// remembered, and it is only ever overwritten.
struct Memo {
    source_text: String,
    translated_text: String,
}

/// Converts a captured frame into recognized-and-translated text. Translation
/// is skipped when the recognized text has not changed since the previous
/// call, so back-to-back captures of a static region cost one network call.
///
/// Languages are fixed at construction; the memoized pair is therefore
/// always a translation under the configured target language.
pub struct RecognitionPipeline {
    ocr: Arc<dyn OcrEngine>,
    translator: Arc<dyn Translator>,
    source_lang: String,
    target_lang: String,
    memo: Mutex<Option<Memo>>,
}

impl RecognitionPipeline {
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        translator: Arc<dyn Translator>,
        source_lang: String,
        target_lang: String,
    ) -> Self {
        Self {
            ocr,
            translator,
            source_lang,
            target_lang,
            memo: Mutex::new(None),
        }
    }

    /// Run OCR on `image`, then translate the normalized text unless it is
    /// identical to the previous call's. Fails as a whole: no partial result,
    /// and the memo is untouched on any failure.
    pub async fn recognize(
        &self,
        image: CapturedImage,
    ) -> Result<RecognitionResult, PipelineError> {
        let ocr = Arc::clone(&self.ocr);
        let lang = self.source_lang.clone();
        let raw = tokio::task::spawn_blocking(move || ocr.recognize_text(&image, &lang)).await??;

        let text = normalize(&raw);
        if text.is_empty() {
            tracing::debug!("ocr produced no text, skipping translation");
            return Ok(RecognitionResult {
                source_text: String::new(),
                translated_text: String::new(),
            });
        }

        {
            let memo = self.memo.lock().await;
            if let Some(memo) = memo.as_ref() {
                if memo.source_text == text {
                    tracing::debug!("text unchanged, reusing previous translation");
                    return Ok(RecognitionResult {
                        source_text: memo.source_text.clone(),
                        translated_text: memo.translated_text.clone(),
                    });
                }
            }
        }

        let translation = self.translator.translate(&text, &self.target_lang).await?;
        tracing::info!("{} -> {}", text, translation.text);

        let result = RecognitionResult {
            source_text: text,
            translated_text: translation.text,
        };
        *self.memo.lock().await = Some(Memo {
            source_text: result.source_text.clone(),
            translated_text: result.translated_text.clone(),
        });
        Ok(result)
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }
}
