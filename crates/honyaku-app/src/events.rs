use std::sync::Arc;
use std::time::Duration;

use honyaku_capture::{CaptureProvider, ScreenCaptureProvider};
use honyaku_core::RecognitionPipeline;
use honyaku_ocr::{OcrEngine, TesseractEngine};
use honyaku_translator::{GoogleWebTranslator, Translator};
use honyaku_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::context::RecognizeContext;
use crate::state::AppState;

pub mod auto_recognize;
pub mod trigger_recognize;

use auto_recognize::{start_auto_recognize_loop, stop_auto_recognize_loop};
use trigger_recognize::handle_recognize_trigger;

/// App's main loop: builds the capture/OCR/translation collaborators from
/// config, then serializes triggers coming from the shell.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (ocr_lang, translator_cfg, exclude_title) = {
        let config = state.config.read().await;
        let exclude = if config.ui.hide_capture_window {
            // The catch window is hidden during capture, nothing to avoid.
            None
        } else {
            config.capture.exclude_window_title.clone()
        };
        (config.ocr.language.clone(), config.translator.clone(), exclude)
    };

    let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::new());
    let translator: Arc<dyn Translator> = Arc::new(GoogleWebTranslator::new(
        translator_cfg.endpoint,
        Duration::from_millis(translator_cfg.timeout_ms),
    )?);
    let capture: Arc<dyn CaptureProvider> = Arc::new(ScreenCaptureProvider::new(exclude_title));

    let pipeline = Arc::new(RecognitionPipeline::new(
        ocr,
        translator,
        ocr_lang,
        translator_cfg.target_lang,
    ));
    tracing::info!("pipeline ready, translating into {}", pipeline.target_lang());

    let ctx = RecognizeContext::new(state, app_to_ui_tx, pipeline, capture, cancel);
    run_event_loop(ctx, ui_to_app_rx).await
}

pub(crate) async fn run_event_loop(
    ctx: RecognizeContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("event loop started");
    loop {
        let event = tokio::select! {
            _ = ctx.cancel_root.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        match event {
            AppEvent::TriggerRecognize(region) => {
                handle_recognize_trigger(&ctx, region).await?;
            }
            AppEvent::SetAutoRecognize { enabled, region } => {
                {
                    let mut config = ctx.state.config.write().await;
                    config.ocr.auto = enabled;
                }
                if enabled {
                    start_auto_recognize_loop(&ctx, region).await;
                } else {
                    stop_auto_recognize_loop(&ctx.state).await;
                }
            }
            AppEvent::Shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
            // App -> shell events, nothing to do here.
            AppEvent::ShowRecognition(_)
            | AppEvent::ShowThumbnail(_)
            | AppEvent::RecognitionStatus { .. } => {}
        }
    }
    Ok(())
}
