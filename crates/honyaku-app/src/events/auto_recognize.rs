use std::time::Duration;

use honyaku_types::CaptureRegion;

use crate::context::RecognizeContext;
use crate::state::AppState;

use super::trigger_recognize::handle_recognize_trigger;

/// Fire a recognition trigger every `auto_interval_ms` until stopped.
///
/// Each loop owns the cancellation token stored in `AppState::auto_loop`;
/// starting again replaces and cancels any previous loop, and the sleep
/// races that token, so an off/on toggle inside one interval stops the old
/// loop instead of leaving two loops firing side by side.
pub async fn start_auto_recognize_loop(ctx: &RecognizeContext, region: CaptureRegion) {
    let token = {
        let mut auto_loop = ctx.state.auto_loop.lock().await;
        if let Some(prev) = auto_loop.take() {
            prev.cancel();
        }
        let token = ctx.cancel_root.child_token();
        *auto_loop = Some(token.clone());
        token
    };

    let ctx = ctx.clone();
    tokio::spawn(async move {
        tracing::info!("auto-recognize started");
        loop {
            let (enabled, interval_ms) = {
                let config = ctx.state.config.read().await;
                (config.ocr.auto, config.ocr.auto_interval_ms)
            };

            if !enabled || token.is_cancelled() {
                break;
            }

            if let Err(e) = handle_recognize_trigger(&ctx, region).await {
                tracing::error!("auto-recognize trigger failed: {e}");
            }

            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(Duration::from_millis(interval_ms)) => {}
            }
        }
        tracing::info!("auto-recognize stopped");
    });
}

/// Cancel the running auto-recognize loop, if any.
pub async fn stop_auto_recognize_loop(state: &AppState) {
    if let Some(token) = state.auto_loop.lock().await.take() {
        token.cancel();
    }
}
