use std::sync::Arc;

use honyaku_types::{AppEvent, CaptureRegion};

use crate::context::RecognizeContext;

/// Capture the region and run the pipeline on a background task. Supersedes
/// any recognition still in flight: its token is cancelled and its result
/// dropped, so only the newest capture reaches the display.
pub async fn handle_recognize_trigger(
    ctx: &RecognizeContext,
    region: CaptureRegion,
) -> anyhow::Result<()> {
    let hide_thumbnail = {
        let config = ctx.state.config.read().await;
        config.ui.hide_capture_thumbnail
    };

    let token = {
        let mut inflight = ctx.state.inflight.lock().await;
        if let Some(prev) = inflight.take() {
            tracing::debug!("superseding in-flight recognition");
            prev.cancel();
        }
        let token = ctx.cancel_root.child_token();
        *inflight = Some(token.clone());
        token
    };

    let ctx = ctx.clone();
    tokio::spawn(async move {
        let _ = ctx
            .event_tx
            .send(AppEvent::RecognitionStatus {
                status: "Capturing".to_string(),
                capturing: true,
            })
            .await;

        let capture = Arc::clone(&ctx.capture);
        let captured =
            tokio::task::spawn_blocking(move || capture.capture(region)).await;

        let image = match captured {
            Ok(Ok(image)) => image,
            Ok(Err(e)) => {
                tracing::error!("capture failed: {e:#}");
                let _ = ctx
                    .event_tx
                    .send(AppEvent::RecognitionStatus {
                        status: format!("capture failed: {e}"),
                        capturing: false,
                    })
                    .await;
                return;
            }
            Err(e) => {
                tracing::error!("capture task panicked: {e}");
                let _ = ctx
                    .event_tx
                    .send(AppEvent::RecognitionStatus {
                        status: "capture failed".to_string(),
                        capturing: false,
                    })
                    .await;
                return;
            }
        };

        if token.is_cancelled() {
            tracing::debug!("recognition superseded, dropping capture");
            return;
        }

        if !hide_thumbnail {
            let _ = ctx.event_tx.send(AppEvent::ShowThumbnail(image.clone())).await;
        }

        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("recognition superseded, dropping result");
            }
            result = ctx.pipeline.recognize(image) => {
                // The select can win a race against a cancel that already
                // happened; a stale result must still be dropped.
                if token.is_cancelled() {
                    tracing::debug!("recognition superseded, dropping result");
                    return;
                }
                let status = match result {
                    Ok(result) => {
                        let _ = ctx.event_tx.send(AppEvent::ShowRecognition(result)).await;
                        "Ready".to_string()
                    }
                    // Display carries the "recognition failed" /
                    // "translation failed" prefix the shell shows.
                    Err(e) => {
                        tracing::error!("{e}");
                        e.to_string()
                    }
                };
                let _ = ctx
                    .event_tx
                    .send(AppEvent::RecognitionStatus {
                        status,
                        capturing: false,
                    })
                    .await;
            }
        }
    });

    Ok(())
}
