use std::sync::Arc;

use honyaku_capture::CaptureProvider;
use honyaku_core::RecognitionPipeline;
use honyaku_types::AppEvent;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Bundles the shared dependencies every recognition trigger needs, so
/// handlers take (context, region) instead of five parameters.
#[derive(Clone)]
pub struct RecognizeContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub pipeline: Arc<RecognitionPipeline>,
    pub capture: Arc<dyn CaptureProvider>,
    pub cancel_root: CancellationToken,
}

impl RecognizeContext {
    pub fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        pipeline: Arc<RecognitionPipeline>,
        capture: Arc<dyn CaptureProvider>,
        cancel_root: CancellationToken,
    ) -> Self {
        Self {
            state,
            event_tx,
            pipeline,
            capture,
            cancel_root,
        }
    }
}
