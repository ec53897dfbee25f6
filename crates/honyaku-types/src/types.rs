use std::fmt;

use serde::{Deserialize, Serialize};

/// Screen rectangle whose pixels are read for recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// One captured frame, RGBA8. Produced once per capture request and moved
/// into the pipeline invocation; clone it if the UI wants a thumbnail.
#[derive(Clone)]
pub struct CapturedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl CapturedImage {
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Output of one pipeline run, returned by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub source_text: String,
    pub translated_text: String,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Shell -> app: capture the region and run recognition once.
    TriggerRecognize(CaptureRegion),
    /// Shell -> app: start or stop the repeating auto-recognize loop.
    SetAutoRecognize {
        enabled: bool,
        region: CaptureRegion,
    },
    /// Shell -> app: quit.
    Shutdown,
    /// App -> shell: recognized and translated text to display.
    ShowRecognition(RecognitionResult),
    /// App -> shell: the frame that was just captured, for display.
    ShowThumbnail(CapturedImage),
    /// App -> shell: progress / error line to display.
    RecognitionStatus { status: String, capturing: bool },
}
