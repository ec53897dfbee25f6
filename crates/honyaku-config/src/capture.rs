use honyaku_types::CaptureRegion;
use serde::{Deserialize, Serialize};

fn default_region() -> CaptureRegion {
    // Matches the size of the reference catch window.
    CaptureRegion {
        x: 0,
        y: 0,
        width: 750,
        height: 100,
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    #[serde(default = "default_region")]
    pub region: CaptureRegion,
    /// Title of a window to keep out of the capture. When it overlaps the
    /// region, the region is shifted below the window instead of grabbing
    /// our own chrome.
    pub exclude_window_title: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            exclude_window_title: None,
        }
    }
}
