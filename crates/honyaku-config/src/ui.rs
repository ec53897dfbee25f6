use serde::{Deserialize, Serialize};

fn default_hidden() -> bool {
    false
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Hide the translucent catch window during capture. When hidden there
    /// is nothing to exclude from the grabbed region.
    #[serde(default = "default_hidden")]
    pub hide_capture_window: bool,
    /// Skip sending the captured frame to the display.
    #[serde(default = "default_hidden")]
    pub hide_capture_thumbnail: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hide_capture_window: default_hidden(),
            hide_capture_thumbnail: default_hidden(),
        }
    }
}
