mod screen;

pub use screen::{CaptureProvider, ScreenCaptureProvider, region_below_window};
