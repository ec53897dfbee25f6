use anyhow::{Context, Result};
use honyaku_types::{CaptureRegion, CapturedImage};
use xcap::{Monitor, Window};

/// Source of captured frames. The screen-backed provider below is the real
/// one; tests substitute their own.
pub trait CaptureProvider: Send + Sync {
    fn capture(&self, region: CaptureRegion) -> Result<CapturedImage>;
}

/// Captures a region of whichever monitor contains it.
pub struct ScreenCaptureProvider {
    /// When a window with this title overlaps the requested region, the
    /// region is shifted below it so we never read our own pixels back.
    exclude_window_title: Option<String>,
}

impl ScreenCaptureProvider {
    pub fn new(exclude_window_title: Option<String>) -> Self {
        Self {
            exclude_window_title,
        }
    }

    fn adjust_region(&self, region: CaptureRegion) -> Result<CaptureRegion> {
        let Some(title) = &self.exclude_window_title else {
            return Ok(region);
        };

        let windows = Window::all().context("Failed to enumerate windows")?;
        let own = windows.into_iter().find(|w| {
            !w.is_minimized() && w.title().to_lowercase().contains(&title.to_lowercase())
        });

        match own {
            Some(w) => {
                let adjusted =
                    region_below_window(region, (w.x(), w.y(), w.width(), w.height()));
                if adjusted != region {
                    tracing::debug!(
                        "capture region shifted below '{}' to y={}",
                        w.title(),
                        adjusted.y
                    );
                }
                Ok(adjusted)
            }
            None => Ok(region),
        }
    }
}

impl CaptureProvider for ScreenCaptureProvider {
    fn capture(&self, region: CaptureRegion) -> Result<CapturedImage> {
        let region = self.adjust_region(region)?;

        let monitors = Monitor::all().context("Failed to get monitors")?;
        let monitor = monitors
            .iter()
            .find(|m| {
                region.x >= m.x()
                    && region.y >= m.y()
                    && region.x + region.width as i32 <= m.x() + m.width() as i32
                    && region.y + region.height as i32 <= m.y() + m.height() as i32
            })
            .or(monitors.first())
            .context("No monitor found")?;

        let image = monitor.capture_image().context("Failed to capture screen")?;

        let cropped = xcap::image::imageops::crop_imm(
            &image,
            (region.x - monitor.x()).max(0) as u32,
            (region.y - monitor.y()).max(0) as u32,
            region.width,
            region.height,
        )
        .to_image();

        Ok(CapturedImage {
            width: cropped.width(),
            height: cropped.height(),
            data: cropped.into_raw(),
        })
    }
}

/// If `window` (x, y, w, h) overlaps `region`, move the region's top edge
/// just below the window's bottom edge. Replaces the fixed-offset hack the
/// reference tool used to avoid grabbing its own control window.
pub fn region_below_window(region: CaptureRegion, window: (i32, i32, u32, u32)) -> CaptureRegion {
    let (wx, wy, ww, wh) = window;
    let w_right = wx + ww as i32;
    let w_bottom = wy + wh as i32;
    let r_right = region.x + region.width as i32;
    let r_bottom = region.y + region.height as i32;

    let overlaps = region.x < w_right && wx < r_right && region.y < w_bottom && wy < r_bottom;
    if !overlaps {
        return region;
    }

    CaptureRegion {
        y: w_bottom,
        ..region
    }
}
