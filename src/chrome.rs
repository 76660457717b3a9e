//! Headless Chrome pipeline (uses the `headless_chrome` crate)
//!
//! Each `ChartRenderer` launches and fully owns one browser process; there is
//! no pooling and no reuse across renders. Dropping the handles terminates
//! the child process, so the browser is released on every exit path.

use crate::page::{self, CHART_SELECTOR};
use crate::{Error, Figure, ImageOptions, Result};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

// Pause between the container appearing and the capture so the chart has a
// moment to paint. Drawing that outlasts this interval is not awaited; the
// capture may race a slow draw.
const SETTLE_MS: u64 = 500;

/// A single-use renderer wrapping one headless Chrome instance.
pub struct ChartRenderer {
    browser: Browser,
    tab: Arc<Tab>,
    wait_timeout_ms: u64,
}

impl ChartRenderer {
    /// Launch a dedicated headless browser sized to the viewport in `opts`.
    ///
    /// The device scale factor is pinned to 1 so requested pixel dimensions
    /// match the captured PNG dimensions.
    pub fn new(opts: &ImageOptions) -> Result<Self> {
        let (width, height) = opts.viewport_size();

        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((width, height)))
            .args(vec![OsStr::new("--force-device-scale-factor=1")])
            .build()
            .map_err(|e| Error::LaunchError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::LaunchError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::LaunchError(format!("Failed to create tab: {}", e)))?;

        debug!("launched headless chrome with {}x{} viewport", width, height);

        Ok(Self {
            browser,
            tab,
            wait_timeout_ms: opts.wait_timeout_ms,
        })
    }

    /// Load the generated chart page, wait for the container element, and
    /// capture a full-page PNG screenshot.
    pub fn render(&self, figure: &Figure, opts: &ImageOptions) -> Result<Vec<u8>> {
        let html = page::build_chart_html(figure, opts)?;
        let url = page::to_data_url(&html);

        self.tab
            .navigate_to(&url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::LoadError(format!("Wait for navigation failed: {}", e)))?;

        self.tab
            .wait_for_element_with_custom_timeout(
                CHART_SELECTOR,
                Duration::from_millis(self.wait_timeout_ms),
            )
            .map_err(|_| Error::WaitTimeout(self.wait_timeout_ms))?;

        // Let the page stabilize before capturing
        std::thread::sleep(Duration::from_millis(SETTLE_MS));

        let screenshot_data = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::CaptureError(format!("Screenshot failed: {}", e)))?;

        debug!("captured {} byte screenshot", screenshot_data.len());

        Ok(screenshot_data)
    }

    /// Close the browser. Drops the underlying handles explicitly so the
    /// child process is terminated promptly.
    pub fn close(self) -> Result<()> {
        drop(self.browser);
        drop(self.tab);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_renderer_creation() {
        let opts = ImageOptions::default();
        // This test requires Chrome to be installed, so we skip it in CI
        if std::env::var("CI").is_ok() {
            return;
        }
        match ChartRenderer::new(&opts) {
            Ok(renderer) => renderer.close().unwrap(),
            Err(e) => {
                eprintln!("Skipping renderer creation test because Chrome is not available or failed to launch: {}", e);
            }
        }
    }
}
