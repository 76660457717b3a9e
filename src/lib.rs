//! Plotshot
//!
//! Render Plotly figures to PNG images by driving headless Chrome: build an
//! HTML page embedding the Plotly bundle and the serialized figure, load it,
//! wait for the chart container, and capture a screenshot of the rendered
//! page.
//!
//! Every render launches its own dedicated browser process and releases it
//! on every exit path. The output is available as raw PNG bytes, as a
//! one-shot [`ImageStream`], or written straight to a file; an async facade
//! ([`Renderer`]) runs the blocking pipeline on a worker thread.
//!
//! # Example
//!
//! ```no_run
//! use plotshot::{render_png, Figure, ImageOptions};
//! use serde_json::json;
//!
//! # fn main() -> plotshot::Result<()> {
//! let figure = Figure::new(
//!     json!([{"x": [1, 2, 3], "y": [4, 5, 6], "type": "scatter"}]),
//!     json!({"title": "t"}),
//! );
//!
//! let png = render_png(&figure, &ImageOptions::sized(800, 500))?;
//! std::fs::write("chart.png", png)?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Cursor, Read};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod chrome;
pub mod page;

// Async-friendly render API (worker-backed abstraction)
pub mod async_api;
pub use async_api::Renderer;

/// Default browser viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1000;
/// Default browser viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;

// The container defaults differ from the viewport defaults; both pairs are
// part of the public contract and must change together if ever unified.
/// Default chart container width in pixels
pub const DEFAULT_CHART_WIDTH: u32 = 600;
/// Default chart container height in pixels
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

/// Upper bound accepted for an explicit width or height
pub const MAX_DIMENSION: u32 = 8192;

/// Plotly bundle loaded by the generated page when no override is given
pub const DEFAULT_PLOTLY_URL: &str = "https://cdn.plot.ly/plotly-latest.min.js";

/// A Plotly figure: trace array plus layout.
///
/// Both fields are opaque JSON values passed through to the page unmodified;
/// no schema is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Trace array handed to `Plotly.newPlot`
    #[serde(default)]
    pub data: Value,
    /// Layout object handed to `Plotly.newPlot`
    #[serde(default)]
    pub layout: Value,
}

impl Figure {
    pub fn new(data: Value, layout: Value) -> Self {
        Self { data, layout }
    }
}

/// Options controlling the rendered image
///
/// `width`/`height` size both the browser viewport and the chart container
/// element; when omitted each falls back to its own default
/// (viewport 1000x600, container 600x400).
#[derive(Debug, Clone)]
pub struct ImageOptions {
    /// Requested width in pixels
    pub width: Option<u32>,
    /// Requested height in pixels
    pub height: Option<u32>,
    /// Source URL for the Plotly bundle loaded by the generated page
    pub plotly_url: String,
    /// How long to wait for the chart container, in milliseconds
    pub wait_timeout_ms: u64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            plotly_url: DEFAULT_PLOTLY_URL.to_string(),
            wait_timeout_ms: 30000,
        }
    }
}

impl ImageOptions {
    /// Options with explicit pixel dimensions
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Viewport dimensions after applying defaults
    pub fn viewport_size(&self) -> (u32, u32) {
        (
            self.width.unwrap_or(DEFAULT_VIEWPORT_WIDTH),
            self.height.unwrap_or(DEFAULT_VIEWPORT_HEIGHT),
        )
    }

    /// Chart container dimensions after applying defaults
    pub fn chart_size(&self) -> (u32, u32) {
        (
            self.width.unwrap_or(DEFAULT_CHART_WIDTH),
            self.height.unwrap_or(DEFAULT_CHART_HEIGHT),
        )
    }

    /// Reject dimensions the browser cannot produce an image for.
    pub fn validate(&self) -> Result<()> {
        for (name, dim) in [("width", self.width), ("height", self.height)] {
            match dim {
                Some(0) => {
                    return Err(Error::ConfigError(format!("{} must be positive", name)));
                }
                Some(v) if v > MAX_DIMENSION => {
                    return Err(Error::ConfigError(format!(
                        "{} of {} exceeds the {}px maximum",
                        name, v, MAX_DIMENSION
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// PNG bytes exposed as a one-shot readable stream.
///
/// The image is fully produced before the stream is handed out; reading
/// drains an in-memory buffer.
#[derive(Debug)]
pub struct ImageStream {
    inner: Cursor<Vec<u8>>,
}

impl ImageStream {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(bytes),
        }
    }

    /// Total size of the underlying image in bytes
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    /// Consume the stream and return the full underlying buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Read for ImageStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl From<Vec<u8>> for ImageStream {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Render `figure` to PNG bytes.
///
/// Launches a dedicated headless browser sized to the requested viewport,
/// loads the generated chart page, waits for the container element, and
/// captures a screenshot. The browser is released on every exit path:
/// explicitly on success, through `Drop` when a step fails.
pub fn render_png(figure: &Figure, opts: &ImageOptions) -> Result<Vec<u8>> {
    opts.validate()?;

    let renderer = chrome::ChartRenderer::new(opts)?;
    let rendered = renderer.render(figure, opts);
    let closed = renderer.close();

    let png = rendered?;
    closed?;
    Ok(png)
}

/// Render `figure` and wrap the PNG bytes in a one-shot [`ImageStream`].
pub fn render_png_stream(figure: &Figure, opts: &ImageOptions) -> Result<ImageStream> {
    render_png(figure, opts).map(ImageStream::new)
}

/// Callback adapter over [`render_png_stream`] for callers that prefer a
/// completion callback to a `Result` return. Invalid options reach the
/// callback without a browser ever being launched.
pub fn render_png_stream_with<F>(figure: &Figure, opts: &ImageOptions, callback: F)
where
    F: FnOnce(Result<ImageStream>),
{
    callback(render_png_stream(figure, opts));
}

/// Render `figure` and write the PNG to `path`.
pub fn render_png_to_file<P: AsRef<Path>>(
    figure: &Figure,
    opts: &ImageOptions,
    path: P,
) -> Result<()> {
    let png = render_png(figure, opts)?;
    std::fs::write(path, png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let opts = ImageOptions::default();
        assert_eq!(opts.viewport_size(), (1000, 600));
        assert_eq!(opts.chart_size(), (600, 400));
        assert_eq!(opts.plotly_url, DEFAULT_PLOTLY_URL);
        assert_eq!(opts.wait_timeout_ms, 30000);
    }

    #[test]
    fn test_explicit_dimensions_apply_to_both() {
        let opts = ImageOptions::sized(800, 500);
        assert_eq!(opts.viewport_size(), (800, 500));
        assert_eq!(opts.chart_size(), (800, 500));
    }

    #[test]
    fn test_partial_dimensions() {
        let opts = ImageOptions {
            width: Some(1200),
            ..Default::default()
        };
        assert_eq!(opts.viewport_size(), (1200, 600));
        assert_eq!(opts.chart_size(), (1200, 400));
    }

    #[test]
    fn test_validate_rejects_zero() {
        let opts = ImageOptions::sized(0, 500);
        assert!(matches!(opts.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let opts = ImageOptions::sized(800, MAX_DIMENSION + 1);
        assert!(matches!(opts.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_validate_accepts_defaults_and_bounds() {
        assert!(ImageOptions::default().validate().is_ok());
        assert!(ImageOptions::sized(1, MAX_DIMENSION).validate().is_ok());
    }

    #[test]
    fn test_image_stream_matches_buffer() {
        let bytes = vec![1u8, 2, 3, 4, 5];
        let mut stream = ImageStream::new(bytes.clone());
        assert_eq!(stream.len(), bytes.len());

        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_image_stream_into_inner() {
        let bytes = vec![9u8; 32];
        let stream = ImageStream::from(bytes.clone());
        assert_eq!(stream.into_inner(), bytes);
    }

    #[test]
    fn test_figure_accepts_partial_json() {
        let figure: Figure = serde_json::from_value(json!({
            "data": [{"x": [1], "y": [2], "type": "scatter"}]
        }))
        .unwrap();
        assert!(figure.layout.is_null());
        assert!(figure.data.is_array());
    }
}
