//! Chart page generation
//!
//! Builds the self-contained HTML document the browser renders: a script tag
//! pulling in the Plotly bundle, a `#chart` container sized to the requested
//! dimensions, and a boot script that hands the embedded figure to
//! `Plotly.newPlot`.

use crate::{Error, Figure, ImageOptions, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as Base64Engine;

/// CSS selector for the chart container element
pub const CHART_SELECTOR: &str = "#chart";

// The figure JSON is substituted base64-encoded so its content can never
// terminate the inline script element. Token replacement avoids having to
// escape braces for `format!`.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <script src="{{PLOTLY_URL}}"></script>
    <style>
        body {
            margin: 0;
            padding: 0;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        #chart {
            width: {{CHART_WIDTH}}px;
            height: {{CHART_HEIGHT}}px;
        }
    </style>
</head>
<body>
    <div id="chart" style="width:{{CHART_WIDTH}}px; height:{{CHART_HEIGHT}}px;"></div>
    <script>
        const figure = JSON.parse(atob("{{FIGURE_B64}}"));
        Plotly.newPlot('chart', figure.data, figure.layout);
    </script>
</body>
</html>
"#;

/// Build the HTML document that renders `figure` into the chart container.
///
/// The container element is sized to `opts.chart_size()`; the figure itself
/// is passed through unmodified.
pub fn build_chart_html(figure: &Figure, opts: &ImageOptions) -> Result<String> {
    let (chart_width, chart_height) = opts.chart_size();

    let json = serde_json::to_string(figure)
        .map_err(|e| Error::ConfigError(format!("Figure is not JSON-serializable: {}", e)))?;
    let figure_b64 = STANDARD.encode(json.as_bytes());

    Ok(PAGE_TEMPLATE
        .replace("{{PLOTLY_URL}}", &opts.plotly_url)
        .replace("{{CHART_WIDTH}}", &chart_width.to_string())
        .replace("{{CHART_HEIGHT}}", &chart_height.to_string())
        .replace("{{FIGURE_B64}}", &figure_b64))
}

/// Pack a page into a `data:` URL so the content-set step is a single
/// navigation.
pub fn to_data_url(html: &str) -> String {
    format!("data:text/html;base64,{}", STANDARD.encode(html.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scatter_figure() -> Figure {
        Figure::new(
            json!([{"x": [1, 2, 3], "y": [4, 5, 6], "type": "scatter"}]),
            json!({"title": "t"}),
        )
    }

    fn embedded_figure_json(html: &str) -> String {
        let start = html.find("atob(\"").expect("no atob call in page") + "atob(\"".len();
        let end = html[start..].find('"').expect("unterminated atob argument") + start;
        let bytes = STANDARD.decode(&html[start..end]).expect("invalid base64 payload");
        String::from_utf8(bytes).expect("embedded figure is not UTF-8")
    }

    #[test]
    fn test_default_container_size() {
        let html = build_chart_html(&scatter_figure(), &ImageOptions::default()).unwrap();
        assert!(html.contains("width: 600px"));
        assert!(html.contains("height: 400px"));
        assert!(html.contains(r#"<div id="chart" style="width:600px; height:400px;">"#));
    }

    #[test]
    fn test_requested_container_size() {
        let opts = ImageOptions::sized(800, 500);
        let html = build_chart_html(&scatter_figure(), &opts).unwrap();
        assert!(html.contains("width: 800px"));
        assert!(html.contains("height: 500px"));
        assert!(html.contains(r#"<div id="chart" style="width:800px; height:500px;">"#));
    }

    #[test]
    fn test_figure_round_trips_through_embed() {
        let figure = scatter_figure();
        let html = build_chart_html(&figure, &ImageOptions::default()).unwrap();

        let embedded: Figure = serde_json::from_str(&embedded_figure_json(&html)).unwrap();
        assert_eq!(embedded.data, figure.data);
        assert_eq!(embedded.layout, figure.layout);
    }

    #[test]
    fn test_figure_cannot_break_out_of_script() {
        let figure = Figure::new(
            json!([{"x": [1], "y": [2], "type": "scatter"}]),
            json!({"title": "</script><script>alert(1)</script>"}),
        );
        let html = build_chart_html(&figure, &ImageOptions::default()).unwrap();
        assert!(!html.contains("alert(1)"));

        let embedded = embedded_figure_json(&html);
        assert!(embedded.contains("alert(1)"));
    }

    #[test]
    fn test_plotly_url_override() {
        let opts = ImageOptions {
            plotly_url: "http://127.0.0.1:9999/plotly.min.js".to_string(),
            ..Default::default()
        };
        let html = build_chart_html(&scatter_figure(), &opts).unwrap();
        assert!(html.contains(r#"<script src="http://127.0.0.1:9999/plotly.min.js"></script>"#));
        assert!(!html.contains("cdn.plot.ly"));
    }

    #[test]
    fn test_data_url_round_trip() {
        let html = build_chart_html(&scatter_figure(), &ImageOptions::default()).unwrap();
        let url = to_data_url(&html);

        let b64 = url.strip_prefix("data:text/html;base64,").expect("wrong data URL prefix");
        let decoded = STANDARD.decode(b64).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), html);
    }
}
