//! Async facade example - render a bar figure through the worker-backed API

use plotshot::{Figure, ImageOptions, Renderer};
use serde_json::json;
use std::io::Read;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Plotshot - Async Example\n");

    let renderer = Renderer::new();

    let figure = Figure::new(
        json!([{"x": ["a", "b", "c"], "y": [2, 5, 3], "type": "bar"}]),
        json!({"title": "async bars"}),
    );

    println!("Rendering with default dimensions...");
    let mut stream = renderer
        .render_png_stream(figure, ImageOptions::default())
        .await?;

    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes)?;
    println!("Rendered {} bytes", bytes.len());

    std::fs::write("async_bars.png", &bytes)?;
    println!("Saved to: async_bars.png");

    renderer.close().await?;
    Ok(())
}
