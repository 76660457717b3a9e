//! Basic example - render a scatter figure to a PNG file

use plotshot::{render_png, Figure, ImageOptions};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Plotshot - Scatter Example\n");

    let figure = Figure::new(
        json!([{"x": [1, 2, 3], "y": [4, 5, 6], "type": "scatter"}]),
        json!({"title": "t"}),
    );
    let opts = ImageOptions::sized(800, 500);

    println!("Rendering figure at 800x500...");
    let png = render_png(&figure, &opts)?;
    println!("Rendered {} bytes", png.len());

    std::fs::write("scatter.png", &png)?;
    println!("Saved to: scatter.png");

    Ok(())
}
