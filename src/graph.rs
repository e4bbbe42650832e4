use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontTransform, TextStyle};

use crate::ir::{Anchor, DrawCommand, SceneGraph, Stroke};
use crate::OutputFormat;

/// Execute a scene and encode it in the requested format
pub fn render(scene: &SceneGraph, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => render_png(scene),
        OutputFormat::Svg => render_svg(scene).map(String::into_bytes),
    }
}

pub fn render_svg(scene: &SceneGraph) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (scene.width, scene.height)).into_drawing_area();
        draw_scene(&root, scene)?;
        root.present().context("Failed to present drawing")?;
    }
    Ok(svg)
}

pub fn render_png(scene: &SceneGraph) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; scene.width as usize * scene.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (scene.width, scene.height)).into_drawing_area();
        draw_scene(&root, scene)?;
        root.present().context("Failed to present drawing")?;
    }

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(&buffer, scene.width, scene.height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}

fn draw_scene<DB>(root: &DrawingArea<DB, Shift>, scene: &SceneGraph) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&scene.background).context("Failed to fill background")?;

    for command in &scene.commands {
        match command {
            DrawCommand::Line { from, to, stroke } => {
                root.draw(&PathElement::new(vec![px(*from), px(*to)], line_style(stroke)))
                    .context("Failed to draw line")?;
            }
            DrawCommand::Circle { center, radius, fill, stroke } => {
                let r = radius.round() as i32;
                if r <= 0 {
                    continue;
                }
                if let Some(fill) = fill {
                    root.draw(&Circle::new(px(*center), r, fill.filled()))
                        .context("Failed to draw circle")?;
                }
                if let Some(stroke) = stroke {
                    root.draw(&Circle::new(px(*center), r, line_style(stroke)))
                        .context("Failed to draw circle outline")?;
                }
            }
            DrawCommand::Polygon { points, fill, stroke } => {
                let pts: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
                root.draw(&Polygon::new(pts.clone(), fill.filled()))
                    .context("Failed to draw polygon")?;
                if let (Some(stroke), Some(first)) = (stroke, pts.first().copied()) {
                    let mut outline = pts;
                    outline.push(first);
                    root.draw(&PathElement::new(outline, line_style(stroke)))
                        .context("Failed to draw polygon outline")?;
                }
            }
            DrawCommand::Rect { tl, br, fill, stroke } => {
                root.draw(&Rectangle::new([px(*tl), px(*br)], fill.filled()))
                    .context("Failed to draw rectangle")?;
                if let Some(stroke) = stroke {
                    root.draw(&Rectangle::new([px(*tl), px(*br)], line_style(stroke)))
                        .context("Failed to draw rectangle outline")?;
                }
            }
            DrawCommand::Text { text, pos, style } => {
                let h = match style.anchor {
                    Anchor::Start => HPos::Left,
                    Anchor::Middle => HPos::Center,
                    Anchor::End => HPos::Right,
                };
                let font = ("sans-serif", style.size).into_font();
                let font = if style.vertical { font.transform(FontTransform::Rotate270) } else { font };
                let text_style = TextStyle::from(font)
                    .color(&style.color)
                    .pos(Pos::new(h, VPos::Center));
                root.draw(&Text::new(text.as_str(), px(*pos), text_style))
                    .context("Failed to draw text")?;
            }
        }
    }

    Ok(())
}

fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn line_style(stroke: &Stroke) -> ShapeStyle {
    ShapeStyle {
        color: stroke.color,
        filled: false,
        stroke_width: stroke.width.round().max(1.0) as u32,
    }
}
