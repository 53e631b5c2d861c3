//! Scene rasterization
//!
//! Paints a scene into an RGBA buffer at an integer-scaled pixel ratio and
//! encodes the final JPEG artifact. The canvas starts fully opaque white so
//! transparent regions can never leak through into the JPEG.

use std::collections::HashMap;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, Rgb, RgbImage, Rgba, RgbaImage};
use rusttype::{point, Scale};
use tracing::trace;

use crate::export::fonts::FontLibrary;
use crate::render::scene::{Align, Color, Rect, Scene, SceneNode};

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Source-over blend of a color at the given coverage
fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let src = [color.r, color.g, color.b][c] as f32;
        dst.0[c] = (src * alpha + dst.0[c] as f32 * (1.0 - alpha)).round() as u8;
    }
    dst.0[3] = 255;
}

fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Color, ratio: f32) {
    let x0 = (rect.x * ratio).round() as i64;
    let y0 = (rect.y * ratio).round() as i64;
    let x1 = ((rect.x + rect.w) * ratio).round() as i64;
    let y1 = ((rect.y + rect.h) * ratio).round() as i64;
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(canvas, x, y, color, 1.0);
        }
    }
}

fn stroke_rect(canvas: &mut RgbaImage, rect: Rect, color: Color, width: f32, ratio: f32) {
    let w = width.max(1.0);
    // Four edge bands
    fill_rect(canvas, Rect::new(rect.x, rect.y, rect.w, w), color, ratio);
    fill_rect(canvas, Rect::new(rect.x, rect.y + rect.h - w, rect.w, w), color, ratio);
    fill_rect(canvas, Rect::new(rect.x, rect.y, w, rect.h), color, ratio);
    fill_rect(canvas, Rect::new(rect.x + rect.w - w, rect.y, w, rect.h), color, ratio);
}

fn draw_line(
    canvas: &mut RgbaImage,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: Color,
    width: f32,
    ratio: f32,
) {
    let w = width.max(1.0);
    if (y1 - y2).abs() < f32::EPSILON {
        let x = x1.min(x2);
        fill_rect(canvas, Rect::new(x, y1 - w / 2.0, (x2 - x1).abs(), w), color, ratio);
        return;
    }
    if (x1 - x2).abs() < f32::EPSILON {
        let y = y1.min(y2);
        fill_rect(canvas, Rect::new(x1 - w / 2.0, y, w, (y2 - y1).abs()), color, ratio);
        return;
    }
    // General case: stamp along the segment
    let steps = ((x2 - x1).abs().max((y2 - y1).abs()) * ratio).ceil() as u32;
    for i in 0..=steps {
        let t = i as f32 / steps.max(1) as f32;
        let x = x1 + (x2 - x1) * t;
        let y = y1 + (y2 - y1) * t;
        fill_rect(canvas, Rect::new(x - w / 2.0, y - w / 2.0, w, w), color, ratio);
    }
}

fn draw_text(
    canvas: &mut RgbaImage,
    fonts: &FontLibrary,
    x: f32,
    y: f32,
    text: &str,
    size: f32,
    color: Color,
    family: &str,
    align: Align,
    ratio: f32,
) {
    // No local fonts means a degraded, text-free render
    let Some(font) = fonts.resolve(family) else {
        trace!(family, "No font available, skipping text run");
        return;
    };
    let scale = Scale::uniform(size * ratio);
    let v_metrics = font.v_metrics(scale);

    let laid_out: Vec<_> = font.layout(text, scale, point(0.0, 0.0)).collect();
    let run_width = laid_out
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    let origin_x = match align {
        Align::Left => x * ratio,
        Align::Center => x * ratio - run_width / 2.0,
        Align::Right => x * ratio - run_width,
    };
    let baseline = y * ratio + v_metrics.ascent;

    for glyph in font.layout(text, scale, point(origin_x, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                blend_pixel(
                    canvas,
                    bb.min.x as i64 + gx as i64,
                    bb.min.y as i64 + gy as i64,
                    color,
                    coverage,
                );
            });
        }
    }
}

fn blit_image(canvas: &mut RgbaImage, source: &RgbaImage, rect: Rect, ratio: f32) {
    let target_w = (rect.w * ratio).round().max(1.0) as u32;
    let target_h = (rect.h * ratio).round().max(1.0) as u32;
    let resized = imageops::resize(source, target_w, target_h, imageops::FilterType::Triangle);
    let x0 = (rect.x * ratio).round() as i64;
    let y0 = (rect.y * ratio).round() as i64;
    for (sx, sy, pixel) in resized.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        blend_pixel(
            canvas,
            x0 + sx as i64,
            y0 + sy as i64,
            Color { r, g, b, a },
            1.0,
        );
    }
}

/// Rasterize a scene at the given pixel ratio
///
/// Image nodes without a resolved entry are skipped; the readiness barrier
/// guarantees an entry (possibly a placeholder) per referenced URL, so a miss
/// only occurs when the barrier was bypassed.
pub fn rasterize(
    scene: &Scene,
    fonts: &FontLibrary,
    images: &HashMap<String, RgbaImage>,
    pixel_ratio: f32,
) -> Result<RgbaImage, String> {
    if scene.width == 0 || scene.height == 0 {
        return Err(format!(
            "scene has degenerate dimensions {}x{}",
            scene.width, scene.height
        ));
    }
    let width = (scene.width as f32 * pixel_ratio).round() as u32;
    let height = (scene.height as f32 * pixel_ratio).round() as u32;

    let mut canvas = RgbaImage::from_pixel(width, height, to_rgba(Color::WHITE));
    fill_rect(
        &mut canvas,
        Rect::new(0.0, 0.0, scene.width as f32, scene.height as f32),
        scene.background,
        pixel_ratio,
    );

    for node in &scene.nodes {
        match node {
            SceneNode::Rect {
                rect,
                fill,
                stroke,
                stroke_width,
            } => {
                if let Some(fill) = fill {
                    fill_rect(&mut canvas, *rect, *fill, pixel_ratio);
                }
                if let Some(stroke) = stroke {
                    stroke_rect(&mut canvas, *rect, *stroke, *stroke_width, pixel_ratio);
                }
            }
            SceneNode::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => draw_line(&mut canvas, *x1, *y1, *x2, *y2, *color, *width, pixel_ratio),
            SceneNode::Text {
                x,
                y,
                text,
                size,
                color,
                family,
                align,
            } => draw_text(
                &mut canvas, fonts, *x, *y, text, *size, *color, family, *align, pixel_ratio,
            ),
            SceneNode::Image { rect, url } => {
                if let Some(source) = images.get(url) {
                    blit_image(&mut canvas, source, *rect, pixel_ratio);
                } else {
                    trace!(url = %url, "Image not resolved, skipping placement");
                }
            }
        }
    }
    Ok(canvas)
}

/// Crop the rasterized canvas to the scene's content bounds
///
/// Cropping is best-effort: bounds that fall outside the canvas or collapse
/// to an empty region leave the full canvas untouched.
pub fn crop_to_bounds(canvas: RgbaImage, bounds: Rect, pixel_ratio: f32) -> RgbaImage {
    let x = (bounds.x * pixel_ratio).round().max(0.0) as u32;
    let y = (bounds.y * pixel_ratio).round().max(0.0) as u32;
    let w = (bounds.w * pixel_ratio).round() as u32;
    let h = (bounds.h * pixel_ratio).round() as u32;
    if w == 0 || h == 0 || x + w > canvas.width() || y + h > canvas.height() {
        trace!("Content bounds outside canvas, keeping full capture");
        return canvas;
    }
    imageops::crop_imm(&canvas, x, y, w, h).to_image()
}

/// Encode the canvas as a JPEG at the configured quality
pub fn encode_jpeg(canvas: &RgbaImage, quality: u8) -> Result<Vec<u8>, String> {
    // JPEG carries no alpha; flatten onto white
    let mut flat = RgbImage::from_pixel(canvas.width(), canvas.height(), Rgb([255, 255, 255]));
    for (x, y, pixel) in canvas.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let dst = flat.get_pixel_mut(x, y);
        for (c, src) in [r, g, b].into_iter().enumerate() {
            dst.0[c] = (src as f32 * alpha + dst.0[c] as f32 * (1.0 - alpha)).round() as u8;
        }
    }
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&flat)
        .map_err(|e| format!("JPEG encoding failed: {}", e))?;
    Ok(out.into_inner())
}
