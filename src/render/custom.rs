//! Data-driven custom template renderer
//!
//! Interprets a `TemplateConfig` produced by the template builder instead of
//! selecting a built-in variant. The config drives palette, border geometry,
//! typography, text overrides and decorative element toggles; the prop data
//! still supplies the certificate facts.

use crate::models::{BackgroundType, BorderStyle, TemplateConfig};
use crate::render::props::TemplateProps;
use crate::render::scene::{Align, Color, Rect, Scene, SceneNode};
use crate::render::templates::{DESIGN_HEIGHT, DESIGN_WIDTH};

/// Gradient backgrounds are approximated with a fixed number of vertical
/// bands interpolated between the two stops. Deterministic and cheap.
const GRADIENT_BANDS: u32 = 24;

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    Color::rgb(
        lerp_channel(from.r, to.r, t),
        lerp_channel(from.g, to.g, t),
        lerp_channel(from.b, to.b, t),
    )
}

fn push_background(scene: &mut Scene, config: &TemplateConfig) {
    match config.colors.background_type {
        BackgroundType::Solid => {
            scene.background = Color::from_hex(&config.colors.background);
        }
        BackgroundType::Gradient => {
            let from = Color::from_hex(
                config
                    .colors
                    .gradient_from
                    .as_deref()
                    .unwrap_or(&config.colors.background),
            );
            let to = Color::from_hex(
                config
                    .colors
                    .gradient_to
                    .as_deref()
                    .unwrap_or(&config.colors.background),
            );
            scene.background = from;
            let band_h = DESIGN_HEIGHT as f32 / GRADIENT_BANDS as f32;
            for i in 0..GRADIENT_BANDS {
                let t = i as f32 / (GRADIENT_BANDS - 1) as f32;
                scene.push(SceneNode::Rect {
                    rect: Rect::new(0.0, i as f32 * band_h, DESIGN_WIDTH as f32, band_h + 1.0),
                    fill: Some(lerp_color(from, to, t)),
                    stroke: None,
                    stroke_width: 0.0,
                });
            }
        }
    }
}

fn push_solid_edge(scene: &mut Scene, x: f32, y: f32, horizontal: bool, length: f32, color: Color, width: f32) {
    let (x2, y2) = if horizontal { (x + length, y) } else { (x, y + length) };
    scene.push(SceneNode::Line {
        x1: x,
        y1: y,
        x2,
        y2,
        color,
        width,
    });
}

/// Dashed or dotted edge as a run of short segments
#[allow(clippy::too_many_arguments)]
fn push_segmented_edge(
    scene: &mut Scene,
    x: f32,
    y: f32,
    horizontal: bool,
    length: f32,
    color: Color,
    width: f32,
    dash: f32,
    gap: f32,
) {
    let mut cursor = 0.0;
    while cursor < length {
        let end = (cursor + dash).min(length);
        let (x1, y1, x2, y2) = if horizontal {
            (x + cursor, y, x + end, y)
        } else {
            (x, y + cursor, x, y + end)
        };
        scene.push(SceneNode::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        });
        cursor = end + gap;
    }
}

fn push_border_rect(scene: &mut Scene, rect: Rect, style: BorderStyle, color: Color, width: f32) {
    if width <= 0.0 {
        return;
    }
    match style {
        BorderStyle::Solid => {
            scene.push(SceneNode::Rect {
                rect,
                fill: None,
                stroke: Some(color),
                stroke_width: width,
            });
        }
        BorderStyle::Double => {
            // Two concentric strokes with a gap proportional to the width
            scene.push(SceneNode::Rect {
                rect,
                fill: None,
                stroke: Some(color),
                stroke_width: width,
            });
            scene.push(SceneNode::Rect {
                rect: rect.inset(width * 3.0),
                fill: None,
                stroke: Some(color),
                stroke_width: width,
            });
        }
        BorderStyle::Dashed | BorderStyle::Dotted => {
            let (dash, gap) = if style == BorderStyle::Dashed {
                (10.0, 6.0)
            } else {
                (width.max(2.0), width.max(2.0) * 2.0)
            };
            push_segmented_edge(scene, rect.x, rect.y, true, rect.w, color, width, dash, gap);
            push_segmented_edge(scene, rect.x, rect.y + rect.h, true, rect.w, color, width, dash, gap);
            push_segmented_edge(scene, rect.x, rect.y, false, rect.h, color, width, dash, gap);
            push_segmented_edge(scene, rect.x + rect.w, rect.y, false, rect.h, color, width, dash, gap);
        }
    }
}

/// Render a certificate from a fully data-driven configuration
pub fn render(config: &TemplateConfig, props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(DESIGN_WIDTH, DESIGN_HEIGHT, Color::WHITE);
    push_background(&mut scene, config);

    let text = Color::from_hex(&config.colors.text_color);
    let accent = Color::from_hex(&config.colors.accent_color);
    let border = Color::from_hex(&config.colors.border_color);

    let frame = Rect::new(
        config.layout.margins,
        config.layout.margins,
        DESIGN_WIDTH as f32 - 2.0 * config.layout.margins,
        DESIGN_HEIGHT as f32 - 2.0 * config.layout.margins,
    );
    push_border_rect(&mut scene, frame, config.layout.border_style, border, config.layout.border_width);

    if config.elements.show_corners {
        let s = 28.0;
        let inner = frame.inset(config.layout.padding * 0.5);
        for (cx, cy) in [
            (inner.x, inner.y),
            (inner.x + inner.w - s, inner.y),
            (inner.x, inner.y + inner.h - s),
            (inner.x + inner.w - s, inner.y + inner.h - s),
        ] {
            scene.push(SceneNode::Rect {
                rect: Rect::new(cx, cy, s, s),
                fill: Some(accent),
                stroke: None,
                stroke_width: 0.0,
            });
        }
    }

    let cx = DESIGN_WIDTH as f32 / 2.0;
    let top = frame.y + config.layout.padding;

    if config.elements.show_logo {
        if let Some(ref url) = props.organization_logo {
            scene.push(SceneNode::Image {
                rect: Rect::new(cx - 45.0, top, 90.0, 56.0),
                url: url.clone(),
            });
        }
    }

    // Content overrides fall back to the certificate facts
    let title = if config.content.title.is_empty() {
        props.header.clone()
    } else {
        config.content.title.clone()
    };
    let recipient_label = if config.content.recipient_label.is_empty() {
        "This certificate is proudly presented to".to_string()
    } else {
        config.content.recipient_label.clone()
    };
    let completion_text = if config.content.completion_text.is_empty() {
        format!("for completing {}", props.course_title)
    } else {
        config.content.completion_text.clone()
    };

    let mut y = top + 76.0;
    let heading = config.typography.heading_font.as_str();
    let body = config.typography.body_font.as_str();
    let heading_size = config.typography.heading_size;
    let body_size = config.typography.body_size;

    scene.push(SceneNode::Text {
        x: cx,
        y,
        text: title.to_uppercase(),
        size: heading_size * 0.8,
        color: text,
        family: heading.to_string(),
        align: Align::Center,
    });
    y += heading_size;
    if !config.content.subtitle.is_empty() {
        scene.push(SceneNode::Text {
            x: cx,
            y,
            text: config.content.subtitle.clone(),
            size: body_size,
            color: text,
            family: body.to_string(),
            align: Align::Center,
        });
        y += body_size * 2.0;
    }
    scene.push(SceneNode::Text {
        x: cx,
        y,
        text: recipient_label,
        size: body_size * 0.9,
        color: text,
        family: body.to_string(),
        align: Align::Center,
    });
    y += body_size * 1.8;
    scene.push(SceneNode::Text {
        x: cx,
        y,
        text: props.recipient_name.clone(),
        size: heading_size,
        color: accent,
        family: heading.to_string(),
        align: Align::Center,
    });
    y += heading_size + 12.0;
    scene.push(SceneNode::Line {
        x1: cx - 240.0,
        y1: y,
        x2: cx + 240.0,
        y2: y,
        color: accent,
        width: 2.0,
    });
    y += 18.0;
    scene.push(SceneNode::Text {
        x: cx,
        y,
        text: completion_text,
        size: body_size * 1.2,
        color: text,
        family: body.to_string(),
        align: Align::Center,
    });
    y += body_size * 2.2;

    if config.elements.show_description && !props.description.is_empty() {
        scene.push(SceneNode::Text {
            x: cx,
            y,
            text: props.description.clone(),
            size: body_size * 0.9,
            color: text,
            family: body.to_string(),
            align: Align::Center,
        });
        y += body_size * 1.8;
    }
    if config.elements.show_date {
        scene.push(SceneNode::Text {
            x: cx,
            y,
            text: props.date.clone(),
            size: body_size * 0.9,
            color: text,
            family: body.to_string(),
            align: Align::Center,
        });
    }

    if config.elements.show_seal {
        let seal = Rect::new(frame.x + frame.w - 110.0, frame.y + frame.h - 130.0, 72.0, 92.0);
        let hole = scene.background;
        scene.push(SceneNode::Rect {
            rect: seal,
            fill: Some(accent),
            stroke: None,
            stroke_width: 0.0,
        });
        scene.push(SceneNode::Rect {
            rect: seal.inset(16.0),
            fill: Some(hole),
            stroke: None,
            stroke_width: 0.0,
        });
    }

    let sig_y = frame.y + frame.h - config.layout.padding - 48.0;
    let slots: Vec<_> = props
        .signatories
        .iter()
        .filter(|s| s.renders())
        .take(config.elements.signature_count.min(2) as usize)
        .collect();
    let positions: &[f32] = match slots.len() {
        1 => &[500.0],
        2 => &[320.0, 680.0],
        _ => &[],
    };
    for (signatory, &sx) in slots.iter().zip(positions) {
        if let Some(ref url) = signatory.signature_url {
            scene.push(SceneNode::Image {
                rect: Rect::new(sx - 60.0, sig_y - 48.0, 120.0, 44.0),
                url: url.clone(),
            });
        }
        scene.push(SceneNode::Line {
            x1: sx - 90.0,
            y1: sig_y,
            x2: sx + 90.0,
            y2: sig_y,
            color: text,
            width: 1.5,
        });
        scene.push(SceneNode::Text {
            x: sx,
            y: sig_y + 8.0,
            text: signatory.name.clone(),
            size: body_size,
            color: text,
            family: body.to_string(),
            align: Align::Center,
        });
        scene.push(SceneNode::Text {
            x: sx,
            y: sig_y + 30.0,
            text: signatory.title.clone(),
            size: body_size * 0.75,
            color: text,
            family: body.to_string(),
            align: Align::Center,
        });
    }

    scene.content_bounds = Some(frame);
    scene
}
