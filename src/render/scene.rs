//! Certificate scene model
//!
//! A `Scene` is the deterministic visual tree a template produces: a flat
//! list of rectangles, rules, text runs and image placements in design-space
//! coordinates. Identical inputs always produce an identical scene; nothing
//! here touches the clock or a random source.
//!
//! The scene also carries the mutable presentation style (`SceneStyle`) that
//! the viewer applies for the scaled-down student mode. The export pipeline
//! temporarily normalizes those fields to capture at natural dimensions and
//! must restore them on every exit path.

use serde::{Deserialize, Serialize};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#rrggbb` hex color; malformed input falls back to black
    pub fn from_hex(s: &str) -> Self {
        let trimmed = s.trim().trim_start_matches('#');
        if trimmed.len() != 6 {
            return Color::BLACK;
        }
        match hex::decode(trimmed) {
            Ok(bytes) => Color::rgb(bytes[0], bytes[1], bytes[2]),
            Err(_) => Color::BLACK,
        }
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Pixel-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink on all sides
    pub fn inset(&self, d: f32) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
            w: (self.w - 2.0 * d).max(0.0),
            h: (self.h - 2.0 * d).max(0.0),
        }
    }
}

/// One node of the visual tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneNode {
    /// Filled and/or stroked rectangle
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f32,
    },
    /// Horizontal or arbitrary rule
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    },
    /// A single text run anchored at (x, y) top edge
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        color: Color,
        family: String,
        align: Align,
    },
    /// Remote image placed into a box; resolved during export readiness
    Image {
        rect: Rect,
        url: String,
    },
}

/// Mutable presentation style applied to a rendered scene
///
/// Mirrors the inline style the viewer mutates: preview scaling, explicit
/// width/height overrides and a horizontal offset. The export pipeline's
/// normalization touches exactly these fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneStyle {
    pub scale: f32,
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
}

impl SceneStyle {
    pub fn natural(width: f32, height: f32) -> Self {
        Self {
            scale: 1.0,
            width,
            height,
            margin_left: 0.0,
        }
    }
}

/// A fully laid out certificate ready for display or rasterization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Natural design width
    pub width: u32,
    /// Natural design height
    pub height: u32,
    pub background: Color,
    pub style: SceneStyle,
    pub nodes: Vec<SceneNode>,
    /// Bounding box of the certificate proper when wrapped in extra chrome;
    /// the export pipeline crops to this when present
    pub content_bounds: Option<Rect>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            style: SceneStyle::natural(width as f32, height as f32),
            nodes: Vec::new(),
            content_bounds: None,
        }
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Unique image URLs referenced by the scene, in first-seen order
    pub fn image_urls(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for node in &self.nodes {
            if let SceneNode::Image { url, .. } = node {
                if !seen.contains(url) {
                    seen.push(url.clone());
                }
            }
        }
        seen
    }
}
