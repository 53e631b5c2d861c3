//! Built-in certificate template variants
//!
//! Fifteen concrete layouts keyed `template1` .. `template15`. Each variant
//! owns its palette, typography and layout; the only shared contract is the
//! prop shape and the signature slot rule (a slot renders only when its name
//! is non-empty, the signature image is independently optional).
//!
//! All variants lay out against the canonical 1000x600 design canvas and are
//! strictly deterministic.

use crate::models::Signatory;
use crate::render::props::TemplateProps;
use crate::render::scene::{Align, Color, Rect, Scene, SceneNode};

pub const DESIGN_WIDTH: u32 = 1000;
pub const DESIGN_HEIGHT: u32 = 600;

const SERIF: &str = "serif";
const SANS: &str = "sans-serif";
const SCRIPT: &str = "cursive";

fn base_scene(background: Color) -> Scene {
    Scene::new(DESIGN_WIDTH, DESIGN_HEIGHT, background)
}

fn full_rect() -> Rect {
    Rect::new(0.0, 0.0, DESIGN_WIDTH as f32, DESIGN_HEIGHT as f32)
}

fn push_frame(scene: &mut Scene, rect: Rect, color: Color, width: f32) {
    scene.push(SceneNode::Rect {
        rect,
        fill: None,
        stroke: Some(color),
        stroke_width: width,
    });
}

fn push_fill(scene: &mut Scene, rect: Rect, color: Color) {
    scene.push(SceneNode::Rect {
        rect,
        fill: Some(color),
        stroke: None,
        stroke_width: 0.0,
    });
}

fn push_text(
    scene: &mut Scene,
    x: f32,
    y: f32,
    text: &str,
    size: f32,
    color: Color,
    family: &str,
    align: Align,
) {
    if text.is_empty() {
        return;
    }
    scene.push(SceneNode::Text {
        x,
        y,
        text: text.to_string(),
        size,
        color,
        family: family.to_string(),
        align,
    });
}

fn push_logo(scene: &mut Scene, props: &TemplateProps, rect: Rect) {
    if let Some(ref url) = props.organization_logo {
        scene.push(SceneNode::Image {
            rect,
            url: url.clone(),
        });
    }
}

/// Dashed horizontal border segments (used by the parchment variant)
fn push_dashed_edge(scene: &mut Scene, x: f32, y: f32, length: f32, color: Color, width: f32) {
    let dash = 12.0;
    let gap = 8.0;
    let mut cursor = x;
    while cursor < x + length {
        let end = (cursor + dash).min(x + length);
        scene.push(SceneNode::Line {
            x1: cursor,
            y1: y,
            x2: end,
            y2: y,
            color,
            width,
        });
        cursor = end + gap;
    }
}

/// Render one signatory slot centered at `cx`
fn push_signature_slot(
    scene: &mut Scene,
    signatory: &Signatory,
    cx: f32,
    y: f32,
    ink: Color,
    family: &str,
) {
    // Slot rule: no name, no block. Enforced again here even though the prop
    // assembly already filters, so a variant can never regress the invariant.
    if !signatory.renders() {
        return;
    }

    let half_width = 90.0;
    if let Some(ref url) = signatory.signature_url {
        scene.push(SceneNode::Image {
            rect: Rect::new(cx - 60.0, y - 48.0, 120.0, 44.0),
            url: url.clone(),
        });
    }
    // Underline rule renders with or without a signature image
    scene.push(SceneNode::Line {
        x1: cx - half_width,
        y1: y,
        x2: cx + half_width,
        y2: y,
        color: ink,
        width: 1.5,
    });
    push_text(scene, cx, y + 8.0, &signatory.name, 16.0, ink, family, Align::Center);
    push_text(scene, cx, y + 30.0, &signatory.title, 12.0, ink, family, Align::Center);
}

/// Lay out up to two signature slots around the given row
fn push_signature_row(scene: &mut Scene, props: &TemplateProps, y: f32, ink: Color, family: &str) {
    let slots: Vec<&Signatory> = props.signatories.iter().filter(|s| s.renders()).take(2).collect();
    match slots.as_slice() {
        [only] => push_signature_slot(scene, only, 500.0, y, ink, family),
        [first, second] => {
            push_signature_slot(scene, first, 320.0, y, ink, family);
            push_signature_slot(scene, second, 680.0, y, ink, family);
        }
        _ => {}
    }
}

/// Shared centered body: header, presentation line, recipient, course, description, date
#[allow(clippy::too_many_arguments)]
fn push_centered_body(
    scene: &mut Scene,
    props: &TemplateProps,
    top: f32,
    ink: Color,
    accent: Color,
    heading_family: &str,
    body_family: &str,
) {
    let cx = 500.0;
    push_text(scene, cx, top, &props.header.to_uppercase(), 34.0, ink, heading_family, Align::Center);
    push_text(scene, cx, top + 62.0, "PROUDLY PRESENTED TO", 14.0, ink, body_family, Align::Center);
    push_text(scene, cx, top + 94.0, &props.recipient_name, 40.0, accent, heading_family, Align::Center);
    scene.push(SceneNode::Line {
        x1: 260.0,
        y1: top + 148.0,
        x2: 740.0,
        y2: top + 148.0,
        color: accent,
        width: 2.0,
    });
    push_text(scene, cx, top + 162.0, &props.course_title, 24.0, ink, SCRIPT, Align::Center);
    push_text(scene, cx, top + 200.0, &props.description, 14.0, ink, body_family, Align::Center);
    push_text(scene, cx, top + 232.0, &props.date, 14.0, ink, body_family, Align::Center);
}

/// template1 - classic navy double frame
pub fn template1(props: &TemplateProps) -> Scene {
    let navy = Color::from_hex("#1e3a5f");
    let ink = Color::from_hex("#1f2937");
    let mut scene = base_scene(Color::WHITE);
    push_frame(&mut scene, full_rect().inset(16.0), navy, 3.0);
    push_frame(&mut scene, full_rect().inset(26.0), navy, 1.0);
    push_logo(&mut scene, props, Rect::new(460.0, 48.0, 80.0, 50.0));
    push_centered_body(&mut scene, props, 120.0, ink, navy, SERIF, SANS);
    push_signature_row(&mut scene, props, 520.0, ink, SANS);
    scene.content_bounds = Some(full_rect().inset(16.0));
    scene
}

/// template2 - elegant gold on ivory
pub fn template2(props: &TemplateProps) -> Scene {
    let gold = Color::from_hex("#b08d2f");
    let ink = Color::from_hex("#3f3324");
    let mut scene = base_scene(Color::from_hex("#fdfaf2"));
    push_frame(&mut scene, full_rect().inset(22.0), gold, 2.0);
    // Corner accents
    for (x, y) in [(22.0, 22.0), (938.0, 22.0), (22.0, 538.0), (938.0, 538.0)] {
        push_fill(&mut scene, Rect::new(x, y, 40.0, 40.0), gold);
    }
    push_logo(&mut scene, props, Rect::new(455.0, 52.0, 90.0, 56.0));
    push_centered_body(&mut scene, props, 130.0, ink, gold, SERIF, SERIF);
    push_signature_row(&mut scene, props, 515.0, ink, SERIF);
    scene
}

/// template3 - academic maroon with seal ribbon
pub fn template3(props: &TemplateProps) -> Scene {
    let maroon = Color::from_hex("#6b1f2a");
    let ink = Color::from_hex("#2a2a2a");
    let mut scene = base_scene(Color::WHITE);
    push_frame(&mut scene, full_rect().inset(18.0), maroon, 4.0);
    push_fill(&mut scene, Rect::new(840.0, 430.0, 70.0, 90.0), maroon);
    push_fill(&mut scene, Rect::new(855.0, 445.0, 40.0, 40.0), Color::from_hex("#d4af37"));
    push_logo(&mut scene, props, Rect::new(80.0, 50.0, 70.0, 50.0));
    if let Some(ref org) = props.organization_name {
        push_text(&mut scene, 170.0, 64.0, org, 18.0, maroon, SERIF, Align::Left);
    }
    push_centered_body(&mut scene, props, 140.0, ink, maroon, SERIF, SANS);
    push_signature_row(&mut scene, props, 520.0, ink, SANS);
    scene
}

/// template4 - corner ribbons, blue frame-in-frame
pub fn template4(props: &TemplateProps) -> Scene {
    let blue = Color::from_hex("#314e85");
    let faded = Color::from_hex("#aeb9d2");
    let ink = Color::from_hex("#1f2937");
    let mut scene = base_scene(Color::WHITE);
    // Ribbon bands across opposing corners
    push_fill(&mut scene, Rect::new(0.0, 0.0, 300.0, 26.0), blue);
    push_fill(&mut scene, Rect::new(700.0, 574.0, 300.0, 26.0), blue);
    let outer = full_rect().inset(24.0);
    push_frame(&mut scene, outer, faded, 4.0);
    push_frame(&mut scene, outer.inset(8.0), faded, 2.0);
    push_centered_body(&mut scene, props, 128.0, ink, blue, SERIF, SANS);
    push_logo(&mut scene, props, Rect::new(70.0, 480.0, 80.0, 52.0));
    push_signature_row(&mut scene, props, 520.0, ink, SANS);
    scene.content_bounds = Some(outer);
    scene
}

/// template5 - top band header
pub fn template5(props: &TemplateProps) -> Scene {
    let teal = Color::from_hex("#0f766e");
    let ink = Color::from_hex("#1f2937");
    let mut scene = base_scene(Color::WHITE);
    push_fill(&mut scene, Rect::new(0.0, 0.0, 1000.0, 110.0), teal);
    push_text(&mut scene, 500.0, 34.0, &props.header.to_uppercase(), 32.0, Color::WHITE, SANS, Align::Center);
    push_logo(&mut scene, props, Rect::new(40.0, 26.0, 80.0, 58.0));
    push_text(&mut scene, 500.0, 170.0, "This certificate is proudly presented to", 15.0, ink, SANS, Align::Center);
    push_text(&mut scene, 500.0, 210.0, &props.recipient_name, 42.0, teal, SCRIPT, Align::Center);
    push_text(&mut scene, 500.0, 290.0, &props.course_title, 24.0, ink, SANS, Align::Center);
    push_text(&mut scene, 500.0, 330.0, &props.description, 14.0, ink, SANS, Align::Center);
    push_text(&mut scene, 500.0, 365.0, &props.date, 14.0, ink, SANS, Align::Center);
    push_signature_row(&mut scene, props, 505.0, ink, SANS);
    scene
}

/// template6 - corporate left-aligned
pub fn template6(props: &TemplateProps) -> Scene {
    let slate = Color::from_hex("#334155");
    let accent = Color::from_hex("#2563eb");
    let mut scene = base_scene(Color::from_hex("#f8fafc"));
    push_fill(&mut scene, Rect::new(0.0, 0.0, 1000.0, 8.0), accent);
    push_fill(&mut scene, Rect::new(0.0, 592.0, 1000.0, 8.0), accent);
    push_logo(&mut scene, props, Rect::new(70.0, 56.0, 90.0, 56.0));
    push_text(&mut scene, 70.0, 150.0, &props.header.to_uppercase(), 30.0, slate, SANS, Align::Left);
    push_text(&mut scene, 70.0, 210.0, "Awarded to", 14.0, slate, SANS, Align::Left);
    push_text(&mut scene, 70.0, 238.0, &props.recipient_name, 44.0, accent, SANS, Align::Left);
    scene.push(SceneNode::Line {
        x1: 70.0,
        y1: 300.0,
        x2: 560.0,
        y2: 300.0,
        color: slate,
        width: 1.0,
    });
    push_text(&mut scene, 70.0, 320.0, &props.course_title, 22.0, slate, SANS, Align::Left);
    push_text(&mut scene, 70.0, 358.0, &props.description, 14.0, slate, SANS, Align::Left);
    push_text(&mut scene, 70.0, 394.0, &props.date, 14.0, slate, SANS, Align::Left);
    push_signature_row(&mut scene, props, 512.0, slate, SANS);
    scene
}

/// template7 - vertical accent column
pub fn template7(props: &TemplateProps) -> Scene {
    let plum = Color::from_hex("#6d28d9");
    let ink = Color::from_hex("#111827");
    let mut scene = base_scene(Color::WHITE);
    push_fill(&mut scene, Rect::new(0.0, 0.0, 150.0, 600.0), plum);
    push_logo(&mut scene, props, Rect::new(35.0, 40.0, 80.0, 56.0));
    push_text(&mut scene, 575.0, 110.0, &props.header.to_uppercase(), 32.0, ink, SANS, Align::Center);
    push_text(&mut scene, 575.0, 170.0, "presented to", 14.0, ink, SANS, Align::Center);
    push_text(&mut scene, 575.0, 200.0, &props.recipient_name, 42.0, plum, SERIF, Align::Center);
    push_text(&mut scene, 575.0, 270.0, &props.course_title, 22.0, ink, SANS, Align::Center);
    push_text(&mut scene, 575.0, 310.0, &props.description, 14.0, ink, SANS, Align::Center);
    push_text(&mut scene, 575.0, 345.0, &props.date, 14.0, ink, SANS, Align::Center);
    push_signature_row(&mut scene, props, 500.0, ink, SANS);
    scene
}

/// template8 - tech dark mode
pub fn template8(props: &TemplateProps) -> Scene {
    let bg = Color::from_hex("#0b1120");
    let neon = Color::from_hex("#22d3ee");
    let light = Color::from_hex("#e2e8f0");
    let mut scene = base_scene(bg);
    push_frame(&mut scene, full_rect().inset(20.0), neon, 1.5);
    push_logo(&mut scene, props, Rect::new(455.0, 44.0, 90.0, 54.0));
    push_centered_body(&mut scene, props, 124.0, light, neon, SANS, SANS);
    push_signature_row(&mut scene, props, 516.0, light, SANS);
    scene
}

/// template9 - nature green, thin frame
pub fn template9(props: &TemplateProps) -> Scene {
    let green = Color::from_hex("#15803d");
    let ink = Color::from_hex("#1c1917");
    let mut scene = base_scene(Color::from_hex("#f0fdf4"));
    push_frame(&mut scene, full_rect().inset(14.0), green, 1.0);
    push_fill(&mut scene, Rect::new(14.0, 14.0, 972.0, 6.0), green);
    push_logo(&mut scene, props, Rect::new(460.0, 46.0, 80.0, 52.0));
    push_centered_body(&mut scene, props, 126.0, ink, green, SERIF, SANS);
    push_signature_row(&mut scene, props, 518.0, ink, SANS);
    scene
}

/// template10 - layered sunset bands
pub fn template10(props: &TemplateProps) -> Scene {
    let ember = Color::from_hex("#ea580c");
    let ink = Color::from_hex("#431407");
    let mut scene = base_scene(Color::from_hex("#fff7ed"));
    push_fill(&mut scene, Rect::new(0.0, 0.0, 1000.0, 60.0), Color::from_hex("#fed7aa"));
    push_fill(&mut scene, Rect::new(0.0, 60.0, 1000.0, 30.0), Color::from_hex("#fdba74"));
    push_fill(&mut scene, Rect::new(0.0, 90.0, 1000.0, 14.0), ember);
    push_centered_body(&mut scene, props, 150.0, ink, ember, SERIF, SANS);
    push_logo(&mut scene, props, Rect::new(70.0, 486.0, 76.0, 50.0));
    push_signature_row(&mut scene, props, 522.0, ink, SANS);
    scene
}

/// template11 - minimalist monochrome
pub fn template11(props: &TemplateProps) -> Scene {
    let ink = Color::from_hex("#111111");
    let mut scene = base_scene(Color::WHITE);
    scene.push(SceneNode::Line {
        x1: 80.0,
        y1: 90.0,
        x2: 920.0,
        y2: 90.0,
        color: ink,
        width: 1.0,
    });
    scene.push(SceneNode::Line {
        x1: 80.0,
        y1: 510.0,
        x2: 920.0,
        y2: 510.0,
        color: ink,
        width: 1.0,
    });
    push_centered_body(&mut scene, props, 140.0, ink, ink, SANS, SANS);
    push_signature_row(&mut scene, props, 470.0, ink, SANS);
    scene
}

/// template12 - royal purple double frame
pub fn template12(props: &TemplateProps) -> Scene {
    let purple = Color::from_hex("#9333ea");
    let ink = Color::from_hex("#2e1065");
    let mut scene = base_scene(Color::from_hex("#faf5ff"));
    push_frame(&mut scene, full_rect().inset(18.0), purple, 3.0);
    push_frame(&mut scene, full_rect().inset(30.0), purple, 1.0);
    push_logo(&mut scene, props, Rect::new(458.0, 50.0, 84.0, 52.0));
    push_centered_body(&mut scene, props, 128.0, ink, purple, SERIF, SERIF);
    push_signature_row(&mut scene, props, 518.0, ink, SERIF);
    scene.content_bounds = Some(full_rect().inset(18.0));
    scene
}

/// template13 - split panel, colored left third
pub fn template13(props: &TemplateProps) -> Scene {
    let indigo = Color::from_hex("#312e81");
    let ink = Color::from_hex("#1e1b4b");
    let mut scene = base_scene(Color::WHITE);
    push_fill(&mut scene, Rect::new(0.0, 0.0, 330.0, 600.0), indigo);
    push_logo(&mut scene, props, Rect::new(115.0, 70.0, 100.0, 64.0));
    if let Some(ref org) = props.organization_name {
        push_text(&mut scene, 165.0, 170.0, org, 18.0, Color::WHITE, SANS, Align::Center);
    }
    push_text(&mut scene, 165.0, 420.0, &props.date, 14.0, Color::WHITE, SANS, Align::Center);
    let cx = 665.0;
    push_text(&mut scene, cx, 110.0, &props.header.to_uppercase(), 30.0, ink, SANS, Align::Center);
    push_text(&mut scene, cx, 176.0, "is awarded to", 14.0, ink, SANS, Align::Center);
    push_text(&mut scene, cx, 206.0, &props.recipient_name, 40.0, indigo, SERIF, Align::Center);
    push_text(&mut scene, cx, 280.0, &props.course_title, 22.0, ink, SANS, Align::Center);
    push_text(&mut scene, cx, 320.0, &props.description, 14.0, ink, SANS, Align::Center);
    push_signature_row(&mut scene, props, 500.0, ink, SANS);
    scene
}

/// template14 - clinical teal with header underline
pub fn template14(props: &TemplateProps) -> Scene {
    let teal = Color::from_hex("#0d9488");
    let ink = Color::from_hex("#134e4a");
    let mut scene = base_scene(Color::WHITE);
    push_frame(&mut scene, full_rect().inset(12.0), Color::from_hex("#99f6e4"), 6.0);
    push_logo(&mut scene, props, Rect::new(462.0, 44.0, 76.0, 50.0));
    push_text(&mut scene, 500.0, 118.0, &props.header.to_uppercase(), 32.0, ink, SANS, Align::Center);
    scene.push(SceneNode::Line {
        x1: 360.0,
        y1: 164.0,
        x2: 640.0,
        y2: 164.0,
        color: teal,
        width: 3.0,
    });
    push_text(&mut scene, 500.0, 196.0, "certifies that", 14.0, ink, SANS, Align::Center);
    push_text(&mut scene, 500.0, 226.0, &props.recipient_name, 40.0, teal, SERIF, Align::Center);
    push_text(&mut scene, 500.0, 298.0, &props.course_title, 22.0, ink, SANS, Align::Center);
    push_text(&mut scene, 500.0, 336.0, &props.description, 14.0, ink, SANS, Align::Center);
    push_text(&mut scene, 500.0, 370.0, &props.date, 14.0, ink, SANS, Align::Center);
    push_signature_row(&mut scene, props, 508.0, ink, SANS);
    scene
}

/// template15 - traditional parchment, dashed edges
pub fn template15(props: &TemplateProps) -> Scene {
    let brown = Color::from_hex("#78350f");
    let ink = Color::from_hex("#451a03");
    let mut scene = base_scene(Color::from_hex("#fef3c7"));
    push_dashed_edge(&mut scene, 30.0, 30.0, 940.0, brown, 2.0);
    push_dashed_edge(&mut scene, 30.0, 570.0, 940.0, brown, 2.0);
    push_frame(&mut scene, Rect::new(30.0, 30.0, 940.0, 540.0), brown, 1.0);
    push_logo(&mut scene, props, Rect::new(460.0, 52.0, 80.0, 50.0));
    push_centered_body(&mut scene, props, 130.0, ink, brown, SERIF, SERIF);
    push_signature_row(&mut scene, props, 516.0, ink, SERIF);
    scene
}
