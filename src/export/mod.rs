//! Certificate export pipeline
//!
//! Produces the downloadable JPEG artifact from a certificate view. The
//! pipeline prefers capturing the scene the student is already looking at
//! (with its preview style temporarily normalized to natural dimensions) and
//! falls back to a fresh offscreen render at the canonical design size when
//! the onscreen capture is unusable. Before any pixel is painted, every
//! referenced image is resolved through the readiness barrier and remote
//! font resolution is suspended.

pub mod assets;
pub mod fonts;
pub mod raster;

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::config::ExportConfig;
use crate::models::CertificateView;
use crate::render::scene::{Scene, SceneStyle};
use crate::render::{render_certificate, RenderMode};
use crate::utils::error::{AppError, AppResult};

pub use assets::resolve_images;
pub use fonts::FontLibrary;

/// Restores a scene's presentation style when dropped
///
/// The capture path mutates scale, width, height and margin to their natural
/// values; this guard guarantees the preview style comes back on every exit,
/// including capture failures.
pub struct StyleGuard<'a> {
    scene: &'a mut Scene,
    saved: SceneStyle,
}

impl<'a> StyleGuard<'a> {
    pub fn new(scene: &'a mut Scene) -> Self {
        let saved = scene.style;
        Self { scene, saved }
    }

    pub fn scene(&mut self) -> &mut Scene {
        self.scene
    }
}

impl Drop for StyleGuard<'_> {
    fn drop(&mut self) {
        self.scene.style = self.saved;
    }
}

/// The finished export artifact
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

/// Derive the download filename: `{Course}_{Student}.jpeg` with whitespace
/// runs collapsed to single underscores
pub fn export_filename(course_name: &str, student_name: &str) -> String {
    let sanitize = |s: &str| {
        s.split_whitespace().collect::<Vec<_>>().join("_")
    };
    format!("{}_{}.jpeg", sanitize(course_name), sanitize(student_name))
}

/// Capture an onscreen scene at natural dimensions
///
/// The scene's preview style is normalized for the duration of the capture
/// and restored before returning, success or not.
pub fn normalized_capture(scene: &mut Scene) -> Result<Scene, String> {
    let natural = SceneStyle::natural(scene.width as f32, scene.height as f32);
    let mut guard = StyleGuard::new(scene);
    guard.scene().style = natural;
    if guard.scene().width == 0 || guard.scene().height == 0 {
        return Err("onscreen scene has degenerate dimensions".to_string());
    }
    if guard.scene().nodes.is_empty() {
        return Err("onscreen scene is empty".to_string());
    }
    Ok(guard.scene().clone())
}

fn capture_scene(view: &CertificateView, entered_name: Option<&str>) -> Scene {
    let mut onscreen = render_certificate(view, entered_name, RenderMode::Student);
    match normalized_capture(&mut onscreen) {
        Ok(captured) => {
            debug!(certificate_id = %view.id, "Captured onscreen scene at natural dimensions");
            captured
        }
        Err(reason) => {
            warn!(certificate_id = %view.id, reason = %reason, "Onscreen capture unusable, rendering offscreen");
            render_certificate(view, entered_name, RenderMode::TemplateSelection)
        }
    }
}

/// Run the full export pipeline for a certificate
pub async fn export_certificate(
    view: &CertificateView,
    entered_name: Option<&str>,
    client: &reqwest::Client,
    font_library: &FontLibrary,
    config: &ExportConfig,
    device_pixel_ratio: f32,
) -> AppResult<ExportArtifact> {
    let scene = capture_scene(view, entered_name);

    // A misconfigured cap below 1.0 must not invert the clamp bounds
    let pixel_ratio = device_pixel_ratio.clamp(1.0, config.max_pixel_ratio.max(1.0));

    // Remote font resolution stays suspended through the readiness barrier
    // and rasterization, so the painted text can only come from local faces
    let canvas = {
        let _isolation = font_library.suppress_remote();
        let resolved = resolve_images(client, &scene.image_urls(), config.asset_timeout()).await;
        raster::rasterize(&scene, font_library, &resolved, pixel_ratio).map_err(AppError::Export)?
    };
    let canvas: RgbaImage = match scene.content_bounds {
        Some(bounds) => raster::crop_to_bounds(canvas, bounds, pixel_ratio),
        None => canvas,
    };

    let bytes = raster::encode_jpeg(&canvas, config.jpeg_quality).map_err(AppError::Export)?;
    let filename = export_filename(
        view.effective_course_name(),
        view.recipient_name(entered_name),
    );
    info!(
        certificate_id = %view.id,
        filename = %filename,
        width = canvas.width(),
        height = canvas.height(),
        bytes = bytes.len(),
        "Export complete"
    );
    Ok(ExportArtifact {
        width: canvas.width(),
        height: canvas.height(),
        bytes,
        filename,
    })
}
