//! Template selection and render dispatch
//!
//! Selection order: a certificate carrying a custom template configuration is
//! always rendered from that configuration, and the template id is never
//! consulted. Only without a custom configuration does the id pick one of the
//! built-in variants, with unknown ids falling back to the default variant.

use tracing::debug;

use crate::models::CertificateView;
use crate::render::props::{RenderMode, TemplateProps};
use crate::render::scene::Scene;
use crate::render::{custom, templates};

/// Whether resolving this certificate requires a template library lookup.
///
/// False whenever a custom configuration is present, regardless of what the
/// template id field contains.
pub fn requires_library_lookup(view: &CertificateView) -> bool {
    view.custom_template_config.is_none()
}

fn builtin(template_id: &str) -> fn(&TemplateProps) -> Scene {
    match template_id {
        "template1" => templates::template1,
        "template2" => templates::template2,
        "template3" => templates::template3,
        "template4" => templates::template4,
        "template5" => templates::template5,
        "template6" => templates::template6,
        "template7" => templates::template7,
        "template8" => templates::template8,
        "template9" => templates::template9,
        "template10" => templates::template10,
        "template11" => templates::template11,
        "template12" => templates::template12,
        "template13" => templates::template13,
        "template14" => templates::template14,
        "template15" => templates::template15,
        other => {
            debug!(template_id = other, "unknown template id, using default variant");
            templates::template1
        }
    }
}

/// Render a certificate into a scene
pub fn render_certificate(
    view: &CertificateView,
    entered_name: Option<&str>,
    mode: RenderMode,
) -> Scene {
    let props = TemplateProps::from_view(view, entered_name, mode);
    let mut scene = match view.custom_template_config {
        Some(ref config) => {
            debug!(certificate_id = %view.id, "rendering from custom template config");
            custom::render(config, &props)
        }
        None => {
            let id = view.effective_template_id();
            debug!(certificate_id = %view.id, template_id = id, "rendering built-in template");
            builtin(id)(&props)
        }
    };
    if mode == RenderMode::Student {
        let scale = mode.scale();
        scene.style.scale = scale;
        scene.style.width = scene.width as f32 * scale;
        scene.style.height = scene.height as f32 * scale;
        // Compensates for scaling around the box center
        scene.style.margin_left = -(scene.width as f32 * (1.0 - scale) / 2.0);
    }
    scene
}
