//! Certificate rendering
//!
//! Turns a normalized certificate view into a deterministic scene: prop
//! assembly, template selection (custom configuration first, built-in
//! variants otherwise) and the scene model itself.

pub mod custom;
pub mod dispatch;
pub mod props;
pub mod scene;
pub mod templates;

pub use dispatch::{render_certificate, requires_library_lookup};
pub use props::{RenderMode, TemplateProps};
pub use scene::{Align, Color, Rect, Scene, SceneNode, SceneStyle};
