//! Data models

mod certificate;
mod template;

pub use certificate::*;
pub use template::*;
