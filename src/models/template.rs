//! Custom template configuration model
//!
//! A `TemplateConfig` is the fully data-driven design override produced by the
//! template builder. When a certificate carries one, it replaces template-id
//! based selection entirely. Every field is defaulted so that configs saved by
//! older builder versions still deserialize.

use serde::{Deserialize, Serialize};

/// Complete custom template configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub layout: LayoutConfig,
    pub colors: ColorConfig,
    pub typography: TypographyConfig,
    pub content: ContentConfig,
    pub elements: ElementConfig,
}

/// Margins, padding and border geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub margins: f32,
    pub padding: f32,
    pub border_width: f32,
    pub border_style: BorderStyle,
    pub border_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margins: 16.0,
            padding: 32.0,
            border_width: 2.0,
            border_style: BorderStyle::Solid,
            border_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Double,
    Dashed,
    Dotted,
}

/// Color palette, optionally with a two-stop gradient background
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorConfig {
    pub background: String,
    pub background_type: BackgroundType,
    pub gradient_from: Option<String>,
    pub gradient_to: Option<String>,
    pub accent_color: String,
    pub text_color: String,
    pub border_color: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            background_type: BackgroundType::Solid,
            gradient_from: None,
            gradient_to: None,
            accent_color: "#ea580c".to_string(),
            text_color: "#1f2937".to_string(),
            border_color: "#d1d5db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Solid,
    Gradient,
}

/// Font families and sizes for heading and body text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyConfig {
    pub heading_font: String,
    pub body_font: String,
    pub heading_size: f32,
    pub body_size: f32,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            heading_font: "serif".to_string(),
            body_font: "sans-serif".to_string(),
            heading_size: 40.0,
            body_size: 16.0,
        }
    }
}

/// Editable text overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentConfig {
    pub title: String,
    pub subtitle: String,
    pub recipient_label: String,
    pub completion_text: String,
}

/// Feature toggles for decorative elements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementConfig {
    pub show_logo: bool,
    pub show_corners: bool,
    pub show_seal: bool,
    pub show_description: bool,
    pub show_date: bool,
    pub signature_count: u8,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            show_logo: true,
            show_corners: true,
            show_seal: true,
            show_description: true,
            show_date: true,
            signature_count: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let json = r##"{"name": "Ocean", "colors": {"accentColor": "#3b82f6"}}"##;
        let config: TemplateConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "Ocean");
        assert_eq!(config.colors.accent_color, "#3b82f6");
        // Untouched sections keep their defaults
        assert_eq!(config.colors.text_color, "#1f2937");
        assert_eq!(config.layout.border_style, BorderStyle::Solid);
        assert!(config.elements.show_logo);
    }

    #[test]
    fn test_border_style_round_trip() {
        let config = TemplateConfig {
            layout: LayoutConfig {
                border_style: BorderStyle::Double,
                ..LayoutConfig::default()
            },
            ..TemplateConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"double\""));
        let back: TemplateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.layout.border_style, BorderStyle::Double);
    }
}
