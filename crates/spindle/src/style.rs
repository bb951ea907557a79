use palette::Srgba;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
    pub color: Srgba<f64>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size: 18.0,
            weight: FontWeight::Bold,
            color: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Visual configuration of the wheel as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelStyle {
    pub divider_color: Srgba<f64>,
    pub divider_width: f64,
    /// Default style for section text and icon glyphs.
    pub text_style: TextStyle,
    pub sticker_color: Srgba<f64>,
    /// Radius of the center sticker as a fraction of the wheel radius.
    pub sticker_ratio: f64,
    /// Fraction of the wheel radius at which section content is placed.
    pub text_bias: f64,
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self {
            divider_color: Srgba::new(0.9, 0.9, 0.9, 1.0),
            divider_width: 2.0,
            text_style: TextStyle::default(),
            sticker_color: Srgba::new(0.12, 0.12, 0.12, 1.0),
            sticker_ratio: 0.18,
            text_bias: 0.62,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_weight_deserialization() {
        let cases = vec![
            ("\"normal\"", FontWeight::Normal),
            ("\"Normal\"", FontWeight::Normal),
            ("\"bold\"", FontWeight::Bold),
            ("\"BOLD\"", FontWeight::Bold),
        ];

        for (json, expected) in cases {
            let deserialized: FontWeight = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
