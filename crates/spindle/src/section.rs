use crate::style::TextStyle;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SectionText(String);

impl SectionText {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// A single glyph codepoint, rendered with the section's text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct IconGlyph(char);

impl IconGlyph {
    pub fn as_char(self) -> char {
        self.0
    }
}

/// Key under which the canvas knows a decoded image, usually its file path.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// What a section displays. Text and icon are mutually exclusive, so the
/// variants encode the choice instead of two optional fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SectionContent {
    #[default]
    Empty,
    Text(SectionText),
    Icon(IconGlyph),
}

impl SectionContent {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One weighted slice of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Relative size of the slice; must be positive.
    pub weight: f64,
    pub content: SectionContent,
    pub fill: Srgba<f64>,
    /// Optional background image, tiled over the slice.
    pub image: Option<ImageId>,
    /// Overrides the wheel's default text style for this slice.
    pub text_style: Option<TextStyle>,
}

impl Section {
    pub fn new(weight: f64, content: SectionContent, fill: Srgba<f64>) -> Self {
        Self {
            weight,
            content,
            fill,
            image: None,
            text_style: None,
        }
    }

    pub fn with_text(weight: f64, text: impl Into<String>, fill: Srgba<f64>) -> Self {
        Self::new(weight, SectionContent::Text(SectionText::new(text)), fill)
    }

    pub fn with_icon(weight: f64, glyph: char, fill: Srgba<f64>) -> Self {
        Self::new(weight, SectionContent::Icon(IconGlyph::from(glyph)), fill)
    }

    pub fn image(mut self, image: ImageId) -> Self {
        self.image = Some(image);
        self
    }

    pub fn text_style(mut self, style: TextStyle) -> Self {
        self.text_style = Some(style);
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GroupError {
    #[error("section group is empty")]
    Empty,
    #[error("section {index} has non-positive weight {weight}")]
    NonPositiveWeight { index: usize, weight: f64 },
}

/// Ordered, non-empty sequence of sections with a positive total weight.
///
/// Both invariants are checked at construction, before any angle math or
/// painting can run against the group.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionGroup {
    sections: Vec<Section>,
    total_weight: f64,
}

impl SectionGroup {
    pub fn new(sections: Vec<Section>) -> Result<Self, GroupError> {
        if sections.is_empty() {
            return Err(GroupError::Empty);
        }
        for (index, section) in sections.iter().enumerate() {
            if !(section.weight > 0.0) {
                return Err(GroupError::NonPositiveWeight {
                    index,
                    weight: section.weight,
                });
            }
        }
        let total_weight = sections.iter().map(|s| s.weight).sum();
        Ok(Self {
            sections,
            total_weight,
        })
    }

    /// Builds a group where every section gets the same angular sweep,
    /// regardless of the weights the sections were created with.
    pub fn uniform(sections: impl IntoIterator<Item = Section>) -> Result<Self, GroupError> {
        Self::new(
            sections
                .into_iter()
                .map(|s| Section { weight: 1.0, ..s })
                .collect(),
        )
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Angular width of a section in radians.
    pub fn sweep(&self, index: usize) -> f64 {
        TAU * self.sections[index].weight / self.total_weight
    }

    /// Cumulative sweep of all sections preceding `index`.
    pub fn leading_angle(&self, index: usize) -> f64 {
        let preceding: f64 = self.sections[..index].iter().map(|s| s.weight).sum();
        TAU * preceding / self.total_weight
    }
}
