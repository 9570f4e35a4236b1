//! Colour schemes for box diagrams
//!
//! A scheme is a flat record of four colours. Seven named palettes ship with
//! the crate; partial overrides are merged onto a scheme by value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Colours used to draw boxes, connectors and labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    /// Border of a box
    pub stroke_color: String,
    /// Fill of a box
    pub background_color: String,
    /// Parent-child connector
    pub line_color: String,
    /// Label text
    pub text_color: String,
}

/// Partial colour scheme; `None` keeps the base colour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOverrides {
    pub stroke_color: Option<String>,
    pub background_color: Option<String>,
    pub line_color: Option<String>,
    pub text_color: Option<String>,
}

/// Named built-in palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Palette {
    #[default]
    Blue,
    Maroon,
    Pink,
    Green,
    Orange,
    Purple,
    Grey,
}

impl Palette {
    /// All palettes in declaration order
    pub fn all() -> &'static [Palette] {
        &[
            Palette::Blue,
            Palette::Maroon,
            Palette::Pink,
            Palette::Green,
            Palette::Orange,
            Palette::Purple,
            Palette::Grey,
        ]
    }

    /// Parse a palette name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|palette| palette.to_string().eq_ignore_ascii_case(name.trim()))
    }

    pub fn scheme(&self) -> ColorScheme {
        let (stroke, background, line) = match self {
            Palette::Blue => ("#00B395", "#DDF6F2", "#379188"),
            Palette::Maroon => ("#9D6780", "#EDDFE5", "#990035"),
            Palette::Pink => ("#FF6384", "#FFE3E9", "#A8718A"),
            Palette::Green => ("#4BC0C0", "#D9E5E1", "#45826F"),
            Palette::Orange => ("#FF9F40", "#F5E1DC", "#A56B5C"),
            Palette::Purple => ("#9966FF", "#D5E9F1", "#27849E"),
            Palette::Grey => ("#A4B0C6", "#EEEEEE", "#8F9BB1"),
        };
        ColorScheme::new(stroke, background, line, "#000000")
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Palette::Blue => write!(f, "blue"),
            Palette::Maroon => write!(f, "maroon"),
            Palette::Pink => write!(f, "pink"),
            Palette::Green => write!(f, "green"),
            Palette::Orange => write!(f, "orange"),
            Palette::Purple => write!(f, "purple"),
            Palette::Grey => write!(f, "grey"),
        }
    }
}

impl ColorScheme {
    pub fn new(
        stroke_color: impl Into<String>,
        background_color: impl Into<String>,
        line_color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Self {
        Self {
            stroke_color: stroke_color.into(),
            background_color: background_color.into(),
            line_color: line_color.into(),
            text_color: text_color.into(),
        }
    }

    /// Return a new scheme with every colour present in `overrides` replaced
    pub fn merged(&self, overrides: &ColorOverrides) -> Self {
        let pick = |over: &Option<String>, base: &String| over.clone().unwrap_or_else(|| base.clone());
        Self {
            stroke_color: pick(&overrides.stroke_color, &self.stroke_color),
            background_color: pick(&overrides.background_color, &self.background_color),
            line_color: pick(&overrides.line_color, &self.line_color),
            text_color: pick(&overrides.text_color, &self.text_color),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Palette::default().scheme()
    }
}
