//! Layout configuration
//!
//! [`LayoutConfig`] is a fully specified, immutable value built once per
//! layout call. Partial settings ([`ConfigOverrides`], e.g. read from a JSON
//! file) are merged onto a base config by value, and
//! [`LayoutConfigBuilder`] offers the same merge programmatically. Both paths
//! validate the result.

use serde::{Deserialize, Serialize};

use super::{ColorOverrides, ColorScheme, FontSpec, HierarchyError, Result};

/// Configuration for one layout pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Stagger deep or bushy sub-trees into offset lanes
    pub compact: bool,
    pub font: FontSpec,
    /// Horizontal offset of each lane tier
    pub xt: f64,
    /// Vertical gap between a box and the row beneath it
    pub yt: f64,
    /// Compact depth threshold, at least 1
    pub ct: usize,
    pub min_width: f64,
    pub max_width: f64,
    pub stroke_width: f64,
    pub box_spacing: f64,
    pub box_padding: f64,
    pub box_radius: f64,
    pub canvas_padding: f64,
    pub color_scheme: ColorScheme,
    pub canvas_background: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact: false,
            font: FontSpec::default(),
            xt: 30.0,
            yt: 30.0,
            ct: 3,
            min_width: 50.0,
            max_width: 100.0,
            stroke_width: 3.0,
            box_spacing: 15.0,
            box_padding: 4.0,
            box_radius: 5.0,
            canvas_padding: 20.0,
            color_scheme: ColorScheme::default(),
            canvas_background: "#FFFFFF".to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::new()
    }

    /// Horizontal space a single leaf column needs beyond its content width
    pub fn column_pitch(&self) -> f64 {
        self.column_frame() + self.box_spacing
    }

    /// Box padding on both sides plus the stroke
    pub fn column_frame(&self) -> f64 {
        2.0 * self.box_padding + self.stroke_width
    }

    /// Merge overrides onto this config, returning a new validated config
    pub fn merged(&self, overrides: &ConfigOverrides) -> Result<Self> {
        let mut next = self.clone();
        let ConfigOverrides {
            compact,
            font_family,
            font_size,
            xt,
            yt,
            ct,
            min_width,
            max_width,
            stroke_width,
            box_spacing,
            box_padding,
            box_radius,
            canvas_padding,
            color_scheme,
            canvas_background,
        } = overrides.clone();

        if let Some(v) = compact {
            next.compact = v;
        }
        if let Some(v) = font_family {
            next.font.family = v;
        }
        if let Some(v) = font_size {
            next.font.size = v;
        }
        if let Some(v) = xt {
            next.xt = v;
        }
        if let Some(v) = yt {
            next.yt = v;
        }
        if let Some(v) = ct {
            next.ct = v;
        }
        if let Some(v) = min_width {
            next.min_width = v;
        }
        if let Some(v) = max_width {
            next.max_width = v;
        }
        if let Some(v) = stroke_width {
            next.stroke_width = v;
        }
        if let Some(v) = box_spacing {
            next.box_spacing = v;
        }
        if let Some(v) = box_padding {
            next.box_padding = v;
        }
        if let Some(v) = box_radius {
            next.box_radius = v;
        }
        if let Some(v) = canvas_padding {
            next.canvas_padding = v;
        }
        if let Some(colors) = color_scheme {
            next.color_scheme = next.color_scheme.merged(&colors);
        }
        if let Some(v) = canvas_background {
            next.canvas_background = v;
        }

        next.validate()?;
        Ok(next)
    }

    /// Check the invariants every layout pass relies on
    pub fn validate(&self) -> Result<()> {
        if self.ct < 1 {
            return Err(HierarchyError::config_error(
                "ct must be at least 1".to_string(),
            ));
        }
        let lengths = [
            ("xt", self.xt),
            ("yt", self.yt),
            ("minWidth", self.min_width),
            ("maxWidth", self.max_width),
            ("strokeWidth", self.stroke_width),
            ("boxSpacing", self.box_spacing),
            ("boxPadding", self.box_padding),
            ("boxRadius", self.box_radius),
            ("canvasPadding", self.canvas_padding),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(HierarchyError::config_error(format!(
                    "{name} must be a finite, non-negative length (got {value})"
                )));
            }
        }
        if self.min_width > self.max_width {
            return Err(HierarchyError::config_error(format!(
                "minWidth ({}) exceeds maxWidth ({})",
                self.min_width, self.max_width
            )));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(HierarchyError::config_error(format!(
                "fontSize must be positive (got {})",
                self.font.size
            )));
        }
        Ok(())
    }
}

/// Partial configuration; every field left `None` keeps the base value
///
/// Field names accept both the camelCase spelling and the short names used
/// by existing hierarchy configs (`isCompact`, `minWid`, `maxWid`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(alias = "isCompact")]
    pub compact: Option<bool>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub xt: Option<f64>,
    pub yt: Option<f64>,
    pub ct: Option<usize>,
    #[serde(alias = "minWid")]
    pub min_width: Option<f64>,
    #[serde(alias = "maxWid")]
    pub max_width: Option<f64>,
    pub stroke_width: Option<f64>,
    pub box_spacing: Option<f64>,
    pub box_padding: Option<f64>,
    pub box_radius: Option<f64>,
    pub canvas_padding: Option<f64>,
    pub color_scheme: Option<ColorOverrides>,
    #[serde(alias = "canvasBackgroundColor")]
    pub canvas_background: Option<String>,
}

impl ConfigOverrides {
    /// Parse overrides from JSON text
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn layered(self, other: ConfigOverrides) -> Self {
        let colors = match (self.color_scheme, other.color_scheme) {
            (Some(base), Some(top)) => Some(ColorOverrides {
                stroke_color: top.stroke_color.or(base.stroke_color),
                background_color: top.background_color.or(base.background_color),
                line_color: top.line_color.or(base.line_color),
                text_color: top.text_color.or(base.text_color),
            }),
            (base, top) => top.or(base),
        };
        Self {
            compact: other.compact.or(self.compact),
            font_family: other.font_family.or(self.font_family),
            font_size: other.font_size.or(self.font_size),
            xt: other.xt.or(self.xt),
            yt: other.yt.or(self.yt),
            ct: other.ct.or(self.ct),
            min_width: other.min_width.or(self.min_width),
            max_width: other.max_width.or(self.max_width),
            stroke_width: other.stroke_width.or(self.stroke_width),
            box_spacing: other.box_spacing.or(self.box_spacing),
            box_padding: other.box_padding.or(self.box_padding),
            box_radius: other.box_radius.or(self.box_radius),
            canvas_padding: other.canvas_padding.or(self.canvas_padding),
            color_scheme: colors,
            canvas_background: other.canvas_background.or(self.canvas_background),
        }
    }
}

/// Builder for [`LayoutConfig`]
#[derive(Debug, Clone, Default)]
pub struct LayoutConfigBuilder {
    base: LayoutConfig,
    overrides: ConfigOverrides,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a config other than the defaults
    pub fn from_base(base: LayoutConfig) -> Self {
        Self {
            base,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.overrides.compact = Some(compact);
        self
    }

    pub fn font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.overrides.font_family = Some(family.into());
        self.overrides.font_size = Some(size);
        self
    }

    pub fn xt(mut self, xt: f64) -> Self {
        self.overrides.xt = Some(xt);
        self
    }

    pub fn yt(mut self, yt: f64) -> Self {
        self.overrides.yt = Some(yt);
        self
    }

    pub fn ct(mut self, ct: usize) -> Self {
        self.overrides.ct = Some(ct);
        self
    }

    pub fn width_bounds(mut self, min_width: f64, max_width: f64) -> Self {
        self.overrides.min_width = Some(min_width);
        self.overrides.max_width = Some(max_width);
        self
    }

    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.overrides.stroke_width = Some(stroke_width);
        self
    }

    pub fn box_spacing(mut self, box_spacing: f64) -> Self {
        self.overrides.box_spacing = Some(box_spacing);
        self
    }

    pub fn box_padding(mut self, box_padding: f64) -> Self {
        self.overrides.box_padding = Some(box_padding);
        self
    }

    pub fn box_radius(mut self, box_radius: f64) -> Self {
        self.overrides.box_radius = Some(box_radius);
        self
    }

    pub fn canvas_padding(mut self, canvas_padding: f64) -> Self {
        self.overrides.canvas_padding = Some(canvas_padding);
        self
    }

    pub fn color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.base.color_scheme = scheme;
        self.overrides.color_scheme = None;
        self
    }

    pub fn canvas_background(mut self, color: impl Into<String>) -> Self {
        self.overrides.canvas_background = Some(color.into());
        self
    }

    /// Layer a set of overrides on top of what has been set so far
    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = self.overrides.layered(overrides);
        self
    }

    pub fn build(self) -> Result<LayoutConfig> {
        self.base.merged(&self.overrides)
    }
}
