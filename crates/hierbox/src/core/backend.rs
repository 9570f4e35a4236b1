//! Rendering backend trait and the draw-call recorder
//!
//! The layout driver emits draw calls for effect only; it never reads
//! anything back from a backend. A backend needs its surface size before the
//! first call, which [`Backend::begin`] delivers.

use serde::{Deserialize, Serialize};

use super::{CanvasSize, Connector, FontSpec, LayoutConfig, Placement, Point, Result};

/// Stroke and fill of a box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub stroke_color: String,
    pub fill_color: String,
    pub stroke_width: f64,
    pub radius: f64,
}

/// Colour and width of a connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

/// Colour and font of label text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: String,
    pub font: FontSpec,
}

/// All styles of one layout pass, resolved from the config once
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyles {
    pub boxes: BoxStyle,
    pub lines: LineStyle,
    pub text: TextStyle,
    pub background: String,
}

/// Connectors are drawn with a fixed width independent of the box stroke
pub const CONNECTOR_WIDTH: f64 = 2.0;

impl DrawStyles {
    pub fn from_config(config: &LayoutConfig) -> Self {
        let scheme = &config.color_scheme;
        Self {
            boxes: BoxStyle {
                stroke_color: scheme.stroke_color.clone(),
                fill_color: scheme.background_color.clone(),
                stroke_width: config.stroke_width,
                radius: config.box_radius,
            },
            lines: LineStyle {
                color: scheme.line_color.clone(),
                width: CONNECTOR_WIDTH,
            },
            text: TextStyle {
                color: scheme.text_color.clone(),
                font: config.font.clone(),
            },
            background: config.canvas_background.clone(),
        }
    }
}

/// A drawing surface the layout driver paints onto
pub trait Backend {
    /// Allocate the surface; called once before any other draw call
    fn begin(&mut self, size: CanvasSize, background: &str) -> Result<()>;

    fn draw_box(&mut self, placement: &Placement, style: &BoxStyle) -> Result<()>;

    fn draw_connector(&mut self, connector: &Connector, style: &LineStyle) -> Result<()>;

    /// Draw label lines top-aligned, one `line_height` apart, starting at `origin`
    fn draw_text(
        &mut self,
        lines: &[String],
        origin: Point,
        line_height: f64,
        style: &TextStyle,
    ) -> Result<()>;

    /// Called after the last draw call
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Get the supported output format
    fn format(&self) -> &'static str;
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Begin {
        size: CanvasSize,
        background: String,
    },
    Box {
        placement: Placement,
    },
    Connector {
        connector: Connector,
    },
    Text {
        lines: Vec<String>,
        origin: Point,
        line_height: f64,
    },
}

/// Backend that records draw calls in order
///
/// Serialises to JSON as a layout dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size passed to `begin`, if any
    pub fn canvas(&self) -> Option<CanvasSize> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Begin { size, .. } => Some(*size),
            _ => None,
        })
    }

    pub fn boxes(&self) -> impl Iterator<Item = &Placement> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Box { placement } => Some(placement),
            _ => None,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Connector { connector } => Some(connector),
            _ => None,
        })
    }

    /// Labels in drawing order, with the wrap spaces removed
    pub fn labels(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { lines, .. } => Some(
                    lines
                        .iter()
                        .map(|line| line.trim_end())
                        .collect::<Vec<_>>()
                        .join(" "),
                ),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Backend for DrawList {
    fn begin(&mut self, size: CanvasSize, background: &str) -> Result<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Begin {
            size,
            background: background.to_string(),
        });
        Ok(())
    }

    fn draw_box(&mut self, placement: &Placement, _style: &BoxStyle) -> Result<()> {
        self.commands.push(DrawCommand::Box {
            placement: *placement,
        });
        Ok(())
    }

    fn draw_connector(&mut self, connector: &Connector, _style: &LineStyle) -> Result<()> {
        self.commands.push(DrawCommand::Connector {
            connector: connector.clone(),
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        lines: &[String],
        origin: Point,
        line_height: f64,
        _style: &TextStyle,
    ) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            lines: lines.to_vec(),
            origin,
            line_height,
        });
        Ok(())
    }

    fn format(&self) -> &'static str {
        "json"
    }
}
