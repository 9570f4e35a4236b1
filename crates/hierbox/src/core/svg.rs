//! SVG document backend

use super::{Backend, BoxStyle, CanvasSize, Connector, LineStyle, Placement, Point, Result, TextStyle};

/// Backend that writes a standalone SVG document
#[derive(Debug, Clone, Default)]
pub struct SvgBackend {
    svg: String,
    finished: bool,
}

impl SvgBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document written so far; complete once `finish` has run
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    pub fn into_string(self) -> String {
        self.svg
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Backend for SvgBackend {
    fn begin(&mut self, size: CanvasSize, background: &str) -> Result<()> {
        let CanvasSize { width, height } = size;
        self.svg.clear();
        self.finished = false;
        self.svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        ));
        self.svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(background)
        ));
        Ok(())
    }

    fn draw_box(&mut self, placement: &Placement, style: &BoxStyle) -> Result<()> {
        self.svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            placement.x,
            placement.y,
            placement.width,
            placement.height,
            style.radius,
            style.radius,
            escape_xml(&style.fill_color),
            escape_xml(&style.stroke_color),
            style.stroke_width
        ));
        Ok(())
    }

    fn draw_connector(&mut self, connector: &Connector, style: &LineStyle) -> Result<()> {
        self.svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" data-mode=\"{}\"/>",
            points_to_path(&connector.points),
            escape_xml(&style.color),
            style.width,
            connector.mode
        ));
        Ok(())
    }

    fn draw_text(
        &mut self,
        lines: &[String],
        origin: Point,
        line_height: f64,
        style: &TextStyle,
    ) -> Result<()> {
        self.svg.push_str(&format!(
            "<text font-family=\"{}\" font-size=\"{}\" fill=\"{}\" dominant-baseline=\"hanging\">",
            escape_xml(&style.font.family),
            style.font.size,
            escape_xml(&style.color)
        ));
        for (idx, line) in lines.iter().enumerate() {
            let y = origin.y + idx as f64 * line_height;
            self.svg.push_str(&format!(
                "<tspan x=\"{:.2}\" y=\"{:.2}\">{}</tspan>",
                origin.x,
                y,
                escape_xml(line.trim_end())
            ));
        }
        self.svg.push_str("</text>");
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.finished {
            self.svg.push_str("</svg>");
            self.finished = true;
        }
        Ok(())
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}

fn points_to_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (idx, point) in points.iter().enumerate() {
        if idx > 0 {
            d.push(' ');
        }
        let op = if idx == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{op} {:.2} {:.2}", point.x, point.y));
    }
    d
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConnectorMode, DrawStyles, LayoutConfig};

    #[test]
    fn test_document_is_closed_once() {
        let mut svg = SvgBackend::new();
        svg.begin(CanvasSize::new(120.0, 80.0), "#FFFFFF").unwrap();
        svg.finish().unwrap();
        svg.finish().unwrap();
        let doc = svg.into_string();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("viewBox=\"0 0 120 80\""));
        assert_eq!(doc.matches("</svg>").count(), 1);
    }

    #[test]
    fn test_text_is_escaped() {
        let styles = DrawStyles::from_config(&LayoutConfig::default());
        let mut svg = SvgBackend::new();
        svg.begin(CanvasSize::new(10.0, 10.0), "#fff").unwrap();
        svg.draw_text(&["R&D <team> ".to_string()], Point::new(4.0, 4.0), 16.0, &styles.text)
            .unwrap();
        assert!(svg.as_str().contains("R&amp;D &lt;team&gt;</tspan>"));
    }

    #[test]
    fn test_connector_path() {
        let styles = DrawStyles::from_config(&LayoutConfig::default());
        let mut svg = SvgBackend::new();
        let connector = Connector {
            from: Placement::default(),
            to: Placement::default(),
            mode: ConnectorMode::Staggered,
            points: vec![Point::new(0.0, 0.0), Point::new(0.0, 10.0), Point::new(5.0, 10.0)],
        };
        svg.draw_connector(&connector, &styles.lines).unwrap();
        assert!(svg
            .as_str()
            .contains("d=\"M 0.00 0.00 L 0.00 10.00 L 5.00 10.00\""));
        assert!(svg.as_str().contains("data-mode=\"staggered\""));
    }

    #[test]
    fn test_points_to_path_empty() {
        assert_eq!(points_to_path(&[]), "");
    }
}
