//! Character-grid preview backend
//!
//! Pixel coordinates are divided by a fixed cell size and rounded. Boxes
//! are widened when needed so their label always fits inside the outline.

use super::{
    AsciiCanvas, Backend, BoxStyle, CanvasSize, CellRect, CharacterSet, Connector, GridChars,
    HierarchyError, LineStyle, Placement, Point, Result, TextStyle,
};

/// Backend that paints onto an [`AsciiCanvas`]
#[derive(Debug, Clone)]
pub struct AsciiBackend {
    canvas: AsciiCanvas,
    cell_width: f64,
    cell_height: f64,
    style: CharacterSet,
    /// Box outline waiting for its label
    pending: Option<(CellRect, bool)>,
}

impl AsciiBackend {
    /// `cell_width` and `cell_height` are the pixel size of one character cell
    pub fn new(cell_width: f64, cell_height: f64) -> Result<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(cell_width) || !usable(cell_height) {
            return Err(HierarchyError::render_error(format!(
                "invalid cell size {cell_width}x{cell_height}"
            )));
        }
        Ok(Self {
            canvas: AsciiCanvas::new(0, 0),
            cell_width,
            cell_height,
            style: CharacterSet::default(),
            pending: None,
        })
    }

    pub fn with_style(mut self, style: CharacterSet) -> Self {
        self.style = style;
        self
    }

    pub fn canvas(&self) -> &AsciiCanvas {
        &self.canvas
    }

    pub fn into_string(mut self) -> String {
        self.flush_pending(&[]);
        self.canvas.to_string()
    }

    fn col(&self, x: f64) -> usize {
        (x / self.cell_width).round().max(0.0) as usize
    }

    fn row(&self, y: f64) -> usize {
        (y / self.cell_height).round().max(0.0) as usize
    }

    fn cell(&self, point: &Point) -> (usize, usize) {
        (self.col(point.x), self.row(point.y))
    }

    fn cell_rect(&self, placement: &Placement) -> CellRect {
        let left = self.col(placement.x);
        let top = self.row(placement.y);
        CellRect {
            left,
            top,
            right: self.col(placement.right()).max(left + 1),
            bottom: self.row(placement.bottom()).max(top + 1),
        }
    }

    /// Draw the waiting outline, grown to hold `lines`, then the lines
    fn flush_pending(&mut self, lines: &[String]) {
        let Some((mut rect, rounded)) = self.pending.take() else {
            return;
        };
        let longest = lines
            .iter()
            .map(|line| line.trim_end().chars().count())
            .max()
            .unwrap_or(0);
        rect.right = rect.right.max(rect.left + longest + 1);
        rect.bottom = rect.bottom.max(rect.top + lines.len() + 1);

        let chars = if rounded {
            GridChars::rounded(self.style)
        } else {
            GridChars::square(self.style)
        };
        self.canvas.draw_rect(rect, &chars);
        for (idx, line) in lines.iter().enumerate() {
            self.canvas
                .draw_text_clipped(rect.left + 1, rect.top + 1 + idx, line.trim_end(), rect.right);
        }
    }

    fn bend_char(chars: &GridChars, prev: (usize, usize), at: (usize, usize), next: (usize, usize)) -> char {
        let up = prev.1 < at.1 || next.1 < at.1;
        let down = prev.1 > at.1 || next.1 > at.1;
        let left = prev.0 < at.0 || next.0 < at.0;
        let right = prev.0 > at.0 || next.0 > at.0;
        match (up, down, left, right) {
            (true, false, false, true) => chars.bottom_left,
            (true, false, true, false) => chars.bottom_right,
            (false, true, false, true) => chars.top_left,
            (false, true, true, false) => chars.top_right,
            (true, true, _, _) | (_, _, false, false) => chars.vertical,
            _ => chars.horizontal,
        }
    }
}

impl Backend for AsciiBackend {
    fn begin(&mut self, size: CanvasSize, _background: &str) -> Result<()> {
        self.pending = None;
        self.canvas = AsciiCanvas::new(self.col(size.width) + 1, self.row(size.height) + 1);
        Ok(())
    }

    fn draw_box(&mut self, placement: &Placement, style: &BoxStyle) -> Result<()> {
        self.flush_pending(&[]);
        self.pending = Some((self.cell_rect(placement), style.radius > 0.0));
        Ok(())
    }

    fn draw_connector(&mut self, connector: &Connector, _style: &LineStyle) -> Result<()> {
        let chars = GridChars::square(self.style);
        let cells: Vec<(usize, usize)> = connector.points.iter().map(|p| self.cell(p)).collect();

        for pair in cells.windows(2) {
            let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
            if y1 == y2 {
                self.canvas.draw_horizontal(y1, x1, x2, chars.horizontal);
            } else if x1 == x2 {
                self.canvas.draw_vertical(x1, y1, y2, chars.vertical);
            } else {
                // Off-grid diagonal after rounding: go vertical then horizontal
                self.canvas.draw_vertical(x1, y1, y2, chars.vertical);
                self.canvas.draw_horizontal(y2, x1, x2, chars.horizontal);
            }
        }
        for triple in cells.windows(3) {
            let (x, y) = triple[1];
            let c = Self::bend_char(&chars, triple[0], triple[1], triple[2]);
            self.canvas.set_char(x, y, c);
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        lines: &[String],
        origin: Point,
        _line_height: f64,
        _style: &TextStyle,
    ) -> Result<()> {
        if self.pending.is_some() {
            self.flush_pending(lines);
        } else {
            let (x, y) = self.cell(&origin);
            for (idx, line) in lines.iter().enumerate() {
                self.canvas
                    .draw_text_clipped(x, y + idx, line.trim_end(), usize::MAX);
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.flush_pending(&[]);
        Ok(())
    }

    fn format(&self) -> &'static str {
        "ascii"
    }
}
