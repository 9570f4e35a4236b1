//! Character grid used by the ASCII preview backend

use std::fmt;

/// Characters used to draw boxes and connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Pure ASCII: + - |
    Ascii,
    /// Unicode box-drawing characters, rounded corners for rounded boxes
    #[default]
    Unicode,
}

impl CharacterSet {
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// Line and corner glyphs for one character set
#[derive(Debug, Clone, Copy)]
pub struct GridChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl GridChars {
    /// Glyphs for square-cornered shapes and connector bends
    pub fn square(style: CharacterSet) -> Self {
        if style.is_ascii() {
            Self::ascii()
        } else {
            Self {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
            }
        }
    }

    /// Glyphs for rounded boxes
    pub fn rounded(style: CharacterSet) -> Self {
        if style.is_ascii() {
            Self::ascii()
        } else {
            Self {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                ..Self::square(style)
            }
        }
    }

    fn ascii() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
        }
    }
}

/// Inclusive cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

/// Character grid that grows as it is drawn on
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<char>>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let grid = vec![vec![' '; width.max(1)]; height.max(1)];
        Self {
            width,
            height,
            grid,
        }
    }

    /// Ensure the canvas is at least the specified size, expanding if needed
    pub fn ensure_size(&mut self, min_width: usize, min_height: usize) {
        if min_width > self.width {
            for row in &mut self.grid {
                row.resize(min_width, ' ');
            }
            self.width = min_width;
        }
        if min_height > self.height {
            let extra_rows = min_height - self.height;
            self.grid
                .extend((0..extra_rows).map(|_| vec![' '; self.width.max(1)]));
            self.height = min_height;
        }
    }

    pub fn set_char(&mut self, x: usize, y: usize, c: char) {
        self.ensure_size(x + 1, y + 1);
        self.grid[y][x] = c;
    }

    pub fn get_char(&self, x: usize, y: usize) -> char {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(' ')
    }

    /// Write `text` left-aligned, stopping before column `limit`
    pub fn draw_text_clipped(&mut self, x: usize, y: usize, text: &str, limit: usize) {
        for (i, c) in text.chars().enumerate() {
            if x + i >= limit {
                break;
            }
            self.set_char(x + i, y, c);
        }
    }

    pub fn draw_horizontal(&mut self, y: usize, x1: usize, x2: usize, c: char) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.set_char(x, y, c);
        }
    }

    pub fn draw_vertical(&mut self, x: usize, y1: usize, y2: usize, c: char) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.set_char(x, y, c);
        }
    }

    /// Outline a rectangle and blank its interior
    pub fn draw_rect(&mut self, rect: CellRect, chars: &GridChars) {
        for y in rect.top + 1..rect.bottom {
            for x in rect.left + 1..rect.right {
                self.set_char(x, y, ' ');
            }
        }
        self.draw_horizontal(rect.top, rect.left, rect.right, chars.horizontal);
        self.draw_horizontal(rect.bottom, rect.left, rect.right, chars.horizontal);
        self.draw_vertical(rect.left, rect.top, rect.bottom, chars.vertical);
        self.draw_vertical(rect.right, rect.top, rect.bottom, chars.vertical);
        self.set_char(rect.left, rect.top, chars.top_left);
        self.set_char(rect.right, rect.top, chars.top_right);
        self.set_char(rect.left, rect.bottom, chars.bottom_left);
        self.set_char(rect.right, rect.bottom, chars.bottom_right);
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect();

        while rows.first().is_some_and(|row| row.is_empty()) {
            rows.remove(0);
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        // Canvas padding shows up as a common indent
        let min_indent = rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().take_while(|c| *c == ' ').count())
            .min()
            .unwrap_or(0);
        if min_indent > 0 {
            for row in &mut rows {
                *row = row.chars().skip(min_indent).collect();
            }
        }

        write!(f, "{}", rows.join("\n"))
    }
}
