//! Terminal colorization for character-grid previews
//!
//! Applies ANSI escape codes with crossterm, picking colours from the
//! active colour scheme.

use crossterm::style::{Color, Stylize};
use hierbox::core::ColorScheme;

/// Colorize a character-grid preview
///
/// Box outlines take the scheme's stroke colour and connector runs take
/// its line colour. Labels keep the terminal colour.
pub fn colorize_output(input: &str, scheme: &ColorScheme) -> String {
    let stroke = hex_color(&scheme.stroke_color).unwrap_or(Color::Cyan);
    let line_color = hex_color(&scheme.line_color).unwrap_or(Color::DarkCyan);
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        for c in line.chars() {
            let colored = match c {
                '┌' | '┐' | '└' | '┘' | '╭' | '╮' | '╯' | '╰' | '─' | '│' => {
                    format!("{}", c.to_string().with(stroke))
                }
                '+' | '-' | '|' if is_box_char_context(line, c) => {
                    format!("{}", c.to_string().with(line_color))
                }
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// `#RRGGBB` to an RGB terminal colour
fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Check if a character is likely part of box drawing vs label text
fn is_box_char_context(line: &str, c: char) -> bool {
    match c {
        '+' => line.contains("+-") || line.contains("-+"),
        '-' => line.contains("---") || line.contains("+-") || line.contains("-+"),
        '|' => {
            let trimmed = line.trim();
            trimmed.starts_with('|') || trimmed.ends_with('|')
        }
        _ => false,
    }
}
