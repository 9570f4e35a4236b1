//! Label wrapping shared by the sizing and placement passes
//!
//! Both passes must call [`wrap_label`] with the same width so that a label's
//! line count, and therefore its box height, agrees between them. Every width
//! comparison goes through [`text_width`], the same truncated measure a box
//! width is clamped from, so a word never fails to fit its own box.

use std::collections::VecDeque;

use super::{FontSpec, Result, TextMetrics};

/// Display lines of a wrapped label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLabel {
    pub line_count: usize,
    /// Every line keeps a single trailing space
    pub lines: Vec<String>,
}

/// Measured text width, truncated to whole pixels
pub fn text_width<M: TextMetrics + ?Sized>(text: &str, metrics: &M, font: &FontSpec) -> Result<f64> {
    Ok(metrics.measure(text, font)?.width.trunc())
}

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// Words are split on single spaces. A word wider than `max_width` is cut
/// from the end until it fits and the remainder becomes the next word, so
/// long words are hard-split across lines. A word is never cut below one
/// character. Lines are never reflowed backward. The empty string yields a
/// single line `" "`.
///
/// # Example
/// ```
/// use hierbox::core::{wrap_label, FontSpec, MonospaceMetrics};
///
/// // 8px per character at 16px
/// let metrics = MonospaceMetrics::with_ratios(0.5, 0.75, 0.25);
/// let wrapped = wrap_label("one two three", 64.0, &metrics, &FontSpec::default()).unwrap();
/// assert_eq!(wrapped.lines, vec!["one two ", "three "]);
/// ```
pub fn wrap_label<M: TextMetrics + ?Sized>(
    text: &str,
    max_width: f64,
    metrics: &M,
    font: &FontSpec,
) -> Result<WrappedLabel> {
    let mut words: VecDeque<String> = text.split(' ').map(str::to_string).collect();
    let mut lines = Vec::new();
    let mut line = String::new();

    while let Some(word) = words.pop_front() {
        let head = fit_word(&word, max_width, metrics, font)?;
        if head.len() < word.len() {
            words.push_front(word[head.len()..].to_string());
        }

        let candidate = format!("{line}{head} ");
        if !line.is_empty() && text_width(&candidate, metrics, font)? > max_width {
            lines.push(std::mem::replace(&mut line, format!("{head} ")));
        } else {
            line = candidate;
        }
    }
    lines.push(line);

    Ok(WrappedLabel {
        line_count: lines.len(),
        lines,
    })
}

/// Longest prefix of `word` that fits, keeping at least one character
fn fit_word<'w, M: TextMetrics + ?Sized>(
    word: &'w str,
    max_width: f64,
    metrics: &M,
    font: &FontSpec,
) -> Result<&'w str> {
    let mut head = word;
    while text_width(head, metrics, font)? > max_width {
        let mut chars = head.char_indices();
        let Some((last, _)) = chars.next_back() else {
            break;
        };
        if last == 0 {
            break;
        }
        head = &head[..last];
    }
    Ok(head)
}
