//! Greedy word wrap against a px width.

use crate::layout::font_metrics::FontMetricTable;

/// One wrapped line and its measured width in px.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
}

/// Wraps `text` into lines no wider than `max_width` px at `size_px`.
///
/// Words are separated on whitespace and rejoined with single spaces. A word
/// wider than the whole line is broken by character. Empty input yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_px: f32,
    max_width: f32,
) -> Vec<WrappedLine> {
    let space_w = metrics.space_width * size_px;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_px(word, size_px);

        if word_w > max_width {
            // Flush what we have, then hard-break the long word.
            if !current.is_empty() {
                lines.push(WrappedLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current_width = 0.0;
            }
            let mut pieces = break_word(word, metrics, size_px, max_width);
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current_width = last.width;
                current = last.text;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            lines.push(WrappedLine {
                text: std::mem::replace(&mut current, word.to_string()),
                width: current_width,
            });
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(WrappedLine {
            text: current,
            width: current_width,
        });
    }
    lines
}

/// Natural (unwrapped) width of `text` in px, whitespace collapsed.
pub fn natural_width(text: &str, metrics: &FontMetricTable, size_px: f32) -> f32 {
    let space_w = metrics.space_width * size_px;
    let mut width = 0.0;
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            width += space_w;
        }
        width += metrics.measure_px(word, size_px);
    }
    width
}

fn break_word(
    word: &str,
    metrics: &FontMetricTable,
    size_px: f32,
    max_width: f32,
) -> Vec<WrappedLine> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let cw = metrics.char_width(c) * size_px;
        // Always place at least one character per line.
        if !piece.is_empty() && width + cw > max_width {
            pieces.push(WrappedLine {
                text: std::mem::take(&mut piece),
                width,
            });
            width = 0.0;
        }
        piece.push(c);
        width += cw;
    }
    if !piece.is_empty() {
        pieces.push(WrappedLine { text: piece, width });
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFamily, FontWeight};

    fn sans() -> &'static FontMetricTable {
        get_metrics(FontFamily::Sans, FontWeight::Regular)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("", sans(), 12.0, 200.0).is_empty());
        assert!(wrap_text("   \n\t", sans(), 12.0, 200.0).is_empty());
    }

    #[test]
    fn test_short_text_fits_one_line() {
        let lines = wrap_text("Rust engineer", sans(), 12.0, 500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Rust engineer");
        assert!((lines[0].width - natural_width("Rust engineer", sans(), 12.0)).abs() < 1e-3);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Designed an idempotent ledger API now serving forty thousand requests \
                    per second at a p99 latency under thirty milliseconds";
        let lines = wrap_text(text, sans(), 14.0, 250.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 250.0 + 1e-3, "line too wide: {line:?}");
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            rejoined.join(" ").split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_overlong_word_is_broken_by_character() {
        let word = "a".repeat(200);
        let lines = wrap_text(&word, sans(), 12.0, 100.0);
        assert!(lines.len() > 1);
        let total: usize = lines.iter().map(|l| l.text.chars().count()).sum();
        assert_eq!(total, 200);
        for line in &lines {
            assert!(line.width <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn test_overlong_word_tail_joins_following_words() {
        let text = format!("{} end", "x".repeat(60));
        let lines = wrap_text(&text, sans(), 12.0, 150.0);
        assert!(lines.last().unwrap().text.ends_with("end"));
    }

    #[test]
    fn test_narrow_width_still_progresses() {
        // Width smaller than any single glyph still yields one char per line.
        let lines = wrap_text("abc", sans(), 12.0, 1.0);
        assert_eq!(lines.len(), 3);
    }
}
