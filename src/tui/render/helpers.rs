use ratatui::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub(super) fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub(super) fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Rows a paragraph needs when wrapped to `width` cells. Each `\n`-separated
/// line takes at least one row.
pub(super) fn wrapped_height(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.split('\n')
        .map(|line| display_width(line).div_ceil(width).max(1))
        .sum()
}

/// Pad `text` with spaces on both sides to center it in `width` cells
pub(super) fn center(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let pad = width.saturating_sub(display_width(&text)) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_wide_and_tabs() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("a\tb"), 6);
    }

    #[test]
    fn truncate_keeps_graphemes_whole() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("你好世界", 5), "你好…");
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn wrapped_height_counts_rows() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("0123456789", 10), 1);
        assert_eq!(wrapped_height("0123456789a", 10), 2);
        assert_eq!(wrapped_height("a\nb\n", 10), 3);
    }

    #[test]
    fn centering() {
        assert_eq!(center("ab", 6), "  ab");
        let r = centered_rect_fixed(10, 4, Rect::new(0, 0, 20, 10));
        assert_eq!(r, Rect::new(5, 3, 10, 4));
        let clipped = centered_rect_fixed(50, 4, Rect::new(0, 0, 20, 10));
        assert_eq!(clipped.width, 20);
    }
}
