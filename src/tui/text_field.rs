use unicode_segmentation::UnicodeSegmentation;

/// Marker drawn at the cursor position
pub const CURSOR_MARKER: char = '❚';

/// A single-line editable buffer with a cursor.
///
/// The cursor is a byte offset that always sits on a grapheme cluster
/// boundary. No operation fails: requests past either edge are clamped or
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    buffer: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        TextField::default()
    }

    /// A field holding `text` with the cursor at the end
    pub fn with_text(text: &str) -> Self {
        let mut field = TextField::new();
        field.set_text(text);
        field
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        // A combining mark can merge with the grapheme before the splice point
        self.cursor = self.snap_to_boundary(self.cursor);
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert(c.encode_utf8(&mut buf));
    }

    pub fn backspace(&mut self) {
        if let Some(start) = prev_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(end) = next_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..end, "");
        }
    }

    /// Delete back to the start of the previous word, whitespace included
    pub fn delete_word_back(&mut self) {
        let start = word_start_before(&self.buffer, self.cursor);
        if start < self.cursor {
            self.buffer.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn move_left(&mut self) {
        if let Some(pos) = prev_boundary(&self.buffer, self.cursor) {
            self.cursor = pos;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(pos) = next_boundary(&self.buffer, self.cursor) {
            self.cursor = pos;
        }
    }

    pub fn move_word_left(&mut self) {
        self.cursor = word_start_before(&self.buffer, self.cursor);
    }

    pub fn move_word_right(&mut self) {
        self.cursor = word_start_after(&self.buffer, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// The buffer with the cursor marker spliced in at the cursor
    pub fn render_with_cursor(&self) -> String {
        let (before, after) = self.buffer.split_at(self.cursor);
        let mut out = String::with_capacity(self.buffer.len() + CURSOR_MARKER.len_utf8());
        out.push_str(before);
        out.push(CURSOR_MARKER);
        out.push_str(after);
        out
    }

    fn snap_to_boundary(&self, pos: usize) -> usize {
        self.buffer
            .grapheme_indices(true)
            .map(|(i, g)| (i, i + g.len()))
            .find(|&(start, end)| start < pos && pos < end)
            .map_or(pos, |(_, end)| end)
    }
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

fn prev_boundary(s: &str, pos: usize) -> Option<usize> {
    s[..pos].grapheme_indices(true).next_back().map(|(i, _)| i)
}

fn next_boundary(s: &str, pos: usize) -> Option<usize> {
    s[pos..].graphemes(true).next().map(|g| pos + g.len())
}

/// Start of the word at or before `pos`: skip whitespace leftwards, then the
/// run of non-whitespace graphemes.
pub fn word_start_before(s: &str, pos: usize) -> usize {
    let mut graphemes = s[..pos].grapheme_indices(true).rev().peekable();
    let mut boundary = pos;
    while let Some(&(i, g)) = graphemes.peek() {
        if !is_blank(g) {
            break;
        }
        boundary = i;
        graphemes.next();
    }
    for (i, g) in graphemes {
        if is_blank(g) {
            break;
        }
        boundary = i;
    }
    boundary
}

/// Start of the next word after `pos`: skip the rest of the current word,
/// then the whitespace after it. Clamps to the end of the buffer.
pub fn word_start_after(s: &str, pos: usize) -> usize {
    let mut graphemes = s[pos..].grapheme_indices(true).peekable();
    while graphemes.next_if(|&(_, g)| !is_blank(g)).is_some() {}
    while graphemes.next_if(|&(_, g)| is_blank(g)).is_some() {}
    graphemes.next().map_or(s.len(), |(i, _)| pos + i)
}
