// ============================================================
// Layer 4 - Posting Text Preprocessor
// ============================================================
// Normalises raw posting text before feature extraction. Text
// copied out of job boards carries:
//   - Non-breaking spaces (U+00A0) and zero-width spaces (U+200B)
//   - Windows line endings and tabs
//   - Runs of blank lines and indentation
//
// Cleaning steps (applied in order):
//   1. Map Unicode whitespace variants and control characters
//      to a plain space
//   2. Collapse every whitespace run into a single space
//   3. Trim both ends
//
// The result is a single line; `text_length` is measured on it.
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, text: &str) -> String {
        let mapped = text.chars().map(|c| match c {
            '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        });

        let mut out        = String::with_capacity(text.len());
        let mut last_space = true; // drops leading whitespace
        for c in mapped {
            if c.is_whitespace() {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
