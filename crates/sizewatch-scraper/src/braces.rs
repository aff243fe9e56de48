//! Balanced-brace tokenizer for inline script text.
//!
//! Product pages embed state objects inside arbitrary JavaScript
//! (`window.__STATE__ = {...};`, `dataLayer.push({...})`). The tokenizer
//! yields every outermost `{…}` span without attempting to parse it, so a
//! span that later fails to parse never disturbs the spans after it.

/// Lazy iterator over outermost balanced `{…}` substrings of a text.
pub struct BraceCandidates<'a> {
    text: &'a str,
    pos: usize,
}

/// Returns a lazy iterator over the outermost balanced-brace spans of `text`.
#[must_use]
pub fn brace_candidates(text: &str) -> BraceCandidates<'_> {
    BraceCandidates { text, pos: 0 }
}

impl<'a> Iterator for BraceCandidates<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(offset) = self.text[self.pos..].find('{') {
            let start = self.pos + offset;
            if let Some(len) = balanced_object_len(&self.text[start..]) {
                self.pos = start + len;
                return Some(&self.text[start..start + len]);
            }
            // Unterminated: skip this brace and look for objects nested inside it.
            self.pos = start + 1;
        }
        self.pos = self.text.len();
        None
    }
}

/// Byte length of the balanced object at the start of `s`, if it closes.
///
/// `s` must start with `{`. Braces inside single- or double-quoted strings
/// are ignored and backslash escapes inside strings are honoured.
fn balanced_object_len(s: &str) -> Option<usize> {
    if !s.starts_with('{') {
        return None;
    }
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut escape = false;
    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if let Some(q) = quote {
            match c {
                '\\' => escape = true,
                c if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
