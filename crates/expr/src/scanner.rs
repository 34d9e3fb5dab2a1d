//! Brace-expression scanning.
//!
//! The standalone check and the extractor walk the input once, tracking `{}`
//! depth. Braces inside a quoted span (`'`, `"` or `` ` ``) are not counted,
//! and a quote character preceded by an odd run of backslashes never opens or
//! closes a span (`\\` is an escaped backslash).

/// Quote tracking shared by every scanner in the crate.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteState {
    open: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feeds one character. Returns `true` when the character belongs to a
    /// quoted span (delimiters included) and must not be treated as syntax.
    pub(crate) fn step(&mut self, ch: char) -> bool {
        let escaped = self.escaped;
        self.escaped = ch == '\\' && !escaped;
        match self.open {
            Some(quote) => {
                if ch == quote && !escaped {
                    self.open = None;
                }
                true
            }
            None if is_quote(ch) && !escaped => {
                self.open = Some(ch);
                true
            }
            None => false,
        }
    }
}

fn is_quote(ch: char) -> bool {
    matches!(ch, '\'' | '"' | '`')
}

/// Returns true if the whole string is exactly one `{...}` expression.
///
/// `{a}{b}` is rejected: depth returns to zero before the last character.
pub fn is_dynamic_expression(value: &str) -> bool {
    if value.len() < 2 || !value.starts_with('{') || !value.ends_with('}') {
        return false;
    }

    let last = value.len() - 1;
    let mut depth: i64 = 0;
    let mut quotes = QuoteState::default();

    for (index, ch) in value.char_indices() {
        if quotes.step(ch) {
            continue;
        }
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 || (depth == 0 && index != last) {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}

/// Replaces every top-level `{...}` span with the callback's output.
///
/// The callback receives the inner text without the outer braces. Text
/// outside expressions is copied verbatim, a stray `}` is kept as a literal,
/// and an unterminated `{...` tail is re-emitted unchanged.
pub fn find_and_replace<F>(value: &str, mut callback: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = String::with_capacity(value.len());
    let mut expression = String::new();
    let mut depth = 0usize;
    let mut quotes = QuoteState::default();

    for ch in value.chars() {
        if depth == 0 {
            if ch == '{' {
                depth = 1;
                quotes = QuoteState::default();
                expression.clear();
            } else {
                output.push(ch);
            }
            continue;
        }

        if !quotes.step(ch) {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        output.push_str(&callback(&expression));
                        continue;
                    }
                }
                _ => {}
            }
        }
        expression.push(ch);
    }

    if depth > 0 {
        output.push('{');
        output.push_str(&expression);
    }

    output
}
