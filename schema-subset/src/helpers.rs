/// Tracks whether a position in SQL is inside a quoted literal, a quoted identifier or a `--` comment.
#[derive(Debug, Default, Copy, Clone)]
struct QuoteState {
    in_string: bool,
    in_identifier: bool,
    in_comment: bool,
    previous_dash: bool,
}

impl QuoteState {
    /// Updates the state for the next character. Returns true if the character is outside of any
    /// quotes and comments.
    fn observe(&mut self, c: char) -> bool {
        if self.in_comment {
            if c == '\n' {
                self.in_comment = false;
            }
            return false;
        }

        let previous_dash = std::mem::take(&mut self.previous_dash);

        match c {
            '\'' if !self.in_identifier => {
                self.in_string = !self.in_string;
                false
            }
            '"' if !self.in_string => {
                self.in_identifier = !self.in_identifier;
                false
            }
            '-' if !self.in_string && !self.in_identifier => {
                if previous_dash {
                    self.in_comment = true;
                    false
                } else {
                    self.previous_dash = true;
                    true
                }
            }
            _ => !self.in_string && !self.in_identifier,
        }
    }
}

/// The number of opening parentheses minus the number of closing parentheses, ignoring a trailing comment.
pub(crate) fn paren_balance(line: &str) -> i64 {
    strip_line_comment(line).chars().fold(0, |balance, c| match c {
        '(' => balance + 1,
        ')' => balance - 1,
        _ => balance,
    })
}

/// Finds the byte index of the parenthesis that closes the one at `open`.
pub(crate) fn find_closing_paren(s: &str, open: usize) -> Option<usize> {
    let mut quotes = QuoteState::default();
    let mut depth = 0;

    for (idx, c) in s[open..].char_indices() {
        if !quotes.observe(c) {
            continue;
        }

        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }

    None
}

/// Splits on the commas that are not nested inside parentheses or quotes.
pub(crate) fn split_top_level_commas(s: &str) -> Vec<&str> {
    let mut quotes = QuoteState::default();
    let mut depth = 0;
    let mut start = 0;
    let mut parts = Vec::new();

    for (idx, c) in s.char_indices() {
        if !quotes.observe(c) {
            continue;
        }

        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Cuts a trailing `-- comment` off a line.
pub(crate) fn strip_line_comment(line: &str) -> &str {
    let mut quotes = QuoteState::default();

    for (idx, c) in line.char_indices() {
        quotes.observe(c);
        if quotes.in_comment {
            return &line[..idx - 1];
        }
    }

    line
}
