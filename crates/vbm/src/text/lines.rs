//! Line tokenizer for the text representation.

use crate::error::ParseError;
use crate::text::GENERATED_COMMENTS;

/// One non-blank line with its comment removed, split into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLine<'a> {
    /// 1-based line number in the source text.
    pub number: usize,
    pub tokens: Vec<&'a str>,
}

impl<'a> DataLine<'a> {
    /// Returns the tokens if there are exactly `expected` of them.
    pub fn expect_tokens(&self, expected: usize, context: &'static str) -> Result<&[&'a str], ParseError> {
        if self.tokens.len() != expected {
            return Err(ParseError::TokenCount {
                line: self.number,
                context,
                expected,
                found: self.tokens.len(),
            });
        }
        Ok(&self.tokens)
    }

    /// Returns the only token on the line.
    pub fn single(&self, context: &'static str) -> Result<&'a str, ParseError> {
        let tokens = self.expect_tokens(1, context)?;
        Ok(tokens[0])
    }
}

/// Iterator over the data lines of a text model.
///
/// Anything from the first `#` to the end of a line is dropped; lines that
/// are then blank are skipped. Tokens are separated by spaces or tabs.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
        }
    }

    /// Returns the next data line, or a truncation error naming what was
    /// expected.
    pub fn next_line(&mut self, context: &'static str) -> Result<DataLine<'a>, ParseError> {
        self.next().ok_or(ParseError::UnexpectedEnd { context })
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = DataLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.inner.by_ref() {
            let data = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            let tokens: Vec<&str> = data.split_whitespace().collect();
            if !tokens.is_empty() {
                return Some(DataLine {
                    number: index + 1,
                    tokens,
                });
            }
        }
        None
    }
}

/// Collects the comment-only lines before the first data line.
///
/// Each line loses its `#` and one following space. Banner and legend lines
/// written by [`write_text`](crate::text::write_text) are skipped, as are
/// blank lines.
pub fn leading_comment(text: &str) -> String {
    let mut comment = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        let Some(rest) = trimmed.strip_prefix('#') else {
            break;
        };
        let content = rest.strip_prefix(' ').unwrap_or(rest);
        if GENERATED_COMMENTS.iter().any(|g| g.trim() == content.trim()) {
            continue;
        }
        comment.push(content);
    }
    comment.join("\n")
}
