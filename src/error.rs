use std::fmt;

use thiserror::Error;

/// Error type for httpgram.
///
/// Every parser in this crate fails with this single error. Formatters are
/// total and never fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    message: String,
    offset: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            message: message.into(),
            offset,
        }
    }

    /// What went wrong, without the offset.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset into the original input where the parse failed.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

pub(crate) type Result<T> = std::result::Result<T, ParseError>;

/// Expected-something helper used all over the grammar rules.
pub(crate) fn expected(what: impl fmt::Display, offset: usize) -> ParseError {
    ParseError::new(format!("expected {}", what), offset)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_includes_offset() {
        let e = expected("scheme", 3);
        assert_eq!(e.to_string(), "expected scheme at offset 3");
        assert_eq!(e.message(), "expected scheme");
        assert_eq!(e.offset(), 3);
    }
}
