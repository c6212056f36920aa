use std::fmt;
use std::str::FromStr;

use crate::chars::{is_alpha, is_scheme};
use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::reader::{parse_all, Reader};

/// URI scheme (RFC 3986 section 3.1).
///
/// ```text
/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scheme(String);

impl Scheme {
    /// Creates a scheme without validating. Parsed values always satisfy
    /// the grammar; hand-built ones are the caller's responsibility.
    pub fn new(s: impl Into<String>) -> Self {
        Scheme(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let first = match r.peek() {
            Some(b) if is_alpha(b) => b,
            _ => return Err(r.err("scheme")),
        };
        r.bump();
        let rest = r.take_while(is_scheme);
        let mut s = String::with_capacity(1 + rest.len());
        s.push(first as char);
        s.push_str(rest);
        Ok(Scheme(s))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        out.push_str(&self.0);
    }
}

impl FromStr for Scheme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_with(|out| self.write_to(out)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_simple() {
        assert_eq!(Scheme::parse_str("http").unwrap(), Scheme::new("http"));
        assert_eq!(Scheme::parse_str("svn+ssh").unwrap(), Scheme::new("svn+ssh"));
    }

    #[test]
    fn first_byte_must_be_alpha() {
        assert!(Scheme::parse_str("1http").is_err());
        assert!(Scheme::parse_str("+x").is_err());
        assert!(Scheme::parse_str("").is_err());
    }

    #[test]
    fn rejects_stray_bytes() {
        let err = Scheme::parse_str("ht tp").unwrap_err();
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn round_trip() {
        let v = Scheme::parse_str("a2-z.x").unwrap();
        assert_eq!(Scheme::parse_str(&v.to_string()).unwrap(), v);
    }
}
