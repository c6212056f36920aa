use crate::error::Result;
use crate::out::Out;
use crate::reader::{parse_all, Reader};
use crate::util::compare_lowercase_ascii;

use super::{header_impls, syntax};

/// One `connection-option`: a token such as `close` or `keep-alive`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionOption(String);

impl ConnectionOption {
    pub fn new(s: impl Into<String>) -> Self {
        ConnectionOption(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token comparison is case-insensitive.
    pub fn is(&self, lowercased: &str) -> bool {
        compare_lowercase_ascii(&self.0, lowercased)
    }
}

/// `Connection` header value (RFC 7230 section 6.1): `1#connection-option`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection(Vec<ConnectionOption>);

impl Connection {
    pub fn new(options: impl IntoIterator<Item = ConnectionOption>) -> Self {
        Connection(options.into_iter().collect())
    }

    pub fn options(&self) -> &[ConnectionOption] {
        &self.0
    }

    pub fn has_close(&self) -> bool {
        self.0.iter().any(|o| o.is("close"))
    }

    pub fn has_keep_alive(&self) -> bool {
        self.0.iter().any(|o| o.is("keep-alive"))
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        let options = syntax::comma_list1(r, |r| syntax::token(r).map(ConnectionOption))?;
        Ok(Connection(options))
    }

    fn write_to(&self, out: &mut Out) {
        syntax::write_comma_list(out, &self.0, |out, o: &ConnectionOption| {
            out.push_str(&o.0)
        });
    }
}

header_impls!(Connection);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_option() {
        let v = Connection::parse_str("close").unwrap();
        assert!(v.has_close());
        assert!(!v.has_keep_alive());
        assert_eq!(v.to_string(), "close");
    }

    #[test]
    fn list_with_whitespace() {
        let v = Connection::parse_str("keep-alive , upgrade").unwrap();
        assert_eq!(v.options().len(), 2);
        assert!(v.has_keep_alive());
        // canonical emission
        assert_eq!(v.to_string(), "keep-alive, upgrade");
    }

    #[test]
    fn case_insensitive_options() {
        let v = Connection::parse_str("Close").unwrap();
        assert!(v.has_close());
        // no case folding on emission
        assert_eq!(v.to_string(), "Close");
    }

    #[test]
    fn rejects_non_tokens() {
        assert!(Connection::parse_str("").is_err());
        assert!(Connection::parse_str("a b").is_err());
    }
}
