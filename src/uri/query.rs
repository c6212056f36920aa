use std::fmt;
use std::str::FromStr;

use crate::chars::is_query;
use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::pct;
use crate::reader::{parse_all, Reader};

/// Query component including its `?` marker on the wire. Stored decoded,
/// without the marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    pub fn new(s: impl Into<String>) -> Self {
        Query(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        r.expect(b'?', "'?'")?;
        Ok(Query(pct::decode_while(r, is_query)?))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        out.push('?');
        pct::encode_to(out, &self.0, is_query);
    }
}

/// Fragment component including its `#` marker on the wire. Stored
/// decoded, without the marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(s: impl Into<String>) -> Self {
        Fragment(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        r.expect(b'#', "'#'")?;
        Ok(Fragment(pct::decode_while(r, is_query)?))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        out.push('#');
        pct::encode_to(out, &self.0, is_query);
    }
}

macro_rules! component_traits {
    ($t:ident) => {
        impl FromStr for $t {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&format_with(|out| self.write_to(out)))
            }
        }
    };
}

component_traits!(Query);
component_traits!(Fragment);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn query_consumes_marker() {
        let v = Query::parse_str("?k=v").unwrap();
        assert_eq!(v.as_str(), "k=v");
        assert_eq!(v.to_string(), "?k=v");
    }

    #[test]
    fn query_may_be_empty() {
        let v = Query::parse_str("?").unwrap();
        assert_eq!(v.as_str(), "");
        assert_eq!(v.to_string(), "?");
    }

    #[test]
    fn query_stops_at_hash() {
        assert!(Query::parse_str("?a#b").is_err());
    }

    #[test]
    fn fragment_round_trip() {
        let v = Fragment::parse_str("#a%20b").unwrap();
        assert_eq!(v.as_str(), "a b");
        assert_eq!(v.to_string(), "#a%20b");
    }
}
