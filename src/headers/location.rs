use crate::error::Result;
use crate::out::Out;
use crate::uri::UriReference;

use super::header_impls;

/// `Location` header value (RFC 7231 section 7.1.2): a URI reference,
/// possibly relative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(pub UriReference);

impl Location {
    pub fn uri_reference(&self) -> &UriReference {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        UriReference::parse_str(s).map(Location)
    }

    fn write_to(&self, out: &mut Out) {
        self.0.write_to(out);
    }
}

header_impls!(Location);

/// `Referer` header value (RFC 7231 section 5.5.2).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Referer(pub UriReference);

impl Referer {
    pub fn uri_reference(&self) -> &UriReference {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        UriReference::parse_str(s).map(Referer)
    }

    fn write_to(&self, out: &mut Out) {
        self.0.write_to(out);
    }
}

header_impls!(Referer);
