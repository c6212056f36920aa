//! Typed header values for RFC 7230-7234, built on the URI and language
//! grammars.
//!
//! Each type parses its exact ABNF and formats the canonical list form
//! (`", "`-separated where the field is list-valued). Conversions to and
//! from [`http::HeaderValue`] sit alongside `parse_str`/`Display` so the
//! types plug into an `http` header map directly.

use crate::error::{ParseError, Result};

mod syntax;
pub use syntax::Weight;

mod host;
pub use host::HostHeader;

mod location;
pub use location::{Location, Referer};

mod connection;
pub use connection::{Connection, ConnectionOption};

mod language;
pub use language::{AcceptLanguage, AcceptableLanguage, ContentLanguage};

mod etag;
pub use etag::EntityTag;

mod cache;
pub use cache::{CacheControl, CacheDirective};

pub(crate) fn header_str(value: &http::HeaderValue) -> Result<&str> {
    value
        .to_str()
        .map_err(|_| ParseError::new("header value is not visible ascii", 0))
}

/// Stamps the uniform surface onto a header value type: `FromStr` and
/// `Display` over the type's `parse_str`/`write_to` pair, plus the
/// `http::HeaderValue` conversions.
macro_rules! header_impls {
    ($t:ident) => {
        impl $t {
            pub fn parse_header_value(value: &http::HeaderValue) -> crate::error::Result<Self> {
                Self::parse_str(crate::headers::header_str(value)?)
            }

            pub fn to_header_value(&self) -> http::HeaderValue {
                http::HeaderValue::from_bytes(self.to_string().as_bytes())
                    .expect("formatted header value")
            }
        }

        impl std::str::FromStr for $t {
            type Err = crate::error::ParseError;

            fn from_str(s: &str) -> crate::error::Result<Self> {
                Self::parse_str(s)
            }
        }

        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&crate::out::format_with(|out| self.write_to(out)))
            }
        }
    };
}
pub(crate) use header_impls;
