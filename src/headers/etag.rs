use crate::chars::is_etagc;
use crate::error::{ParseError, Result};
use crate::out::Out;
use crate::reader::{parse_all, Reader};

use super::header_impls;

/// `entity-tag` (RFC 7232 section 2.3), the value of the `ETag` header.
///
/// ```text
/// entity-tag = [ weak ] opaque-tag
/// weak       = %x57.2F ; "W/"
/// opaque-tag = DQUOTE *etagc DQUOTE
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    weak: bool,
    opaque: String,
}

impl EntityTag {
    pub fn new(weak: bool, opaque: impl Into<String>) -> Self {
        EntityTag {
            weak,
            opaque: opaque.into(),
        }
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// The opaque tag without its quotes.
    pub fn opaque(&self) -> &str {
        &self.opaque
    }

    /// Strong comparison: both tags strong, octets equal.
    pub fn strong_eq(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.opaque == other.opaque
    }

    /// Weak comparison: octets equal, weakness ignored.
    pub fn weak_eq(&self, other: &EntityTag) -> bool {
        self.opaque == other.opaque
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        let weak = r.attempt(|r| {
            r.expect(b'W', "'W/'")?;
            r.expect(b'/', "'W/'")?;
            Ok(())
        });

        let start = r.pos();
        r.expect(b'"', "'\"'")?;
        let mut bytes = Vec::new();
        loop {
            match r.peek() {
                Some(b'"') => {
                    r.bump();
                    break;
                }
                Some(b) if is_etagc(b) => {
                    r.bump();
                    bytes.push(b);
                }
                _ => return Err(r.err("'\"'")),
            }
        }

        let opaque = String::from_utf8(bytes)
            .map_err(|_| ParseError::new("entity-tag is not valid utf-8", start))?;

        Ok(EntityTag {
            weak: weak.is_ok(),
            opaque,
        })
    }

    fn write_to(&self, out: &mut Out) {
        if self.weak {
            out.push_str("W/");
        }
        out.push('"');
        out.push_str(&self.opaque);
        out.push('"');
    }
}

header_impls!(EntityTag);
