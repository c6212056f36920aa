use crate::chars::is_digit;
use crate::error::{ParseError, Result};
use crate::out::Out;
use crate::reader::{parse_all, Reader};
use crate::util::compare_lowercase_ascii;

use super::{header_impls, syntax};

/// One `cache-directive` (RFC 7234 section 5.2).
///
/// The directives the RFC registers are typed; everything else, including
/// the field-name-list forms of `no-cache` and `private`, lands in
/// `Extension` with its argument preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheDirective {
    MaxAge(u32),
    MaxStale(Option<u32>),
    MinFresh(u32),
    SMaxAge(u32),
    NoCache,
    NoStore,
    NoTransform,
    OnlyIfCached,
    MustRevalidate,
    ProxyRevalidate,
    Public,
    Private,
    Extension(String, Option<String>),
}

impl CacheDirective {
    fn parse(r: &mut Reader) -> Result<Self> {
        let start = r.pos();
        let name = syntax::token(r)?;

        let argument = if r.eat(b'=') {
            if r.peek() == Some(b'"') {
                Some(syntax::quoted_string(r)?)
            } else {
                Some(syntax::token(r)?)
            }
        } else {
            None
        };

        Self::from_parts(name, argument, start)
    }

    fn from_parts(name: String, argument: Option<String>, offset: usize) -> Result<Self> {
        use CacheDirective::*;

        let bare = |d: CacheDirective| {
            if argument.is_none() {
                Ok(d)
            } else {
                Err(ParseError::new("directive takes no argument", offset))
            }
        };

        if compare_lowercase_ascii(&name, "max-age") {
            return Ok(MaxAge(delta_seconds(&argument, offset)?));
        }
        if compare_lowercase_ascii(&name, "s-maxage") {
            return Ok(SMaxAge(delta_seconds(&argument, offset)?));
        }
        if compare_lowercase_ascii(&name, "min-fresh") {
            return Ok(MinFresh(delta_seconds(&argument, offset)?));
        }
        if compare_lowercase_ascii(&name, "max-stale") {
            return match &argument {
                None => Ok(MaxStale(None)),
                Some(_) => Ok(MaxStale(Some(delta_seconds(&argument, offset)?))),
            };
        }
        if compare_lowercase_ascii(&name, "no-store") {
            return bare(NoStore);
        }
        if compare_lowercase_ascii(&name, "no-transform") {
            return bare(NoTransform);
        }
        if compare_lowercase_ascii(&name, "only-if-cached") {
            return bare(OnlyIfCached);
        }
        if compare_lowercase_ascii(&name, "must-revalidate") {
            return bare(MustRevalidate);
        }
        if compare_lowercase_ascii(&name, "proxy-revalidate") {
            return bare(ProxyRevalidate);
        }
        if compare_lowercase_ascii(&name, "public") {
            return bare(Public);
        }
        // no-cache and private take an optional field-name list; the bare
        // form is typed, the argument form stays an extension
        if compare_lowercase_ascii(&name, "no-cache") && argument.is_none() {
            return Ok(NoCache);
        }
        if compare_lowercase_ascii(&name, "private") && argument.is_none() {
            return Ok(Private);
        }

        Ok(Extension(name, argument))
    }

    fn write_to(&self, out: &mut Out) {
        use std::fmt::Write;
        use CacheDirective::*;

        match self {
            MaxAge(n) => {
                let _ = write!(out, "max-age={}", n);
            }
            MaxStale(None) => out.push_str("max-stale"),
            MaxStale(Some(n)) => {
                let _ = write!(out, "max-stale={}", n);
            }
            MinFresh(n) => {
                let _ = write!(out, "min-fresh={}", n);
            }
            SMaxAge(n) => {
                let _ = write!(out, "s-maxage={}", n);
            }
            NoCache => out.push_str("no-cache"),
            NoStore => out.push_str("no-store"),
            NoTransform => out.push_str("no-transform"),
            OnlyIfCached => out.push_str("only-if-cached"),
            MustRevalidate => out.push_str("must-revalidate"),
            ProxyRevalidate => out.push_str("proxy-revalidate"),
            Public => out.push_str("public"),
            Private => out.push_str("private"),
            Extension(name, arg) => {
                out.push_str(name);
                if let Some(arg) = arg {
                    out.push('=');
                    syntax::write_token_or_quoted(out, arg);
                }
            }
        }
    }
}

/// `delta-seconds = 1*DIGIT`, capped at `u32` like the RFC suggests for
/// values a cache cannot represent.
fn delta_seconds(argument: &Option<String>, offset: usize) -> Result<u32> {
    let arg = argument
        .as_deref()
        .ok_or_else(|| ParseError::new("directive requires an argument", offset))?;

    if arg.is_empty() || !arg.bytes().all(is_digit) {
        return Err(ParseError::new("delta-seconds must be digits", offset));
    }
    Ok(arg.parse::<u32>().unwrap_or(u32::MAX))
}

/// `Cache-Control` header value (RFC 7234 section 5.2):
/// `1#cache-directive`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheControl(Vec<CacheDirective>);

impl CacheControl {
    pub fn new(directives: impl IntoIterator<Item = CacheDirective>) -> Self {
        CacheControl(directives.into_iter().collect())
    }

    pub fn directives(&self) -> &[CacheDirective] {
        &self.0
    }

    pub fn max_age(&self) -> Option<u32> {
        self.0.iter().find_map(|d| match d {
            CacheDirective::MaxAge(n) => Some(*n),
            _ => None,
        })
    }

    pub fn has(&self, directive: &CacheDirective) -> bool {
        self.0.contains(directive)
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, |r| {
            syntax::comma_list1(r, CacheDirective::parse).map(CacheControl)
        })
    }

    fn write_to(&self, out: &mut Out) {
        syntax::write_comma_list(out, &self.0, |out, d: &CacheDirective| d.write_to(out));
    }
}

header_impls!(CacheControl);

#[cfg(test)]
mod test {
    use super::*;
    use CacheDirective::*;

    #[test]
    fn common_directives() {
        let v = CacheControl::parse_str("max-age=3600, must-revalidate").unwrap();
        assert_eq!(v.directives(), &[MaxAge(3600), MustRevalidate]);
        assert_eq!(v.max_age(), Some(3600));
        assert_eq!(v.to_string(), "max-age=3600, must-revalidate");
    }

    #[test]
    fn names_are_case_insensitive() {
        let v = CacheControl::parse_str("No-Cache, Private").unwrap();
        assert_eq!(v.directives(), &[NoCache, Private]);
        // canonical lowercase emission
        assert_eq!(v.to_string(), "no-cache, private");
    }

    #[test]
    fn max_stale_argument_is_optional() {
        let v = CacheControl::parse_str("max-stale").unwrap();
        assert_eq!(v.directives(), &[MaxStale(None)]);

        let v = CacheControl::parse_str("max-stale=60").unwrap();
        assert_eq!(v.directives(), &[MaxStale(Some(60))]);
    }

    #[test]
    fn quoted_argument_forms() {
        let v = CacheControl::parse_str("no-cache=\"set-cookie\", public").unwrap();
        assert_eq!(
            v.directives()[0],
            Extension("no-cache".into(), Some("set-cookie".into()))
        );
        assert_eq!(v.to_string(), "no-cache=set-cookie, public");
    }

    #[test]
    fn quoted_emission_when_not_a_token() {
        let v = CacheControl::new([Extension("x".into(), Some("a, b".into()))]);
        assert_eq!(v.to_string(), "x=\"a, b\"");
        assert_eq!(CacheControl::parse_str(&v.to_string()).unwrap(), v);
    }

    #[test]
    fn rejects_malformed() {
        assert!(CacheControl::parse_str("").is_err());
        assert!(CacheControl::parse_str("max-age=abc").is_err());
        assert!(CacheControl::parse_str("max-age").is_err());
        assert!(CacheControl::parse_str("public=1").is_err());
    }

    #[test]
    fn header_value_conversions() {
        let hv = http::HeaderValue::from_static("max-age=60, no-store");
        let v = CacheControl::parse_header_value(&hv).unwrap();
        assert_eq!(v.to_header_value(), hv);
    }
}
