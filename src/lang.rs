//! Language tags and ranges, RFC 5646 and RFC 4647.
//!
//! Only the well-formed core of RFC 5646 is covered: primary subtag with
//! optional extlang, script, region and variants. Grandfathered and
//! private-use tags are not supported.
//!
//! Subtag boundaries need a negative look-ahead on the following byte so
//! that a short alpha run does not leak into the next subtag: `hy-Latn`
//! is a primary subtag plus script, not a primary subtag plus a
//! three-letter extension that strands the `n`.

use std::fmt;
use std::str::FromStr;

use crate::chars::{is_alpha, is_alphanum, is_digit};
use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::reader::{parse_all, Reader};

/// Primary language subtag with optional extended language subtags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    primary: String,
    extensions: Option<Vec<String>>,
}

impl Language {
    pub fn new(primary: impl Into<String>, extensions: Option<Vec<String>>) -> Self {
        Language {
            primary: primary.into(),
            extensions,
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn extensions(&self) -> Option<&[String]> {
        self.extensions.as_deref()
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        // shortest primary first: 2-3 ALPHA with up to three extensions
        if let Ok(v) = r.attempt(|r| {
            let primary = alphas(r, 2, 3)?;
            let mut extensions = Vec::new();
            for _ in 0..3 {
                match r.attempt(|r| {
                    r.expect(b'-', "'-'")?;
                    alphas(r, 3, 3)
                }) {
                    Ok(e) => extensions.push(e),
                    Err(_) => break,
                }
            }
            Ok(Language {
                primary,
                extensions: if extensions.is_empty() {
                    None
                } else {
                    Some(extensions)
                },
            })
        }) {
            return Ok(v);
        }

        if let Ok(primary) = r.attempt(|r| alphas(r, 4, 4)) {
            return Ok(Language {
                primary,
                extensions: None,
            });
        }

        let primary = r.attempt(|r| alphas(r, 5, 8)).map_err(|_| r.err("language"))?;
        Ok(Language {
            primary,
            extensions: None,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        out.push_str(&self.primary);
        if let Some(exts) = &self.extensions {
            for e in exts {
                out.push('-');
                out.push_str(e);
            }
        }
    }
}

/// Script subtag: exactly four letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Script(String);

impl Script {
    pub fn new(s: impl Into<String>) -> Self {
        Script(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        r.expect(b'-', "'-'")?;
        Ok(Script(alphas(r, 4, 4)?))
    }
}

/// Region subtag: two letters or three digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    pub fn new(s: impl Into<String>) -> Self {
        Region(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        r.expect(b'-', "'-'")?;
        if let Ok(s) = r.attempt(|r| alphas(r, 2, 2)) {
            return Ok(Region(s));
        }
        Ok(Region(subtag(r, is_digit, 3, 3, "region")?))
    }
}

/// Variant subtags, possibly none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Variant(pub Vec<String>);

impl Variant {
    fn parse(r: &mut Reader) -> Result<Self> {
        let subtags = r.many(|r| {
            r.expect(b'-', "'-'")?;
            // 5-8 alphanumerics, or a digit followed by three more
            if let Ok(s) = r.attempt(|r| subtag(r, is_alphanum, 5, 8, "variant")) {
                return Ok(s);
            }
            r.attempt(|r| {
                let first = match r.peek() {
                    Some(b) if is_digit(b) => b,
                    _ => return Err(r.err("variant")),
                };
                r.bump();
                let rest = subtag(r, is_alphanum, 3, 3, "variant")?;
                let mut s = String::with_capacity(4);
                s.push(first as char);
                s.push_str(&rest);
                Ok(s)
            })
        });
        Ok(Variant(subtags))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        for v in &self.0 {
            out.push('-');
            out.push_str(v);
        }
    }
}

/// Language tag (RFC 5646 section 2.1).
///
/// ```text
/// langtag = language ["-" script] ["-" region] *("-" variant)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    language: Language,
    script: Option<Script>,
    region: Option<Region>,
    variant: Variant,
}

impl LanguageTag {
    pub fn new(
        language: Language,
        script: Option<Script>,
        region: Option<Region>,
        variant: Variant,
    ) -> Self {
        LanguageTag {
            language,
            script,
            region,
            variant,
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let language = Language::parse(r)?;
        let script = r.opt(Script::parse);
        let region = r.opt(Region::parse);
        let variant = Variant::parse(r)?;
        Ok(LanguageTag {
            language,
            script,
            region,
            variant,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        self.language.write_to(out);
        if let Some(script) = &self.script {
            out.push('-');
            out.push_str(&script.0);
        }
        if let Some(region) = &self.region {
            out.push('-');
            out.push_str(&region.0);
        }
        self.variant.write_to(out);
    }
}

/// Language range (RFC 4647 section 2.1): a basic range or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageRange {
    Range(Vec<String>),
    Any,
}

impl LanguageRange {
    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        if r.eat(b'*') {
            return Ok(LanguageRange::Any);
        }

        let first = subtag(r, is_alpha, 1, 8, "language range")?;
        let mut subtags = vec![first];
        loop {
            match r.attempt(|r| {
                r.expect(b'-', "'-'")?;
                subtag(r, is_alphanum, 1, 8, "language range")
            }) {
                Ok(s) => subtags.push(s),
                Err(_) => break,
            }
        }
        Ok(LanguageRange::Range(subtags))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        match self {
            LanguageRange::Any => out.push('*'),
            LanguageRange::Range(subtags) => {
                let mut first = true;
                for s in subtags {
                    if !first {
                        out.push('-');
                    }
                    first = false;
                    out.push_str(s);
                }
            }
        }
    }
}

/// A bounded alpha run that must not continue into another letter.
fn alphas(r: &mut Reader, min: usize, max: usize) -> Result<String> {
    subtag(r, is_alpha, min, max, "alpha subtag")
}

/// A bounded run of `pred` bytes with the trailing negative look-ahead on
/// alphanumeric continuation.
fn subtag(
    r: &mut Reader,
    pred: impl Fn(u8) -> bool,
    min: usize,
    max: usize,
    what: &str,
) -> Result<String> {
    r.attempt(|r| {
        let s = r.take_min_max(&pred, min, max, what)?;
        if !r.not_followed_by(is_alphanum) {
            return Err(r.err(what));
        }
        Ok(s.to_owned())
    })
}

macro_rules! lang_traits {
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

lang_traits!(Language);
lang_traits!(LanguageTag);
lang_traits!(LanguageRange);
