//! The four path productions of RFC 3986 section 3.3.
//!
//! Each production is its own type so a value records which production
//! produced it. Segments are stored decoded.

use std::fmt;
use std::str::FromStr;

use crate::chars::{is_pchar, is_pchar_no_colon};
use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::pct;
use crate::reader::{parse_all, Reader};

fn segment(r: &mut Reader) -> Result<String> {
    pct::decode_while(r, is_pchar)
}

fn segment_nz(r: &mut Reader) -> Result<String> {
    pct::decode_while1(r, is_pchar, "segment")
}

fn segment_nz_nc(r: &mut Reader) -> Result<String> {
    pct::decode_while1(r, is_pchar_no_colon, "segment")
}

fn write_segment(out: &mut Out, seg: &str) {
    pct::encode_to(out, seg, is_pchar);
}

/// `path-abempty`: zero or more `/`-prefixed segments. Follows an
/// authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathAbsoluteOrEmpty(Vec<String>);

impl PathAbsoluteOrEmpty {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PathAbsoluteOrEmpty(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let mut segs = Vec::new();
        while r.eat(b'/') {
            segs.push(segment(r)?);
        }
        Ok(PathAbsoluteOrEmpty(segs))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        for seg in &self.0 {
            out.push('/');
            write_segment(out, seg);
        }
    }
}

/// `path-absolute`: begins with `/`; a non-empty first segment unless the
/// path is just `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathAbsolute(Vec<String>);

impl PathAbsolute {
    /// Creates a path without validating.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PathAbsolute(segments.into_iter().map(Into::into).collect())
    }

    /// Creates a path, rejecting an empty first segment. A leading empty
    /// segment would format as `//...`, which reads back as an authority.
    pub fn try_new(segments: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        let segs: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segs.first().map(String::is_empty) == Some(true) {
            return Err(ParseError::new(
                "path-absolute cannot start with an empty segment",
                0,
            ));
        }
        Ok(PathAbsolute(segs))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        r.expect(b'/', "'/'")?;
        let mut segs = Vec::new();
        if let Ok(first) = r.attempt(segment_nz) {
            segs.push(first);
            while r.eat(b'/') {
                segs.push(segment(r)?);
            }
        }
        Ok(PathAbsolute(segs))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        out.push('/');
        let mut first = true;
        for seg in &self.0 {
            if !first {
                out.push('/');
            }
            first = false;
            write_segment(out, seg);
        }
    }
}

/// `path-noscheme`: a rootless path whose first segment contains no
/// colon, so it cannot be mistaken for a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathNoScheme(Vec<String>);

impl PathNoScheme {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PathNoScheme(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let mut segs = vec![segment_nz_nc(r)?];
        while r.eat(b'/') {
            segs.push(segment(r)?);
        }
        Ok(PathNoScheme(segs))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        let mut iter = self.0.iter();
        if let Some(first) = iter.next() {
            pct::encode_to(out, first, is_pchar_no_colon);
        }
        for seg in iter {
            out.push('/');
            write_segment(out, seg);
        }
    }
}

/// `path-rootless`: like an absolute path without the leading `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathRootless(Vec<String>);

impl PathRootless {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PathRootless(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let mut segs = vec![segment_nz(r)?];
        while r.eat(b'/') {
            segs.push(segment(r)?);
        }
        Ok(PathRootless(segs))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        let mut first = true;
        for seg in &self.0 {
            if !first {
                out.push('/');
            }
            first = false;
            write_segment(out, seg);
        }
    }
}

macro_rules! path_traits {
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

path_traits!(PathAbsoluteOrEmpty);
path_traits!(PathAbsolute);
path_traits!(PathNoScheme);
path_traits!(PathRootless);
