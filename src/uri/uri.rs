use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::reader::{parse_all, Reader};

use super::{
    Authority, Fragment, PathAbsolute, PathAbsoluteOrEmpty, PathNoScheme, PathRootless, Query,
    Scheme,
};

/// `hier-part` (RFC 3986 section 3): what sits between `scheme:` and any
/// query or fragment.
///
/// The alternatives are tried in order; the empty variant matches last
/// and always.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HierarchyPart {
    Authority {
        authority: Authority,
        path: PathAbsoluteOrEmpty,
    },
    Absolute(PathAbsolute),
    Rootless(PathRootless),
    Empty,
}

impl HierarchyPart {
    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        if let Ok(v) = r.attempt(|r| {
            r.expect(b'/', "'//'")?;
            r.expect(b'/', "'//'")?;
            let authority = Authority::parse(r)?;
            let path = PathAbsoluteOrEmpty::parse(r)?;
            Ok(HierarchyPart::Authority { authority, path })
        }) {
            return Ok(v);
        }

        if let Ok(path) = r.attempt(PathAbsolute::parse) {
            return Ok(HierarchyPart::Absolute(path));
        }

        if let Ok(path) = r.attempt(PathRootless::parse) {
            return Ok(HierarchyPart::Rootless(path));
        }

        Ok(HierarchyPart::Empty)
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        match self {
            HierarchyPart::Authority { authority, path } => {
                out.push_str("//");
                authority.write_to(out);
                path.write_to(out);
            }
            HierarchyPart::Absolute(path) => path.write_to(out),
            HierarchyPart::Rootless(path) => path.write_to(out),
            HierarchyPart::Empty => {}
        }
    }
}

/// `relative-part`: like [`HierarchyPart`] but with the no-scheme path
/// production in place of the rootless one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelativePart {
    Authority {
        authority: Authority,
        path: PathAbsoluteOrEmpty,
    },
    Absolute(PathAbsolute),
    NoScheme(PathNoScheme),
    Empty,
}

impl RelativePart {
    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        if let Ok(v) = r.attempt(|r| {
            r.expect(b'/', "'//'")?;
            r.expect(b'/', "'//'")?;
            let authority = Authority::parse(r)?;
            let path = PathAbsoluteOrEmpty::parse(r)?;
            Ok(RelativePart::Authority { authority, path })
        }) {
            return Ok(v);
        }

        if let Ok(path) = r.attempt(PathAbsolute::parse) {
            return Ok(RelativePart::Absolute(path));
        }

        if let Ok(path) = r.attempt(PathNoScheme::parse) {
            return Ok(RelativePart::NoScheme(path));
        }

        Ok(RelativePart::Empty)
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        match self {
            RelativePart::Authority { authority, path } => {
                out.push_str("//");
                authority.write_to(out);
                path.write_to(out);
            }
            RelativePart::Absolute(path) => path.write_to(out),
            RelativePart::NoScheme(path) => path.write_to(out),
            RelativePart::Empty => {}
        }
    }
}

/// URI (RFC 3986 section 3).
///
/// ```text
/// URI = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Scheme,
    hierarchy_part: HierarchyPart,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl Uri {
    pub fn new(
        scheme: Scheme,
        hierarchy_part: HierarchyPart,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> Self {
        Uri {
            scheme,
            hierarchy_part,
            query,
            fragment,
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn hierarchy_part(&self) -> &HierarchyPart {
        &self.hierarchy_part
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let scheme = Scheme::parse(r)?;
        r.expect(b':', "':'")?;
        let hierarchy_part = HierarchyPart::parse(r)?;
        let query = r.opt(Query::parse);
        let fragment = r.opt(Fragment::parse);
        Ok(Uri {
            scheme,
            hierarchy_part,
            query,
            fragment,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        self.scheme.write_to(out);
        out.push(':');
        self.hierarchy_part.write_to(out);
        if let Some(q) = &self.query {
            q.write_to(out);
        }
        if let Some(f) = &self.fragment {
            f.write_to(out);
        }
    }
}

/// `absolute-URI`: a [`Uri`] with the fragment production removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsoluteUri {
    scheme: Scheme,
    hierarchy_part: HierarchyPart,
    query: Option<Query>,
}

impl AbsoluteUri {
    pub fn new(scheme: Scheme, hierarchy_part: HierarchyPart, query: Option<Query>) -> Self {
        AbsoluteUri {
            scheme,
            hierarchy_part,
            query,
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn hierarchy_part(&self) -> &HierarchyPart {
        &self.hierarchy_part
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let scheme = Scheme::parse(r)?;
        r.expect(b':', "':'")?;
        let hierarchy_part = HierarchyPart::parse(r)?;
        let query = r.opt(Query::parse);
        Ok(AbsoluteUri {
            scheme,
            hierarchy_part,
            query,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        self.scheme.write_to(out);
        out.push(':');
        self.hierarchy_part.write_to(out);
        if let Some(q) = &self.query {
            q.write_to(out);
        }
    }
}

impl From<AbsoluteUri> for Uri {
    fn from(v: AbsoluteUri) -> Self {
        Uri {
            scheme: v.scheme,
            hierarchy_part: v.hierarchy_part,
            query: v.query,
            fragment: None,
        }
    }
}

/// `relative-ref` (RFC 3986 section 4.2).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeReference {
    relative_part: RelativePart,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl RelativeReference {
    pub fn new(
        relative_part: RelativePart,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> Self {
        RelativeReference {
            relative_part,
            query,
            fragment,
        }
    }

    pub fn relative_part(&self) -> &RelativePart {
        &self.relative_part
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let relative_part = RelativePart::parse(r)?;
        let query = r.opt(Query::parse);
        let fragment = r.opt(Fragment::parse);
        Ok(RelativeReference {
            relative_part,
            query,
            fragment,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        self.relative_part.write_to(out);
        if let Some(q) = &self.query {
            q.write_to(out);
        }
        if let Some(f) = &self.fragment {
            f.write_to(out);
        }
    }
}

/// `URI-reference`: a full URI or a relative reference. The URI
/// alternative is attempted first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriReference {
    Uri(Uri),
    Relative(RelativeReference),
}

impl UriReference {
    pub fn parse_str(s: &str) -> Result<Self> {
        match Uri::parse_str(s) {
            Ok(uri) => {
                trace!("uri-reference parsed as uri: {:?}", uri.scheme());
                Ok(UriReference::Uri(uri))
            }
            Err(_) => {
                trace!("uri-reference falling back to relative-ref");
                RelativeReference::parse_str(s).map(UriReference::Relative)
            }
        }
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        match self {
            UriReference::Uri(uri) => uri.write_to(out),
            UriReference::Relative(rel) => rel.write_to(out),
        }
    }
}

macro_rules! uri_traits {
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

uri_traits!(Uri);
uri_traits!(AbsoluteUri);
uri_traits!(RelativeReference);
uri_traits!(UriReference);
