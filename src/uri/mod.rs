//! URI grammar, RFC 3986.
//!
//! Parsing accepts exactly what the RFC grammar defines; formatting emits
//! the canonical form with uppercase percent-encoding. No semantic
//! normalization happens anywhere: hosts keep their case, dot segments
//! stay where they are.

mod scheme;
pub use scheme::Scheme;

mod authority;
pub use authority::{Authority, Host, Port, RegName, UserInfo};

mod path;
pub use path::{PathAbsolute, PathAbsoluteOrEmpty, PathNoScheme, PathRootless};

mod query;
pub use query::{Fragment, Query};

#[allow(clippy::module_inception)]
mod uri;
pub use uri::{AbsoluteUri, HierarchyPart, RelativePart, RelativeReference, Uri, UriReference};
