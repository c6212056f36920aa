//! Typed parsers and formatters for the textual grammars of HTTP and its
//! companion RFCs.
//!
//! Every grammar element gets a typed representation plus a round-trip
//! pair: `parse_str` (also wired up as [`FromStr`][std::str::FromStr])
//! turns text into a value, `Display` emits the canonical text. Parsed
//! values survive the round trip unchanged.
//!
//! - [`uri`]: URI, relative references and their components (RFC 3986)
//! - [`lang`]: language tags and ranges (RFC 5646 / RFC 4647)
//! - [`template`]: URI Templates with expansion and matching (RFC 6570)
//! - [`headers`]: typed header values built on the layers above
//!   (RFC 7230-7234)
//!
//! The crate never opens a socket or normalizes semantically: hosts keep
//! their case, dot segments stay put. Percent-encoded text is stored
//! decoded and re-encoded with uppercase hex on emission.

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::uninlined_format_args)]

#[macro_use]
extern crate log;

// Re-export the header-map basis the typed header values convert to.
pub use http;

mod error;
pub use error::ParseError;

mod chars;
mod out;
mod pct;
mod reader;
mod util;

pub mod headers;
pub mod lang;
pub mod template;
pub mod uri;
