use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::chars::{is_digit, is_regname, is_userinfo};
use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::pct;
use crate::reader::{parse_all, Reader};

/// User information ahead of the `@` in an authority. Stored decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserInfo(String);

impl UserInfo {
    pub fn new(s: impl Into<String>) -> Self {
        UserInfo(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        pct::encode_to(out, &self.0, is_userinfo);
    }
}

/// Registered host name as distinct from a literal IP address. Stored
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegName(String);

impl RegName {
    pub fn new(s: impl Into<String>) -> Self {
        RegName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        pct::encode_to(out, &self.0, is_regname);
    }
}

/// Host part of an authority (RFC 3986 section 3.2.2).
///
/// The three alternatives are tried in order: an IP literal in square
/// brackets, a dotted IPv4 address, then a registered name. The address
/// forms are only produced when the text actually parses as an address of
/// that family, so `1.2.3.4.5` comes out as a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Name(RegName),
}

impl Host {
    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        if r.peek() == Some(b'[') {
            return Self::parse_ip_literal(r);
        }

        if let Ok(v4) = r.attempt(Self::parse_ipv4) {
            return Ok(Host::Ipv4(v4));
        }

        let name = pct::decode_while1(r, is_regname, "host")?;
        Ok(Host::Name(RegName(name)))
    }

    fn parse_ip_literal(r: &mut Reader) -> Result<Self> {
        let start = r.pos();
        r.expect(b'[', "'['")?;
        let inner = r.take_while(|b| b != b']');
        r.expect(b']', "']'")?;

        let addr = Ipv6Addr::from_str(inner)
            .map_err(|_| ParseError::new("not a valid ipv6 address", start))?;

        Ok(Host::Ipv6(addr))
    }

    fn parse_ipv4(r: &mut Reader) -> Result<Ipv4Addr> {
        let start = r.pos();
        let run = r.take_while(|b| is_digit(b) || b == b'.');
        if run.is_empty() {
            return Err(r.err("ipv4 address"));
        }

        // A dotted-digit run continuing into further host bytes is a
        // name such as "1.2.3.4a", not an address.
        if !r.not_followed_by(|b| is_regname(b) || b == b'%') {
            return Err(r.err("ipv4 address"));
        }

        Ipv4Addr::from_str(run).map_err(|_| ParseError::new("not a valid ipv4 address", start))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        use std::fmt::Write;
        match self {
            Host::Ipv4(v4) => {
                let _ = write!(out, "{}", v4);
            }
            Host::Ipv6(v6) => {
                let _ = write!(out, "[{}]", v6);
            }
            Host::Name(name) => name.write_to(out),
        }
    }
}

impl FromStr for Host {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_with(|out| self.write_to(out)))
    }
}

/// Port number. RFC 3986 puts no bound on the digits; values are required
/// to fit an unsigned 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port(pub u32);

impl Port {
    pub fn value(&self) -> u32 {
        self.0
    }

    /// `[":" port]`. An empty run of digits after the colon is the
    /// grammar's empty port, treated as no port at all.
    pub(crate) fn parse_opt(r: &mut Reader) -> Result<Option<Self>> {
        if !r.eat(b':') {
            return Ok(None);
        }
        let start = r.pos();
        let digits = r.take_while(is_digit);
        if digits.is_empty() {
            return Ok(None);
        }
        let n = digits
            .parse::<u32>()
            .map_err(|_| ParseError::new("port out of range", start))?;
        Ok(Some(Port(n)))
    }
}

/// Authority component (RFC 3986 section 3.2).
///
/// Stored as (host, port, userinfo); the textual order on emission is
/// userinfo-host-port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    host: Host,
    port: Option<Port>,
    user_info: Option<UserInfo>,
}

impl Authority {
    pub fn new(host: Host, port: Option<Port>, user_info: Option<UserInfo>) -> Self {
        Authority {
            host,
            port,
            user_info,
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn port(&self) -> Option<Port> {
        self.port
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        // The '@' is the disambiguator: without it the run is host bytes.
        let user_info = r.opt(|r| {
            let ui = pct::decode_while1(r, is_userinfo, "userinfo")?;
            r.expect(b'@', "'@'")?;
            Ok(UserInfo(ui))
        });

        let host = Host::parse(r)?;
        let port = Port::parse_opt(r)?;

        Ok(Authority {
            host,
            port,
            user_info,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        use std::fmt::Write;
        if let Some(ui) = &self.user_info {
            ui.write_to(out);
            out.push('@');
        }
        self.host.write_to(out);
        if let Some(port) = self.port {
            let _ = write!(out, ":{}", port.0);
        }
    }
}

impl FromStr for Authority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_with(|out| self.write_to(out)))
    }
}
