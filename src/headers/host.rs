use crate::error::Result;
use crate::out::Out;
use crate::reader::{parse_all, Reader};
use crate::uri::{Host, Port};

use super::header_impls;

/// `Host` header value (RFC 7230 section 5.4): `uri-host [":" port]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostHeader {
    host: Host,
    port: Option<Port>,
}

impl HostHeader {
    pub fn new(host: Host, port: Option<Port>) -> Self {
        HostHeader { host, port }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn port(&self) -> Option<Port> {
        self.port
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        let host = Host::parse(r)?;
        let port = Port::parse_opt(r)?;
        Ok(HostHeader { host, port })
    }

    fn write_to(&self, out: &mut Out) {
        use std::fmt::Write;
        self.host.write_to(out);
        if let Some(port) = self.port {
            let _ = write!(out, ":{}", port.value());
        }
    }
}

header_impls!(HostHeader);

#[cfg(test)]
mod test {
    use super::*;
    use crate::uri::RegName;
    use std::net::Ipv6Addr;

    #[test]
    fn name_and_port() {
        let v = HostHeader::parse_str("example.com:8080").unwrap();
        assert_eq!(v.host(), &Host::Name(RegName::new("example.com")));
        assert_eq!(v.port(), Some(Port(8080)));
        assert_eq!(v.to_string(), "example.com:8080");
    }

    #[test]
    fn bare_host() {
        let v = HostHeader::parse_str("example.com").unwrap();
        assert_eq!(v.port(), None);
        assert_eq!(v.to_string(), "example.com");
    }

    #[test]
    fn ipv6_host() {
        let v = HostHeader::parse_str("[::1]:443").unwrap();
        assert_eq!(v.host(), &Host::Ipv6(Ipv6Addr::LOCALHOST));
        assert_eq!(v.to_string(), "[::1]:443");
    }

    #[test]
    fn header_value_conversions() {
        let hv = http::HeaderValue::from_static("example.com:80");
        let v = HostHeader::parse_header_value(&hv).unwrap();
        assert_eq!(v.to_header_value(), hv);
    }
}
