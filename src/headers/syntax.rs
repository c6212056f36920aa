//! The small shared syntax of RFC 7230 section 3.2.6: tokens, quoted
//! strings, optional whitespace and comma-separated lists, plus the
//! q-weight of RFC 7231 section 5.3.1.

use crate::chars::{is_digit, is_ows, is_qdtext, is_quotable, is_tchar};
use crate::error::{ParseError, Result};
use crate::out::Out;
use crate::reader::Reader;

pub(crate) fn token(r: &mut Reader) -> Result<String> {
    let s = r.take_while(is_tchar);
    if s.is_empty() {
        return Err(r.err("token"));
    }
    Ok(s.to_owned())
}

/// `quoted-string`, returned with quotes and escapes removed.
pub(crate) fn quoted_string(r: &mut Reader) -> Result<String> {
    let start = r.pos();
    r.expect(b'"', "'\"'")?;

    let mut bytes = Vec::new();
    loop {
        match r.peek() {
            Some(b'"') => {
                r.bump();
                break;
            }
            Some(b'\\') => {
                r.bump();
                match r.peek() {
                    Some(b) if is_quotable(b) => {
                        r.bump();
                        bytes.push(b);
                    }
                    _ => return Err(r.err("quoted-pair")),
                }
            }
            Some(b) if is_qdtext(b) => {
                r.bump();
                bytes.push(b);
            }
            _ => return Err(r.err("'\"'")),
        }
    }

    String::from_utf8(bytes).map_err(|_| ParseError::new("quoted-string is not valid utf-8", start))
}

/// Emits a token verbatim when possible, a quoted string otherwise.
pub(crate) fn write_token_or_quoted(out: &mut Out, s: &str) {
    if !s.is_empty() && s.bytes().all(is_tchar) {
        out.push_str(s);
    } else {
        write_quoted(out, s);
    }
}

pub(crate) fn write_quoted(out: &mut Out, s: &str) {
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

pub(crate) fn ows(r: &mut Reader) {
    r.take_while(is_ows);
}

/// `1#element`: a comma-separated list with optional whitespace. Empty
/// elements are parsed and ignored, as RFC 7230 section 7 instructs.
pub(crate) fn comma_list1<T>(
    r: &mut Reader,
    mut f: impl FnMut(&mut Reader) -> Result<T>,
) -> Result<Vec<T>> {
    let mut out = Vec::new();
    loop {
        ows(r);
        if let Ok(v) = r.attempt(&mut f) {
            out.push(v);
        }
        ows(r);
        if !r.eat(b',') {
            break;
        }
    }
    if out.is_empty() {
        return Err(r.err("list element"));
    }
    Ok(out)
}

pub(crate) fn write_comma_list<T>(
    out: &mut Out,
    items: &[T],
    mut f: impl FnMut(&mut Out, &T),
) {
    let mut first = true;
    for item in items {
        if !first {
            out.push_str(", ");
        }
        first = false;
        f(out, item);
    }
}

/// Quality weight in thousandths, `0..=1000` (RFC 7231 section 5.3.1).
///
/// `q=0.45` is `Weight(450)`; emission trims trailing zeros, so `450`
/// formats back as `0.45` and `1000` as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(u16);

impl Weight {
    /// Clamps to the legal `0..=1000` range.
    pub fn new(thousandths: u16) -> Self {
        Weight(thousandths.min(1000))
    }

    pub fn thousandths(&self) -> u16 {
        self.0
    }

    /// `OWS ";" OWS "q=" qvalue`. The `q` is case-insensitive.
    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        ows(r);
        r.expect(b';', "';'")?;
        ows(r);
        if !r.eat(b'q') && !r.eat(b'Q') {
            return Err(r.err("'q'"));
        }
        r.expect(b'=', "'='")?;
        Self::parse_qvalue(r)
    }

    fn parse_qvalue(r: &mut Reader) -> Result<Self> {
        if r.eat(b'1') {
            if r.eat(b'.') {
                r.take_min_max(|b| b == b'0', 0, 3, "qvalue")?;
            }
            return Ok(Weight(1000));
        }

        r.expect(b'0', "qvalue")?;
        if !r.eat(b'.') {
            return Ok(Weight(0));
        }
        let digits = r.take_min_max(is_digit, 0, 3, "qvalue")?;
        let mut n = 0u16;
        for (i, d) in digits.bytes().enumerate() {
            n += u16::from(d - b'0') * [100, 10, 1][i];
        }
        Ok(Weight(n))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        use std::fmt::Write;
        out.push_str(";q=");
        if self.0 == 1000 {
            out.push('1');
        } else if self.0 == 0 {
            out.push('0');
        } else {
            let mut digits = format!("{:03}", self.0);
            while digits.ends_with('0') {
                digits.pop();
            }
            let _ = write!(out, "0.{}", digits);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::out::format_with;
    use crate::reader::parse_all;

    #[test]
    fn token_stops_at_delimiters() {
        let mut r = Reader::new("max-age=5");
        assert_eq!(token(&mut r).unwrap(), "max-age");
        assert_eq!(r.pos(), 7);
    }

    #[test]
    fn quoted_string_unescapes() {
        assert_eq!(parse_all("\"abc\"", quoted_string).unwrap(), "abc");
        assert_eq!(parse_all("\"a\\\"b\"", quoted_string).unwrap(), "a\"b");
        assert_eq!(parse_all("\"a, b\"", quoted_string).unwrap(), "a, b");
        assert!(parse_all("\"open", quoted_string).is_err());
    }

    #[test]
    fn quoting_round_trips() {
        for s in ["abc", "a\"b", "a\\b", "a, b", ""] {
            let quoted = format_with(|out| write_quoted(out, s));
            assert_eq!(parse_all(&quoted, quoted_string).unwrap(), s);
        }
    }

    #[test]
    fn comma_list_tolerates_empty_elements() {
        let v = parse_all("a,, b ,c,", |r| comma_list1(r, token)).unwrap();
        assert_eq!(v, ["a", "b", "c"]);
    }

    #[test]
    fn comma_list_requires_one_element() {
        assert!(parse_all("", |r| comma_list1(r, token)).is_err());
        assert!(parse_all(",,", |r| comma_list1(r, token)).is_err());
    }

    #[test]
    fn weight_parse() {
        assert_eq!(parse_all(";q=0.5", Weight::parse).unwrap(), Weight::new(500));
        assert_eq!(parse_all(" ; q=0.45", Weight::parse).unwrap(), Weight::new(450));
        assert_eq!(parse_all(";q=1", Weight::parse).unwrap(), Weight::new(1000));
        assert_eq!(parse_all(";q=1.000", Weight::parse).unwrap(), Weight::new(1000));
        assert_eq!(parse_all(";Q=0", Weight::parse).unwrap(), Weight::new(0));
        assert!(parse_all(";q=1.5", Weight::parse).is_err());
        assert!(parse_all(";q=2", Weight::parse).is_err());
    }

    #[test]
    fn weight_canonical_emission() {
        for (n, s) in [(500, ";q=0.5"), (450, ";q=0.45"), (7, ";q=0.007"), (0, ";q=0"), (1000, ";q=1")] {
            assert_eq!(format_with(|out| Weight::new(n).write_to(out)), s);
        }
    }
}
