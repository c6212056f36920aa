use std::fmt;

use crate::chars::{is_digit, is_hexdig, is_varchar};
use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::reader::Reader;

/// Variable name: dot-separated runs of varchars (RFC 6570 section 2.3).
///
/// Stored in its raw textual form, percent-triples included; the name is
/// also the lookup key into [`UriTemplateData`][crate::template::UriTemplateData].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableName(String);

impl VariableName {
    pub fn new(s: impl Into<String>) -> Self {
        VariableName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let mut name = varchars(r)?;
        loop {
            let matched = r.attempt(|r| {
                r.expect(b'.', "'.'")?;
                varchars(r)
            });
            match matched {
                Ok(part) => {
                    name.push('.');
                    name.push_str(&part);
                }
                Err(_) => break,
            }
        }
        Ok(VariableName(name))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        out.push_str(&self.0);
    }
}

/// One non-empty run of varchars, kept raw.
fn varchars(r: &mut Reader) -> Result<String> {
    let mut s = String::new();
    loop {
        match r.peek() {
            Some(b) if is_varchar(b) => {
                r.bump();
                s.push(b as char);
            }
            Some(b'%') => {
                let (Some(hi), Some(lo)) = (r.peek_at(1), r.peek_at(2)) else {
                    break;
                };
                if !is_hexdig(hi) || !is_hexdig(lo) {
                    break;
                }
                r.bump();
                r.bump();
                r.bump();
                s.push('%');
                s.push(hi as char);
                s.push(lo as char);
            }
            _ => break,
        }
    }
    if s.is_empty() {
        return Err(r.err("variable name"));
    }
    Ok(s)
}

/// Value modifier (RFC 6570 section 2.4): a prefix length or explode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `:n`, at most the first `n` characters of the value.
    Prefix(usize),
    /// `*`, composite values spread over the operator separator.
    Explode,
}

impl Modifier {
    pub(crate) fn parse_opt(r: &mut Reader) -> Result<Option<Self>> {
        if r.eat(b'*') {
            return Ok(Some(Modifier::Explode));
        }
        if !r.eat(b':') {
            return Ok(None);
        }

        let start = r.pos();
        let digits = r.take_min_max(is_digit, 1, 4, "prefix length")?;
        if digits.starts_with('0') {
            return Err(ParseError::new("prefix length cannot start with 0", start));
        }
        // 1..=4 digits with a non-zero lead always fits
        let n = digits.parse::<usize>().expect("bounded digits");
        Ok(Some(Modifier::Prefix(n)))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        use std::fmt::Write;
        match self {
            Modifier::Prefix(n) => {
                let _ = write!(out, ":{}", n);
            }
            Modifier::Explode => out.push('*'),
        }
    }
}

/// One entry of an expression's variable list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSpec {
    pub name: VariableName,
    pub modifier: Option<Modifier>,
}

impl VariableSpec {
    pub fn new(name: VariableName, modifier: Option<Modifier>) -> Self {
        VariableSpec { name, modifier }
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let name = VariableName::parse(r)?;
        let modifier = Modifier::parse_opt(r)?;
        Ok(VariableSpec { name, modifier })
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        self.name.write_to(out);
        if let Some(m) = &self.modifier {
            m.write_to(out);
        }
    }
}

impl fmt::Display for VariableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_with(|out| self.write_to(out)))
    }
}
