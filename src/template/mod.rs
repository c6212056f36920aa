//! URI Template engine, RFC 6570.
//!
//! The one part of the crate that is more than a bijective grammar: a
//! [`UriTemplate`] parses and formats like everything else, but also
//! renders against variable bindings and matches a concrete URI back
//! into bindings.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::chars::{is_hexdig, is_template_literal};
use crate::error::{ParseError, Result};
use crate::out::{format_with, Out};
use crate::reader::{parse_all, Reader};

mod operator;
pub use operator::{Operator, OperatorLevel2, OperatorLevel3, OperatorReserved};
pub(crate) use operator::Expansion;

mod varspec;
pub use varspec::{Modifier, VariableName, VariableSpec};

mod data;
pub use data::{UriTemplateData, UriTemplateValue};

mod render;
mod matching;

/// Literal template text, stored raw (percent-triples as written).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(String);

impl Literal {
    pub fn new(s: impl Into<String>) -> Self {
        Literal(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        let mut s = String::new();
        loop {
            match r.peek() {
                Some(b) if is_template_literal(b) => {
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
            return Err(r.err("literal"));
        }
        Ok(Literal(s))
    }

    fn write_to(&self, out: &mut Out) {
        out.push_str(&self.0);
    }
}

/// `{` operator? variable-list `}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    pub operator: Option<Operator>,
    pub variables: Vec<VariableSpec>,
}

impl Expression {
    pub fn new(operator: Option<Operator>, variables: Vec<VariableSpec>) -> Self {
        Expression {
            operator,
            variables,
        }
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        r.expect(b'{', "'{'")?;
        let operator = Operator::parse_opt(r)?;
        let variables = r.sep_by1(VariableSpec::parse, b',')?;
        r.expect(b'}', "'}'")?;
        Ok(Expression {
            operator,
            variables,
        })
    }

    fn write_to(&self, out: &mut Out) {
        out.push('{');
        if let Some(op) = &self.operator {
            op.write_to(out);
        }
        let mut first = true;
        for v in &self.variables {
            if !first {
                out.push(',');
            }
            first = false;
            v.write_to(out);
        }
        out.push('}');
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriTemplatePart {
    Literal(Literal),
    Expression(Expression),
}

impl UriTemplatePart {
    fn parse(r: &mut Reader) -> Result<Self> {
        if r.peek() == Some(b'{') {
            Expression::parse(r).map(UriTemplatePart::Expression)
        } else {
            Literal::parse(r).map(UriTemplatePart::Literal)
        }
    }

    fn write_to(&self, out: &mut Out) {
        match self {
            UriTemplatePart::Literal(l) => l.write_to(out),
            UriTemplatePart::Expression(e) => e.write_to(out),
        }
    }
}

/// URI Template: a non-empty sequence of literals and expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriTemplate(Vec<UriTemplatePart>);

impl UriTemplate {
    pub fn new(parts: Vec<UriTemplatePart>) -> Self {
        UriTemplate(parts)
    }

    pub fn parts(&self) -> &[UriTemplatePart] {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, Self::parse)
    }

    pub(crate) fn parse(r: &mut Reader) -> Result<Self> {
        let parts = r.many1(UriTemplatePart::parse, "template")?;
        Ok(UriTemplate(parts))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        for p in &self.0 {
            p.write_to(out);
        }
    }
}

impl FromStr for UriTemplate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_with(|out| self.write_to(out)))
    }
}

/// Concatenation. Adjacent literals across the seam are merged so that
/// `("/a" + "/b") + "{x}"` and `"/a" + ("/b" + "{x}")` build identical
/// part lists.
impl Add for UriTemplate {
    type Output = UriTemplate;

    fn add(self, rhs: UriTemplate) -> UriTemplate {
        let mut parts = self.0;
        let mut rhs = rhs.0.into_iter();

        if let Some(first) = rhs.next() {
            match (parts.last_mut(), first) {
                (Some(UriTemplatePart::Literal(a)), UriTemplatePart::Literal(b)) => {
                    a.0.push_str(&b.0);
                }
                (_, other) => parts.push(other),
            }
        }
        parts.extend(rhs);

        UriTemplate(parts)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tpl(s: &str) -> UriTemplate {
        UriTemplate::parse_str(s).unwrap()
    }

    #[test]
    fn literal_only() {
        let t = tpl("/users/all");
        assert_eq!(t.parts().len(), 1);
        assert_eq!(t.to_string(), "/users/all");
    }

    #[test]
    fn simple_expression() {
        let t = tpl("/users/{id}");
        assert_eq!(t.parts().len(), 2);
        assert_eq!(t.to_string(), "/users/{id}");
    }

    #[test]
    fn operators_and_modifiers_reformat() {
        for s in [
            "{+path}",
            "{#frag}",
            "{.ext}",
            "{/path*}",
            "{;p,q}",
            "{?x,y}",
            "{&z}",
            "{var:3}",
            "{a.b,c}",
        ] {
            assert_eq!(tpl(s).to_string(), s, "{}", s);
        }
    }

    #[test]
    fn literal_keeps_percent_triples() {
        let t = tpl("/a%20b/{x}");
        assert_eq!(t.to_string(), "/a%20b/{x}");
    }

    #[test]
    fn rejects_malformed() {
        assert!(UriTemplate::parse_str("").is_err());
        assert!(UriTemplate::parse_str("{").is_err());
        assert!(UriTemplate::parse_str("{}").is_err());
        assert!(UriTemplate::parse_str("{var").is_err());
        assert!(UriTemplate::parse_str("a b").is_err());
    }

    #[test]
    fn concat_merges_boundary_literals() {
        let t = tpl("/a") + tpl("/b");
        assert_eq!(t.parts().len(), 1);
        assert_eq!(t.to_string(), "/a/b");

        let t = tpl("/a{x}") + tpl("/b");
        assert_eq!(t.parts().len(), 3);
        assert_eq!(t.to_string(), "/a{x}/b");
    }

    #[test]
    fn concat_is_associative() {
        let (a, b, c) = (tpl("/a"), tpl("{x}/m"), tpl("end{y}"));
        let left = (a.clone() + b.clone()) + c.clone();
        let right = a + (b + c);
        assert_eq!(left, right);
    }
}
