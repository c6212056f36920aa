//! Matching a concrete string back into variable bindings, the reverse
//! of expansion.
//!
//! RFC 6570 only defines expansion, so matching is a partial inverse: a
//! composite parser is built per expression from each variable's
//! (operator, modifier) pair. Exploded variables prefer the keys shape
//! over the list shape, decided by look-ahead on a `k=v` pair. Later
//! variables of an expression that find no text are simply unbound.

use crate::error::Result;
use crate::pct;
use crate::reader::Reader;

use super::{
    Expansion, Expression, Modifier, UriTemplate, UriTemplateData, UriTemplatePart,
    UriTemplateValue, VariableSpec,
};

impl UriTemplate {
    /// Extract variable bindings from `input`.
    ///
    /// Literal parts must match verbatim and the whole input must be
    /// accounted for. Bindings merge right-biased when a name occurs
    /// more than once.
    pub fn match_str(&self, input: &str) -> Result<UriTemplateData> {
        let mut r = Reader::new(input);
        let mut data = UriTemplateData::new();

        for part in self.parts() {
            match part {
                UriTemplatePart::Literal(l) => {
                    expect_verbatim(&mut r, l.as_str())?;
                }
                UriTemplatePart::Expression(e) => {
                    match_expression(&mut r, e, &mut data)?;
                }
            }
        }

        r.expect_end()?;
        trace!("template matched {} bindings", data.len());
        Ok(data)
    }
}

fn expect_verbatim(r: &mut Reader, text: &str) -> Result<()> {
    for &b in text.as_bytes() {
        if !r.eat(b) {
            return Err(r.err(format_args!("literal {:?}", text)));
        }
    }
    Ok(())
}

fn match_expression(r: &mut Reader, expr: &Expression, data: &mut UriTemplateData) -> Result<()> {
    let exp = Expansion::for_operator(expr.operator);

    if let Some(c) = exp.first {
        if !r.eat(c as u8) {
            // prefix absent: the expression contributed nothing
            return Ok(());
        }
    }

    let mut any = false;
    for spec in &expr.variables {
        let matched = r.attempt(|r| {
            if any {
                r.expect(exp.sep as u8, "separator")?;
            }
            match_variable(r, spec, &exp)
        });
        if let Ok(value) = matched {
            data.insert(spec.name.as_str(), value);
            any = true;
        }
    }

    if exp.first.is_some() && !any {
        return Err(r.err("expression value"));
    }

    Ok(())
}

fn match_variable(
    r: &mut Reader,
    spec: &VariableSpec,
    exp: &Expansion,
) -> Result<UriTemplateValue> {
    let class = exp.value_class();
    let sep = exp.sep as u8;

    if let Some(Modifier::Explode) = spec.modifier {
        // keys first: the shape with '=' inside each element
        if let Ok(pairs) = r.attempt(|r| match_keys(r, &class, sep)) {
            return Ok(UriTemplateValue::Keys(pairs));
        }
        let items = match_list(r, &class, sep)?;
        return Ok(UriTemplateValue::List(items));
    }

    if exp.named {
        expect_verbatim(r, spec.name.as_str())?;
        if !r.eat(b'=') {
            // the omitted-equals form of an empty value
            return Ok(UriTemplateValue::Atom(String::new()));
        }
    }

    // the separator splits variables, so a value never contains it
    let s = pct::decode_while(r, |b| class(b) && b != sep)?;
    Ok(UriTemplateValue::Atom(s))
}

fn match_keys(
    r: &mut Reader,
    class: &impl Fn(u8) -> bool,
    sep: u8,
) -> Result<Vec<(String, String)>> {
    let item_class = |b: u8| class(b) && b != sep && b != b'=';
    r.sep_by1(
        |r| {
            let key = pct::decode_while1(r, item_class, "key")?;
            r.expect(b'=', "'='")?;
            let value = pct::decode_while(r, item_class)?;
            Ok((key, value))
        },
        sep,
    )
}

fn match_list(r: &mut Reader, class: &impl Fn(u8) -> bool, sep: u8) -> Result<Vec<String>> {
    let item_class = |b: u8| class(b) && b != sep;
    r.sep_by1(|r| pct::decode_while(r, item_class), sep)
}

#[cfg(test)]
mod test {
    use super::*;

    fn matches(template: &str, input: &str) -> UriTemplateData {
        UriTemplate::parse_str(template)
            .unwrap()
            .match_str(input)
            .unwrap()
    }

    fn atom(s: &str) -> UriTemplateValue {
        UriTemplateValue::Atom(s.into())
    }

    #[test]
    fn literal_only() {
        let d = matches("/users/all", "/users/all");
        assert!(d.is_empty());
    }

    #[test]
    fn literal_mismatch_fails() {
        let t = UriTemplate::parse_str("/users/all").unwrap();
        assert!(t.match_str("/users/none").is_err());
        // trailing input fails too
        assert!(t.match_str("/users/all/x").is_err());
    }

    #[test]
    fn simple_variable() {
        let d = matches("/users/{id}", "/users/42");
        assert_eq!(d.get("id"), Some(&atom("42")));
    }

    #[test]
    fn decodes_percent_triples() {
        let d = matches("{greeting}", "Hello%20World%21");
        assert_eq!(d.get("greeting"), Some(&atom("Hello World!")));
    }

    #[test]
    fn multiple_variables() {
        let d = matches("{x,y}", "1024,768");
        assert_eq!(d.get("x"), Some(&atom("1024")));
        assert_eq!(d.get("y"), Some(&atom("768")));
    }

    #[test]
    fn later_variables_stay_unbound() {
        let d = matches("{x,y}", "1024");
        assert_eq!(d.get("x"), Some(&atom("1024")));
        assert_eq!(d.get("y"), None);
    }

    #[test]
    fn reserved_expansion_keeps_slashes() {
        // the reserved class is greedy: it takes everything up to the
        // separator, so a trailing literal cannot follow it
        let d = matches("{+path}", "/foo/bar");
        assert_eq!(d.get("path"), Some(&atom("/foo/bar")));
    }

    #[test]
    fn fragment_expression() {
        let d = matches("X{#x,y}", "X#a,b");
        assert_eq!(d.get("x"), Some(&atom("a")));
        assert_eq!(d.get("y"), Some(&atom("b")));

        // absent prefix leaves the variables unbound
        let d = matches("X{#x,y}", "X");
        assert!(d.is_empty());
    }

    #[test]
    fn named_query_variables() {
        let d = matches("{?x,y}", "?x=1&y=");
        assert_eq!(d.get("x"), Some(&atom("1")));
        assert_eq!(d.get("y"), Some(&atom("")));
    }

    #[test]
    fn parameter_omitted_equals() {
        let d = matches("{;x}", ";x");
        assert_eq!(d.get("x"), Some(&atom("")));

        let d = matches("{;x,y}", ";x;y=2");
        assert_eq!(d.get("x"), Some(&atom("")));
        assert_eq!(d.get("y"), Some(&atom("2")));
    }

    #[test]
    fn exploded_list() {
        let d = matches("{/path*}", "/a/b/c");
        assert_eq!(
            d.get("path"),
            Some(&UriTemplateValue::List(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn exploded_keys_preferred_over_list() {
        let d = matches("{?k*}", "?a=1&b=2");
        assert_eq!(
            d.get("k"),
            Some(&UriTemplateValue::Keys(vec![
                ("a".into(), "1".into()),
                ("b".into(), "2".into())
            ]))
        );
    }

    #[test]
    fn render_match_round_trip() {
        let t = UriTemplate::parse_str("/users/{id}{?lang,fmt}").unwrap();
        let d = UriTemplateData::new()
            .bind("id", "42")
            .bind("lang", "en")
            .bind("fmt", "json");

        let rendered = t.render(&d);
        assert_eq!(rendered, "/users/42?lang=en&fmt=json");
        assert_eq!(t.match_str(&rendered).unwrap(), d);
    }

    #[test]
    fn unassignable_byte_fails() {
        let t = UriTemplate::parse_str("{x}").unwrap();
        // '/' is not in the unreserved class for a simple expression
        assert!(t.match_str("a/b").is_err());
    }
}
