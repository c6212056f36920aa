//! Template expansion (RFC 6570 section 3).

use smallvec::SmallVec;

use crate::out::{format_with, Out};
use crate::pct;

use super::{
    Expansion, Expression, Modifier, UriTemplate, UriTemplateData, UriTemplatePart,
    UriTemplateValue, VariableSpec,
};

impl UriTemplate {
    /// Render the template into a concrete string using `data`.
    ///
    /// Unbound variables and empty lists or key sets contribute nothing;
    /// an expression where nothing contributed is elided together with
    /// its operator prefix.
    pub fn render(&self, data: &UriTemplateData) -> String {
        format_with(|out| {
            for part in self.parts() {
                match part {
                    UriTemplatePart::Literal(l) => out.push_str(l.as_str()),
                    UriTemplatePart::Expression(e) => render_expression(out, e, data),
                }
            }
        })
    }
}

fn render_expression(out: &mut Out, expr: &Expression, data: &UriTemplateData) {
    let exp = Expansion::for_operator(expr.operator);

    let bound: SmallVec<[(&VariableSpec, &UriTemplateValue); 4]> = expr
        .variables
        .iter()
        .filter_map(|spec| data.get(spec.name.as_str()).map(|value| (spec, value)))
        .filter(|(_, value)| match value {
            UriTemplateValue::Atom(_) => true,
            UriTemplateValue::List(l) => !l.is_empty(),
            UriTemplateValue::Keys(k) => !k.is_empty(),
        })
        .collect();

    trace!(
        "render expression: {} of {} variables bound",
        bound.len(),
        expr.variables.len()
    );

    if bound.is_empty() {
        return;
    }

    if let Some(c) = exp.first {
        out.push(c);
    }

    for (i, (spec, value)) in bound.into_iter().enumerate() {
        if i > 0 {
            out.push(exp.sep);
        }
        render_variable(out, spec, value, &exp);
    }
}

fn render_variable(out: &mut Out, spec: &VariableSpec, value: &UriTemplateValue, exp: &Expansion) {
    let class = exp.value_class();

    match (value, spec.modifier) {
        (UriTemplateValue::Atom(a), modifier) => {
            let truncated;
            let s = match modifier {
                Some(Modifier::Prefix(n)) => {
                    truncated = a.chars().take(n).collect::<String>();
                    &truncated
                }
                _ => a,
            };
            if exp.named {
                push_named(out, spec, s.is_empty(), exp);
            }
            pct::encode_to(out, s, class);
        }

        (UriTemplateValue::List(items), Some(Modifier::Explode)) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(exp.sep);
                }
                if exp.named {
                    push_named(out, spec, item.is_empty(), exp);
                }
                pct::encode_to(out, item, class);
            }
        }

        // The prefix modifier is undefined for composite values; they
        // expand as if unmodified.
        (UriTemplateValue::List(items), _) => {
            if exp.named {
                push_named(out, spec, false, exp);
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                pct::encode_to(out, item, class);
            }
        }

        (UriTemplateValue::Keys(pairs), Some(Modifier::Explode)) => {
            // the variable name is shadowed by the keys
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(exp.sep);
                }
                pct::encode_to(out, k, class);
                out.push('=');
                pct::encode_to(out, v, class);
            }
        }

        (UriTemplateValue::Keys(pairs), _) => {
            if exp.named {
                push_named(out, spec, false, exp);
            }
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                pct::encode_to(out, k, class);
                out.push(',');
                pct::encode_to(out, v, class);
            }
        }
    }
}

fn push_named(out: &mut Out, spec: &VariableSpec, value_is_empty: bool, exp: &Expansion) {
    spec.name.write_to(out);
    if !(value_is_empty && exp.omit_eq_on_empty) {
        out.push('=');
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(template: &str, data: &UriTemplateData) -> String {
        UriTemplate::parse_str(template).unwrap().render(data)
    }

    fn data() -> UriTemplateData {
        UriTemplateData::new()
            .bind("var", "value")
            .bind("hello", "Hello World!")
            .bind("empty", "")
            .bind("path", "/foo/bar")
            .bind("x", "1024")
            .bind("y", "768")
            .bind("list", ["red", "green", "blue"])
            .bind("keys", [("semi", ";"), ("dot", "."), ("comma", ",")])
    }

    #[test]
    fn simple_expansion() {
        let d = data();
        assert_eq!(render("{var}", &d), "value");
        assert_eq!(render("{hello}", &d), "Hello%20World%21");
        assert_eq!(render("{x,y}", &d), "1024,768");
        assert_eq!(render("O{undef}X", &d), "OX");
    }

    #[test]
    fn reserved_and_fragment_expansion() {
        let d = data();
        assert_eq!(render("{+path}/here", &d), "/foo/bar/here");
        assert_eq!(render("{#path}", &d), "#/foo/bar");
        assert_eq!(render("{#hello}", &d), "#Hello%20World!");
    }

    #[test]
    fn label_and_segment_expansion() {
        let d = data();
        assert_eq!(render("X{.var}", &d), "X.value");
        assert_eq!(render("{/var,x}/here", &d), "/value/1024/here");
    }

    #[test]
    fn named_expansion() {
        let d = data();
        assert_eq!(render("{;x,y}", &d), ";x=1024;y=768");
        assert_eq!(render("{?x,y}", &d), "?x=1024&y=768");
        assert_eq!(render("?fixed=yes{&x}", &d), "?fixed=yes&x=1024");
    }

    #[test]
    fn empty_atom_keeps_eq_in_query_drops_in_parameter() {
        let d = data();
        // query forms keep the '='
        assert_eq!(render("{?x,empty}", &d), "?x=1024&empty=");
        // parameter form drops it
        assert_eq!(render("{;empty}", &d), ";empty");
        assert_eq!(render("{;x,empty}", &d), ";x=1024;empty");
    }

    #[test]
    fn prefix_modifier() {
        let d = data();
        assert_eq!(render("{var:3}", &d), "val");
        assert_eq!(render("{var:30}", &d), "value");
        assert_eq!(render("{?var:3}", &d), "?var=val");
    }

    #[test]
    fn list_expansion() {
        let d = data();
        assert_eq!(render("{list}", &d), "red,green,blue");
        assert_eq!(render("{list*}", &d), "red,green,blue");
        assert_eq!(render("{/list*}", &d), "/red/green/blue");
        assert_eq!(render("{?list}", &d), "?list=red,green,blue");
        assert_eq!(render("{?list*}", &d), "?list=red&list=green&list=blue");
        assert_eq!(render("{.list*}", &d), ".red.green.blue");
    }

    #[test]
    fn keys_expansion() {
        let d = data();
        assert_eq!(render("{keys}", &d), "semi,%3B,dot,.,comma,%2C");
        assert_eq!(render("{keys*}", &d), "semi=%3B,dot=.,comma=%2C");
        assert_eq!(render("{?keys}", &d), "?keys=semi,%3B,dot,.,comma,%2C");
        // exploded keys shadow the variable name
        assert_eq!(render("{?keys*}", &d), "?semi=%3B&dot=.&comma=%2C");
    }

    #[test]
    fn segment_list_from_spec() {
        let d = UriTemplateData::new().bind("path", ["a", "b", "c"]);
        assert_eq!(render("{/path*}", &d), "/a/b/c");
    }

    #[test]
    fn empty_collections_elide_expression() {
        let d = UriTemplateData::new()
            .bind("l", UriTemplateValue::List(vec![]))
            .bind("k", UriTemplateValue::Keys(vec![]));
        assert_eq!(render("a{?l,k}b", &d), "ab");
        assert_eq!(render("a{#l}", &d), "a");
    }

    #[test]
    fn variable_free_template_renders_as_text() {
        let d = UriTemplateData::new();
        assert_eq!(render("/a/b%20c", &d), "/a/b%20c");
        assert_eq!(render("/a{x}{?q}", &d), "/a");
    }
}
