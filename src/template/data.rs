use std::collections::HashMap;

/// A value bound to a template variable: scalar, ordered collection or
/// ordered association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriTemplateValue {
    Atom(String),
    List(Vec<String>),
    Keys(Vec<(String, String)>),
}

impl From<&str> for UriTemplateValue {
    fn from(v: &str) -> Self {
        UriTemplateValue::Atom(v.to_owned())
    }
}

impl From<String> for UriTemplateValue {
    fn from(v: String) -> Self {
        UriTemplateValue::Atom(v)
    }
}

impl<const N: usize> From<[&str; N]> for UriTemplateValue {
    fn from(v: [&str; N]) -> Self {
        UriTemplateValue::List(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for UriTemplateValue {
    fn from(v: [(&str, &str); N]) -> Self {
        UriTemplateValue::Keys(v.iter().map(|(k, w)| (k.to_string(), w.to_string())).collect())
    }
}

/// Variable bindings for rendering, and the result of matching. Keys are
/// unique; no iteration order is promised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriTemplateData {
    bindings: HashMap<String, UriTemplateValue>,
}

impl UriTemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<UriTemplateValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<UriTemplateValue>) {
        self.bindings.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&UriTemplateValue> {
        self.bindings.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UriTemplateValue)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Right-biased union: bindings in `other` win over `self`.
    pub fn union(mut self, other: UriTemplateData) -> UriTemplateData {
        self.bindings.extend(other.bindings);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bind_and_get() {
        let data = UriTemplateData::new()
            .bind("a", "1")
            .bind("l", ["x", "y"])
            .bind("k", [("k1", "v1")]);

        assert_eq!(data.get("a"), Some(&UriTemplateValue::Atom("1".into())));
        assert_eq!(
            data.get("l"),
            Some(&UriTemplateValue::List(vec!["x".into(), "y".into()]))
        );
        assert_eq!(
            data.get("k"),
            Some(&UriTemplateValue::Keys(vec![("k1".into(), "v1".into())]))
        );
        assert_eq!(data.get("missing"), None);
    }

    #[test]
    fn union_is_right_biased() {
        let left = UriTemplateData::new().bind("a", "1").bind("b", "2");
        let right = UriTemplateData::new().bind("b", "3").bind("c", "4");

        let merged = left.union(right);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("a"), Some(&UriTemplateValue::Atom("1".into())));
        assert_eq!(merged.get("b"), Some(&UriTemplateValue::Atom("3".into())));
        assert_eq!(merged.get("c"), Some(&UriTemplateValue::Atom("4".into())));
    }

    #[test]
    fn duplicate_key_keeps_last() {
        let data = UriTemplateData::new().bind("a", "1").bind("a", "2");
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("a"), Some(&UriTemplateValue::Atom("2".into())));
    }
}
