use crate::error::Result;
use crate::lang::{LanguageRange, LanguageTag};
use crate::out::Out;
use crate::reader::{parse_all, Reader};

use super::{header_impls, syntax, Weight};

/// One element of `Accept-Language`: a language range with an optional
/// quality weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AcceptableLanguage {
    pub range: LanguageRange,
    pub weight: Option<Weight>,
}

impl AcceptableLanguage {
    pub fn new(range: LanguageRange, weight: Option<Weight>) -> Self {
        AcceptableLanguage { range, weight }
    }

    fn parse(r: &mut Reader) -> Result<Self> {
        let range = LanguageRange::parse(r)?;
        let weight = r.opt(Weight::parse);
        Ok(AcceptableLanguage { range, weight })
    }

    fn write_to(&self, out: &mut Out) {
        self.range.write_to(out);
        if let Some(w) = &self.weight {
            w.write_to(out);
        }
    }
}

/// `Accept-Language` header value (RFC 7231 section 5.3.5):
/// `1#( language-range [ weight ] )`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AcceptLanguage(Vec<AcceptableLanguage>);

impl AcceptLanguage {
    pub fn new(items: impl IntoIterator<Item = AcceptableLanguage>) -> Self {
        AcceptLanguage(items.into_iter().collect())
    }

    pub fn items(&self) -> &[AcceptableLanguage] {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, |r| {
            syntax::comma_list1(r, AcceptableLanguage::parse).map(AcceptLanguage)
        })
    }

    fn write_to(&self, out: &mut Out) {
        syntax::write_comma_list(out, &self.0, |out, item: &AcceptableLanguage| {
            item.write_to(out)
        });
    }
}

header_impls!(AcceptLanguage);

/// `Content-Language` header value (RFC 7231 section 3.1.3.2):
/// `1#language-tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentLanguage(Vec<LanguageTag>);

impl ContentLanguage {
    pub fn new(tags: impl IntoIterator<Item = LanguageTag>) -> Self {
        ContentLanguage(tags.into_iter().collect())
    }

    pub fn tags(&self) -> &[LanguageTag] {
        &self.0
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        parse_all(s, |r| {
            syntax::comma_list1(r, LanguageTag::parse).map(ContentLanguage)
        })
    }

    fn write_to(&self, out: &mut Out) {
        syntax::write_comma_list(out, &self.0, |out, tag: &LanguageTag| tag.write_to(out));
    }
}

header_impls!(ContentLanguage);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accept_language_with_weights() {
        let v = AcceptLanguage::parse_str("da, en-gb;q=0.8, en;q=0.7").unwrap();
        assert_eq!(v.items().len(), 3);

        assert_eq!(
            v.items()[0],
            AcceptableLanguage::new(LanguageRange::Range(vec!["da".into()]), None)
        );
        assert_eq!(
            v.items()[1],
            AcceptableLanguage::new(
                LanguageRange::Range(vec!["en".into(), "gb".into()]),
                Some(Weight::new(800))
            )
        );

        assert_eq!(v.to_string(), "da, en-gb;q=0.8, en;q=0.7");
    }

    #[test]
    fn accept_language_wildcard() {
        let v = AcceptLanguage::parse_str("*;q=0.1, en").unwrap();
        assert_eq!(
            v.items()[0],
            AcceptableLanguage::new(LanguageRange::Any, Some(Weight::new(100)))
        );
        assert_eq!(v.to_string(), "*;q=0.1, en");
    }

    #[test]
    fn content_language_list() {
        let v = ContentLanguage::parse_str("mi, en").unwrap();
        assert_eq!(v.tags().len(), 2);
        assert_eq!(v.to_string(), "mi, en");

        let v = ContentLanguage::parse_str("de-CH-1996").unwrap();
        assert_eq!(v.to_string(), "de-CH-1996");
    }

    #[test]
    fn header_value_conversions() {
        let hv = http::HeaderValue::from_static("da, en;q=0.5");
        let v = AcceptLanguage::parse_header_value(&hv).unwrap();
        assert_eq!(v.to_header_value(), hv);
    }

    #[test]
    fn rejects_garbage() {
        assert!(AcceptLanguage::parse_str("").is_err());
        assert!(AcceptLanguage::parse_str("en;q=x").is_err());
        assert!(ContentLanguage::parse_str("en-").is_err());
    }
}
