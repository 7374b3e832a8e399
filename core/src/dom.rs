//! Boundary between the resolvers and a parsed HTML tree.
//!
//! # Design
//! The resolvers only need four things from a tree: tag names, attribute
//! lookup, document-order descendants and text content. `Element` captures
//! exactly that, so any parser can be plugged in. An implementation for
//! `scraper::ElementRef` is provided because it is what most callers start
//! from. Tag and attribute names are expected lowercased, as the HTML5
//! parser produces them; attribute values are used as authored.

use scraper::{ElementRef, Html};

use crate::error::FormError;

/// Read-only view of a parsed element.
pub trait Element: Clone {
    /// Lowercase tag name, e.g. `input`.
    fn tag_name(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Descendant elements in document order, excluding `self`.
    fn descendants(&self) -> Vec<Self>;

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self) -> String;

    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attribute value, or `None` when the attribute is absent or empty.
    fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }
}

impl Element for ElementRef<'_> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn descendants(&self) -> Vec<Self> {
        (**self)
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}

/// A `<form>` element together with the URL its document was loaded from.
#[derive(Debug, Clone)]
pub struct Form<E> {
    element: E,
    base_url: Option<String>,
}

impl<E: Element> Form<E> {
    pub fn new(element: E, base_url: Option<&str>) -> Self {
        Self {
            element,
            base_url: base_url.map(str::to_string),
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.attr(name)
    }

    pub fn base_url(&self) -> Result<&str, FormError> {
        self.base_url.as_deref().ok_or(FormError::MissingBaseUrl)
    }

    /// The authored `method` attribute, or `GET` when it is absent or empty.
    pub fn method(&self) -> &str {
        self.element.non_empty_attr("method").unwrap_or("GET")
    }

    pub fn descendants(&self) -> Vec<E> {
        self.element.descendants()
    }
}

/// All `<form>` elements of `document`, in document order.
pub fn find_forms(document: &Html) -> Vec<ElementRef<'_>> {
    let root = document.root_element();
    std::iter::once(root)
        .chain(Element::descendants(&root))
        .filter(|element| element.tag_name() == "form")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendants_are_in_document_order_and_exclude_self() {
        let html = Html::parse_document(
            r#"<form id="f"><div><input name="a"><select name="b"><option>x</option></select></div><textarea name="c"></textarea></form>"#,
        );
        let form = find_forms(&html)[0];
        let tags: Vec<_> = Element::descendants(&form)
            .iter()
            .map(|e| e.tag_name().to_string())
            .collect();
        assert_eq!(tags, ["div", "input", "select", "option", "textarea"]);
    }

    #[test]
    fn find_forms_returns_every_form() {
        let html = Html::parse_document(r#"<form id="a"></form><p></p><form id="b"></form>"#);
        let ids: Vec<_> = find_forms(&html)
            .iter()
            .map(|f| f.attr("id").unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn form_method_defaults_to_get() {
        let html = Html::parse_document(r#"<form></form><form method=""></form><form method="post"></form>"#);
        let forms = find_forms(&html);
        assert_eq!(Form::new(forms[0], None).method(), "GET");
        assert_eq!(Form::new(forms[1], None).method(), "GET");
        assert_eq!(Form::new(forms[2], None).method(), "post");
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let html = Html::parse_document("<form></form>");
        let form = Form::new(find_forms(&html)[0], None);
        assert_eq!(form.base_url(), Err(FormError::MissingBaseUrl));
    }

    #[test]
    fn attribute_names_are_lowercased_by_the_parser() {
        let html = Html::parse_document(r#"<form ACTION="Foo"></form>"#);
        let form = Form::new(find_forms(&html)[0], Some("https://example.com"));
        assert_eq!(form.attr("action"), Some("Foo"));
    }
}
