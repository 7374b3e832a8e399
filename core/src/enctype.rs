//! Body encoding of POST submissions.
//!
//! Precedence mirrors the method: caller override, then `formenctype` on the
//! clicked control, then the form's `enctype`. Values compare ignoring ASCII
//! case. `multipart/form-data` in markup is reported as unhandled; any other
//! unknown markup value means the default encoding.

use tracing::debug;

use crate::dom::{Element, Form};
use crate::error::FormError;

const MULTIPART: &str = "multipart/form-data";

/// Supported POST body encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enctype {
    #[default]
    UrlEncoded,
    TextPlain,
}

impl Enctype {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Enctype::UrlEncoded => "application/x-www-form-urlencoded",
            Enctype::TextPlain => "text/plain",
        }
    }

    /// Parse a MIME type, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        [Enctype::UrlEncoded, Enctype::TextPlain]
            .into_iter()
            .find(|enctype| value.eq_ignore_ascii_case(enctype.as_str()))
    }
}

pub fn resolve_enctype<E: Element>(
    form: &Form<E>,
    click: Option<&E>,
    enctype_override: Option<&str>,
) -> Result<Enctype, FormError> {
    if let Some(enctype) = enctype_override.filter(|e| !e.is_empty()) {
        return Enctype::parse(enctype)
            .ok_or_else(|| FormError::UnsupportedEnctype(enctype.to_ascii_lowercase()));
    }

    let authored = match click.and_then(|control| control.non_empty_attr("formenctype")) {
        Some(value) => Some((value, "formenctype")),
        None => form.element().non_empty_attr("enctype").map(|value| (value, "enctype")),
    };
    let Some((value, attribute)) = authored else {
        return Ok(Enctype::default());
    };
    if value.eq_ignore_ascii_case(MULTIPART) {
        return Err(FormError::UnhandledEnctype {
            value: value.to_ascii_lowercase(),
            attribute,
        });
    }
    let enctype = Enctype::parse(value).unwrap_or_default();
    debug!(enctype = enctype.as_str(), attribute, authored = value, "resolved form enctype");
    Ok(enctype)
}

#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};

    use super::*;
    use crate::dom::find_forms;

    fn resolve(html: &str, enctype_override: Option<&str>) -> Result<Enctype, FormError> {
        let html = Html::parse_document(html);
        let form = Form::new(find_forms(&html)[0], Some("https://example.com"));
        let selector = Selector::parse("input[type=submit]").unwrap();
        let submit: Option<ElementRef<'_>> = form.element().select(&selector).next();
        resolve_enctype(&form, submit.as_ref(), enctype_override)
    }

    #[test]
    fn unknown_and_missing_values_use_default() {
        for enctype in ["", "application/x-www-form-urlencoded", "foo"] {
            let html = format!(r#"<form enctype="{enctype}" method="post"></form>"#);
            assert_eq!(resolve(&html, None), Ok(Enctype::UrlEncoded), "{enctype:?}");
        }
        assert_eq!(resolve("<form></form>", None), Ok(Enctype::UrlEncoded));
    }

    #[test]
    fn text_plain_is_case_insensitive() {
        assert_eq!(
            resolve(r#"<form enctype="TeXt/PlAiN"></form>"#, None),
            Ok(Enctype::TextPlain)
        );
    }

    #[test]
    fn multipart_in_markup_is_unhandled() {
        assert_eq!(
            resolve(r#"<form enctype="multipart/form-data"></form>"#, None),
            Err(FormError::UnhandledEnctype {
                value: "multipart/form-data".into(),
                attribute: "enctype",
            })
        );
        let html = r#"<form><input type="submit" formenctype="MuLtIpArT/fOrM-dAtA"></form>"#;
        assert_eq!(
            resolve(html, None),
            Err(FormError::UnhandledEnctype {
                value: "multipart/form-data".into(),
                attribute: "formenctype",
            })
        );
    }

    #[test]
    fn formenctype_wins_even_when_unknown() {
        let html = r#"<form enctype="multipart/form-data"><input type="submit" formenctype="foo"></form>"#;
        assert_eq!(resolve(html, None), Ok(Enctype::UrlEncoded));
        let html = r#"<form enctype="multipart/form-data"><input type="submit" formenctype="text/plain"></form>"#;
        assert_eq!(resolve(html, None), Ok(Enctype::TextPlain));
    }

    #[test]
    fn override_must_be_supported() {
        let html = r#"<form enctype="multipart/form-data"></form>"#;
        assert_eq!(resolve(html, Some("Text/Plain")), Ok(Enctype::TextPlain));
        assert_eq!(
            resolve(html, Some("multipart/form-data")),
            Err(FormError::UnsupportedEnctype("multipart/form-data".into()))
        );
        assert_eq!(resolve("<form></form>", Some("a")), Err(FormError::UnsupportedEnctype("a".into())));
    }
}
