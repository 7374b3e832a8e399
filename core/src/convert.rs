//! Form submission entry point.
//!
//! # Design
//! `convert` runs the resolvers in a fixed order: click, URL, method, fields,
//! and for POST the enctype. Every resolver is a pure function of the form
//! and the options, so a failed conversion leaves nothing behind and a
//! repeated call yields the same request.

use tracing::debug;
use url::form_urlencoded;

use crate::action::{replace_query, resolve_url};
use crate::click::{resolve_click, Click};
use crate::dom::{Element, Form};
use crate::enctype::{resolve_enctype, Enctype};
use crate::error::FormError;
use crate::fields::{collect_fields, UserData};
use crate::method::resolve_method;
use crate::request::{HttpMethod, HttpRequest};

/// Caller overrides for a submission. `Default` means "submit the form as a
/// browser would after a click on its first submit button".
#[derive(Debug, Clone)]
pub struct ConvertOptions<E> {
    pub data: Option<UserData>,
    pub click: Click<E>,
    pub method: Option<String>,
    pub enctype: Option<String>,
}

impl<E> Default for ConvertOptions<E> {
    fn default() -> Self {
        Self {
            data: None,
            click: Click::Auto,
            method: None,
            enctype: None,
        }
    }
}

impl<E> ConvertOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: UserData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn click(mut self, click: impl Into<Click<E>>) -> Self {
        self.click = click.into();
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn enctype(mut self, enctype: impl Into<String>) -> Self {
        self.enctype = Some(enctype.into());
        self
    }
}

/// Build the request a browser would send when `form` is submitted.
pub fn convert<E: Element>(
    form: &Form<E>,
    options: &ConvertOptions<E>,
) -> Result<HttpRequest, FormError> {
    let click = resolve_click(form, &options.click)?;
    let url = resolve_url(form, click.as_ref())?;
    let method = resolve_method(form, click.as_ref(), options.method.as_deref())?;
    let fields = collect_fields(form, options.data.as_ref(), click.as_ref());

    let request = match method {
        HttpMethod::Get => HttpRequest {
            url: replace_query(&url, &urlencode(&fields)),
            method,
            headers: Vec::new(),
            body: Vec::new(),
        },
        HttpMethod::Post => {
            let enctype = resolve_enctype(form, click.as_ref(), options.enctype.as_deref())?;
            let body = match enctype {
                Enctype::UrlEncoded => urlencode(&fields),
                Enctype::TextPlain => text_plain(&fields),
            };
            HttpRequest {
                url,
                method,
                headers: vec![("Content-Type".to_string(), enctype.as_str().to_string())],
                body: body.into_bytes(),
            }
        }
    };
    debug!(url = %request.url, method = %request.method, fields = fields.len(), "converted form");
    Ok(request)
}

/// `application/x-www-form-urlencoded` serialization, spaces as `+`.
pub fn urlencode(fields: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// `text/plain` serialization: one unescaped `key=value` per line.
pub fn text_plain(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
