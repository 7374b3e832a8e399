//! Target URL of a submission.
//!
//! The base URL is returned untouched when no action applies, so callers get
//! back exactly the string they supplied. Only actions go through `url`
//! resolution.

use tracing::debug;
use url::Url;

use crate::dom::{Element, Form};
use crate::error::FormError;

/// Whitespace characters HTML strips from URL-valued attributes.
const HTML5_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0c'];

pub fn resolve_url<E: Element>(form: &Form<E>, click: Option<&E>) -> Result<String, FormError> {
    let base = form.base_url()?;
    let action = click
        .and_then(|control| control.non_empty_attr("formaction"))
        .or_else(|| form.attr("action"));
    let Some(action) = action else {
        return Ok(base.to_string());
    };
    let action = action.trim_matches(HTML5_WHITESPACE);
    let url = if action.is_empty() {
        strip_query_and_fragment(base).to_string()
    } else if Url::parse(action).is_ok() {
        action.to_string()
    } else {
        Url::parse(base)?.join(action)?.to_string()
    };
    debug!(%url, action, "resolved form action");
    Ok(url)
}

/// `url` cut at its first `?` or `#`.
fn strip_query_and_fragment(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// Replace the query component of `url`, keeping any fragment. An empty
/// `query` removes the component, `?` included.
pub fn replace_query(url: &str, query: &str) -> String {
    let (rest, fragment) = match url.find('#') {
        Some(index) => url.split_at(index),
        None => (url, ""),
    };
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    let mut out = String::with_capacity(path.len() + query.len() + fragment.len() + 1);
    out.push_str(path);
    if !query.is_empty() {
        out.push('?');
        out.push_str(query);
    }
    if !fragment.is_empty() {
        out.push_str(fragment);
    }
    out
}
