//! Effective HTTP method of a submission.
//!
//! Precedence: caller override, then the clicked control's `formmethod`, then
//! the form's `method`. Overrides must name GET or POST. Markup is read the
//! way browsers read it: `dialog` is recognized but not implemented, anything
//! else unknown falls back to GET.

use tracing::debug;

use crate::dom::{Element, Form};
use crate::error::FormError;
use crate::request::HttpMethod;

pub fn resolve_method<E: Element>(
    form: &Form<E>,
    click: Option<&E>,
    method_override: Option<&str>,
) -> Result<HttpMethod, FormError> {
    if let Some(method) = method_override.filter(|m| !m.is_empty()) {
        let upper = method.to_ascii_uppercase();
        return HttpMethod::from_upper(&upper).ok_or(FormError::UnsupportedMethod(upper));
    }

    let (value, attribute) = match click.and_then(|control| control.non_empty_attr("formmethod")) {
        Some(value) => (value, "formmethod"),
        None => (form.method(), "method"),
    };
    let upper = value.to_ascii_uppercase();
    if upper == "DIALOG" {
        return Err(FormError::UnhandledMethod {
            value: upper,
            attribute,
        });
    }
    let method = HttpMethod::from_upper(&upper).unwrap_or(HttpMethod::Get);
    debug!(%method, attribute, authored = value, "resolved form method");
    Ok(method)
}
