//! Which submit control, if any, is treated as activated.

use tracing::debug;

use crate::dom::{Element, Form};
use crate::error::FormError;

/// How the submitting control is chosen.
#[derive(Debug, Clone)]
pub enum Click<E> {
    /// Click the first submit-like control, or submit without a click when
    /// the form has none.
    Auto,
    /// Like `Auto`, but fail with `NoSubmitControl` when there is nothing to
    /// click.
    Require,
    /// Submit without clicking anything, as pressing Enter in a text field.
    Skip,
    /// Click this control.
    Control(E),
}

impl<E> Default for Click<E> {
    fn default() -> Self {
        Click::Auto
    }
}

impl<E> From<bool> for Click<E> {
    fn from(force: bool) -> Self {
        if force {
            Click::Require
        } else {
            Click::Skip
        }
    }
}

impl<E> Click<E> {
    /// Click the first element of a selection, e.g. the result of a CSS query.
    /// Returns `None` for an empty selection.
    pub fn first_of<I>(selection: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
    {
        selection.into_iter().next().map(Click::Control)
    }
}

/// True for `<input type=submit|image>` and `<button>` without a type or with
/// `type=submit`. Type comparisons ignore ASCII case.
pub fn is_submit_control<E: Element>(element: &E) -> bool {
    let kind = element.attr("type");
    match element.tag_name() {
        "input" => kind.is_some_and(|t| {
            t.eq_ignore_ascii_case("submit") || t.eq_ignore_ascii_case("image")
        }),
        "button" => kind.map_or(true, |t| t.eq_ignore_ascii_case("submit")),
        _ => false,
    }
}

pub fn resolve_click<E: Element>(form: &Form<E>, click: &Click<E>) -> Result<Option<E>, FormError> {
    let required = match click {
        Click::Skip => return Ok(None),
        Click::Control(control) => return Ok(Some(control.clone())),
        Click::Auto => false,
        Click::Require => true,
    };
    match form.descendants().into_iter().find(is_submit_control) {
        Some(control) => {
            debug!(
                tag = control.tag_name(),
                name = control.attr("name"),
                "clicking first submit control"
            );
            Ok(Some(control))
        }
        None if required => Err(FormError::NoSubmitControl),
        None => Ok(None),
    }
}
